use crate::Identity;

/// Reasons a dependency could not be resolved.
///
/// [`Container::resolve`](crate::Container::resolve) treats both as fatal and panics with the
/// message below. [`Container::try_resolve`](crate::Container::try_resolve) returns them instead.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    #[error("Dependency '{identity}' not resolved!")]
    NotRegistered { identity: Identity },
    #[error("Dependency '{identity}' cannot be viewed as '{expected}'")]
    TypeMismatch {
        identity: Identity,
        expected: &'static str,
    },
}

impl ResolveError {
    pub fn identity(&self) -> &Identity {
        match self {
            ResolveError::NotRegistered { identity } => identity,
            ResolveError::TypeMismatch { identity, .. } => identity,
        }
    }
}
