//! # Runtime dependency registry with lazy injection
//!
//! Complete example:
//! ```
//! use providence::{Container, Injected};
//! use std::sync::Arc;
//!
//! trait Clock: Send + Sync {
//!     fn now(&self) -> u64;
//! }
//! struct Fixed(u64);
//! impl Clock for Fixed {
//!     fn now(&self) -> u64 {
//!         self.0
//!     }
//! }
//!
//! let container = Arc::new(Container::new());
//! container.configure(|c| {
//!     c.register_shared::<Arc<dyn Clock>>(Arc::new(Fixed(42)));
//!     c.register_factory(|| String::from("fresh on every resolve"));
//! });
//!
//! assert_eq!(42, container.resolve::<Arc<dyn Clock>>().now());
//! assert_eq!(Some(42), container.resolve::<Option<Arc<dyn Clock>>>().map(|c| c.now())); // Same registration
//! assert_eq!(None, container.resolve::<Option<u8>>()); // Optional and missing
//!
//! let clock = Injected::<Arc<dyn Clock>>::from_container(container.clone());
//! assert_eq!(42, clock.now()); // Resolved on first access, cached afterwards
//! ```
//! # Notes
//! - Registering the same type again replaces the previous registration
//! - `Option<T>` is registered and resolved under the identity of `T`
//! - Resolving a missing, non-optional dependency panics with the type's full name
//! - Factories run outside of the container's lock and may resolve their own dependencies

extern crate alloc;

mod container;
mod error;
#[cfg(feature = "global")]
mod global;
mod identity;
mod injected;
mod scope;
mod strategy;

pub use {
    container::Container,
    error::ResolveError,
    identity::{identity_of, Dependency, Identity},
    injected::Injected,
    scope::{Dependencies, Scoped},
    strategy::StrategyKind,
};

#[cfg(feature = "global")]
pub use global::{configure, global};
