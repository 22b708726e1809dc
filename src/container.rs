use crate::{
    error::ResolveError,
    identity::{Dependency, Identity},
    strategy::{Strategy, StrategyKind},
};
use core::{any::type_name, fmt};
use parking_lot::Mutex;
use std::collections::HashMap;
use tracing::{debug, error, trace};

/// Maps dependency identities to the strategy producing their instances.
///
/// Registrations can be added at any time and from any thread. The last
/// registration for an identity wins.
/// ```
/// use providence::Container;
/// use std::sync::Arc;
///
/// let container = Container::new();
/// container.register_shared(Arc::new(String::from("shared")));
/// container.register_factory(|| 42u32);
///
/// assert_eq!("shared", container.resolve::<Arc<String>>().as_str());
/// assert_eq!(Some(42), container.resolve::<Option<u32>>());
/// assert_eq!(None, container.resolve::<Option<u64>>());
/// ```
pub struct Container {
    registrations: Mutex<HashMap<Identity, Strategy>>,
}

impl Default for Container {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_fmt(format_args!("Container (services: {})", self.len()))
    }
}

impl Container {
    pub fn new() -> Self {
        Self {
            registrations: Mutex::new(HashMap::new()),
        }
    }

    /// Runs a bootstrap callback which populates this container.
    pub fn configure<TFn: FnOnce(&Self)>(&self, block: TFn) -> &Self {
        block(self);
        self
    }

    /// Registers an instance which is cloned for every resolution. Use an `Arc` to hand out the
    /// same object to every consumer.
    pub fn register_shared<T>(&self, instance: T)
    where
        T: Dependency<Target = T> + Clone + Send + Sync,
    {
        self.insert(T::identity(), Strategy::shared(instance));
    }

    /// Registers a producer which is called on every resolution, but never during registration.
    pub fn register_factory<T, TFn>(&self, producer: TFn)
    where
        T: Dependency<Target = T>,
        TFn: Fn() -> T + Send + Sync + 'static,
    {
        self.insert(T::identity(), Strategy::factory(producer));
    }

    /// Resolves `D` or panics if it's neither registered nor optional.
    ///
    /// Requesting `Option<T>` never panics for missing registrations, it returns `None` instead.
    /// A missing required dependency is a configuration bug which cannot be recovered from at
    /// the call site. The panic only unwinds the calling thread, so a call off the main thread
    /// stops the process only if the binary is built with `panic = "abort"`.
    pub fn resolve<D: Dependency>(&self) -> D {
        match self.try_resolve::<D>() {
            Ok(x) => x,
            Err(e) => {
                error!(dependency = e.identity().name(), "{}", e);
                panic!("{}", e)
            }
        }
    }

    /// Same lookup as [`Container::resolve`], but reports failures as values.
    pub fn try_resolve<D: Dependency>(&self) -> Result<D, ResolveError> {
        let identity = D::identity();
        // The lock must be released before materializing: producers may resolve their own
        // dependencies from this container.
        let strategy = self.registrations.lock().get(&identity).cloned();

        let strategy = match strategy {
            Some(x) => x,
            None => {
                trace!(dependency = identity.name(), "Dependency is not registered");
                return D::absent().ok_or(ResolveError::NotRegistered { identity });
            }
        };

        trace!(
            dependency = identity.name(),
            strategy = %strategy.kind(),
            "Resolving dependency"
        );
        match strategy.materialize().downcast::<D::Target>() {
            Ok(target) => Ok(D::from_target(*target)),
            Err(_) => Err(ResolveError::TypeMismatch {
                identity,
                expected: type_name::<D::Target>(),
            }),
        }
    }

    pub fn contains<D: Dependency>(&self) -> bool {
        self.registrations.lock().contains_key(&D::identity())
    }

    /// How `D` would be produced, if it's registered.
    pub fn strategy_kind<D: Dependency>(&self) -> Option<StrategyKind> {
        self.registrations
            .lock()
            .get(&D::identity())
            .map(Strategy::kind)
    }

    pub fn len(&self) -> usize {
        self.registrations.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn insert(&self, identity: Identity, strategy: Strategy) {
        let kind = strategy.kind();
        let replaced = self.registrations.lock().insert(identity, strategy);
        debug!(
            dependency = identity.name(),
            strategy = %kind,
            replaced = replaced.is_some(),
            "Registered dependency"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    #[test]
    fn resolve_shared_keeps_identity() {
        let container = Container::new();
        let orig = Arc::new(AtomicUsize::new(1));
        container.register_shared(orig.clone());

        let first = container.resolve::<Arc<AtomicUsize>>();
        let second = container.resolve::<Arc<AtomicUsize>>();
        assert!(Arc::ptr_eq(&orig, &first));
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn register_factory_does_not_invoke_producer() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let container = Container::new();
        container.register_factory(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Arc::new(())
        });
        assert_eq!(0, calls.load(Ordering::SeqCst));

        let first = container.resolve::<Arc<()>>();
        let second = container.resolve::<Arc<()>>();
        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(2, calls.load(Ordering::SeqCst));
    }

    #[test]
    fn reregistering_replaces() {
        let container = Container::new();
        container.register_shared(1i32);
        container.register_factory(|| 2i32);
        assert_eq!(2, container.resolve::<i32>());
        container.register_shared(3i32);
        assert_eq!(3, container.resolve::<i32>());
        assert_eq!(1, container.len());
    }

    #[test]
    fn try_resolve_reports_missing_identity() {
        let container = Container::new();
        let err = container.try_resolve::<String>().unwrap_err();
        assert_eq!(
            ResolveError::NotRegistered {
                identity: Identity::of::<String>()
            },
            err
        );
        assert_eq!(
            "Dependency 'alloc::string::String' not resolved!",
            err.to_string()
        );
        assert_eq!(Ok(None), container.try_resolve::<Option<String>>());
    }

    #[test]
    fn type_mismatch_is_reported() {
        let container = Container::new();
        let identity = Identity::of::<u8>();
        container
            .registrations
            .lock()
            .insert(identity, Strategy::shared(String::from("not a byte")));

        match container.try_resolve::<u8>() {
            Err(ResolveError::TypeMismatch { identity: i, expected }) => {
                assert_eq!(identity, i);
                assert_eq!("u8", expected);
            }
            other => panic!("Unexpected result {:?}", other),
        }
    }

    #[test]
    #[should_panic(expected = "cannot be viewed as 'u8'")]
    fn resolve_panics_on_type_mismatch() {
        let container = Container::new();
        container
            .registrations
            .lock()
            .insert(Identity::of::<u8>(), Strategy::factory(|| 1u16));
        container.resolve::<u8>();
    }

    #[test]
    fn contains_unwraps_optionals() {
        let container = Container::new();
        assert!(container.is_empty());
        container.register_shared(5u64);
        assert!(container.contains::<u64>());
        assert!(container.contains::<Option<u64>>());
        assert!(!container.contains::<u32>());
    }

    #[test]
    fn strategy_kind_of_registration() {
        let container = Container::new();
        container.register_shared(1u8);
        container.register_factory(|| 1u16);
        assert_eq!(Some(StrategyKind::Shared), container.strategy_kind::<u8>());
        assert_eq!(Some(StrategyKind::Factory), container.strategy_kind::<Option<u16>>());
        assert_eq!(None, container.strategy_kind::<u32>());
    }

    #[test]
    fn configure_runs_block_against_container() {
        let container = Container::new();
        container
            .configure(|c| c.register_shared(7u16))
            .configure(|c| c.register_factory(|| 'x'));
        assert_eq!(7, container.resolve::<u16>());
        assert_eq!('x', container.resolve::<char>());
    }

    #[test]
    fn debug_lists_service_count() {
        let container = Container::new();
        container.register_shared(1u8);
        container.register_shared(1u16);
        assert_eq!("Container (services: 2)", format!("{:?}", container));
    }
}
