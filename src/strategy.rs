use alloc::{boxed::Box, sync::Arc};
use core::{any::Any, fmt};

type SharedInstance = Arc<dyn Any + Send + Sync>;
type Producer = Arc<dyn Fn() -> Box<dyn Any> + Send + Sync>;

/// Recipe stored for an identity. Cloning is cheap, so a strategy can be
/// copied out of the container's critical section before it is materialized.
#[derive(Clone)]
pub(crate) enum Strategy {
    Shared {
        instance: SharedInstance,
        clone_instance: fn(&(dyn Any + Send + Sync)) -> Box<dyn Any>,
    },
    Factory(Producer),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyKind {
    Shared,
    Factory,
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StrategyKind::Shared => f.write_str("shared"),
            StrategyKind::Factory => f.write_str("factory"),
        }
    }
}

impl Strategy {
    pub fn shared<T: Any + Clone + Send + Sync>(instance: T) -> Self {
        fn clone_instance<T: Any + Clone>(instance: &(dyn Any + Send + Sync)) -> Box<dyn Any> {
            match instance.downcast_ref::<T>() {
                Some(x) => Box::new(x.clone()),
                None => unreachable!("Shared instance is always stored with its own clone function"),
            }
        }

        Strategy::Shared {
            instance: Arc::new(instance),
            clone_instance: clone_instance::<T>,
        }
    }

    pub fn factory<T: Any, TFn: Fn() -> T + Send + Sync + 'static>(producer: TFn) -> Self {
        Strategy::Factory(Arc::new(move || Box::new(producer()) as Box<dyn Any>))
    }

    pub fn kind(&self) -> StrategyKind {
        match self {
            Strategy::Shared { .. } => StrategyKind::Shared,
            Strategy::Factory(_) => StrategyKind::Factory,
        }
    }

    /// Shared strategies hand out a clone of their instance, factories run
    /// their producer on every call.
    pub fn materialize(&self) -> Box<dyn Any> {
        match self {
            Strategy::Shared {
                instance,
                clone_instance,
            } => (clone_instance)(&**instance),
            Strategy::Factory(producer) => (producer)(),
        }
    }
}

impl fmt::Debug for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Strategy({})", self.kind())
    }
}
