use crate::{Container, Dependency};
use core::{fmt, ops::Deref};
use once_cell::unsync::OnceCell;
use std::sync::Arc;

enum Source {
    #[cfg(feature = "global")]
    Global,
    Owned(Arc<Container>),
}

impl Source {
    fn container(&self) -> &Container {
        match self {
            #[cfg(feature = "global")]
            Source::Global => crate::global(),
            Source::Owned(container) => container,
        }
    }
}

/// Field which resolves its value from a container on first access.
///
/// The value is resolved at most once per instance. [`Injected::set`] overrides it without
/// ever contacting the container, which is handy to replace dependencies in tests. Resolving
/// again requires a new `Injected`.
///
/// ```
/// use providence::{Container, Injected};
/// use std::sync::Arc;
///
/// struct Greeter {
///     name: Injected<Arc<str>>,
/// }
///
/// let container = Arc::new(Container::new());
/// container.register_shared::<Arc<str>>(Arc::from("world"));
///
/// let mut greeter = Greeter { name: Injected::from_container(container.clone()) };
/// assert_eq!("world", &**greeter.name);
///
/// greeter.name.set(Arc::from("test"));
/// assert_eq!("test", &**greeter.name.get());
/// ```
///
/// `Injected` is not `Sync`. Share its owner behind a lock if it's needed on multiple threads.
pub struct Injected<T: Dependency> {
    value: OnceCell<T>,
    source: Source,
}

impl<T: Dependency> Injected<T> {
    /// Binds to the process-wide container.
    #[cfg(feature = "global")]
    pub fn new() -> Self {
        Self {
            value: OnceCell::new(),
            source: Source::Global,
        }
    }

    pub fn from_container(container: Arc<Container>) -> Self {
        Self {
            value: OnceCell::new(),
            source: Source::Owned(container),
        }
    }

    pub fn get(&self) -> &T {
        self.value
            .get_or_init(|| self.source.container().resolve::<T>())
    }

    pub fn set(&mut self, value: T) {
        self.value = OnceCell::with_value(value);
    }

    pub fn is_resolved(&self) -> bool {
        self.value.get().is_some()
    }

    pub fn into_inner(self) -> T {
        let Self { value, source } = self;
        match value.into_inner() {
            Some(x) => x,
            None => source.container().resolve::<T>(),
        }
    }
}

#[cfg(feature = "global")]
impl<T: Dependency> Default for Injected<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Dependency> Deref for Injected<T> {
    type Target = T;

    fn deref(&self) -> &T {
        self.get()
    }
}

impl<T: Dependency + fmt::Debug> fmt::Debug for Injected<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Injected")
            .field("value", &self.value.get())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::sync::atomic::{AtomicUsize, Ordering};

    fn counting_container() -> (Arc<Container>, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let container = Arc::new(Container::new());
        container.register_factory(move || counter.fetch_add(1, Ordering::SeqCst) as u64);
        (container, calls)
    }

    #[test]
    fn resolves_once() {
        let (container, calls) = counting_container();
        let injected = Injected::<u64>::from_container(container);
        assert!(!injected.is_resolved());
        assert_eq!(0, calls.load(Ordering::SeqCst));

        assert_eq!(0, *injected.get());
        assert_eq!(0, *injected);
        assert_eq!(0, *injected.get());
        assert!(injected.is_resolved());
        assert_eq!(1, calls.load(Ordering::SeqCst));
    }

    #[test]
    fn set_before_read_skips_container() {
        let (container, calls) = counting_container();
        let mut injected = Injected::<u64>::from_container(container);
        injected.set(42);
        assert_eq!(42, *injected.get());
        assert_eq!(0, calls.load(Ordering::SeqCst));
    }

    #[test]
    fn set_after_read_overrides() {
        let (container, calls) = counting_container();
        let mut injected = Injected::<u64>::from_container(container);
        assert_eq!(0, *injected.get());
        injected.set(7);
        assert_eq!(7, *injected.get());
        assert_eq!(1, calls.load(Ordering::SeqCst));
    }

    #[test]
    fn into_inner_resolves_if_unresolved() {
        let (container, calls) = counting_container();
        assert_eq!(0, Injected::<u64>::from_container(container.clone()).into_inner());

        let mut injected = Injected::<u64>::from_container(container);
        injected.set(9);
        assert_eq!(9, injected.into_inner());
        assert_eq!(1, calls.load(Ordering::SeqCst));
    }

    #[test]
    fn optional_injection_of_missing_dependency_is_none() {
        let injected = Injected::<Option<String>>::from_container(Arc::new(Container::new()));
        assert_eq!(None, *injected.get());
    }

    #[test]
    fn debug_shows_cached_value() {
        let (container, _) = counting_container();
        let injected = Injected::<u64>::from_container(container);
        assert_eq!("Injected { value: None }", format!("{:?}", injected));
        injected.get();
        assert_eq!("Injected { value: Some(0) }", format!("{:?}", injected));
    }
}
