//! The process-wide default container.

use crate::Container;
use once_cell::sync::Lazy;

static DEFAULT_CONTAINER: Lazy<Container> = Lazy::new(Container::new);

/// Container used by [`Injected::new`](crate::Injected::new). It is created on first access
/// and lives for the rest of the process.
pub fn global() -> &'static Container {
    &DEFAULT_CONTAINER
}

/// Runs a bootstrap callback against the process-wide container.
///
/// ```
/// use std::sync::Arc;
///
/// providence::configure(|c| c.register_shared(Arc::new(String::from("Hello from global!"))));
/// assert!(providence::global().contains::<Arc<String>>());
/// ```
pub fn configure<TFn: FnOnce(&Container)>(block: TFn) {
    global().configure(block);
}
