//! Registers services on the process-wide container and consumes them through injected fields.
//! Run with `RUST_LOG=providence=trace` to see every registration and resolution.

use providence::{dependency, Injected};
use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};
use tracing_subscriber::EnvFilter;

trait Storage: Send + Sync {
    fn load(&self, key: &str) -> Option<String>;
}

struct InMemoryStorage;
impl Storage for InMemoryStorage {
    fn load(&self, key: &str) -> Option<String> {
        (key == "motd").then(|| "Welcome back".to_owned())
    }
}

#[derive(Debug)]
struct RequestId(u64);
dependency!(RequestId);

#[derive(Default)]
struct Handler {
    storage: Injected<Arc<dyn Storage>>,
    request_id: Injected<RequestId>,
    theme: Injected<Option<String>>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    static NEXT_ID: AtomicU64 = AtomicU64::new(1);
    providence::configure(|c| {
        c.register_shared::<Arc<dyn Storage>>(Arc::new(InMemoryStorage));
        c.register_factory(|| RequestId(NEXT_ID.fetch_add(1, Ordering::Relaxed)));
    });

    for _ in 0..2 {
        let handler = Handler::default();
        println!(
            "{:?}: {} (theme: {})",
            *handler.request_id,
            handler.storage.load("motd").unwrap_or_default(),
            handler.theme.as_deref().unwrap_or("default")
        );
    }
}
