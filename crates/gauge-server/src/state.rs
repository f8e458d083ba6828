use gauge_core::config::ServerConfig;
use gauge_core::engine::Dispatcher;
use std::sync::Arc;
use std::time::Instant;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub struct AppState {
    pub dispatcher: Dispatcher,
    pub started_at: Instant,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    /// Wire the built-in vocabulary to the configured judge backend.
    pub fn from_config(cfg: &ServerConfig) -> SharedState {
        let judge = gauge_metrics::judge::from_config(&cfg.judge);
        let registry = Arc::new(gauge_metrics::builtin_registry(judge));
        Arc::new(Self {
            dispatcher: Dispatcher::new(registry, cfg.engine.clone()),
            started_at: Instant::now(),
        })
    }

    pub fn uptime_secs(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}
