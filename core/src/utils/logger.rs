use tracing::{debug, error, info, warn};
use tracing_subscriber::{
    fmt::{self, time::ChronoUtc},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

/// Initialize logging for binaries embedding the core
pub fn init_logger() -> anyhow::Result<()> {
    let timer = ChronoUtc::rfc_3339();

    let format_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_timer(timer)
        .compact();

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("realticker=info,realticker_core=info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(format_layer)
        .try_init()?;

    Ok(())
}

/// Logger tagging every line with the component it belongs to
#[derive(Debug, Clone)]
pub struct Logger {
    context: String,
}

impl Logger {
    pub fn new(context: &str) -> Self {
        Self {
            context: context.to_string(),
        }
    }

    pub fn context(&self) -> &str {
        &self.context
    }

    pub fn info(&self, message: &str) {
        info!("{}: {}", self.context, message);
    }

    pub fn warn(&self, message: &str) {
        warn!("{}: {}", self.context, message);
    }

    pub fn warn_with_error(&self, message: &str, error: &dyn std::error::Error) {
        warn!("{}: {}: {}", self.context, message, error);
    }

    pub fn error(&self, message: &str) {
        error!("{}: {}", self.context, message);
    }

    pub fn debug(&self, message: &str) {
        debug!("{}: {}", self.context, message);
    }

    pub fn debug_with_data<T>(&self, message: &str, data: T)
    where
        T: std::fmt::Debug,
    {
        debug!("{}: {} - {:?}", self.context, message, data);
    }
}

pub fn log_state_transition(context: &str, from: &str, to: &str, reason: &str) {
    info!(context, from, to, reason, "➡️ [TRANSITION] {} → {}", from, to);
}

/// [DISCARD] - Responses superseded by a newer request
pub fn log_stale_response(context: &str, slot: &str, issued: u64, current: u64) {
    debug!(
        context,
        slot,
        issued_generation = issued,
        current_generation = current,
        "DISCARD: stale {} response dropped",
        slot
    );
}

/// Request latency helper
pub struct Timer {
    start: std::time::Instant,
    name: String,
}

impl Timer {
    pub fn start(name: &str) -> Self {
        Self {
            start: std::time::Instant::now(),
            name: name.to_string(),
        }
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }

    pub fn log_elapsed(&self, context: &str) {
        debug!("{}: {} completed in {:.1}ms", context, self.name, self.elapsed_ms());
    }
}
