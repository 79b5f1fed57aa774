use rolegate_core::constants::ROLEGATE_LOG_VAR;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

// Re-export tracing macros for convenience
pub use tracing::{debug, error, info, instrument, span, trace, warn, Level, Span};

/// Initialize the tracing system
///
/// The filter comes from `ROLEGATE_LOG`, then `RUST_LOG`, and defaults to
/// `info`. Output goes to stderr in the compact format; ANSI colours are
/// only used when stderr is a terminal.
pub fn init() -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
    let filter = env_filter()?;

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(is_tty())
        .compact()
        .with_target(false)
        .with_thread_ids(false)
        .with_level(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

fn env_filter() -> Result<EnvFilter, Box<dyn std::error::Error + Send + Sync + 'static>> {
    if let Ok(directives) = std::env::var(ROLEGATE_LOG_VAR) {
        return Ok(EnvFilter::try_new(directives)?);
    }
    Ok(EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?)
}

/// Check if we're running in a TTY environment
fn is_tty() -> bool {
    std::io::IsTerminal::is_terminal(&std::io::stderr())
}
