use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Route diagnostics to stderr.
///
/// The global level is WARN, or DEBUG with `--verbose`. That level replaces
/// any bare level in `RUST_LOG`, so only its target-scoped directives
/// (e.g. `wordforge=trace`) take effect.
pub fn init_logging(verbose: bool) {
    let env_directives = std::env::var(EnvFilter::DEFAULT_ENV).unwrap_or_default();

    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(log_filter(verbose, &env_directives))
        .try_init();
}

fn log_filter(verbose: bool, env_directives: &str) -> EnvFilter {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    EnvFilter::new(env_directives).add_directive(level.into())
}
