use tracing_subscriber::{filter::LevelFilter, EnvFilter};

/// Installs the global subscriber.
///
/// `RUST_LOG` wins over the verbosity flag when set.
pub fn setup_tracing(verbosity_level: u8, json: bool) {
    let level = match verbosity_level {
        0 => LevelFilter::INFO,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    let subscriber = tracing_subscriber::fmt().with_env_filter(filter);
    if json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}
