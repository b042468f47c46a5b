// src/log.rs
//
// Library code logs through `tracing`; the short macros below keep call
// sites compact. Installing a subscriber is the binary's job (`init`).

/// Info-level logging
#[macro_export]
macro_rules! logf {
    ($($arg:tt)*) => {
        ::tracing::info!($($arg)*)
    };
}

/// Debug-level logging
#[macro_export]
macro_rules! logd {
    ($($arg:tt)*) => {
        ::tracing::debug!($($arg)*)
    };
}

/// Map `-v` repetitions to a default filter directive for this crate.
pub fn level_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "credstats=warn",
        1 => "credstats=info",
        2 => "credstats=debug",
        _ => "credstats=trace",
    }
}

/// Install a stderr fmt subscriber. `RUST_LOG` wins over `verbosity`.
/// Calling it twice is harmless; the second call is ignored.
#[cfg(feature = "cli")]
pub fn init(verbosity: u8) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_for(verbosity)));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init();
}
