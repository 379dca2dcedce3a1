//! Logger setup.
//!
//! Log records go to stdout through `fern`, stamped with the local time.

use std::str::FromStr;
use std::sync::Once;

use log::LevelFilter;

static INIT: Once = Once::new();

/// Picks the log level: a plain level in `RUST_LOG` wins over the configured one, and
/// anything unparseable falls back to `info`.
pub fn resolve_level(env: Option<&str>, configured: &str) -> LevelFilter {
    env.and_then(|value| LevelFilter::from_str(value.trim()).ok())
        .or_else(|| LevelFilter::from_str(configured.trim()).ok())
        .unwrap_or(LevelFilter::Info)
}

/// Installs the global logger. Later calls do nothing.
pub fn init(level: LevelFilter) {
    INIT.call_once(|| {
        let result = fern::Dispatch::new()
            .format(|out, message, record| {
                out.finish(format_args!(
                    "[{} {} {}] {}",
                    chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                    record.level(),
                    record.target(),
                    message
                ))
            })
            .level(level)
            .chain(std::io::stdout())
            .apply();

        if let Err(e) = result {
            eprintln!("failed to install logger: {e}");
        }
    });
}
