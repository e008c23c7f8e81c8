use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

pub const LOG_ENV: &str = "GOVAUDIT_LOG";

/// Installs the global subscriber. Filter comes from `GOVAUDIT_LOG`
/// (e.g. `govaudit_core=debug`), falling back to `info`. Logs go to stderr
/// so the console summary on stdout stays clean. Safe to call repeatedly.
pub fn init_tracing(json: bool) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

        let json_layer = json.then(|| {
            fmt::layer()
                .json()
                .with_target(true)
                .with_writer(std::io::stderr)
        });
        let text_layer = (!json).then(|| {
            fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr)
        });

        tracing_subscriber::registry()
            .with(filter)
            .with(json_layer)
            .with(text_layer)
            .init();
    });
}
