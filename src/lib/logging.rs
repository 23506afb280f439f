//! Console logging for the browser build. Events go through `tracing` like the
//! rest of the crate and are written to the devtools console.

use tracing::level_filters::LevelFilter;

/// Maps a configured level name to a filter. Unknown names fall back to `INFO`.
#[must_use]
pub fn level_filter(level: &str) -> LevelFilter {
    match level.trim().to_ascii_lowercase().as_str() {
        "off" => LevelFilter::OFF,
        "error" => LevelFilter::ERROR,
        "warn" | "warning" => LevelFilter::WARN,
        "debug" => LevelFilter::DEBUG,
        "trace" => LevelFilter::TRACE,
        _ => LevelFilter::INFO,
    }
}

/// Installs the panic hook and a console subscriber. Safe to call more than once.
#[cfg(target_arch = "wasm32")]
pub fn init(level: &str) {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};
    use tracing_web::MakeWebConsoleWriter;

    console_error_panic_hook::set_once();

    let fmt_layer = fmt::layer()
        .with_ansi(false)
        .without_time()
        .with_target(false)
        .with_writer(MakeWebConsoleWriter::new());

    // A second call finds a subscriber already set; keep the first one.
    let _ = tracing_subscriber::registry()
        .with(fmt_layer)
        .with(level_filter(level))
        .try_init();
}
