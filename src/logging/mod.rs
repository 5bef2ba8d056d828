use tracing::level_filters::LevelFilter;
use tracing_wasm::WASMLayerConfigBuilder;

/// Route panics and `tracing` events to the browser console.
///
/// Call once at startup; `LevelFilter::OFF` installs only the panic hook.
pub(crate) fn init(level: LevelFilter) {
    console_error_panic_hook::set_once();

    let Some(max_level) = level.into_level() else {
        return;
    };
    let config = WASMLayerConfigBuilder::new()
        .set_max_level(max_level)
        .set_report_logs_in_timings(false)
        .build();
    tracing_wasm::set_as_global_default_with_config(config);
}
