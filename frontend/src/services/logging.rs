//! Browser logging: `tracing` events go to the console, panics too.

pub fn init_logging() {
    console_error_panic_hook::set_once();
    wasm_tracing::set_as_global_default();
}
