/// Installs the global subscriber. Safe to call more than once; later calls are ignored.
#[cfg(not(target_arch = "wasm32"))]
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .try_init();
}

#[cfg(target_arch = "wasm32")]
pub fn init_tracing() {
    let _ = tracing_wasm::try_set_as_global_default();
}
