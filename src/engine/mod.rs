use log::info;

pub mod mem;
pub mod io;

/// Installs the `env_logger` backend (filter from `RUST_LOG`, default `info`).
/// Safe to call more than once.
pub fn init_engine() {
    let env = env_logger::Env::default().default_filter_or("info");
    if env_logger::Builder::from_env(env).try_init().is_ok() {
        info!("hybridkv engine initialized");
    }
}
