mod app;
mod config;
mod logging;
mod settings;

pub use app::{run, run_from_args};
pub use config::RuntimeConfig;
