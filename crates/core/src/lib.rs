pub mod config;
pub mod task;

pub use config::Config;
pub use task::*;
