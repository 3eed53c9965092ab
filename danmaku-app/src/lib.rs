pub mod app;
pub mod bootstrap;
pub mod config;
pub mod host;
pub mod listener;
pub mod notification;
pub mod overlay;
pub mod shutdown;

pub use bootstrap::{init_foundation, spawn_engine};
pub use shutdown::graceful_shutdown;
