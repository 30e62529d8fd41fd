pub mod app;
pub mod batch;
pub mod config;
pub mod display;
pub mod logging;
pub mod session;
pub mod utils;
