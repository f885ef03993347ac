pub mod browser;
pub mod config;
pub mod time;
