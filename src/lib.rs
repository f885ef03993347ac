pub mod activity;
pub mod app;
pub mod blog;
pub mod github;
pub mod server;
pub mod ui;
pub mod util;
