pub mod api;
pub mod app;
pub mod config;
pub mod debt_list;
pub mod error;
pub mod filters;
pub mod format;
pub mod forms;
pub mod hooks;
pub mod logging;
pub mod models;
pub mod pages;
pub mod session;
pub mod storage;
pub mod tag_list;

pub use app::App;
