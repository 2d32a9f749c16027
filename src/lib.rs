// src/lib.rs

pub mod api;
pub mod app;
pub mod chat_message;
pub mod config;
pub mod constants;
pub mod errors;
pub mod key_handlers;
pub mod logging;
pub mod models;
pub mod resolver;
pub mod responses;
pub mod session;
pub mod settings;
pub mod status_indicator;
pub mod storage;
pub mod ui;

pub use app::{App, AppScreen};
pub use errors::{AssistantError, AssistantResult};
