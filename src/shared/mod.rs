// 共有モジュール
pub mod api_client;
pub mod config;
pub mod errors;
pub mod ui;
pub mod utils;
