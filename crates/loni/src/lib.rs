pub mod attachment;
pub mod chat_log;
pub mod conversation;
pub mod dispatch;
pub mod errors;
pub mod history;
pub mod models;
pub mod providers;
pub mod settings;
