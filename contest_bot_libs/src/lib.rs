pub mod api;
pub mod codeforces;
pub mod config;
pub mod contests;
pub mod dispatch;

pub use api::MessageHandler;
pub use config::BotConfig;
pub use dispatch::Dispatcher;
