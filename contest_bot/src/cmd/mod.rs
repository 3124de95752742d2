pub mod query;
pub mod server;
