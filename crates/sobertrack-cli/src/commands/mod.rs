pub mod config;
pub mod notify;
pub mod quote;
pub mod streak;
