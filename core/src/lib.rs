pub mod api;
pub mod config;
pub mod error;
pub mod gateway;
pub mod notify;
pub mod store;
pub mod task;
