//! Backend access layer: HTTP client, recurring polls, and task ownership.

pub mod client;
pub mod manager;
pub mod poller;
pub mod types;
