pub mod config;
pub mod contact;
pub mod content;
pub mod error;
pub mod listing;
pub mod logger;
pub mod paginator;
pub mod query_string;
pub mod server;
pub mod store;
pub mod theme;
pub mod view;
mod test_data;
