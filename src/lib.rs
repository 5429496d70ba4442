pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod graphql;
pub mod logging;
pub mod metrics;
pub mod search;
pub mod server;
pub mod storage;
