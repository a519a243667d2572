pub mod aggregate;
pub mod api;
pub mod config;
pub mod filter;
pub mod fleet;
pub mod logging;
pub mod record;
pub mod resolve;
pub mod session;
pub mod storage;
