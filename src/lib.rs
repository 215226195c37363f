pub mod alert;
pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod logging;
pub mod region;
pub mod services;
