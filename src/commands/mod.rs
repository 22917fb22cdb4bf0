// Query commands
pub mod call;
pub mod info;
pub mod serve;

// Configuration
pub mod config;
