pub mod config;
pub mod engine;
pub mod games;
pub mod logger;
