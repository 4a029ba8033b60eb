pub mod builder;
pub mod config;
pub mod engine;
pub mod runner;
