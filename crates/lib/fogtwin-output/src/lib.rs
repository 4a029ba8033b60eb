#![forbid(unsafe_code)]

pub mod error;
pub mod logger;
pub mod report;
pub mod writer;
