#![forbid(unsafe_code)]

pub use indexmap;

pub mod assignment;
pub mod device;
pub mod dist;
pub mod entity;
pub mod environment;
pub mod error;
pub mod model;
pub mod units;
