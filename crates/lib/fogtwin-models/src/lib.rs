#![forbid(unsafe_code)]

pub mod device;
pub mod metrics;
pub mod net;
pub mod placement;
pub mod scenario;
