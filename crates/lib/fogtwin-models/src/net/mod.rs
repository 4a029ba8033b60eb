pub mod channel;
pub mod latency;
