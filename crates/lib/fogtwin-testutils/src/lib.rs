pub mod devices;
pub mod twin;
