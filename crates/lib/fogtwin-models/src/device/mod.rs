pub mod capacity;
pub mod energy;
