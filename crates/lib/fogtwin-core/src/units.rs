use std::fmt;
use std::ops::{Add, AddAssign, Mul};

use serde::{Deserialize, Serialize};

// Physical quantities used by the latency and energy models. All of them are stored as `f64`
// so that the formulas can be evaluated without conversions.
macro_rules! unit {
    ($(#[$doc:meta])* $name:ident, $suffix:literal) => {
        $(#[$doc])*
        #[derive(Deserialize, Serialize, Default, Debug, Clone, Copy, PartialEq, PartialOrd)]
        pub struct $name(f64);

        impl $name {
            pub const fn new(value: f64) -> Self {
                Self(value)
            }
            pub fn as_f64(&self) -> f64 {
                self.0
            }
        }

        impl From<f64> for $name {
            fn from(value: f64) -> Self {
                Self(value)
            }
        }

        impl Add for $name {
            type Output = Self;

            fn add(self, other: Self) -> Self::Output {
                Self(self.0 + other.0)
            }
        }

        impl AddAssign for $name {
            fn add_assign(&mut self, other: Self) {
                self.0 += other.0;
            }
        }

        impl Mul<f64> for $name {
            type Output = Self;

            fn mul(self, factor: f64) -> Self::Output {
                Self(self.0 * factor)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{}", self.0, $suffix)
            }
        }
    };
}

unit!(
    /// Transmission or noise power.
    Watts,
    "W"
);
unit!(
    /// Message generation rate of a sensor.
    Hertz,
    "Hz"
);
unit!(
    /// Size of a single message on the air interface.
    MegaBytes,
    "MB"
);
unit!(
    /// Instructions needed to process a single message.
    MegaInstructions,
    "MI"
);
unit!(
    /// Processing capacity of a node.
    Mips,
    "MIPS"
);
unit!(
    /// Radio bandwidth of a node.
    MegaHertz,
    "MHz"
);
unit!(
    /// Carrier frequency of a node.
    GigaHertz,
    "GHz"
);
unit!(Energy, "J");
unit!(
    /// Queueing delay factor `ρ/(1-ρ)` of a node. Unit-less, but reported as latency.
    Latency,
    ""
);

impl Latency {
    /// Reserved value for a candidate node whose latency could not be evaluated.
    pub const INFINITE: Latency = Latency(f64::INFINITY);

    pub fn is_infinite(&self) -> bool {
        !self.0.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn units_add_and_scale() {
        let mut energy = Energy::new(1.5) + Energy::from(0.5);
        energy += Energy::new(1.0);
        assert_eq!((energy * 2.0).as_f64(), 6.0);
        assert_eq!(Mips::new(2000.0).to_string(), "2000MIPS");
        assert!(Latency::INFINITE.is_infinite());
        assert!(!Latency::default().is_infinite());
    }
}
