use std::fmt;
use std::fmt::Debug;
use std::hash::Hash;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A unique ID of a sensor in the digital twin.
#[derive(
    Deserialize, Serialize, Default, Clone, Copy, PartialOrd, Ord, PartialEq, Eq, Hash,
)]
pub struct SensorId(u32);

impl fmt::Display for SensorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Debug for SensorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SensorId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = s.parse::<u32>()?;
        Ok(Self(id))
    }
}

impl From<u32> for SensorId {
    fn from(f: u32) -> Self {
        Self(f)
    }
}

impl SensorId {
    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

/// A unique ID of a fog node. The cloud uses a reserved ID that never collides with the
/// fog nodes created by the initializers or the scenarios.
#[derive(
    Deserialize, Serialize, Default, Clone, Copy, PartialOrd, Ord, PartialEq, Eq, Hash,
)]
pub struct NodeId(u32);

impl NodeId {
    pub const CLOUD: NodeId = NodeId(u32::MAX);

    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for NodeId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = s.parse::<u32>()?;
        Ok(Self(id))
    }
}

impl From<u32> for NodeId {
    fn from(f: u32) -> Self {
        Self(f)
    }
}

/// The tier a compute node belongs to. Sensors live in the IoT tier and are not listed here.
#[derive(Deserialize, Serialize, Debug, Hash, Copy, Default, Clone, PartialEq, Eq)]
pub enum NodeTier {
    #[default]
    Fog,
    Cloud,
}

impl fmt::Display for NodeTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeTier::Fog => write!(f, "Fog"),
            NodeTier::Cloud => write!(f, "Cloud"),
        }
    }
}

/// Kind of entity that is placed in the environment. Used for error reporting.
#[derive(Serialize, Debug, Hash, Copy, Clone, PartialEq, Eq)]
pub enum DeviceKind {
    Sensor,
    FogNode,
}

impl fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceKind::Sensor => write!(f, "Sensor"),
            DeviceKind::FogNode => write!(f, "FogNode"),
        }
    }
}

/// Position in metres on the plane of the environment.
#[derive(Deserialize, Serialize, Clone, Copy, Debug, Default, PartialEq)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Point2D) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn offset(&self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

impl fmt::Display for Point2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x, self.y)
    }
}
