use crate::device::DeviceKind;

/// Errors raised while populating the digital twin. They are fatal only to the call that
/// tried to insert the offending entity, the environment itself stays unchanged.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TwinError {
    #[error("{kind} {id} at ({x}, {y}) is outside the environment bounds {width}x{height}")]
    BoundsViolation {
        kind: DeviceKind,
        id: u32,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    #[error("{kind} {id} is already present in the environment")]
    DuplicateId { kind: DeviceKind, id: u32 },
}
