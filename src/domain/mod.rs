// Domain layer: value objects and ports. The carrier-specific logic lives in `core`.

pub mod model;
pub mod ports;
