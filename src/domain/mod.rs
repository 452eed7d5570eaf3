// Domain layer: value types, validated payloads and the reference lookup port.

pub mod model;
pub mod ports;
