// Domain layer: element/event/timer model and the host capability ports.

pub mod model;
pub mod ports;
