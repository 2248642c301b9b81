// Domain layer: question models and the ports the search core depends on.

pub mod model;
pub mod ports;
