// Domain layer: core models, typed payload views and ports (interfaces).

pub mod model;
pub mod ports;
pub mod schema;
