// Domain layer: entities, the session context, pure aggregates and the ports the controllers depend on.

pub mod aggregate;
pub mod model;
pub mod ports;
pub mod session;
