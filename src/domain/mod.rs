// Domain layer: entities, analysis records and ports (interfaces).

pub mod corpus;
pub mod model;
pub mod novel;
pub mod ports;
