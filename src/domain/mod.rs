// Domain layer: data model and ports (collaborator interfaces).

pub mod model;
pub mod ports;
