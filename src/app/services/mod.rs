// Boundary services: compose the pure core with injected ports and log outcomes.

pub mod entitlement_service;
pub mod interpret_service;
pub mod payment_service;
