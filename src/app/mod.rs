pub mod services;

pub use services::entitlement_service::EntitlementService;
pub use services::interpret_service::{InterpretRequest, InterpretService, PremiumRequest};
pub use services::payment_service::verify_payment_request;
