pub mod calendar;
pub mod contracts;
pub mod entitlement;
pub mod grounding;
pub mod payment;
pub mod tojeong;

pub use crate::domain::model::{ContractMode, ContractResult, EntitlementState, GroundingFact};
pub use crate::domain::ports::{CalendarIndexProvider, GenerativeProvider, RecordStore};
pub use crate::utils::error::Result;
