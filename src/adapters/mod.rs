// Adapters layer: concrete implementations of the domain ports.

pub mod memory_store;
pub mod provider;

pub use memory_store::InMemoryRecordStore;
pub use provider::CannedProvider;
