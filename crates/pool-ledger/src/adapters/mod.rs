//! Adapters implementing the outbound ports.

pub mod publisher;
pub mod vault;

pub use publisher::{LedgerEventPublisher, NoOpPublisher, PublishError, RecordingPublisher};
pub use vault::InMemoryVault;
