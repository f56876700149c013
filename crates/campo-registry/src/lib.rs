//! # campo-registry — Producer Records, Review Policy, and Dashboard
//!
//! Typed records for the rural producer registry (producer → farms → crops)
//! and the pure logic that sits around them in the client:
//!
//! - [`model`]: records as the registry API returns them, drafts for
//!   create/edit, and partial updates.
//! - [`config`]: how strictly area problems are treated.
//! - [`review`]: runs the `campo-core` rules over a draft and collects
//!   issues with typed field paths.
//! - [`form`]: index-addressed editing of a producer draft, with inline
//!   identifier masking and a submission gate.
//! - [`dashboard`]: aggregate statistics over a set of producers.
//!
//! ## Crate Policy
//!
//! - No persistence and no network calls. Callers own the transport.
//! - Decisions are logged with `tracing` where they are made. Subscriber
//!   setup belongs to the embedding binary.
//! - Taxpayer identifiers are never written to logs.

pub mod config;
pub mod dashboard;
pub mod error;
pub mod form;
pub mod model;
pub mod review;

pub use config::{AreaPolicy, RegistryConfig};
pub use dashboard::{DashboardStats, LandUse};
pub use error::RegistryError;
pub use form::ProducerForm;
pub use model::{
    find_by_tax_id, Crop, CropDraft, CropId, Farm, FarmDraft, FarmId, FarmUpdate, Producer,
    ProducerDraft, ProducerId, ProducerUpdate,
};
pub use review::{review_farm, review_producer, FieldPath, Issue, Review, Severity};
