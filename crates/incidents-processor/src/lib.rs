//! Event handlers for incident writes and customer reads.
//!
//! Handlers are registered in a [`HandlerRegistry`] against an
//! `(entity, phase)` pair. [`ProcessorService`] sequences each operation
//! explicitly: before-handlers, then persistence through the
//! [`RecordStore`](incidents_core::store::RecordStore), then
//! after-handlers fed with the persisted rows.
//!
//! The standard handler set:
//!
//! | Entity | Phase | Handler |
//! |--------|-------|---------|
//! | Incident | `BeforeCreate` | [`rules::UrgencyEscalation`] |
//! | Incident | `BeforeUpdate` | [`rules::ClosedIncidentGuard`] |
//! | Incident | `AfterWrite` | [`projection::CustomerCacheRefresh`] |
//! | Customer | `OnRead` | [`projection::CustomerReadThrough`] |

pub mod projection;
pub mod registry;
pub mod rules;
pub mod service;

pub use registry::{EntityKind, Handler, HandlerInput, HandlerRegistry, Phase};
pub use service::ProcessorService;

#[cfg(test)]
mod tests;
