//! Livery Core Types and Resolution Primitives
//!
//! This crate provides the data model of the Livery aesthetic resolution
//! engine and the pure functions that resolve it. It includes:
//!
//! - **Values**: Colors ([`color::Color`]), dash patterns ([`dash::DashStyle`])
//!   and tri-state property slots ([`field`] module)
//! - **Leaf aesthetics**: Property bags per element kind ([`aesthetic::Aesthetic`])
//!   with parent-relative expressions ([`relative::Relative`])
//! - **State containers**: Base/select/hover triples ([`state::StateAesthetic`])
//!   and count-indexed alternatives ([`indexed::IndexedAesthetic`])
//! - **Group tables**: Keyed lookup with priority fallback ([`table`] module)
//! - **Wash**: The application-wide theme and library defaults ([`wash::Wash`])
//! - **Interaction**: Modes, selections and snapshots ([`mode`] module)
//! - **Flat maps**: Final per-region properties ([`flat::FlatAesthetic`])

pub mod aesthetic;
pub mod category;
pub mod color;
pub mod dash;
pub mod error;
pub mod field;
pub mod flat;
pub mod indexed;
pub mod mode;
pub mod property;
pub mod relative;
pub mod state;
pub mod table;
pub mod wash;
