//! Domain model types

pub mod axle_table;
pub mod entry_state;
pub mod reference;

pub use axle_table::AxleRowTable;
pub use entry_state::{EntryEvent, EntryState, TemplateRequest};
pub use reference::ReferenceData;
