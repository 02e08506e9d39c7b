//! Configuration schema: breakpoint tiers, field identifiers and the
//! typed configuration snapshot.

pub mod breakpoint;
pub mod field;
pub mod snapshot;

pub use breakpoint::{Breakpoint, PerBreakpoint};
pub use field::{ContainerField, FieldPath, ItemField, Scope};
pub use snapshot::{
    AutoFlow, ContainerOverrides, ContainerValues, ContentAlignment, ItemAlignment, ItemConfig,
    ItemOverrides, ItemTag, PlacementFields, PlacementType, Snapshot,
};
