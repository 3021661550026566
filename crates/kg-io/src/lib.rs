//! File formats for Kartograf: room import, layout plans and world export.
//!
//! The world graph in `kg-core` never touches the filesystem; this crate
//! turns room files into [`kg_core::RoomFragment`] values and placed worlds
//! back into the game's world document.

/// Item and music catalogues.
pub mod catalog;
/// Error types for file handling.
pub mod error;
/// World document export.
pub mod export;
/// Room file import and door position normalization.
pub mod import;
/// Layout plans.
pub mod plan;

pub use error::{IoError, IoResult};
pub use export::{DirectionEncoding, ExportOptions, export_world, write_world};
pub use import::{parse_room, read_room};
pub use plan::{LayoutPlan, LoadedPlan, read_plan};
