//! Core world graph for Kartograf.
//!
//! Room fragments are placed onto an integer grid, their doors are linked to
//! facing doors of adjacent screens, spawn and elevator records are derived
//! from their content, and world statistics are kept in step. This crate does
//! no file I/O: fragments come from `kg-io` or are built programmatically.

/// Grid coordinates and door directions.
pub mod coord;
/// Error types used throughout the crate.
pub mod error;
/// Unplaced room fragments.
pub mod fragment;
/// Occupancy index of the world grid.
pub mod grid;
/// Door-to-door link resolution.
pub mod linker;
/// World-level settings.
pub mod meta;
/// Placed rooms, screens and doors.
pub mod room;
/// Spawn and elevator records derived from room content.
pub mod special;
/// Aggregate world counters.
pub mod stats;
/// The world graph that owns everything else.
pub mod world;

/// Re-export coordinate types.
pub use coord::{Coord, Direction};
/// Re-export error types.
pub use error::{KgError, KgResult};
/// Re-export fragment types.
pub use fragment::{DoorSpec, RoomFragment, ScreenFragment, WorldObject};
/// Re-export placed room types.
pub use room::{Door, DoorId, DoorLink, Room, RoomId, Screen};
/// Re-export world model types.
pub use world::{DanglingLink, LinkStatus, World};
pub use meta::WorldMeta;
pub use stats::WorldStats;
