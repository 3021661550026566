use crate::coord::Coord;
use crate::room::{DoorId, RoomId};

/// Alias for `Result<T, KgError>`.
pub type KgResult<T> = Result<T, KgError>;

/// Errors raised by world graph operations.
///
/// Every operation that returns one of these leaves the [`World`](crate::World)
/// exactly as it was before the call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KgError {
    /// A screen of the room would land on an occupied cell.
    #[error("collision at {coord}: cell already occupied by room {occupant}")]
    Collision {
        /// The contested cell.
        coord: Coord,
        /// The room that already owns the cell.
        occupant: RoomId,
    },

    /// A door position is not one of `left`, `right`, `up`, `bottom`.
    #[error("invalid door direction: \"{0}\"")]
    InvalidDirection(String),

    /// A screen would land outside the `i32` grid when anchored at `anchor`.
    #[error("screen at local offset {offset} falls outside the grid when anchored at {anchor}")]
    OutOfBounds {
        /// Requested anchor cell.
        anchor: Coord,
        /// Local offset of the screen that does not fit.
        offset: Coord,
    },

    /// The room fragment has no screens.
    #[error("room fragment has no screens")]
    EmptyRoom,

    /// Two screens of the same fragment share a local offset.
    #[error("room fragment has more than one screen at local offset {0}")]
    DuplicateScreen(Coord),

    /// The requested room is not placed in the world.
    #[error("room not found: {0}")]
    RoomNotFound(RoomId),

    /// No screen occupies the requested cell.
    #[error("no screen at {0}")]
    ScreenNotFound(Coord),

    /// The requested door does not exist on the given room.
    #[error("door {door} not found in room {room}")]
    DoorNotFound {
        /// Room that was searched.
        room: RoomId,
        /// Missing door.
        door: DoorId,
    },

    /// The grid cell is not owned by the room that tried to release it.
    #[error("cell {coord} is not owned by room {room}")]
    NotOwned {
        /// The cell being released.
        coord: Coord,
        /// The room that claimed it.
        room: RoomId,
    },

    /// The addressed object does not exist or is not an item.
    #[error("object {index} at {coord} is not an item")]
    NotAnItem {
        /// Screen cell holding the object.
        coord: Coord,
        /// Index into the screen's object list.
        index: usize,
    },
}
