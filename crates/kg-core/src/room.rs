use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::coord::{Coord, Direction};
use crate::error::KgResult;
use crate::fragment::{RoomFragment, WorldObject};
use crate::stats::RoomCounts;

/// Identifier of a placed room. Issued once per world, never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RoomId(pub u32);

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a placed door. Issued once per world, never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DoorId(pub u32);

impl fmt::Display for DoorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The far end of a door link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DoorLink {
    /// Room holding the peer door.
    pub room: RoomId,
    /// The peer door.
    pub door: DoorId,
}

/// A door on a placed screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Door {
    /// Identifier, unique across the world.
    pub id: DoorId,
    /// Side of the screen.
    pub direction: Direction,
    /// Door type tag, carried through from the fragment.
    pub kind: i64,
    /// Set by the door linker; always mirrored by the peer while both rooms exist.
    pub link: Option<DoorLink>,
    #[serde(default)]
    /// Untyped pass-through fields.
    pub extra: Map<String, Value>,
}

/// A placed screen: one grid cell of a room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Screen {
    /// Offset inside the source fragment.
    pub local_offset: Coord,
    /// Cell this screen occupies.
    pub world_coord: Coord,
    /// Doors in file order.
    pub doors: Vec<Door>,
    /// Content records in file order.
    pub objects: Vec<WorldObject>,
    /// Whether this screen hosts an elevator.
    pub has_elevator: bool,
    #[serde(default)]
    /// Untyped pass-through fields.
    pub extra: Map<String, Value>,
}

/// A room fragment after placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    /// Identifier, unique across the world.
    pub id: RoomId,
    /// Content identity used for the exported `META.id`.
    pub uid: Uuid,
    /// Cell the fragment origin was placed on.
    pub anchor: Coord,
    /// Area the room belongs to.
    pub area: u32,
    /// Background music track.
    pub bgm: Option<String>,
    /// Placed screens in file order.
    pub screens: Vec<Screen>,
    /// Totals captured at placement; removal subtracts exactly these.
    pub counts: RoomCounts,
    #[serde(default)]
    /// Pass-through `GENERAL` fields.
    pub general: Map<String, Value>,
    /// Pass-through `META` fields, if the file had any.
    pub meta: Option<Map<String, Value>>,
}

impl Room {
    /// Materialize a fragment at `anchor`, numbering its doors from `first_door`.
    ///
    /// Doors are numbered in screen order, then door order. Fails with
    /// [`KgError::OutOfBounds`] if a screen would land outside the grid.
    pub(crate) fn from_fragment(
        fragment: RoomFragment,
        id: RoomId,
        anchor: Coord,
        first_door: u32,
    ) -> KgResult<Self> {
        let counts = fragment.counts();
        let cells = fragment.placement(anchor)?;
        let mut next_door = first_door;

        let screens = fragment
            .screens
            .into_iter()
            .zip(cells)
            .map(|(s, world_coord)| {
                let doors = s
                    .doors
                    .into_iter()
                    .map(|spec| {
                        let door = Door {
                            id: DoorId(next_door),
                            direction: spec.direction,
                            kind: spec.kind,
                            link: None,
                            extra: spec.extra,
                        };
                        next_door += 1;
                        door
                    })
                    .collect();
                Screen {
                    local_offset: s.local_offset,
                    world_coord,
                    doors,
                    objects: s.objects,
                    has_elevator: s.has_elevator,
                    extra: s.extra,
                }
            })
            .collect();

        Ok(Self {
            id,
            uid: Uuid::new_v4(),
            anchor,
            area: fragment.area,
            bgm: fragment.bgm,
            screens,
            counts,
            general: fragment.general,
            meta: fragment.meta,
        })
    }

    /// World cells occupied by this room, in screen order.
    pub fn cells(&self) -> impl Iterator<Item = Coord> + '_ {
        self.screens.iter().map(|s| s.world_coord)
    }

    /// All doors of the room, in id order.
    pub fn doors(&self) -> impl Iterator<Item = &Door> {
        self.screens.iter().flat_map(|s| &s.doors)
    }

    /// Find a door by id.
    pub fn door(&self, id: DoorId) -> Option<&Door> {
        self.doors().find(|d| d.id == id)
    }

    pub(crate) fn door_mut(&mut self, id: DoorId) -> Option<&mut Door> {
        self.screens
            .iter_mut()
            .flat_map(|s| s.doors.iter_mut())
            .find(|d| d.id == id)
    }

    /// The screen placed at `coord`, if this room owns that cell.
    pub fn screen_at(&self, coord: Coord) -> Option<&Screen> {
        self.screens.iter().find(|s| s.world_coord == coord)
    }

    /// The first 16 decimal digits of the content uid, as written to `META.id`.
    pub fn meta_id(&self) -> String {
        self.uid.as_u128().to_string().chars().take(16).collect()
    }
}
