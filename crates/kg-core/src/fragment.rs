//! Unplaced room fragments, as handed over by the import layer.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::coord::{Coord, Direction};
use crate::error::{KgError, KgResult};
use crate::stats::RoomCounts;

/// Local offset that room files treat as their internal origin.
pub const DEFAULT_ORIGIN: Coord = Coord::new(4, 4);

/// A content record inside a screen.
///
/// Only the two tags the world graph cares about are typed; everything else
/// rides along in `data`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorldObject {
    /// Catalogue id when the object is an item pickup.
    pub item: Option<u32>,
    /// Whether the object marks the ship spawn point.
    pub is_spawn_trigger: bool,
    /// Untyped pass-through fields.
    #[serde(default)]
    pub data: Map<String, Value>,
}

impl WorldObject {
    /// An item pickup with the given catalogue id.
    pub fn item(id: u32) -> Self {
        Self {
            item: Some(id),
            ..Self::default()
        }
    }

    /// A ship spawn marker.
    pub fn spawn_trigger() -> Self {
        Self {
            is_spawn_trigger: true,
            ..Self::default()
        }
    }

    /// Returns true if this object counts towards the world item total.
    pub fn is_item(&self) -> bool {
        self.item.is_some()
    }
}

/// A door as declared by a fragment, before it has an id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoorSpec {
    /// Side of the screen.
    pub direction: Direction,
    /// Door type tag (normal, locked, ...). Opaque to the world graph.
    pub kind: i64,
    /// Untyped pass-through fields.
    #[serde(default)]
    pub extra: Map<String, Value>,
}

impl DoorSpec {
    /// A door of kind 1 on the given side.
    pub fn new(direction: Direction) -> Self {
        Self {
            direction,
            kind: 1,
            extra: Map::new(),
        }
    }

    /// Override the door kind.
    pub fn with_kind(mut self, kind: i64) -> Self {
        self.kind = kind;
        self
    }
}

/// One screen of an unplaced fragment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenFragment {
    /// Offset inside the fragment, relative to the fragment's own grid.
    pub local_offset: Coord,
    /// Doors on this screen, in file order.
    pub doors: Vec<DoorSpec>,
    /// Content records, in file order.
    pub objects: Vec<WorldObject>,
    /// Whether this screen hosts an elevator.
    pub has_elevator: bool,
    /// Untyped pass-through fields.
    #[serde(default)]
    pub extra: Map<String, Value>,
}

impl ScreenFragment {
    /// An empty screen at the given local offset.
    pub fn at(local_offset: Coord) -> Self {
        Self {
            local_offset,
            doors: Vec::new(),
            objects: Vec::new(),
            has_elevator: false,
            extra: Map::new(),
        }
    }

    /// Add a door.
    pub fn with_door(mut self, door: DoorSpec) -> Self {
        self.doors.push(door);
        self
    }

    /// Add a content object.
    pub fn with_object(mut self, object: WorldObject) -> Self {
        self.objects.push(object);
        self
    }

    /// Mark the screen as hosting an elevator.
    pub fn with_elevator(mut self) -> Self {
        self.has_elevator = true;
        self
    }
}

/// A validated room fragment waiting to be placed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomFragment {
    /// Area the room belongs to.
    pub area: u32,
    /// Background music track, if one was chosen.
    pub bgm: Option<String>,
    /// Local offset that maps onto the anchor cell.
    pub origin: Coord,
    /// Screens in file order. Must not be empty.
    pub screens: Vec<ScreenFragment>,
    /// Pass-through `GENERAL` fields.
    #[serde(default)]
    pub general: Map<String, Value>,
    /// Pass-through `META` fields, if the file had any.
    pub meta: Option<Map<String, Value>>,
}

impl RoomFragment {
    /// An empty fragment in the given area using [`DEFAULT_ORIGIN`].
    pub fn new(area: u32) -> Self {
        Self {
            area,
            bgm: None,
            origin: DEFAULT_ORIGIN,
            screens: Vec::new(),
            general: Map::new(),
            meta: None,
        }
    }

    /// Add a screen.
    pub fn with_screen(mut self, screen: ScreenFragment) -> Self {
        self.screens.push(screen);
        self
    }

    /// Set the local offset that maps onto the anchor.
    pub fn with_origin(mut self, origin: Coord) -> Self {
        self.origin = origin;
        self
    }

    /// Check the structural rules the world graph relies on.
    pub fn validate(&self) -> KgResult<()> {
        if self.screens.is_empty() {
            return Err(KgError::EmptyRoom);
        }
        let mut seen = HashSet::new();
        for screen in &self.screens {
            if !seen.insert(screen.local_offset) {
                return Err(KgError::DuplicateScreen(screen.local_offset));
            }
        }
        Ok(())
    }

    /// World cell of the screen at `offset` when the fragment is anchored at
    /// `anchor`: `anchor + (offset - origin)`.
    pub fn world_coord(&self, offset: Coord, anchor: Coord) -> KgResult<Coord> {
        offset
            .checked_sub(self.origin)
            .and_then(|d| anchor.checked_add(d))
            .ok_or(KgError::OutOfBounds { anchor, offset })
    }

    /// World cell of every screen, in screen order, when the fragment is
    /// anchored at `anchor`. Fails if any screen falls outside the grid.
    pub fn placement(&self, anchor: Coord) -> KgResult<Vec<Coord>> {
        self.screens
            .iter()
            .map(|s| self.world_coord(s.local_offset, anchor))
            .collect()
    }

    /// Screen, door and item totals for this fragment.
    pub fn counts(&self) -> RoomCounts {
        RoomCounts {
            screens: self.screens.len(),
            doors: self.screens.iter().map(|s| s.doors.len()).sum(),
            items: self
                .screens
                .iter()
                .flat_map(|s| &s.objects)
                .filter(|o| o.is_item())
                .count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_screen_room() -> RoomFragment {
        RoomFragment::new(2)
            .with_screen(
                ScreenFragment::at(Coord::new(4, 4))
                    .with_door(DoorSpec::new(Direction::Left))
                    .with_object(WorldObject::item(7)),
            )
            .with_screen(
                ScreenFragment::at(Coord::new(5, 4))
                    .with_door(DoorSpec::new(Direction::Right))
                    .with_door(DoorSpec::new(Direction::Up))
                    .with_object(WorldObject::spawn_trigger()),
            )
    }

    #[test]
    fn placement_is_relative_to_origin() {
        let room = two_screen_room();
        let cells = room.placement(Coord::new(10, 3)).unwrap();
        assert_eq!(cells, vec![Coord::new(10, 3), Coord::new(11, 3)]);
    }

    #[test]
    fn custom_origin_shifts_placement() {
        let room = two_screen_room().with_origin(Coord::new(5, 4));
        let cells = room.placement(Coord::new(10, 3)).unwrap();
        assert_eq!(cells, vec![Coord::new(9, 3), Coord::new(10, 3)]);
    }

    #[test]
    fn placement_past_grid_edge_is_out_of_bounds() {
        let room = two_screen_room();
        assert_eq!(
            room.placement(Coord::new(i32::MAX, 0)),
            Err(KgError::OutOfBounds {
                anchor: Coord::new(i32::MAX, 0),
                offset: Coord::new(5, 4),
            })
        );

        let far = RoomFragment::new(1).with_screen(ScreenFragment::at(Coord::new(i32::MIN, 4)));
        assert!(matches!(
            far.placement(Coord::new(0, 0)),
            Err(KgError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn counts_only_tagged_items() {
        let counts = two_screen_room().counts();
        assert_eq!(counts.screens, 2);
        assert_eq!(counts.doors, 3);
        assert_eq!(counts.items, 1);
    }

    #[test]
    fn empty_fragment_rejected() {
        assert_eq!(RoomFragment::new(1).validate(), Err(KgError::EmptyRoom));
    }

    #[test]
    fn duplicate_local_offset_rejected() {
        let room = RoomFragment::new(1)
            .with_screen(ScreenFragment::at(Coord::new(4, 4)))
            .with_screen(ScreenFragment::at(Coord::new(4, 4)));
        assert_eq!(
            room.validate(),
            Err(KgError::DuplicateScreen(Coord::new(4, 4)))
        );
    }

    #[test]
    fn valid_fragment_passes() {
        assert!(two_screen_room().validate().is_ok());
    }
}
