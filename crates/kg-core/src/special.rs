use serde::{Deserialize, Serialize};

use crate::coord::Coord;
use crate::room::{Room, RoomId};

/// In-room pixel position used for ship spawns.
pub const SPAWN_OFFSET: (i32, i32) = (0, 152);

/// What kind of spawn a record describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SpawnKind {
    /// The player's ship.
    Gunship,
}

impl SpawnKind {
    /// Name written to exports.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Gunship => "GUNSHIP",
        }
    }
}

/// A spawn point derived from a room's content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spawn {
    /// Spawn type.
    pub kind: SpawnKind,
    /// Room the spawn came from.
    pub room: RoomId,
    /// Anchor cell of the originating room.
    pub world: Coord,
    /// Pixel position inside the screen.
    pub offset: (i32, i32),
    /// Area of the originating room.
    pub area: u32,
    /// Index of the screen the spawn sits on.
    pub screen: usize,
}

/// An elevator cell derived from a room's content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Elevator {
    /// Room holding the elevator.
    pub room: RoomId,
    /// Cell of the elevator screen.
    pub coord: Coord,
    /// Area the elevator belongs to.
    pub dest_area: u32,
}

/// Derived records produced for one room.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Derived {
    /// At most one spawn per room, however many triggers it has.
    pub spawn: Option<Spawn>,
    /// One elevator per flagged screen, in screen order.
    pub elevators: Vec<Elevator>,
}

/// Scan a placed room for spawn triggers and elevator screens.
pub fn derive(room: &Room) -> Derived {
    let has_trigger = room
        .screens
        .iter()
        .flat_map(|s| &s.objects)
        .any(|o| o.is_spawn_trigger);

    let spawn = has_trigger.then(|| Spawn {
        kind: SpawnKind::Gunship,
        room: room.id,
        world: room.anchor,
        offset: SPAWN_OFFSET,
        area: room.area,
        screen: 0,
    });

    let elevators = room
        .screens
        .iter()
        .filter(|s| s.has_elevator)
        .map(|s| Elevator {
            room: room.id,
            coord: s.world_coord,
            dest_area: room.area,
        })
        .collect();

    Derived { spawn, elevators }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fragment::{RoomFragment, ScreenFragment, WorldObject};

    fn place(fragment: RoomFragment) -> Room {
        Room::from_fragment(fragment, RoomId(5), Coord::new(2, 3), 0).unwrap()
    }

    #[test]
    fn two_triggers_one_spawn() {
        let room = place(
            RoomFragment::new(4)
                .with_screen(
                    ScreenFragment::at(Coord::new(4, 4)).with_object(WorldObject::spawn_trigger()),
                )
                .with_screen(
                    ScreenFragment::at(Coord::new(5, 4)).with_object(WorldObject::spawn_trigger()),
                ),
        );
        let derived = derive(&room);
        let spawn = derived.spawn.unwrap();
        assert_eq!(spawn.room, RoomId(5));
        assert_eq!(spawn.world, Coord::new(2, 3));
        assert_eq!(spawn.offset, (0, 152));
        assert_eq!(spawn.area, 4);
        assert!(derived.elevators.is_empty());
    }

    #[test]
    fn items_are_not_triggers() {
        let room = place(
            RoomFragment::new(1)
                .with_screen(ScreenFragment::at(Coord::new(4, 4)).with_object(WorldObject::item(3))),
        );
        assert_eq!(derive(&room), Derived::default());
    }

    #[test]
    fn one_elevator_per_flagged_screen() {
        let room = place(
            RoomFragment::new(6)
                .with_screen(ScreenFragment::at(Coord::new(4, 4)).with_elevator())
                .with_screen(ScreenFragment::at(Coord::new(4, 5)))
                .with_screen(ScreenFragment::at(Coord::new(4, 6)).with_elevator()),
        );
        let derived = derive(&room);
        assert!(derived.spawn.is_none());
        let coords: Vec<Coord> = derived.elevators.iter().map(|e| e.coord).collect();
        assert_eq!(coords, vec![Coord::new(2, 3), Coord::new(2, 5)]);
        assert!(derived.elevators.iter().all(|e| e.dest_area == 6));
    }
}
