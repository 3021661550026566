//! Property-based tests for kg-core.
use std::collections::HashSet;

use kg_core::{Coord, Direction, DoorSpec, RoomFragment, ScreenFragment, World, WorldObject};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Place {
        doors: Vec<Direction>,
        item: bool,
        wide: bool,
        anchor: (i32, i32),
    },
    Remove(usize),
}

fn direction() -> impl Strategy<Value = Direction> {
    prop_oneof![
        Just(Direction::Left),
        Just(Direction::Right),
        Just(Direction::Up),
        Just(Direction::Bottom),
    ]
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (
            prop::collection::vec(direction(), 0..4),
            any::<bool>(),
            any::<bool>(),
            (0..5i32, 0..5i32)
        )
            .prop_map(|(doors, item, wide, anchor)| Op::Place {
                doors,
                item,
                wide,
                anchor
            }),
        1 => (0..8usize).prop_map(Op::Remove),
    ]
}

fn fragment(doors: &[Direction], item: bool, wide: bool) -> RoomFragment {
    let mut first = ScreenFragment::at(Coord::new(4, 4));
    for d in doors {
        first = first.with_door(DoorSpec::new(*d));
    }
    if item {
        first = first.with_object(WorldObject::item(7));
    }
    let mut room = RoomFragment::new(1).with_screen(first);
    if wide {
        room = room.with_screen(
            ScreenFragment::at(Coord::new(5, 4)).with_door(DoorSpec::new(Direction::Left)),
        );
    }
    room
}

proptest! {
    #[test]
    fn world_stays_consistent(ops in prop::collection::vec(op(), 1..40)) {
        let mut world = World::default();
        let mut room_ids = HashSet::new();
        let mut door_ids = HashSet::new();

        for op in ops {
            match op {
                Op::Place { doors, item, wide, anchor } => {
                    let grid_before = world.grid().clone();
                    let stats_before = world.stats();
                    let count_before = world.room_count();

                    match world.place_room(fragment(&doors, item, wide), Coord::from(anchor)) {
                        Ok(id) => {
                            prop_assert!(room_ids.insert(id), "room id {} reissued", id);
                            for door in world.room(id).unwrap().doors() {
                                prop_assert!(door_ids.insert(door.id), "door id {} reissued", door.id);
                            }
                        }
                        Err(_) => {
                            prop_assert_eq!(world.grid(), &grid_before);
                            prop_assert_eq!(world.stats(), stats_before);
                            prop_assert_eq!(world.room_count(), count_before);
                        }
                    }
                }
                Op::Remove(n) => {
                    let target = world.rooms().nth(n).map(|r| r.id);
                    if let Some(id) = target {
                        world.remove_room(id).unwrap();
                    }
                }
            }

            let stats = world.stats();
            prop_assert_eq!(stats.rooms, world.room_count());
            prop_assert_eq!(
                stats.screens,
                world.rooms().map(|r| r.screens.len()).sum::<usize>()
            );
            prop_assert_eq!(stats.screens, world.grid().len());
            let problems = world.verify();
            prop_assert!(problems.is_empty(), "{:?}", problems);
        }
    }

    #[test]
    fn facing_pairs_link_regardless_of_order(first_left in any::<bool>(), vertical in any::<bool>()) {
        let (a_dir, b_anchor) = if vertical {
            (Direction::Bottom, Coord::new(0, 1))
        } else {
            (Direction::Right, Coord::new(1, 0))
        };
        let a = fragment(&[a_dir], false, false);
        let b = fragment(&[a_dir.opposite()], false, false);

        let mut world = World::default();
        let (ra, rb) = if first_left {
            let ra = world.place_room(a, Coord::new(0, 0)).unwrap();
            (ra, world.place_room(b, b_anchor).unwrap())
        } else {
            let rb = world.place_room(b, b_anchor).unwrap();
            (world.place_room(a, Coord::new(0, 0)).unwrap(), rb)
        };

        let da = world.room(ra).unwrap().doors().next().unwrap().clone();
        let db = world.room(rb).unwrap().doors().next().unwrap().clone();
        prop_assert_eq!(da.link.map(|l| (l.room, l.door)), Some((rb, db.id)));
        prop_assert_eq!(db.link.map(|l| (l.room, l.door)), Some((ra, da.id)));
    }
}
