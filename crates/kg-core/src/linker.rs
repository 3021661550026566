//! Door linking: pairs facing doors across adjacent screens.
//!
//! Linking is additive. Existing links are never overwritten, and each door
//! ends up linked to at most one peer. When a side has several candidate
//! doors they are paired in file order, first free door to first free door.

use std::collections::{BTreeMap, HashSet};

use crate::grid::GridIndex;
use crate::room::{DoorId, DoorLink, Room, RoomId, Screen};

/// A mutual link created by [`link_room`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Link {
    /// Door on the room being linked.
    pub from: DoorLink,
    /// Peer door on the neighboring screen.
    pub to: DoorLink,
}

/// Link `room` against every occupied neighbor cell.
///
/// `room` must already be registered in `grid`; its own screens are valid
/// neighbors, so adjacent screens of a multi-screen room get linked to each
/// other too. `placed` holds every other room the grid may point at.
pub fn link_room(
    room: &mut Room,
    grid: &GridIndex,
    placed: &mut BTreeMap<RoomId, Room>,
) -> Vec<Link> {
    let links = plan(room, grid, placed);
    for link in &links {
        set_link(room, placed, link.from, link.to);
        set_link(room, placed, link.to, link.from);
    }
    links
}

fn plan(room: &Room, grid: &GridIndex, placed: &BTreeMap<RoomId, Room>) -> Vec<Link> {
    let mut taken: HashSet<(RoomId, DoorId)> = HashSet::new();
    let mut links = Vec::new();

    for screen in &room.screens {
        for (direction, coord) in screen.world_coord.neighbors() {
            let Some(handle) = grid.query(coord) else {
                continue;
            };
            let neighbor: Option<&Screen> = if handle.room == room.id {
                room.screens.get(handle.screen)
            } else {
                placed
                    .get(&handle.room)
                    .and_then(|r| r.screens.get(handle.screen))
            };
            let Some(neighbor) = neighbor else {
                continue;
            };

            for door in screen.doors.iter().filter(|d| d.direction == direction) {
                if door.link.is_some() || taken.contains(&(room.id, door.id)) {
                    continue;
                }
                let peer = neighbor.doors.iter().find(|p| {
                    p.direction == direction.opposite()
                        && p.link.is_none()
                        && !taken.contains(&(handle.room, p.id))
                });
                let Some(peer) = peer else {
                    break;
                };
                taken.insert((room.id, door.id));
                taken.insert((handle.room, peer.id));
                log::debug!(
                    "link room {} door {} ({direction}) <-> room {} door {}",
                    room.id,
                    door.id,
                    handle.room,
                    peer.id
                );
                links.push(Link {
                    from: DoorLink {
                        room: room.id,
                        door: door.id,
                    },
                    to: DoorLink {
                        room: handle.room,
                        door: peer.id,
                    },
                });
            }
        }
    }
    links
}

fn set_link(
    room: &mut Room,
    placed: &mut BTreeMap<RoomId, Room>,
    end: DoorLink,
    target: DoorLink,
) {
    let host = if end.room == room.id {
        Some(room)
    } else {
        placed.get_mut(&end.room)
    };
    if let Some(door) = host.and_then(|h| h.door_mut(end.door)) {
        door.link = Some(target);
    }
}
