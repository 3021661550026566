use std::collections::BTreeMap;

use crate::coord::Coord;
use crate::error::{KgError, KgResult};
use crate::fragment::RoomFragment;
use crate::grid::GridIndex;
use crate::linker;
use crate::meta::WorldMeta;
use crate::room::{Door, DoorId, DoorLink, Room, RoomId, Screen};
use crate::special::{self, Elevator, Spawn};
use crate::stats::WorldStats;

/// A door reached by following a link.
#[derive(Debug, Clone, Copy)]
pub struct DoorRef<'w> {
    /// Room that owns the door.
    pub room: &'w Room,
    /// The door itself.
    pub door: &'w Door,
}

/// A door whose link names a room (or door) that is no longer placed.
///
/// Removing a room does not unlink its former neighbors; this is how such a
/// leftover link is reported. Treat it as "neighbor gone", not as a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DanglingLink {
    /// Room holding the stale door.
    pub room: RoomId,
    /// The stale door.
    pub door: DoorId,
    /// Where the link points.
    pub target: DoorLink,
}

/// Where a door's link leads.
#[derive(Debug, Clone, Copy)]
pub enum LinkStatus<'w> {
    /// No link was ever resolved.
    Unlinked,
    /// The peer door is placed.
    Linked(DoorRef<'w>),
    /// The peer was removed after linking.
    Dangling(DanglingLink),
}

/// A broken invariant found by [`World::verify`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Inconsistency {
    /// Incremental stats disagree with a full recount.
    #[error("stats drift: recorded {recorded}, recounted {actual}")]
    StatsDrift {
        /// Stats kept incrementally.
        recorded: WorldStats,
        /// Stats summed from placed rooms.
        actual: WorldStats,
    },
    /// A room's screen is missing from the grid or owned by someone else.
    #[error("cell {coord} of room {room} is not registered to it")]
    UnregisteredCell {
        /// Cell of the screen.
        coord: Coord,
        /// Room that should own it.
        room: RoomId,
    },
    /// The grid holds cells that no placed screen accounts for.
    #[error("grid has {grid} cells but rooms have {screens} screens")]
    OrphanCells {
        /// Occupied grid cells.
        grid: usize,
        /// Screens across placed rooms.
        screens: usize,
    },
    /// A link between two placed doors is not mirrored.
    #[error("link room {} door {} -> room {} door {} is not mirrored", .from.room, .from.door, .to.room, .to.door)]
    OneSidedLink {
        /// Door holding the link.
        from: DoorLink,
        /// Door it points at.
        to: DoorLink,
    },
    /// Two linked doors do not face each other.
    #[error("linked doors {} and {} do not face each other", .from.door, .to.door)]
    MisalignedLink {
        /// Door holding the link.
        from: DoorLink,
        /// Door it points at.
        to: DoorLink,
    },
}

/// The world graph: placed rooms, grid occupancy, derived records and stats.
///
/// Every mutating operation either succeeds completely or returns an error
/// with the world unchanged.
#[derive(Debug, Clone)]
pub struct World {
    /// World settings, edited freely by callers.
    pub meta: WorldMeta,
    rooms: BTreeMap<RoomId, Room>,
    grid: GridIndex,
    stats: WorldStats,
    spawns: Vec<Spawn>,
    elevators: Vec<Elevator>,
    next_room_id: u32,
    next_door_id: u32,
}

impl Default for World {
    fn default() -> Self {
        Self::new(WorldMeta::default())
    }
}

impl World {
    /// An empty world. Both id counters start at zero.
    pub fn new(meta: WorldMeta) -> Self {
        Self {
            meta,
            rooms: BTreeMap::new(),
            grid: GridIndex::new(),
            stats: WorldStats::default(),
            spawns: Vec::new(),
            elevators: Vec::new(),
            next_room_id: 0,
            next_door_id: 0,
        }
    }

    // -----------------------------------------------------------------------
    // Placement
    // -----------------------------------------------------------------------

    /// Place a fragment with its origin screen at `anchor`. Returns the new
    /// room's id.
    ///
    /// Structure, grid bounds and collision checks run before anything is
    /// written. On
    /// success the room is registered in the grid, numbered, linked to its
    /// neighbors, scanned for spawns and elevators, and counted.
    pub fn place_room(&mut self, fragment: RoomFragment, anchor: Coord) -> KgResult<RoomId> {
        fragment.validate()?;
        let cells = fragment.placement(anchor)?;
        if let Some((coord, occupant)) = self.grid.first_collision(cells) {
            log::debug!("placement at {anchor} rejected: {coord} held by room {occupant}");
            return Err(KgError::Collision { coord, occupant });
        }

        let id = RoomId(self.next_room_id);
        let door_count = fragment.counts().doors as u32;
        let mut room = Room::from_fragment(fragment, id, anchor, self.next_door_id)?;
        self.grid.insert(&room)?;
        self.next_room_id += 1;
        self.next_door_id += door_count;

        let links = linker::link_room(&mut room, &self.grid, &mut self.rooms);
        let derived = special::derive(&room);
        self.spawns.extend(derived.spawn);
        self.elevators.extend(derived.elevators);
        self.stats.add(&room.counts);

        log::info!(
            "placed room {id} at {anchor}: {} screens, {} doors, {} new links",
            room.counts.screens,
            room.counts.doors,
            links.len()
        );
        self.rooms.insert(id, room);
        self.meta.touch();
        Ok(id)
    }

    /// Remove a placed room and return it.
    ///
    /// Neighbor doors linked to the removed room keep their links; see
    /// [`DanglingLink`]. Spawns and elevators derived from the room stay until
    /// [`World::rebuild_derived`].
    pub fn remove_room(&mut self, id: RoomId) -> KgResult<Room> {
        let room = self.rooms.remove(&id).ok_or(KgError::RoomNotFound(id))?;
        if let Err(e) = self.grid.remove(&room) {
            self.rooms.insert(id, room);
            return Err(e);
        }
        self.stats.subtract(&room.counts);
        self.meta.touch();
        log::info!("removed room {id} from {}", room.anchor);
        Ok(room)
    }

    /// Remove whichever room occupies `coord`.
    pub fn remove_room_at(&mut self, coord: Coord) -> KgResult<Room> {
        let handle = self
            .grid
            .query(coord)
            .ok_or(KgError::ScreenNotFound(coord))?;
        self.remove_room(handle.room)
    }

    // -----------------------------------------------------------------------
    // Room edits
    // -----------------------------------------------------------------------

    /// Change a placed room's area and music.
    ///
    /// Derived records keep the area they were created with.
    pub fn configure_room(&mut self, id: RoomId, area: u32, bgm: Option<String>) -> KgResult<()> {
        let room = self.rooms.get_mut(&id).ok_or(KgError::RoomNotFound(id))?;
        room.area = area;
        room.bgm = bgm;
        self.meta.touch();
        Ok(())
    }

    /// Replace the catalogue id of an item object.
    pub fn set_item(&mut self, id: RoomId, coord: Coord, index: usize, item: u32) -> KgResult<()> {
        let room = self.rooms.get_mut(&id).ok_or(KgError::RoomNotFound(id))?;
        let screen = room
            .screens
            .iter_mut()
            .find(|s| s.world_coord == coord)
            .ok_or(KgError::ScreenNotFound(coord))?;
        match screen.objects.get_mut(index) {
            Some(object) if object.is_item() => {
                object.item = Some(item);
                self.meta.touch();
                Ok(())
            }
            _ => Err(KgError::NotAnItem { coord, index }),
        }
    }

    /// Discard all spawns and elevators and derive them again from the rooms
    /// currently placed, in placement order.
    pub fn rebuild_derived(&mut self) {
        self.spawns.clear();
        self.elevators.clear();
        for room in self.rooms.values() {
            let derived = special::derive(room);
            self.spawns.extend(derived.spawn);
            self.elevators.extend(derived.elevators);
        }
    }

    // -----------------------------------------------------------------------
    // Lookups
    // -----------------------------------------------------------------------

    /// Get a placed room by id.
    pub fn room(&self, id: RoomId) -> Option<&Room> {
        self.rooms.get(&id)
    }

    /// Placed rooms in placement order.
    pub fn rooms(&self) -> impl Iterator<Item = &Room> {
        self.rooms.values()
    }

    /// The room and screen occupying `coord`.
    pub fn screen_at(&self, coord: Coord) -> Option<(&Room, &Screen)> {
        let handle = self.grid.query(coord)?;
        let room = self.rooms.get(&handle.room)?;
        room.screens.get(handle.screen).map(|s| (room, s))
    }

    /// Look up a door on a placed room.
    pub fn door(&self, room: RoomId, door: DoorId) -> KgResult<&Door> {
        self.rooms
            .get(&room)
            .ok_or(KgError::RoomNotFound(room))?
            .door(door)
            .ok_or(KgError::DoorNotFound { room, door })
    }

    /// Resolve where a door's link leads.
    pub fn link_status(&self, room: RoomId, door: DoorId) -> KgResult<LinkStatus<'_>> {
        let Some(target) = self.door(room, door)?.link else {
            return Ok(LinkStatus::Unlinked);
        };
        let peer = self
            .rooms
            .get(&target.room)
            .and_then(|r| r.door(target.door).map(|d| DoorRef { room: r, door: d }));
        Ok(match peer {
            Some(peer) => LinkStatus::Linked(peer),
            None => LinkStatus::Dangling(DanglingLink { room, door, target }),
        })
    }

    /// Follow a door's link to the peer door, if it is still placed.
    ///
    /// Fails only when the starting door does not exist.
    pub fn follow_link(&self, room: RoomId, door: DoorId) -> KgResult<Option<DoorRef<'_>>> {
        match self.link_status(room, door)? {
            LinkStatus::Linked(peer) => Ok(Some(peer)),
            LinkStatus::Unlinked => Ok(None),
            LinkStatus::Dangling(d) => {
                log::warn!(
                    "room {} door {} links to removed room {} door {}",
                    d.room,
                    d.door,
                    d.target.room,
                    d.target.door
                );
                Ok(None)
            }
        }
    }

    /// Every door whose link points at a room or door that is gone.
    pub fn dangling_links(&self) -> Vec<DanglingLink> {
        self.rooms
            .values()
            .flat_map(|room| room.doors().map(move |d| (room.id, d)))
            .filter_map(|(room, door)| {
                let target = door.link?;
                let present = self
                    .rooms
                    .get(&target.room)
                    .is_some_and(|r| r.door(target.door).is_some());
                (!present).then_some(DanglingLink {
                    room,
                    door: door.id,
                    target,
                })
            })
            .collect()
    }

    /// Grid occupancy.
    pub fn grid(&self) -> &GridIndex {
        &self.grid
    }

    /// Current stats snapshot.
    pub fn stats(&self) -> WorldStats {
        self.stats
    }

    /// Derived spawns in creation order.
    pub fn spawns(&self) -> &[Spawn] {
        &self.spawns
    }

    /// Derived elevators in creation order.
    pub fn elevators(&self) -> &[Elevator] {
        &self.elevators
    }

    /// Number of placed rooms.
    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    // -----------------------------------------------------------------------
    // Consistency
    // -----------------------------------------------------------------------

    /// Recount everything from scratch and report broken invariants.
    ///
    /// Dangling links are expected after removals and are not reported.
    pub fn verify(&self) -> Vec<Inconsistency> {
        let mut problems = Vec::new();

        let actual = WorldStats::recompute(self.rooms.values());
        if actual != self.stats {
            problems.push(Inconsistency::StatsDrift {
                recorded: self.stats,
                actual,
            });
        }

        for room in self.rooms.values() {
            for (index, coord) in room.cells().enumerate() {
                let owned = self
                    .grid
                    .query(coord)
                    .is_some_and(|h| h.room == room.id && h.screen == index);
                if !owned {
                    problems.push(Inconsistency::UnregisteredCell {
                        coord,
                        room: room.id,
                    });
                }
            }
        }
        if self.grid.len() != actual.screens {
            problems.push(Inconsistency::OrphanCells {
                grid: self.grid.len(),
                screens: actual.screens,
            });
        }

        for room in self.rooms.values() {
            for door in room.doors() {
                let Some(to) = door.link else {
                    continue;
                };
                let Some(peer) = self.rooms.get(&to.room).and_then(|r| r.door(to.door)) else {
                    continue;
                };
                let from = DoorLink {
                    room: room.id,
                    door: door.id,
                };
                if peer.link != Some(from) {
                    problems.push(Inconsistency::OneSidedLink { from, to });
                } else if peer.direction != door.direction.opposite() {
                    problems.push(Inconsistency::MisalignedLink { from, to });
                }
            }
        }

        problems
    }
}
