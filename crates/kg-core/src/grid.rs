use std::collections::HashMap;

use crate::coord::Coord;
use crate::error::{KgError, KgResult};
use crate::fragment::RoomFragment;
use crate::room::{Room, RoomId};

/// Handle to a placed screen: the owning room plus the screen's index in it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScreenRef {
    /// Owning room.
    pub room: RoomId,
    /// Index into the room's `screens`.
    pub screen: usize,
}

/// Occupancy map of the world grid. A cell holds at most one screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GridIndex {
    cells: HashMap<Coord, ScreenRef>,
}

impl GridIndex {
    /// An empty grid.
    pub fn new() -> Self {
        Self::default()
    }

    /// The screen occupying `coord`, if any.
    pub fn query(&self, coord: Coord) -> Option<ScreenRef> {
        self.cells.get(&coord).copied()
    }

    /// Returns true if any screen of `fragment`, anchored at `anchor`, lands
    /// on an occupied cell. Fails if a screen falls outside the grid.
    pub fn would_collide(&self, fragment: &RoomFragment, anchor: Coord) -> KgResult<bool> {
        Ok(self.first_collision(fragment.placement(anchor)?).is_some())
    }

    /// The first occupied cell among `cells`, with its owner.
    pub fn first_collision(
        &self,
        cells: impl IntoIterator<Item = Coord>,
    ) -> Option<(Coord, RoomId)> {
        cells
            .into_iter()
            .find_map(|c| self.cells.get(&c).map(|r| (c, r.room)))
    }

    /// Register every screen of a placed room.
    ///
    /// All cells are checked before any is written, so a collision leaves the
    /// index untouched.
    pub fn insert(&mut self, room: &Room) -> KgResult<()> {
        if let Some((coord, occupant)) = self.first_collision(room.cells()) {
            return Err(KgError::Collision { coord, occupant });
        }
        for (screen, coord) in room.cells().enumerate() {
            self.cells.insert(
                coord,
                ScreenRef {
                    room: room.id,
                    screen,
                },
            );
        }
        Ok(())
    }

    /// Unregister every screen of a room. Fails without changes if any of its
    /// cells is not currently owned by it.
    pub fn remove(&mut self, room: &Room) -> KgResult<()> {
        for coord in room.cells() {
            match self.cells.get(&coord) {
                Some(r) if r.room == room.id => {}
                _ => {
                    return Err(KgError::NotOwned {
                        coord,
                        room: room.id,
                    });
                }
            }
        }
        for coord in room.cells() {
            self.cells.remove(&coord);
        }
        Ok(())
    }

    /// Number of occupied cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns true if no cell is occupied.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Iterate occupied cells in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (Coord, ScreenRef)> + '_ {
        self.cells.iter().map(|(c, r)| (*c, *r))
    }
}
