use std::fmt;

use serde::{Deserialize, Serialize};

use crate::room::Room;

/// Per-room totals, captured once at placement time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomCounts {
    /// Number of screens.
    pub screens: usize,
    /// Number of doors across all screens.
    pub doors: usize,
    /// Number of item objects across all screens.
    pub items: usize,
}

/// Aggregate counters over every placed room.
///
/// Updated incrementally by [`WorldStats::add`] and [`WorldStats::subtract`];
/// [`WorldStats::recompute`] exists for consistency checks only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldStats {
    /// Placed rooms.
    pub rooms: usize,
    /// Placed screens.
    pub screens: usize,
    /// Placed doors.
    pub doors: usize,
    /// Placed item objects.
    pub items: usize,
}

impl WorldStats {
    /// Account for a newly placed room.
    pub fn add(&mut self, counts: &RoomCounts) {
        self.rooms += 1;
        self.screens += counts.screens;
        self.doors += counts.doors;
        self.items += counts.items;
    }

    /// Remove a room's contribution.
    ///
    /// Callers must only pass counts of a room that is currently placed, so
    /// the subtraction never underflows.
    pub fn subtract(&mut self, counts: &RoomCounts) {
        debug_assert!(self.rooms >= 1, "room counter underflow");
        self.rooms = self.rooms.saturating_sub(1);
        self.screens = self.screens.saturating_sub(counts.screens);
        self.doors = self.doors.saturating_sub(counts.doors);
        self.items = self.items.saturating_sub(counts.items);
    }

    /// Sum the cached counts of the given rooms from scratch.
    pub fn recompute<'a>(rooms: impl IntoIterator<Item = &'a Room>) -> Self {
        let mut stats = Self::default();
        for room in rooms {
            stats.add(&room.counts);
        }
        stats
    }
}

impl fmt::Display for WorldStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} rooms, {} screens, {} doors, {} items",
            self.rooms, self.screens, self.doors, self.items
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COUNTS: RoomCounts = RoomCounts {
        screens: 3,
        doors: 4,
        items: 1,
    };

    #[test]
    fn add_then_subtract_returns_to_zero() {
        let mut stats = WorldStats::default();
        stats.add(&COUNTS);
        stats.add(&COUNTS);
        assert_eq!(stats.rooms, 2);
        assert_eq!(stats.screens, 6);
        stats.subtract(&COUNTS);
        stats.subtract(&COUNTS);
        assert_eq!(stats, WorldStats::default());
    }

    #[test]
    fn display_summary() {
        let mut stats = WorldStats::default();
        stats.add(&COUNTS);
        insta::assert_snapshot!(stats.to_string(), @"1 rooms, 3 screens, 4 doors, 1 items");
    }
}
