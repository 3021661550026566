//! Layout plans: a list of room files with the cells they are placed at.
//!
//! ```json
//! {
//!   "world": { "name": "ZEBES" },
//!   "rooms": [
//!     { "file": "landing.json", "anchor": [10, 4] },
//!     { "file": "shaft.json", "anchor": [11, 4], "area": 2, "bgm": "bgm_Brinstar" }
//!   ],
//!   "remove": [0]
//! }
//! ```

use std::path::{Path, PathBuf};

use kg_core::{Coord, RoomId, World, WorldMeta};
use serde::{Deserialize, Serialize};

use crate::catalog::is_known_bgm;
use crate::error::{IoError, IoResult};
use crate::import::read_room;

/// One room placement in a plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedRoom {
    /// Room file, relative to the plan file.
    pub file: PathBuf,
    /// Anchor cell `[x, y]`.
    pub anchor: [i32; 2],
    /// Overrides the file's area.
    #[serde(default)]
    pub area: Option<u32>,
    /// Overrides the file's music.
    #[serde(default)]
    pub bgm: Option<String>,
}

/// A full layout plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutPlan {
    /// World settings; missing fields take their defaults.
    #[serde(default)]
    pub world: WorldMeta,
    /// Rooms in placement order.
    pub rooms: Vec<PlannedRoom>,
    /// Room ids to remove after every room has been placed.
    #[serde(default)]
    pub remove: Vec<u32>,
}

/// A plan together with the directory its room paths are relative to.
#[derive(Debug, Clone)]
pub struct LoadedPlan {
    /// The decoded plan.
    pub plan: LayoutPlan,
    /// Directory containing the plan file.
    pub base: PathBuf,
}

/// Read a plan file.
pub fn read_plan(path: &Path) -> IoResult<LoadedPlan> {
    let text = std::fs::read_to_string(path).map_err(|source| IoError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let plan: LayoutPlan = serde_json::from_str(&text)?;
    let base = path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default();
    Ok(LoadedPlan { plan, base })
}

impl LoadedPlan {
    /// Place every planned room in order, then apply removals.
    ///
    /// Stops at the first room that cannot be read or placed.
    pub fn build(&self) -> IoResult<World> {
        let mut world = World::new(self.plan.world.clone());

        for (index, planned) in self.plan.rooms.iter().enumerate() {
            let path = self.base.join(&planned.file);
            let wrap = |source: IoError| IoError::Plan {
                index,
                file: planned.file.clone(),
                source: Box::new(source),
            };

            let mut fragment = read_room(&path).map_err(wrap)?;
            if let Some(area) = planned.area {
                fragment.area = area;
            }
            if let Some(bgm) = &planned.bgm {
                fragment.bgm = Some(bgm.clone());
            }
            if let Some(bgm) = &fragment.bgm {
                if !is_known_bgm(bgm) {
                    log::warn!("room #{index}: unknown bgm track \"{bgm}\"");
                }
            }

            let [x, y] = planned.anchor;
            world
                .place_room(fragment, Coord::new(x, y))
                .map_err(|e| wrap(e.into()))?;
        }

        for id in &self.plan.remove {
            world.remove_room(RoomId(*id))?;
        }
        Ok(world)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    use kg_core::KgError;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, content: &str) {
        fs::write(dir.path().join(name), content).unwrap();
    }

    fn fixture() -> TempDir {
        let dir = TempDir::new().unwrap();
        write(
            &dir,
            "east.json",
            r#"{"GENERAL": {"area": 1}, "SCREENS": [{"x": 4, "y": 4, "DOORS": [{"pos": "right"}]}]}"#,
        );
        write(
            &dir,
            "west.json",
            r#"{"GENERAL": {"area": 1}, "SCREENS": [{"x": 4, "y": 4, "DOORS": [{"pos": 3}]}]}"#,
        );
        dir
    }

    #[test]
    fn builds_linked_world() {
        let dir = fixture();
        write(
            &dir,
            "plan.json",
            r#"{"world": {"name": "ZEBES"}, "rooms": [
                {"file": "east.json", "anchor": [0, 0]},
                {"file": "west.json", "anchor": [1, 0], "area": 4, "bgm": "bgm_Kraid"}
            ]}"#,
        );
        let world = read_plan(&dir.path().join("plan.json"))
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(world.meta.name, "ZEBES");
        assert_eq!(world.meta.world_w, 38);
        assert_eq!(world.stats().rooms, 2);
        let west = world.room(RoomId(1)).unwrap();
        assert_eq!(west.area, 4);
        assert_eq!(west.bgm.as_deref(), Some("bgm_Kraid"));
        assert!(world.dangling_links().is_empty());
        assert!(world.follow_link(RoomId(0), kg_core::DoorId(0)).unwrap().is_some());
    }

    #[test]
    fn removals_leave_dangling_links() {
        let dir = fixture();
        write(
            &dir,
            "plan.json",
            r#"{"rooms": [
                {"file": "east.json", "anchor": [0, 0]},
                {"file": "west.json", "anchor": [1, 0]}
            ], "remove": [1]}"#,
        );
        let world = read_plan(&dir.path().join("plan.json"))
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(world.stats().rooms, 1);
        assert_eq!(world.dangling_links().len(), 1);
    }

    #[test]
    fn collision_names_the_room() {
        let dir = fixture();
        write(
            &dir,
            "plan.json",
            r#"{"rooms": [
                {"file": "east.json", "anchor": [0, 0]},
                {"file": "west.json", "anchor": [0, 0]}
            ]}"#,
        );
        let err = read_plan(&dir.path().join("plan.json"))
            .unwrap()
            .build()
            .unwrap_err();
        match err {
            IoError::Plan { index, source, .. } => {
                assert_eq!(index, 1);
                assert!(matches!(*source, IoError::World(KgError::Collision { .. })));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn anchor_past_grid_edge_is_rejected() {
        let dir = fixture();
        write(
            &dir,
            "wide.json",
            r#"{"GENERAL": {}, "SCREENS": [{"x": 4, "y": 4}, {"x": 4, "y": 5}]}"#,
        );
        write(
            &dir,
            "plan.json",
            r#"{"rooms": [{"file": "wide.json", "anchor": [0, 2147483647]}]}"#,
        );
        let err = read_plan(&dir.path().join("plan.json"))
            .unwrap()
            .build()
            .unwrap_err();
        match err {
            IoError::Plan { index, source, .. } => {
                assert_eq!(index, 0);
                assert!(matches!(*source, IoError::World(KgError::OutOfBounds { .. })));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_room_file() {
        let dir = fixture();
        write(
            &dir,
            "plan.json",
            r#"{"rooms": [{"file": "nowhere.json", "anchor": [0, 0]}]}"#,
        );
        let err = read_plan(&dir.path().join("plan.json"))
            .unwrap()
            .build()
            .unwrap_err();
        assert!(err.to_string().starts_with("room #0 (nowhere.json): cannot read"));
    }

    #[test]
    fn unknown_removal_is_not_found() {
        let dir = fixture();
        write(
            &dir,
            "plan.json",
            r#"{"rooms": [{"file": "east.json", "anchor": [0, 0]}], "remove": [7]}"#,
        );
        let err = read_plan(&dir.path().join("plan.json"))
            .unwrap()
            .build()
            .unwrap_err();
        assert!(matches!(err, IoError::World(KgError::RoomNotFound(RoomId(7)))));
    }
}
