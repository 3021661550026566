use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Display and audio settings of one world area.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Area {
    /// Display name, e.g. `CRATERIA`.
    pub name: String,
    /// Hex color, e.g. `#F0F0F0`.
    pub color: String,
    /// Default music track for rooms in the area.
    pub bgm: String,
}

impl Area {
    fn new(name: &str, bgm: &str) -> Self {
        Self {
            name: name.to_string(),
            color: "#F0F0F0".to_string(),
            bgm: bgm.to_string(),
        }
    }
}

/// Escape-sequence tuning carried through to exports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Escape {
    /// Whether the escape music adapts to the timer (1) or not (0).
    pub dynamic_music: u32,
    /// Percentage of the timer at which the escape music changes.
    pub halfway_point: u32,
    /// Seconds.
    pub time: u32,
}

impl Default for Escape {
    fn default() -> Self {
        Self {
            dynamic_music: 1,
            halfway_point: 70,
            time: 215,
        }
    }
}

/// World-level settings. Everything here is configuration; nothing is derived
/// from placed rooms.
///
/// Deserializing fills missing fields from [`WorldMeta::default`], so layout
/// files only need to list what they change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldMeta {
    /// Numeric world id.
    pub id: u64,
    /// Short world name.
    pub name: String,
    /// Long world name shown in menus.
    pub name_full: String,
    /// Editor format version.
    pub version: f64,
    /// Revision counter of the world content.
    pub world_version: u32,
    /// Size class of the world.
    pub size: u32,
    /// Map width in screens.
    pub world_w: u32,
    /// Map height in screens.
    pub world_h: u32,
    /// Visual style preset.
    pub style: u32,
    /// Number of bosses.
    pub bosses: u32,
    /// Number of cores.
    pub cores: u32,
    /// Progression focus tag.
    pub focus: i32,
    /// Number of hazard runs.
    pub hazard_runs: u32,
    /// Progression mode.
    pub progression: u32,
    /// Number of ship hints.
    pub ship_hints: u32,
    /// Escape sequence settings.
    pub escape: Escape,
    /// Bosses guarding the final gate.
    pub gate_bosses: Vec<u32>,
    /// Area table; room `area` values are 1-based indexes into it.
    pub areas: Vec<Area>,
    /// When the world was created.
    pub created_at: DateTime<Utc>,
    /// When the world was last changed.
    pub updated_at: DateTime<Utc>,
}

impl Default for WorldMeta {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            id: 45_644_296_059_790,
            name: "LUCINA".to_string(),
            name_full: "LUCINA - DEMO 2".to_string(),
            version: 0.75,
            world_version: 1,
            size: 2,
            world_w: 38,
            world_h: 38,
            style: 3,
            bosses: 0,
            cores: 1,
            focus: -1,
            hazard_runs: 0,
            progression: 1,
            ship_hints: 1,
            escape: Escape::default(),
            gate_bosses: Vec::new(),
            areas: vec![
                Area::new("CRATERIA", "bgm_Ambience"),
                Area::new("BRINSTAR", "bgm_Brinstar"),
                Area::new("NORFAIR", "bgm_Norfair"),
                Area::new("WRECKED", "bgm_Wrecked_Ship"),
                Area::new("KRAID", "bgm_Ambience"),
                Area::new("TOURIAN", "bgm_Tourian"),
                Area::new("RIDLEY", "bgm_Crateria_Surface"),
            ],
            created_at: now,
            updated_at: now,
        }
    }
}

impl WorldMeta {
    /// Default settings under a different world name.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            name_full: name.clone(),
            name,
            ..Self::default()
        }
    }

    /// Look up an area by its 1-based room `area` value.
    pub fn area(&self, area: u32) -> Option<&Area> {
        let index = usize::try_from(area).ok()?.checked_sub(1)?;
        self.areas.get(index)
    }

    pub(crate) fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
