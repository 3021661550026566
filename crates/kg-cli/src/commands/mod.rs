pub mod build;
pub mod check;
pub mod links;
pub mod show;
pub mod stats;

use std::path::Path;

use kg_core::{DoorLink, World};

/// Read a layout plan and place all of its rooms.
fn load_world(plan: &Path) -> Result<World, String> {
    let loaded = kg_io::read_plan(plan).map_err(|e| format!("{}: {e}", plan.display()))?;
    loaded.build().map_err(|e| e.to_string())
}

/// Short "room R door D" label for a link target.
fn link_label(link: DoorLink) -> String {
    format!("room {} door {}", link.room, link.door)
}

fn plural(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}
