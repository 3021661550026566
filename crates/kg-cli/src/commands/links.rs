use std::path::Path;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use kg_core::LinkStatus;

use super::{link_label, plural};

pub fn run(plan: &Path, dangling_only: bool) -> Result<(), String> {
    let world = super::load_world(plan)?;

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Room", "Door", "Cell", "Side", "Leads to"]);

    let mut rows = 0;
    for room in world.rooms() {
        for screen in &room.screens {
            for door in &screen.doors {
                let status = world
                    .link_status(room.id, door.id)
                    .map_err(|e| e.to_string())?;
                let target = match status {
                    LinkStatus::Unlinked if dangling_only => continue,
                    LinkStatus::Linked(_) if dangling_only => continue,
                    LinkStatus::Unlinked => "—".dimmed().to_string(),
                    LinkStatus::Linked(peer) => format!(
                        "room {} door {} at {}",
                        peer.room.id,
                        peer.door.id,
                        peer.room.anchor
                    ),
                    LinkStatus::Dangling(d) => {
                        format!("{} (removed)", link_label(d.target))
                            .as_str()
                            .red()
                            .to_string()
                    }
                };
                rows += 1;
                table.add_row(vec![
                    room.id.to_string(),
                    door.id.to_string(),
                    screen.world_coord.to_string(),
                    door.direction.to_string(),
                    target,
                ]);
            }
        }
    }

    if rows == 0 {
        println!("  No doors found.");
        return Ok(());
    }
    println!("{table}");
    println!();
    println!("  {rows} door{}", plural(rows));
    Ok(())
}
