use std::path::Path;

use colored::Colorize;
use kg_core::RoomId;
use kg_io::catalog::item_name;

use super::link_label;

pub fn run(plan: &Path, room: u32) -> Result<(), String> {
    let world = super::load_world(plan)?;
    let room = world
        .room(RoomId(room))
        .ok_or_else(|| format!("room not found: {room}"))?;

    let area_name = world
        .meta
        .area(room.area)
        .map(|a| a.name.as_str())
        .unwrap_or("?");
    println!(
        "  {} [area {} {}]",
        format!("Room {}", room.id).as_str().bold(),
        room.area,
        area_name.dimmed()
    );
    println!("  anchor:  {}", room.anchor);
    if let Some(ref bgm) = room.bgm {
        println!("  bgm:     {bgm}");
    }
    println!("  meta id: {}", room.meta_id());
    println!();

    for screen in &room.screens {
        let elevator = if screen.has_elevator { "  elevator" } else { "" };
        println!(
            "  screen {} (local {}){elevator}",
            screen.world_coord, screen.local_offset
        );
        for door in &screen.doors {
            let target = match door.link {
                Some(link) if world.room(link.room).is_none() => {
                    format!("{} (removed)", link_label(link))
                }
                Some(link) => link_label(link),
                None => "unlinked".to_string(),
            };
            println!(
                "    door {} {:<6} type {} -> {target}",
                door.id, door.direction, door.kind
            );
        }
        for object in screen.objects.iter().filter(|o| o.is_item()) {
            if let Some(id) = object.item {
                println!("    item {id}: {}", item_name(id));
            }
        }
    }
    Ok(())
}
