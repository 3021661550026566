use std::path::Path;

use comfy_table::{ContentArrangement, Table};

pub fn run(plan: &Path) -> Result<(), String> {
    let world = super::load_world(plan)?;
    let stats = world.stats();

    println!("  {} ({})", world.meta.name, world.meta.name_full);
    println!();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Metric", "Count"]);
    table.add_row(vec!["rooms".to_string(), stats.rooms.to_string()]);
    table.add_row(vec!["screens".to_string(), stats.screens.to_string()]);
    table.add_row(vec!["doors".to_string(), stats.doors.to_string()]);
    table.add_row(vec!["items".to_string(), stats.items.to_string()]);
    table.add_row(vec!["spawns".to_string(), world.spawns().len().to_string()]);
    table.add_row(vec![
        "elevators".to_string(),
        world.elevators().len().to_string(),
    ]);
    table.add_row(vec![
        "dangling links".to_string(),
        world.dangling_links().len().to_string(),
    ]);
    println!("{table}");

    let mut areas = Table::new();
    areas.set_content_arrangement(ContentArrangement::Dynamic);
    areas.set_header(vec!["Area", "Name", "Rooms", "Screens"]);
    let mut listed = false;
    for (index, area) in world.meta.areas.iter().enumerate() {
        let number = index as u32 + 1;
        let rooms: Vec<_> = world.rooms().filter(|r| r.area == number).collect();
        if rooms.is_empty() {
            continue;
        }
        listed = true;
        let screens: usize = rooms.iter().map(|r| r.screens.len()).sum();
        areas.add_row(vec![
            number.to_string(),
            area.name.clone(),
            rooms.len().to_string(),
            screens.to_string(),
        ]);
    }
    if listed {
        println!();
        println!("{areas}");
    }

    Ok(())
}
