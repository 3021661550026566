use std::path::Path;

use kg_core::special::{Elevator, Spawn};
use kg_core::{Direction, Door, Room, Screen, World, WorldObject};
use serde_json::{Map, Value, json};

use crate::error::{IoError, IoResult};
use crate::import::direction_code;

/// How door directions are written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DirectionEncoding {
    /// Numeric codes `1=right, 2=up, 3=left, 4=bottom`, as the game reads them.
    #[default]
    Legacy,
    /// The symbols `left`, `right`, `up`, `bottom`.
    Symbolic,
}

/// Export settings.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExportOptions {
    /// Door direction encoding.
    pub directions: DirectionEncoding,
}

/// Build the world document.
pub fn export_world(world: &World, options: &ExportOptions) -> Value {
    let meta = &world.meta;
    let stats = world.stats();

    let rooms: Vec<Value> = world.rooms().map(|r| room_value(r, options)).collect();
    let spawns: Vec<Value> = world.spawns().iter().map(spawn_value).collect();
    let elevators: Vec<Value> = world.elevators().iter().map(elevator_value).collect();

    json!({
        "id": meta.id,
        "name": meta.name,
        "name_full": meta.name_full,
        "stats": {
            "size": meta.size,
            "world_w": meta.world_w,
            "world_h": meta.world_h,
            "screens": stats.screens,
            "rooms": stats.rooms,
            "style": meta.style,
            "items": stats.items,
            "areas": meta.areas.len(),
            "bosses": meta.bosses,
            "cores": meta.cores,
            "focus": meta.focus,
            "hazard_runs": meta.hazard_runs,
            "progression": meta.progression,
            "ship_hints": meta.ship_hints,
        },
        "version": meta.version,
        "world_version": meta.world_version,
        "GENERAL": {
            "world_w": meta.world_w,
            "world_h": meta.world_h,
            "total_enemies": 0,
            "total_objects": 0,
            "total_doors": stats.doors,
            "total_blocks": 0,
            "escape": meta.escape,
            "gate_bosses": meta.gate_bosses,
            "areas": meta.areas,
            "spawns": spawns,
            "MAP_ELEVATORS": elevators,
        },
        "ROOMS": rooms,
    })
}

/// Export the world as pretty-printed JSON to `path`.
pub fn write_world(world: &World, options: &ExportOptions, path: &Path) -> IoResult<()> {
    let text = serde_json::to_string_pretty(&export_world(world, options))?;
    std::fs::write(path, text).map_err(|source| IoError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!(
        "exported {} rooms to {}",
        world.room_count(),
        path.display()
    );
    Ok(())
}

/// One `ROOMS` entry.
///
/// `META` keys the room file already carries are kept as written; only the
/// missing ones (`id`, `content_version`, `landsite`, `boss`) get defaults.
/// A file-supplied `id` is therefore exported unchanged rather than
/// regenerated from the room's uid, so two placements of the same file share
/// it.
fn room_value(room: &Room, options: &ExportOptions) -> Value {
    let mut meta = room.meta.clone().unwrap_or_default();
    meta.entry("id").or_insert_with(|| Value::from(room.meta_id()));
    meta.entry("content_version").or_insert(Value::from(1));
    meta.entry("landsite").or_insert(Value::from(0));
    meta.entry("boss").or_insert(Value::from(-1));

    let mut general = room.general.clone();
    general.insert("area".into(), Value::from(room.area));
    if let Some(bgm) = &room.bgm {
        general.insert("bgm".into(), Value::from(bgm.as_str()));
    }
    general.insert("world_x".into(), Value::from(room.anchor.x));
    general.insert("world_y".into(), Value::from(room.anchor.y));

    let screens: Vec<Value> = room
        .screens
        .iter()
        .map(|s| screen_value(room, s, options))
        .collect();

    json!({
        "room_id": room.id.0,
        "META": meta,
        "GENERAL": general,
        "SCREENS": screens,
    })
}

fn screen_value(room: &Room, screen: &Screen, options: &ExportOptions) -> Value {
    let mut fields = screen.extra.clone();
    fields.insert("x".into(), Value::from(screen.local_offset.x));
    fields.insert("y".into(), Value::from(screen.local_offset.y));
    fields.insert("world_x".into(), Value::from(screen.world_coord.x));
    fields.insert("world_y".into(), Value::from(screen.world_coord.y));
    fields.insert("room_id".into(), Value::from(room.id.0));

    let mut map = match fields.remove("MAP") {
        Some(Value::Object(map)) => map,
        _ => Map::new(),
    };
    map.insert("area".into(), Value::from(room.area));
    fields.insert("MAP".into(), Value::Object(map));

    let doors: Vec<Value> = screen
        .doors
        .iter()
        .map(|d| door_value(d, options.directions))
        .collect();
    fields.insert("DOORS".into(), Value::Array(doors));
    let objects: Vec<Value> = screen.objects.iter().map(object_value).collect();
    fields.insert("OBJECTS".into(), Value::Array(objects));
    Value::Object(fields)
}

fn door_value(door: &Door, encoding: DirectionEncoding) -> Value {
    let mut fields = door.extra.clone();
    fields.insert("id".into(), Value::from(door.id.0));
    fields.insert("pos".into(), direction_value(door.direction, encoding));
    fields.insert("type".into(), Value::from(door.kind));
    if let Some(link) = door.link {
        fields.insert("dest_rm".into(), Value::from(link.room.0));
        fields.insert("dest_id".into(), Value::from(link.door.0));
    }
    Value::Object(fields)
}

fn direction_value(direction: Direction, encoding: DirectionEncoding) -> Value {
    match encoding {
        DirectionEncoding::Legacy => Value::from(direction_code(direction)),
        DirectionEncoding::Symbolic => Value::from(direction.as_str()),
    }
}

fn object_value(object: &WorldObject) -> Value {
    let mut fields = object.data.clone();
    if let Some(item) = object.item {
        fields.insert("item".into(), Value::from(item));
    }
    Value::Object(fields)
}

fn spawn_value(spawn: &Spawn) -> Value {
    json!({
        "world_x": spawn.world.x,
        "world_y": spawn.world.y,
        "x": spawn.offset.0,
        "y": spawn.offset.1,
        "name": spawn.kind.as_str(),
        "area": spawn.area,
        "screen_n": spawn.screen,
        "room_id": spawn.room.0,
        "type": 1,
    })
}

fn elevator_value(elevator: &Elevator) -> Value {
    json!({
        "x": elevator.coord.x,
        "y": elevator.coord.y,
        "dest_area": elevator.dest_area,
    })
}
