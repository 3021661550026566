//! Room file import.
//!
//! Room files are JSON objects with a `GENERAL` block and a `SCREENS` list.
//! Door positions appear either as symbols (`"left"`) or as the older numeric
//! codes; both are normalized to [`Direction`] here so the world graph only
//! ever sees the closed set.

use std::path::Path;

use kg_core::fragment::DEFAULT_ORIGIN;
use kg_core::{Coord, Direction, DoorSpec, KgError, RoomFragment, ScreenFragment, WorldObject};
use serde_json::{Map, Value};

use crate::catalog::{UNKNOWN_ITEM, item_id};
use crate::error::{IoError, IoResult};

/// Numeric door position codes used by older room files.
pub fn direction_from_code(code: u64) -> Option<Direction> {
    match code {
        1 => Some(Direction::Right),
        2 => Some(Direction::Up),
        3 => Some(Direction::Left),
        4 => Some(Direction::Bottom),
        _ => None,
    }
}

/// Inverse of [`direction_from_code`].
pub fn direction_code(direction: Direction) -> u64 {
    match direction {
        Direction::Right => 1,
        Direction::Up => 2,
        Direction::Left => 3,
        Direction::Bottom => 4,
    }
}

/// Read and validate a room file.
pub fn read_room(path: &Path) -> IoResult<RoomFragment> {
    let text = std::fs::read_to_string(path).map_err(|source| IoError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let fragment = parse_room(&text)?;
    log::debug!(
        "imported {}: {} screens",
        path.display(),
        fragment.screens.len()
    );
    Ok(fragment)
}

/// Parse and validate a room from JSON text.
pub fn parse_room(text: &str) -> IoResult<RoomFragment> {
    let value: Value = serde_json::from_str(text)?;
    room_from_value(value)
}

/// Convert a decoded room document into a validated fragment.
pub fn room_from_value(value: Value) -> IoResult<RoomFragment> {
    let Value::Object(mut root) = value else {
        return Err(IoError::InvalidFormat("room must be a JSON object".into()));
    };
    let general = match root.remove("GENERAL") {
        Some(Value::Object(general)) => general,
        _ => return Err(IoError::InvalidFormat("missing GENERAL block".into())),
    };
    let screens = match root.remove("SCREENS") {
        Some(Value::Array(screens)) => screens,
        _ => return Err(IoError::InvalidFormat("missing SCREENS list".into())),
    };
    let meta = match root.remove("META") {
        Some(Value::Object(meta)) => Some(meta),
        _ => None,
    };

    let mut general = general;
    let area = general
        .remove("area")
        .and_then(|v| v.as_u64())
        .and_then(|a| u32::try_from(a).ok())
        .unwrap_or(1);
    let bgm = general
        .remove("bgm")
        .and_then(|v| v.as_str().map(str::to_string))
        .filter(|s| !s.is_empty());
    general.remove("world_x");
    general.remove("world_y");

    let screens = screens
        .into_iter()
        .enumerate()
        .map(|(i, s)| screen_from_value(i, s))
        .collect::<IoResult<Vec<_>>>()?;

    let fragment = RoomFragment {
        area,
        bgm,
        origin: DEFAULT_ORIGIN,
        screens,
        general,
        meta,
    };
    fragment.validate()?;
    Ok(fragment)
}

fn screen_from_value(index: usize, value: Value) -> IoResult<ScreenFragment> {
    let Value::Object(mut fields) = value else {
        return Err(IoError::InvalidFormat(format!(
            "screen {index} is not an object"
        )));
    };
    let x = take_i32(&mut fields, "x")
        .ok_or_else(|| IoError::InvalidFormat(format!("screen {index} has no integer x")))?;
    let y = take_i32(&mut fields, "y")
        .ok_or_else(|| IoError::InvalidFormat(format!("screen {index} has no integer y")))?;

    fields.remove("PATHING");
    for stale in ["world_x", "world_y", "room_id"] {
        fields.remove(stale);
    }

    let doors = take_list(&mut fields, "DOORS")
        .into_iter()
        .map(door_from_value)
        .collect::<IoResult<Vec<_>>>()?;
    let objects = take_list(&mut fields, "OBJECTS")
        .into_iter()
        .map(object_from_value)
        .collect();
    let has_elevator = fields.get("ELEVATORS").is_some_and(is_set);

    Ok(ScreenFragment {
        local_offset: Coord::new(x, y),
        doors,
        objects,
        has_elevator,
        extra: fields,
    })
}

fn door_from_value(value: Value) -> IoResult<DoorSpec> {
    let Value::Object(mut fields) = value else {
        return Err(IoError::InvalidFormat("door is not an object".into()));
    };
    let direction = match fields.remove("pos") {
        Some(pos) => parse_direction(&pos)?,
        None => return Err(KgError::InvalidDirection("<missing>".into()).into()),
    };
    let kind = fields.remove("type").and_then(|v| v.as_i64()).unwrap_or(1);
    // Ids and links from an earlier placement are reassigned on placement.
    for stale in ["id", "dest_rm", "dest_id"] {
        fields.remove(stale);
    }
    Ok(DoorSpec {
        direction,
        kind,
        extra: fields,
    })
}

/// Normalize a door position, symbolic or numeric.
pub fn parse_direction(value: &Value) -> Result<Direction, KgError> {
    match value {
        Value::String(s) => s.parse(),
        Value::Number(n) => n
            .as_u64()
            .and_then(direction_from_code)
            .ok_or_else(|| KgError::InvalidDirection(n.to_string())),
        other => Err(KgError::InvalidDirection(other.to_string())),
    }
}

fn object_from_value(value: Value) -> WorldObject {
    let mut data = match value {
        Value::Object(fields) => fields,
        _ => Map::new(),
    };
    let item = data.remove("item").map(|v| match &v {
        Value::String(name) => item_id(name).unwrap_or(UNKNOWN_ITEM),
        _ => v
            .as_u64()
            .and_then(|id| u32::try_from(id).ok())
            .unwrap_or(UNKNOWN_ITEM),
    });
    let is_spawn_trigger = data.get("type").and_then(Value::as_i64) == Some(1);
    WorldObject {
        item,
        is_spawn_trigger,
        data,
    }
}

/// Whether a flag-like field counts as present: empty lists, strings and
/// objects, zero, `false` and `null` do not.
fn is_set(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(list) => !list.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

fn take_i32(fields: &mut Map<String, Value>, key: &str) -> Option<i32> {
    fields
        .remove(key)
        .and_then(|v| v.as_i64())
        .and_then(|n| i32::try_from(n).ok())
}

fn take_list(fields: &mut Map<String, Value>, key: &str) -> Vec<Value> {
    match fields.remove(key) {
        Some(Value::Array(list)) => list,
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROOM: &str = r#"{
        "GENERAL": {"area": 3, "bgm": "bgm_Norfair", "name": "Lava Shaft"},
        "SCREENS": [
            {
                "x": 4, "y": 4,
                "DOORS": [{"pos": 1, "type": 2}, {"pos": "left", "type": 1}],
                "OBJECTS": [{"type": 5, "item": 16}, {"type": 1}],
                "PATHING": [1, 2, 3]
            },
            {
                "x": 4, "y": 5,
                "DOORS": [{"pos": 4}],
                "OBJECTS": [],
                "ELEVATORS": [{"dir": 1}]
            }
        ]
    }"#;

    #[test]
    fn imports_general_and_screens() {
        let room = parse_room(ROOM).unwrap();
        assert_eq!(room.area, 3);
        assert_eq!(room.bgm.as_deref(), Some("bgm_Norfair"));
        assert_eq!(room.general.get("name"), Some(&Value::from("Lava Shaft")));
        assert_eq!(room.screens.len(), 2);
        assert_eq!(room.screens[1].local_offset, Coord::new(4, 5));
    }

    #[test]
    fn legacy_and_symbolic_positions_normalize() {
        let room = parse_room(ROOM).unwrap();
        let dirs: Vec<Direction> = room
            .screens
            .iter()
            .flat_map(|s| s.doors.iter().map(|d| d.direction))
            .collect();
        assert_eq!(
            dirs,
            vec![Direction::Right, Direction::Left, Direction::Bottom]
        );
        assert_eq!(room.screens[0].doors[0].kind, 2);
        assert_eq!(room.screens[1].doors[0].kind, 1);
    }

    #[test]
    fn objects_tagged_and_pathing_dropped() {
        let room = parse_room(ROOM).unwrap();
        let first = &room.screens[0];
        assert_eq!(first.objects[0].item, Some(16));
        assert!(!first.objects[0].is_spawn_trigger);
        assert!(first.objects[1].is_spawn_trigger);
        assert!(!first.extra.contains_key("PATHING"));
        assert!(!first.has_elevator);
        assert!(room.screens[1].has_elevator);
        assert_eq!(room.counts().items, 1);
    }

    #[test]
    fn missing_blocks_rejected() {
        assert!(matches!(
            parse_room(r#"{"SCREENS": []}"#),
            Err(IoError::InvalidFormat(_))
        ));
        assert!(matches!(
            parse_room(r#"{"GENERAL": {}}"#),
            Err(IoError::InvalidFormat(_))
        ));
        assert!(matches!(parse_room("[1, 2]"), Err(IoError::InvalidFormat(_))));
    }

    #[test]
    fn empty_screen_list_rejected() {
        assert!(matches!(
            parse_room(r#"{"GENERAL": {}, "SCREENS": []}"#),
            Err(IoError::World(KgError::EmptyRoom))
        ));
    }

    #[test]
    fn unknown_direction_rejected() {
        let text = r#"{"GENERAL": {}, "SCREENS": [{"x": 4, "y": 4, "DOORS": [{"pos": 7}]}]}"#;
        assert!(matches!(
            parse_room(text),
            Err(IoError::World(KgError::InvalidDirection(ref s))) if s == "7"
        ));
        let text = r#"{"GENERAL": {}, "SCREENS": [{"x": 4, "y": 4, "DOORS": [{"pos": "north"}]}]}"#;
        assert!(matches!(
            parse_room(text),
            Err(IoError::World(KgError::InvalidDirection(ref s))) if s == "north"
        ));
    }

    #[test]
    fn defaults_when_general_is_bare() {
        let room =
            parse_room(r#"{"GENERAL": {"bgm": ""}, "SCREENS": [{"x": 0, "y": 0}]}"#).unwrap();
        assert_eq!(room.area, 1);
        assert!(room.bgm.is_none());
        assert!(room.screens[0].doors.is_empty());
        assert!(room.meta.is_none());
    }

    #[test]
    fn stale_placement_fields_dropped() {
        let text = r#"{"GENERAL": {"world_x": 9}, "SCREENS": [
            {"x": 4, "y": 4, "world_x": 9, "DOORS": [{"pos": "up", "id": 5, "dest_rm": 1, "dest_id": 2}]}
        ]}"#;
        let room = parse_room(text).unwrap();
        assert!(room.general.is_empty());
        assert!(room.screens[0].extra.is_empty());
        assert!(room.screens[0].doors[0].extra.is_empty());
    }

    #[test]
    fn codes_round_trip() {
        for d in [
            Direction::Left,
            Direction::Right,
            Direction::Up,
            Direction::Bottom,
        ] {
            assert_eq!(direction_from_code(direction_code(d)), Some(d));
        }
        assert_eq!(direction_from_code(0), None);
    }

    #[test]
    fn empty_elevator_values_do_not_flag_screen() {
        for elevators in ["0", "\"\"", "{}", "[]", "null", "false"] {
            let text = format!(r#"{{"GENERAL": {{}}, "SCREENS": [{{"x": 4, "y": 4, "ELEVATORS": {elevators}}}]}}"#);
            let room = parse_room(&text).unwrap();
            assert!(!room.screens[0].has_elevator, "ELEVATORS = {elevators}");
        }
        for elevators in ["1", "\"up\"", "{\"to\": 2}", "[{}]", "true"] {
            let text = format!(r#"{{"GENERAL": {{}}, "SCREENS": [{{"x": 4, "y": 4, "ELEVATORS": {elevators}}}]}}"#);
            let room = parse_room(&text).unwrap();
            assert!(room.screens[0].has_elevator, "ELEVATORS = {elevators}");
        }
    }

    #[test]
    fn items_may_be_named() {
        let text = r#"{"GENERAL": {}, "SCREENS": [{"x": 4, "y": 4, "OBJECTS": [
            {"type": 5, "item": "Missiles"},
            {"type": 5, "item": "Banana"},
            {"type": 5, "item": [1]}
        ]}]}"#;
        let room = parse_room(text).unwrap();
        let items: Vec<Option<u32>> = room.screens[0].objects.iter().map(|o| o.item).collect();
        assert_eq!(items, vec![Some(16), Some(UNKNOWN_ITEM), Some(UNKNOWN_ITEM)]);
    }
}
