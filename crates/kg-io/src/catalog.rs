//! Item and music catalogues understood by the game.

/// Background music tracks a room or area may reference.
pub const BGM_TRACKS: [&str; 28] = [
    "bgm_Title",
    "bgm_Samus_Entrance",
    "bgm_Item_Get",
    "bgm_Brinstar",
    "bgm_Norfair",
    "bgm_Norfair_SM",
    "bgm_Kraid",
    "bgm_Crateria_Surface",
    "bgm_Crateria_Depths",
    "bgm_Ridley",
    "bgm_Tourian",
    "bgm_Brinstar_Overgrowth",
    "bgm_Brinstar_Red_Soil",
    "bgm_Lower_Norfair",
    "bgm_Mother_Brain",
    "bgm_Ending",
    "bgm_Mission_Report",
    "bgm_Minor_Item_Get",
    "bgm_Wrecked_Ship",
    "bgm_Item_Room",
    "bgm_Escape",
    "bgm_Miniboss2",
    "bgm_Kraid_Boss",
    "bgm_Ridley_Boss",
    "bgm_Mother_Brain_Boss",
    "bgm_Miniboss",
    "bgm_Ambience",
    "bgm_Crateria_Space_Pirates",
];

/// Item names, indexed by item id.
pub const ITEMS: [&str; 35] = [
    "Energy Drop",
    "Long Beam",
    "Charge Beam",
    "Ice Beam",
    "Wave Beam",
    "Spazer Beam",
    "Plasma Beam",
    "Energy Tank",
    "Varia Suit",
    "Gravity Suit",
    "Morph Ball",
    "Spring Ball",
    "Boost Ball",
    "Spider Ball",
    "Bombs",
    "Power Bombs",
    "Missiles",
    "Super Missiles",
    "High Jump Boots",
    "Space Jump",
    "Speed Booster",
    "Screw Attack",
    "Sensor Visor",
    "Thermal Visor",
    "X-Ray Visor",
    "Refill",
    "Power Grip",
    "Grapple Beam",
    "Unknown",
    "Unknown",
    "Surge Core",
    "Aegis Core",
    "Crystal Core",
    "Magnet Core",
    "Phazon Core",
];

/// Item id used when a file names an item the catalogue does not know.
pub const UNKNOWN_ITEM: u32 = 28;

/// Display name of an item id.
pub fn item_name(id: u32) -> &'static str {
    usize::try_from(id)
        .ok()
        .and_then(|i| ITEMS.get(i))
        .copied()
        .unwrap_or("Unknown")
}

/// Item id for a display name, if the catalogue has it.
pub fn item_id(name: &str) -> Option<u32> {
    ITEMS
        .iter()
        .position(|n| *n == name)
        .and_then(|i| u32::try_from(i).ok())
}

/// Returns true if `track` is one of the catalogued music tracks.
pub fn is_known_bgm(track: &str) -> bool {
    BGM_TRACKS.contains(&track)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_lookup_both_ways() {
        assert_eq!(item_name(16), "Missiles");
        assert_eq!(item_id("Missiles"), Some(16));
        assert_eq!(item_name(999), "Unknown");
        assert_eq!(item_id("Unknown"), Some(UNKNOWN_ITEM));
        assert_eq!(item_id("Banana"), None);
    }

    #[test]
    fn bgm_membership() {
        assert!(is_known_bgm("bgm_Norfair"));
        assert!(!is_known_bgm("bgm_Nope"));
    }
}
