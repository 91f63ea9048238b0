use crate::catalog::{ArmorRecord, Catalog, ModRecord, WeaponRecord};

const HELMETS: &[&str] = &[
    "Combat Helmet",
    "Tactical Helmet",
    "Sniper Hood",
    "Gas Mask Helmet",
    "Riot Helmet",
    "Ballistic Helmet",
    "Night Vision Helmet",
];

const MASKS: &[&str] = &[
    "Gas Mask",
    "Tactical Mask",
    "Respirator",
    "Face Shield",
    "Combat Mask",
    "Stealth Mask",
    "Radiation Mask",
];

const TOPS: &[&str] = &[
    "Tactical Vest",
    "Combat Armor",
    "Ghillie Suit",
    "Field Jacket",
    "Plate Carrier",
    "Stealth Suit",
    "Riot Armor",
];

const BOTTOMS: &[&str] = &[
    "Combat Pants",
    "Tactical Trousers",
    "Camo Pants",
    "Field Pants",
    "Cargo Pants",
    "Stealth Pants",
    "Armor Pants",
];

const GLOVES: &[&str] = &[
    "Tactical Gloves",
    "Combat Gloves",
    "Precision Gloves",
    "Field Gloves",
    "Armored Gloves",
    "Stealth Gloves",
    "Marksman Gloves",
];

const SHOES: &[&str] = &[
    "Combat Boots",
    "Tactical Boots",
    "Stealth Boots",
    "Field Boots",
    "Assault Boots",
    "Sniper Boots",
    "All-Terrain Boots",
];

const WEAPONS: &[&str] = &["AR-15", "AK-47", "Sniper Rifle", "Shotgun", "SMG", "Pistol"];

/// (mod name, what it fits)
const MODS: &[(&str, &str)] = &[
    ("Red Dot Sight", "Weapon"),
    ("8x Scope", "Weapon"),
    ("12x Scope", "Weapon"),
    ("Silencer", "Weapon"),
    ("Extended Magazine", "Weapon"),
    ("Foregrip", "Weapon"),
    ("Compensator", "Weapon"),
    ("Laser Sight", "Weapon"),
    ("Flashlight", "Weapon"),
    ("Bipod", "Weapon"),
    ("Night Vision", "Helmet"),
    ("Communication System", "Helmet"),
    ("Air Filter", "Masks"),
    ("Gas Protection", "Masks"),
    ("Armor Plating", "Chest"),
    ("Extra Pockets", "Chest"),
    ("Knee Pads", "Legs"),
    ("Movement Enhancement", "Legs"),
    ("Grip Enhancement", "Gloves"),
    ("Dexterity Boost", "Gloves"),
    ("Silent Step", "Boots"),
    ("Speed Boost", "Boots"),
    ("Durability Boost", "all"),
    ("Stealth Enhancement", "all"),
    ("Quick Reload", "all"),
];

pub(super) fn catalog() -> Catalog {
    let armor = [
        ("helmet", HELMETS),
        ("mask", MASKS),
        ("top", TOPS),
        ("bottom", BOTTOMS),
        ("gloves", GLOVES),
        ("shoes", SHOES),
    ]
    .into_iter()
    .flat_map(|(geartype, names)| {
        names.iter().map(move |name| ArmorRecord {
            name: name.to_string(),
            geartype: Some(geartype.to_string()),
            gearset: None,
            img: None,
        })
    })
    .collect();

    let weapons = WEAPONS
        .iter()
        .map(|name| WeaponRecord {
            name: name.to_string(),
            kind: Some("weapon".to_string()),
            img: None,
        })
        .collect();

    let mods = MODS
        .iter()
        .map(|(name, mod_for)| ModRecord {
            mod_name: name.to_string(),
            mod_for: mod_for.to_string(),
            img: None,
        })
        .collect();

    Catalog {
        weapons,
        armor,
        mods,
    }
}
