//! Present-weather code tables

use std::collections::HashMap;

use once_cell::sync::Lazy;

/// Descriptor codes, in the order they may appear before phenomena
pub static DESCRIPTORS: &[(&str, &str)] = &[
    ("MI", "Shallow"),
    ("PR", "Partial"),
    ("BC", "Patches"),
    ("DR", "Drifting"),
    ("BL", "Blowing"),
    ("SH", "Showers"),
    ("TS", "Thunderstorm"),
    ("FZ", "Freezing"),
];

/// Precipitation, obscuration and other phenomena
pub static PHENOMENA: &[(&str, &str)] = &[
    ("DZ", "Drizzle"),
    ("RA", "Rain"),
    ("SN", "Snow"),
    ("SG", "Snow Grains"),
    ("IC", "Ice Crystals"),
    ("PL", "Ice Pellets"),
    ("GR", "Hail"),
    ("GS", "Small Hail/Snow Pellets"),
    ("UP", "Unknown Precipitation"),
    ("BR", "Mist"),
    ("FG", "Fog"),
    ("FU", "Smoke"),
    ("VA", "Volcanic Ash"),
    ("DU", "Dust"),
    ("SA", "Sand"),
    ("HZ", "Haze"),
    ("PY", "Spray"),
    ("PO", "Dust/Sand Whirls"),
    ("SQ", "Squalls"),
    ("FC", "Funnel Cloud/Tornado"),
    ("SS", "Sandstorm"),
    ("DS", "Duststorm"),
];

static DESCRIPTOR_INDEX: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| DESCRIPTORS.iter().copied().collect());

static PHENOMENON_INDEX: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| PHENOMENA.iter().copied().collect());

pub fn descriptor(code: &str) -> Option<&'static str> {
    DESCRIPTOR_INDEX.get(code).copied()
}

pub fn phenomenon(code: &str) -> Option<&'static str> {
    PHENOMENON_INDEX.get(code).copied()
}
