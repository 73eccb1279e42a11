//! Constants for the overlay coloring policy.

/// Attribute written onto colored elements.
pub const COLOR_ATTR: &str = "color";

/// Overlay color for inserted elements.
pub const COLOR_INSERT: &str = "#00FF00";

/// Overlay color for deleted elements.
pub const COLOR_DELETE: &str = "#FF0000";

/// Overlay color for changed elements, attributes and text content.
pub const COLOR_CHANGE: &str = "#FFFF00";

/// Elements eligible to carry the overlay `color` attribute.
///
/// This is a fixed MusicXML-aware policy: coloring lands on the nearest
/// ancestor whose tag is in this set, starting at the addressed element
/// itself.
pub const COLORABLE_TAGS: [&str; 12] = [
    "note",
    "direction",
    "harmony",
    "backup",
    "forward",
    "attributes",
    "clef",
    "key",
    "time",
    "part",
    "measure",
    "rest",
];

/// Returns true if the tag may carry the overlay color attribute.
pub fn is_colorable(tag: &str) -> bool {
    COLORABLE_TAGS.contains(&tag)
}
