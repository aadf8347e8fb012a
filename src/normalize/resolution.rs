// Aspect ratio -> pixel dimensions. Two tables on purpose: /camera/info and
// /camera/resolution serve different consumers and keep their own values and defaults.

use crate::models::Resolution;

const fn res(width: u32, height: u32) -> Resolution {
    Resolution { width, height }
}

/// Used by `/camera/info` (player sizing).
const INFO_TABLE: &[(&str, Resolution)] = &[
    ("16:9", res(1280, 720)),
    ("4:3", res(640, 480)),
    ("1:1", res(720, 720)),
    ("16:10", res(1280, 800)),
];
pub const INFO_DEFAULT: Resolution = res(640, 480);

/// Used by `/camera/resolution` (overlay layout).
const RESOLUTION_TABLE: &[(&str, Resolution)] = &[
    ("16:9", res(1920, 1080)),
    ("4:3", res(1440, 1080)),
    ("1:1", res(1080, 1080)),
    ("16:10", res(1920, 1200)),
];
pub const RESOLUTION_DEFAULT: Resolution = res(1920, 1080);

fn lookup(table: &[(&str, Resolution)], aspect_ratio: &str) -> Option<Resolution> {
    let aspect_ratio = aspect_ratio.trim();
    table
        .iter()
        .find(|(ratio, _)| *ratio == aspect_ratio)
        .map(|(_, r)| *r)
}

pub fn info_resolution(aspect_ratio: &str) -> Resolution {
    lookup(INFO_TABLE, aspect_ratio).unwrap_or(INFO_DEFAULT)
}

pub fn stream_resolution(aspect_ratio: &str) -> Resolution {
    lookup(RESOLUTION_TABLE, aspect_ratio).unwrap_or(RESOLUTION_DEFAULT)
}
