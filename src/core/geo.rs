//! Static region-to-coordinate lookup for map display.
//!
//! The table is compiled in and never mutated at runtime. A miss is not an
//! error: records whose location has no entry simply cannot be plotted and
//! are excluded from map output while remaining visible everywhere else.

use crate::core::project::Project;
use serde::{Deserialize, Serialize};

/// Region centroids used by the map view. Region names double as the
/// canonical location choices offered by the input form.
const REGION_TABLE: &[(&str, f64, f64)] = &[
    ("Aguascalientes", 21.8853, -102.2916),
    ("Baja California", 32.6245, -115.4523),
    ("Chihuahua", 28.6330, -106.0691),
    ("Ciudad de Mexico", 19.4326, -99.1332),
    ("Coahuila", 25.4383, -100.9737),
    ("Estado de Mexico", 19.4969, -99.7233),
    ("Guanajuato", 21.0190, -101.2574),
    ("Jalisco", 20.6597, -103.3496),
    ("Nuevo Leon", 25.6866, -100.3161),
    ("Puebla", 19.0414, -98.2063),
    ("Queretaro", 20.5888, -100.3899),
    ("Quintana Roo", 21.1619, -86.8515),
    ("Sinaloa", 24.8091, -107.3940),
    ("Sonora", 29.0729, -110.9559),
    ("Veracruz", 19.1738, -96.1342),
    ("Yucatan", 20.9674, -89.5926),
];

/// A record joined with the coordinates of its location, ready to plot.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MapPoint {
    pub id: i64,
    pub name: String,
    pub power_kw: f64,
    pub location: String,
    pub owner: String,
    pub lat: f64,
    pub lon: f64,
}

/// Exact-match lookup of a region name. `None` means "cannot be plotted",
/// never an error.
pub fn resolve(name: &str) -> Option<(f64, f64)> {
    REGION_TABLE
        .iter()
        .find(|(region, _, _)| *region == name)
        .map(|(_, lat, lon)| (*lat, *lon))
}

/// Join each record with the coordinates of its location. Records whose
/// location does not resolve are dropped from the result.
pub fn annotate(rows: &[Project]) -> Vec<MapPoint> {
    rows.iter()
        .filter_map(|p| {
            resolve(&p.location).map(|(lat, lon)| MapPoint {
                id: p.id,
                name: p.name.clone(),
                power_kw: p.power_kw,
                location: p.location.clone(),
                owner: p.owner.clone(),
                lat,
                lon,
            })
        })
        .collect()
}

/// Enumerate the known regions and their coordinates.
pub fn regions() -> impl Iterator<Item = (&'static str, f64, f64)> {
    REGION_TABLE.iter().copied()
}
