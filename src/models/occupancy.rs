//! Occupancy summary returned by the API's aggregate endpoint.

use serde::{Deserialize, Serialize};

/// Aggregate occupancy figures for the whole asset collection.
///
/// The API may omit individual fields; they default to zero so the summary
/// screen always has something to render.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OccupancySummary {
    #[serde(rename = "porcentajeOcupados", default)]
    pub occupied_percent: f64,
    #[serde(rename = "porcentajeLibres", default)]
    pub free_percent: f64,
    #[serde(rename = "bienesOcupados", default)]
    pub occupied_count: u32,
    #[serde(rename = "bienesLibres", default)]
    pub free_count: u32,
}
