//! Data models for SIGVIB entities.
//!
//! - `Asset` and its relational references: the tracked items ("bienes")
//! - `OccupancySummary`: aggregate occupied/free figures
//!
//! All types deserialize directly from the API's Spanish camelCase wire
//! format via explicit serde renames.

pub mod asset;
pub mod occupancy;

pub use asset::{Asset, AssetModel, AssetType, Brand, Place, ResponsibleUser, UNASSIGNED};
pub use occupancy::OccupancySummary;
