//! Domain model for tracked assets ("bienes").
//!
//! Assets are fully owned by the SIGVIB API; this client only reads
//! snapshots. Every relational field is optional because the API omits
//! unassigned references rather than sending explicit nulls.

use serde::{Deserialize, Serialize};

/// Display fallback for unassigned relational fields.
pub const UNASSIGNED: &str = "Sin asignar";

/// A tracked physical asset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asset {
    #[serde(rename = "idBien")]
    pub id: i64,
    #[serde(rename = "codigoBarras", default)]
    pub barcode: Option<String>,
    #[serde(rename = "numeroSerie", default)]
    pub serial_number: Option<String>,
    #[serde(rename = "modelo", default)]
    pub model: Option<AssetModel>,
    #[serde(rename = "marca", default)]
    pub brand: Option<Brand>,
    #[serde(rename = "tipoBien", default)]
    pub asset_type: Option<AssetType>,
    #[serde(rename = "lugar", default)]
    pub place: Option<Place>,
    #[serde(rename = "usuario", default)]
    pub responsible: Option<ResponsibleUser>,
}

/// Model reference with an optional product photo.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetModel {
    #[serde(rename = "nombreModelo", default)]
    pub name: Option<String>,
    #[serde(rename = "foto", default)]
    pub photo_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Brand {
    #[serde(rename = "nombre", default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetType {
    #[serde(rename = "nombre", default)]
    pub name: Option<String>,
}

/// Assigned location. Presence of this reference is what makes an asset
/// "occupied".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Place {
    #[serde(rename = "lugar", default)]
    pub name: Option<String>,
}

/// The person responsible for an asset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponsibleUser {
    #[serde(rename = "nombre", default)]
    pub name: Option<String>,
    #[serde(rename = "lugar", default)]
    pub place: Option<String>,
}

impl Asset {
    /// An asset is occupied iff it has an assigned place.
    pub fn is_occupied(&self) -> bool {
        self.place.is_some()
    }

    /// Status label shown next to an asset: "Ocupado" or "Libre".
    pub fn status_label(&self) -> &'static str {
        if self.is_occupied() {
            "Ocupado"
        } else {
            "Libre"
        }
    }

    pub fn barcode_display(&self) -> &str {
        self.barcode.as_deref().unwrap_or(UNASSIGNED)
    }

    pub fn model_name(&self) -> &str {
        self.model
            .as_ref()
            .and_then(|m| m.name.as_deref())
            .unwrap_or(UNASSIGNED)
    }

    pub fn brand_name(&self) -> &str {
        self.brand
            .as_ref()
            .and_then(|b| b.name.as_deref())
            .unwrap_or(UNASSIGNED)
    }

    pub fn type_name(&self) -> &str {
        self.asset_type
            .as_ref()
            .and_then(|t| t.name.as_deref())
            .unwrap_or(UNASSIGNED)
    }

    pub fn place_name(&self) -> &str {
        self.place
            .as_ref()
            .and_then(|p| p.name.as_deref())
            .unwrap_or(UNASSIGNED)
    }

    pub fn responsible_name(&self) -> &str {
        self.responsible
            .as_ref()
            .and_then(|r| r.name.as_deref())
            .unwrap_or(UNASSIGNED)
    }

    /// Case-insensitive substring match across the fields the client
    /// searches locally: asset-type name, place, responsible-user name,
    /// model name, and barcode.
    pub fn matches_query(&self, query: &str) -> bool {
        let needle = query.to_lowercase();
        if needle.is_empty() {
            return true;
        }

        let contains = |field: Option<&str>| {
            field
                .map(|v| v.to_lowercase().contains(&needle))
                .unwrap_or(false)
        };

        contains(self.asset_type.as_ref().and_then(|t| t.name.as_deref()))
            || contains(self.place.as_ref().and_then(|p| p.name.as_deref()))
            || contains(self.responsible.as_ref().and_then(|r| r.name.as_deref()))
            || contains(self.model.as_ref().and_then(|m| m.name.as_deref()))
            || contains(self.barcode.as_deref())
    }
}
