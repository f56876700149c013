//! # Registry Records
//!
//! Producers own farms, farms own crops. The shapes below mirror the
//! registry API one to one, including its field names on the wire
//! (`cpf_cnpj`, `nome`, `fazendas`, `culturas`, `safra`, ...).
//!
//! ```text
//! Producer
//! ├── id / tax_id (TaxId) / name
//! └── farms: Vec<Farm>
//!     ├── id / name / city / state
//!     ├── areas (AreaTriple, flattened: area_total, area_agricultavel, area_vegetacao)
//!     └── crops: Vec<Crop>
//!         └── id / name / harvest
//! ```
//!
//! Stored records ([`Producer`], [`Farm`], [`Crop`]) carry server-assigned
//! ids and timestamps. Drafts ([`ProducerDraft`], [`FarmDraft`],
//! [`CropDraft`]) are what the client edits and submits; their ids are only
//! present when editing an existing record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use campo_core::{format_identifier, AreaTriple, TaxId};

macro_rules! integer_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, concat!($prefix, ":{}"), self.0)
            }
        }
    };
}

integer_id!(
    /// Server-assigned producer key.
    ProducerId,
    "producer"
);
integer_id!(
    /// Server-assigned farm key.
    FarmId,
    "farm"
);
integer_id!(
    /// Server-assigned crop key.
    CropId,
    "crop"
);

// ---------------------------------------------------------------------------
// Stored records
// ---------------------------------------------------------------------------

/// A registered rural producer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Producer {
    pub id: ProducerId,
    #[serde(rename = "cpf_cnpj")]
    pub tax_id: TaxId,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "fazendas", default)]
    pub farms: Vec<Farm>,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Producer {
    /// Sum of the total areas of every farm, in hectares.
    pub fn total_hectares(&self) -> f64 {
        self.farms.iter().map(|f| f.areas.total).sum()
    }

    /// Look up a farm by id.
    pub fn farm(&self, id: FarmId) -> Option<&Farm> {
        self.farms.iter().find(|f| f.id == id)
    }

    /// Apply a partial update.
    pub fn apply(&mut self, update: &ProducerUpdate) {
        if let Some(name) = &update.name {
            self.name.clone_from(name);
        }
    }
}

/// A farm belonging to a producer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Farm {
    pub id: FarmId,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "cidade")]
    pub city: String,
    /// Two-letter state code (`SP`, `MG`, ...).
    #[serde(rename = "estado")]
    pub state: String,
    #[serde(flatten)]
    pub areas: AreaTriple,
    #[serde(rename = "produtor_id")]
    pub producer_id: ProducerId,
    #[serde(rename = "culturas", default)]
    pub crops: Vec<Crop>,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A crop planted on a farm in a given harvest season.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Crop {
    pub id: CropId,
    #[serde(rename = "nome")]
    pub name: String,
    /// Harvest season label, e.g. `2023/2024`.
    #[serde(rename = "safra")]
    pub harvest: String,
    #[serde(rename = "fazenda_id")]
    pub farm_id: FarmId,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Find the producer registered under `tax_id`, if any.
///
/// The registry refuses a second producer with the same identifier;
/// clients use this to warn before submitting.
pub fn find_by_tax_id<'a>(producers: &'a [Producer], tax_id: &TaxId) -> Option<&'a Producer> {
    producers.iter().find(|p| &p.tax_id == tax_id)
}

// ---------------------------------------------------------------------------
// Drafts
// ---------------------------------------------------------------------------

/// Producer as edited in a form and submitted for create or update.
///
/// `tax_id` is free text here. It is only validated by
/// [`review`](crate::review) and normalized on submission.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProducerDraft {
    #[serde(rename = "cpf_cnpj")]
    pub tax_id: String,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "fazendas", default)]
    pub farms: Vec<FarmDraft>,
}

/// Farm inside a [`ProducerDraft`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FarmDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<FarmId>,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "cidade")]
    pub city: String,
    #[serde(rename = "estado")]
    pub state: String,
    #[serde(flatten)]
    pub areas: AreaTriple,
    #[serde(rename = "culturas", default)]
    pub crops: Vec<CropDraft>,
}

/// Crop inside a [`FarmDraft`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CropDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<CropId>,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "safra")]
    pub harvest: String,
}

impl From<&Producer> for ProducerDraft {
    fn from(producer: &Producer) -> Self {
        Self {
            tax_id: format_identifier(producer.tax_id.as_str()),
            name: producer.name.clone(),
            farms: producer.farms.iter().map(FarmDraft::from).collect(),
        }
    }
}

impl From<&Farm> for FarmDraft {
    fn from(farm: &Farm) -> Self {
        Self {
            id: Some(farm.id),
            name: farm.name.clone(),
            city: farm.city.clone(),
            state: farm.state.clone(),
            areas: farm.areas,
            crops: farm.crops.iter().map(CropDraft::from).collect(),
        }
    }
}

impl From<&Crop> for CropDraft {
    fn from(crop: &Crop) -> Self {
        Self {
            id: Some(crop.id),
            name: crop.name.clone(),
            harvest: crop.harvest.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Partial updates
// ---------------------------------------------------------------------------

/// Partial update of a producer. Only the name is mutable; the identifier
/// is fixed at registration.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProducerUpdate {
    #[serde(rename = "nome", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Partial update of a farm. `None` fields are left untouched.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FarmUpdate {
    #[serde(rename = "nome", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "cidade", default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(rename = "estado", default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area_total: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area_agricultavel: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area_vegetacao: Option<f64>,
}

impl FarmUpdate {
    /// True when no field is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Area figures of `farm` after this update, without modifying it.
    pub fn resulting_areas(&self, farm: &Farm) -> AreaTriple {
        AreaTriple {
            total: self.area_total.unwrap_or(farm.areas.total),
            agricultural: self.area_agricultavel.unwrap_or(farm.areas.agricultural),
            vegetation: self.area_vegetacao.unwrap_or(farm.areas.vegetation),
        }
    }

    /// Overwrite every set field of `farm`.
    pub fn apply(&self, farm: &mut Farm) {
        if let Some(name) = &self.name {
            farm.name.clone_from(name);
        }
        if let Some(city) = &self.city {
            farm.city.clone_from(city);
        }
        if let Some(state) = &self.state {
            farm.state.clone_from(state);
        }
        farm.areas = self.resulting_areas(farm);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_producer() -> Producer {
        serde_json::from_value(serde_json::json!({
            "id": 1,
            "cpf_cnpj": "12345678909",
            "nome": "João Silva",
            "created_at": "2024-01-15T10:00:00Z",
            "fazendas": [{
                "id": 10,
                "nome": "Fazenda Boa Vista",
                "cidade": "Ribeirão Preto",
                "estado": "SP",
                "area_total": 1000.0,
                "area_agricultavel": 600.0,
                "area_vegetacao": 300.0,
                "produtor_id": 1,
                "created_at": "2024-01-15T10:00:00Z",
                "culturas": [{
                    "id": 100,
                    "nome": "Soja",
                    "safra": "2023/2024",
                    "fazenda_id": 10,
                    "created_at": "2024-01-15T10:00:00Z"
                }]
            }]
        }))
        .unwrap()
    }

    #[test]
    fn deserializes_api_shape() {
        let producer = sample_producer();
        assert_eq!(producer.id, ProducerId(1));
        assert_eq!(producer.tax_id.as_str(), "12345678909");
        assert_eq!(producer.farms[0].areas, AreaTriple::new(1000.0, 600.0, 300.0));
        assert_eq!(producer.farms[0].crops[0].harvest, "2023/2024");
        assert!(producer.updated_at.is_none());
    }

    #[test]
    fn rejects_invalid_tax_id_from_api() {
        let result: Result<Producer, _> = serde_json::from_value(serde_json::json!({
            "id": 1,
            "cpf_cnpj": "12345678900",
            "nome": "X",
            "created_at": "2024-01-15T10:00:00Z"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn serializes_wire_names() {
        let json = serde_json::to_value(sample_producer()).unwrap();
        assert_eq!(json["cpf_cnpj"], "12345678909");
        assert_eq!(json["fazendas"][0]["area_agricultavel"], 600.0);
        assert_eq!(json["fazendas"][0]["culturas"][0]["safra"], "2023/2024");
        assert!(json.get("updated_at").is_none());
    }

    #[test]
    fn draft_from_producer_keeps_ids_and_masks_tax_id() {
        let draft = ProducerDraft::from(&sample_producer());
        assert_eq!(draft.tax_id, "123.456.789-09");
        assert_eq!(draft.farms[0].id, Some(FarmId(10)));
        assert_eq!(draft.farms[0].crops[0].id, Some(CropId(100)));
    }

    #[test]
    fn new_draft_omits_ids_on_the_wire() {
        let draft = ProducerDraft {
            tax_id: "12345678909".into(),
            name: "Maria".into(),
            farms: vec![FarmDraft::default()],
        };
        let json = serde_json::to_value(&draft).unwrap();
        assert!(json["fazendas"][0].get("id").is_none());
    }

    #[test]
    fn farm_update_applies_only_set_fields() {
        let mut farm = sample_producer().farms.remove(0);
        let update = FarmUpdate {
            area_vegetacao: Some(350.0),
            state: Some("MG".into()),
            ..FarmUpdate::default()
        };
        assert!(!update.is_empty());
        update.apply(&mut farm);
        assert_eq!(farm.state, "MG");
        assert_eq!(farm.name, "Fazenda Boa Vista");
        assert_eq!(farm.areas, AreaTriple::new(1000.0, 600.0, 350.0));
    }

    #[test]
    fn resulting_areas_does_not_mutate() {
        let farm = sample_producer().farms.remove(0);
        let update = FarmUpdate {
            area_agricultavel: Some(800.0),
            ..FarmUpdate::default()
        };
        let after = update.resulting_areas(&farm);
        assert!(!after.is_consistent());
        assert_eq!(farm.areas.agricultural, 600.0);
    }

    #[test]
    fn producer_update_renames() {
        let mut producer = sample_producer();
        producer.apply(&ProducerUpdate {
            name: Some("João S. Silva".into()),
        });
        assert_eq!(producer.name, "João S. Silva");
        producer.apply(&ProducerUpdate::default());
        assert_eq!(producer.name, "João S. Silva");
    }

    #[test]
    fn lookup_helpers() {
        let producer = sample_producer();
        assert_eq!(producer.total_hectares(), 1000.0);
        assert!(producer.farm(FarmId(10)).is_some());
        assert!(producer.farm(FarmId(11)).is_none());

        let producers = vec![producer];
        let tax_id = TaxId::new("123.456.789-09").unwrap();
        assert!(find_by_tax_id(&producers, &tax_id).is_some());
        let other = TaxId::new("11222333000181").unwrap();
        assert!(find_by_tax_id(&producers, &other).is_none());
    }

    #[test]
    fn id_display() {
        assert_eq!(ProducerId(7).to_string(), "producer:7");
        assert_eq!(FarmId(3).to_string(), "farm:3");
        assert_eq!(CropId(1).to_string(), "crop:1");
    }
}
