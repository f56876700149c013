//! # Dashboard Statistics
//!
//! Aggregates over every farm of a set of producers: farm count, total
//! hectares, farms per state, crops per name, and land use split between
//! agricultural and vegetation area. Serializes with the registry API's
//! field names so a server-computed payload and a locally computed one are
//! interchangeable.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::{Farm, Producer};

/// Summed sub-areas across farms, in hectares.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LandUse {
    #[serde(rename = "Área Agricultável")]
    pub agricultural: f64,
    #[serde(rename = "Área de Vegetação")]
    pub vegetation: f64,
}

impl LandUse {
    /// Agricultural plus vegetation.
    pub fn total(&self) -> f64 {
        self.agricultural + self.vegetation
    }
}

/// Aggregate registry statistics.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DashboardStats {
    #[serde(rename = "total_fazendas")]
    pub total_farms: u64,
    #[serde(rename = "total_hectares")]
    pub total_hectares: f64,
    /// Farm count per state code.
    #[serde(rename = "por_estado")]
    pub by_state: BTreeMap<String, u64>,
    /// Crop count per crop name. Every crop row counts, across harvests.
    #[serde(rename = "por_cultura")]
    pub by_crop: BTreeMap<String, u64>,
    #[serde(rename = "por_uso_solo")]
    pub by_land_use: LandUse,
}

impl DashboardStats {
    /// Aggregate over every farm of every producer.
    pub fn from_producers(producers: &[Producer]) -> Self {
        Self::from_farms(producers.iter().flat_map(|p| &p.farms))
    }

    /// Aggregate over a set of farms.
    pub fn from_farms<'a>(farms: impl IntoIterator<Item = &'a Farm>) -> Self {
        let mut stats = Self::default();
        for farm in farms {
            stats.total_farms += 1;
            stats.total_hectares += farm.areas.total;
            stats.by_land_use.agricultural += farm.areas.agricultural;
            stats.by_land_use.vegetation += farm.areas.vegetation;
            *stats.by_state.entry(farm.state.clone()).or_default() += 1;
            for crop in &farm.crops {
                *stats.by_crop.entry(crop.name.clone()).or_default() += 1;
            }
        }

        tracing::info!(
            farms = stats.total_farms,
            hectares = stats.total_hectares,
            states = stats.states_served(),
            crops = stats.crop_kinds(),
            "dashboard statistics computed"
        );
        stats
    }

    /// Number of distinct states with at least one farm.
    pub fn states_served(&self) -> usize {
        self.by_state.len()
    }

    /// Number of distinct crop names.
    pub fn crop_kinds(&self) -> usize {
        self.by_crop.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Crop, CropId, FarmId, ProducerId};
    use campo_core::{AreaTriple, TaxId};
    use chrono::{TimeZone, Utc};

    fn farm(id: i64, state: &str, areas: AreaTriple, crops: &[&str]) -> Farm {
        let created_at = Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap();
        Farm {
            id: FarmId(id),
            name: format!("Fazenda {id}"),
            city: "Cidade".into(),
            state: state.into(),
            areas,
            producer_id: ProducerId(1),
            crops: crops
                .iter()
                .enumerate()
                .map(|(i, name)| Crop {
                    id: CropId(id * 100 + i as i64),
                    name: (*name).into(),
                    harvest: "2023/2024".into(),
                    farm_id: FarmId(id),
                    created_at,
                    updated_at: None,
                })
                .collect(),
            created_at,
            updated_at: None,
        }
    }

    fn producer(tax_id: &str, farms: Vec<Farm>) -> Producer {
        Producer {
            id: ProducerId(1),
            tax_id: TaxId::new(tax_id).unwrap(),
            name: "Produtor".into(),
            farms,
            created_at: Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap(),
            updated_at: None,
        }
    }

    #[test]
    fn empty_registry() {
        let stats = DashboardStats::from_producers(&[]);
        assert_eq!(stats, DashboardStats::default());
        assert_eq!(stats.states_served(), 0);
    }

    #[test]
    fn aggregates_across_producers() {
        let producers = vec![
            producer(
                "12345678909",
                vec![
                    farm(1, "SP", AreaTriple::new(1000.0, 600.0, 300.0), &["Soja", "Milho"]),
                    farm(2, "MG", AreaTriple::new(500.0, 200.0, 250.0), &["Café"]),
                ],
            ),
            producer(
                "11222333000181",
                vec![farm(3, "SP", AreaTriple::new(250.5, 100.0, 100.0), &["Soja"])],
            ),
        ];

        let stats = DashboardStats::from_producers(&producers);
        assert_eq!(stats.total_farms, 3);
        assert_eq!(stats.total_hectares, 1750.5);
        assert_eq!(stats.by_state.get("SP"), Some(&2));
        assert_eq!(stats.by_state.get("MG"), Some(&1));
        assert_eq!(stats.by_crop.get("Soja"), Some(&2));
        assert_eq!(stats.crop_kinds(), 3);
        assert_eq!(stats.states_served(), 2);
        assert_eq!(stats.by_land_use.agricultural, 900.0);
        assert_eq!(stats.by_land_use.vegetation, 650.0);
        assert_eq!(stats.by_land_use.total(), 1550.0);
    }

    #[test]
    fn serializes_with_api_names() {
        let stats = DashboardStats::from_farms(&[farm(
            1,
            "GO",
            AreaTriple::new(10.0, 4.0, 5.0),
            &["Algodão"],
        )]);
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["total_fazendas"], 1);
        assert_eq!(json["por_estado"]["GO"], 1);
        assert_eq!(json["por_cultura"]["Algodão"], 1);
        assert_eq!(json["por_uso_solo"]["Área Agricultável"], 4.0);

        let back: DashboardStats = serde_json::from_value(json).unwrap();
        assert_eq!(back, stats);
    }
}
