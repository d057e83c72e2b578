// ── Property inventory domain types ──
//
// Hierarchy: Site → Building → Unit. Sites may have zero buildings
// (land not yet developed), buildings may have zero listed units.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Unit category.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum UnitType {
    Studio,
    OneBedroom,
    TwoBedroom,
    ThreeBedroomPlus,
    Penthouse,
    Office,
    Shop,
}

impl UnitType {
    pub fn label(self) -> &'static str {
        match self {
            Self::Studio => "Studio",
            Self::OneBedroom => "1BR",
            Self::TwoBedroom => "2BR",
            Self::ThreeBedroomPlus => "3BR+",
            Self::Penthouse => "Penthouse",
            Self::Office => "Office",
            Self::Shop => "Shop",
        }
    }
}

/// Occupancy status of a unit.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum UnitStatus {
    Available,
    Rented,
    Sold,
    UnderMaintenance,
}

impl UnitStatus {
    pub const ALL: [Self; 4] = [
        Self::Available,
        Self::Rented,
        Self::Sold,
        Self::UnderMaintenance,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Available => "Available",
            Self::Rented => "Rented",
            Self::Sold => "Sold",
            Self::UnderMaintenance => "Under Maintenance",
        }
    }
}

/// A single sellable/rentable unit within a building.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Unit {
    pub id: String,
    pub name: String,
    pub unit_type: UnitType,
    /// Asking price (sale or annual lease) in whole currency units.
    pub price: u64,
    pub status: UnitStatus,
    pub floor: u8,
    pub area_sqm: u32,
    pub bedrooms: u8,
    pub bathrooms: u8,
}

/// A building within a site.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Building {
    pub id: String,
    pub name: String,
    pub floors: u8,
    pub units: Vec<Unit>,
}

/// A development site holding buildings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Site {
    pub id: String,
    pub name: String,
    pub location: String,
    pub address: String,
    pub buildings: Vec<Building>,
}

impl Site {
    /// Total listed units across all buildings.
    pub fn unit_count(&self) -> usize {
        self.buildings.iter().map(|b| b.units.len()).sum()
    }
}
