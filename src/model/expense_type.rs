use serde::de::Deserializer;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// The category of an expense. The remote store holds these as their French labels. Values that
/// are not in the known set are preserved as `Other` so that they survive a round trip. A bill
/// whose type has not been chosen yet is `Other("")`.
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum ExpenseType {
    Transports,
    Restaurants,
    Hotel,
    OnlineServices,
    Electronics,
    Equipment,
    OfficeSupplies,
    Other(String),
}

impl ExpenseType {
    /// The known categories, in the order a form would list them.
    pub const KNOWN: [ExpenseType; 7] = [
        ExpenseType::Transports,
        ExpenseType::Restaurants,
        ExpenseType::Hotel,
        ExpenseType::OnlineServices,
        ExpenseType::Electronics,
        ExpenseType::Equipment,
        ExpenseType::OfficeSupplies,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            ExpenseType::Transports => TRANSPORTS_STR,
            ExpenseType::Restaurants => RESTAURANTS_STR,
            ExpenseType::Hotel => HOTEL_STR,
            ExpenseType::OnlineServices => ONLINE_SERVICES_STR,
            ExpenseType::Electronics => ELECTRONICS_STR,
            ExpenseType::Equipment => EQUIPMENT_STR,
            ExpenseType::OfficeSupplies => OFFICE_SUPPLIES_STR,
            ExpenseType::Other(s) => s,
        }
    }
}

impl Default for ExpenseType {
    fn default() -> Self {
        ExpenseType::Other(String::new())
    }
}

impl From<&str> for ExpenseType {
    fn from(value: &str) -> Self {
        match value {
            TRANSPORTS_STR => ExpenseType::Transports,
            RESTAURANTS_STR => ExpenseType::Restaurants,
            HOTEL_STR => ExpenseType::Hotel,
            ONLINE_SERVICES_STR => ExpenseType::OnlineServices,
            ELECTRONICS_STR => ExpenseType::Electronics,
            EQUIPMENT_STR => ExpenseType::Equipment,
            OFFICE_SUPPLIES_STR => ExpenseType::OfficeSupplies,
            other => ExpenseType::Other(other.to_string()),
        }
    }
}

impl FromStr for ExpenseType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(s.into())
    }
}

impl Display for ExpenseType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

impl Serialize for ExpenseType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ExpenseType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(ExpenseType::from(s.as_str()))
    }
}

const TRANSPORTS_STR: &str = "Transports";
const RESTAURANTS_STR: &str = "Restaurants et bars";
const HOTEL_STR: &str = "Hôtel et logement";
const ONLINE_SERVICES_STR: &str = "Services en ligne";
const ELECTRONICS_STR: &str = "IT et électronique";
const EQUIPMENT_STR: &str = "Equipement et matériel";
const OFFICE_SUPPLIES_STR: &str = "Fournitures de bureau";
