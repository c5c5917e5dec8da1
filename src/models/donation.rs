use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Estado de una donación. Valores desconocidos se conservan tal cual.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Debug, Default)]
#[serde(from = "String", into = "String")]
pub enum DonationStatus {
    #[default]
    Available,
    Assigned,
    Collected,
    Picked,
    Distributed,
    Cancelled,
    Other(String),
}

impl DonationStatus {
    pub fn as_str(&self) -> &str {
        match self {
            DonationStatus::Available => "available",
            DonationStatus::Assigned => "assigned",
            DonationStatus::Collected => "collected",
            DonationStatus::Picked => "picked",
            DonationStatus::Distributed => "distributed",
            DonationStatus::Cancelled => "cancelled",
            DonationStatus::Other(other) => other,
        }
    }

    pub fn label(&self) -> String {
        let raw = self.as_str();
        let mut chars = raw.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

impl From<String> for DonationStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "available" => DonationStatus::Available,
            "assigned" => DonationStatus::Assigned,
            "collected" => DonationStatus::Collected,
            "picked" => DonationStatus::Picked,
            "distributed" => DonationStatus::Distributed,
            "cancelled" => DonationStatus::Cancelled,
            _ => DonationStatus::Other(value),
        }
    }
}

impl From<DonationStatus> for String {
    fn from(status: DonationStatus) -> Self {
        status.as_str().to_string()
    }
}

/// Donación tal como la devuelve `/api/donations/items/`
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct Donation {
    pub id: u64,
    #[serde(default)]
    pub food_type: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: String,
    pub quantity: u32,
    #[serde(default)]
    pub status: DonationStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub expiry: Option<DateTime<Utc>>,
    #[serde(default)]
    pub pickup_address: String,
    #[serde(default, deserialize_with = "lenient_coordinate")]
    pub latitude: Option<f64>,
    #[serde(default, deserialize_with = "lenient_coordinate")]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub restaurant: Option<u64>,
}

impl Donation {
    /// Título a mostrar: `food_type`, luego `title`, luego "Food"
    pub fn display_title(&self) -> &str {
        if !self.food_type.trim().is_empty() {
            return &self.food_type;
        }
        match self.title.as_deref() {
            Some(title) if !title.trim().is_empty() => title,
            _ => "Food",
        }
    }

    pub fn is_available(&self) -> bool {
        self.status == DonationStatus::Available
    }

    pub fn location(&self) -> Option<(f64, f64)> {
        Some((self.latitude?, self.longitude?))
    }
}

/// Los DecimalField de DRF llegan como string ("48.856600")
fn lenient_coordinate<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Coordinate {
        Number(f64),
        Text(String),
    }

    match Option::<Coordinate>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Coordinate::Number(value)) => Ok(Some(value)),
        Some(Coordinate::Text(text)) if text.trim().is_empty() => Ok(None),
        Some(Coordinate::Text(text)) => text
            .trim()
            .parse()
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

/// Payload de creación (restaurante)
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct NewDonation {
    pub food_type: String,
    pub description: String,
    pub quantity: u32,
    pub expiry: Option<DateTime<Utc>>,
    pub pickup_address: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub notes: String,
}

/// Estado de una solicitud de recogida
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Debug, Default)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
    Cancelled,
    Fulfilled,
}

/// Solicitud de recogida hecha por una ONG
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct DonationRequest {
    pub id: u64,
    pub donation: u64,
    #[serde(default)]
    pub status: RequestStatus,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct NewDonationRequest {
    pub donation: u64,
    pub message: String,
}
