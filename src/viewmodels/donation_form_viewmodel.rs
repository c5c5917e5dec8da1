// ============================================================================
// DONATION FORM VIEWMODEL - Validación y publicación de donaciones
// ============================================================================

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};

use crate::models::{Donation, NewDonation};
use crate::router::Route;
use crate::services::DonationService;
use crate::state::SessionManager;

use super::errors::{Action, ActionError, FormError};
use super::required;

/// Formato de `<input type="datetime-local">`
const DATETIME_LOCAL_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Valores crudos del formulario, tal como los escribe el usuario
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DonationDraft {
    pub food_type: String,
    pub description: String,
    pub quantity: String,
    pub expiry: String,
    pub pickup_address: String,
    pub latitude: String,
    pub longitude: String,
    pub notes: String,
}

impl DonationDraft {
    pub fn validate(&self) -> Result<NewDonation, FormError> {
        let food_type = required(&self.food_type, "Food type")?;
        let quantity = parse_quantity(&self.quantity)?;
        let expiry = parse_expiry(&self.expiry)?;
        let latitude = parse_coordinate(&self.latitude, "Latitude", 90.0)?;
        let longitude = parse_coordinate(&self.longitude, "Longitude", 180.0)?;

        Ok(NewDonation {
            food_type,
            description: self.description.trim().to_string(),
            quantity,
            expiry,
            pickup_address: self.pickup_address.trim().to_string(),
            latitude,
            longitude,
            notes: self.notes.trim().to_string(),
        })
    }
}

fn parse_quantity(raw: &str) -> Result<u32, FormError> {
    match raw.trim().parse::<u32>() {
        Ok(quantity) if quantity >= 1 => Ok(quantity),
        _ => Err(FormError::InvalidQuantity),
    }
}

/// RFC 3339, o fecha local del navegador (se interpreta como UTC)
fn parse_expiry(raw: &str) -> Result<Option<DateTime<Utc>>, FormError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Ok(Some(parsed.with_timezone(&Utc)));
    }
    NaiveDateTime::parse_from_str(raw, DATETIME_LOCAL_FORMAT)
        .map(|naive| Some(Utc.from_utc_datetime(&naive)))
        .map_err(|_| FormError::InvalidExpiry)
}

/// Vacío = sin coordenada. El backend guarda 6 decimales.
fn parse_coordinate(raw: &str, field: &'static str, limit: f64) -> Result<Option<f64>, FormError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    let value: f64 = raw.parse().map_err(|_| FormError::InvalidNumber(field))?;
    if !value.is_finite() || value < -limit || value > limit {
        return Err(FormError::OutOfRange {
            field,
            min: -limit,
            max: limit,
        });
    }
    Ok(Some((value * 1e6).round() / 1e6))
}

#[derive(Clone)]
pub struct DonationFormViewModel {
    service: DonationService,
}

impl DonationFormViewModel {
    pub fn new(session: &SessionManager) -> Self {
        Self {
            service: DonationService::new(session.api().clone()),
        }
    }

    /// Publica la donación y vuelve al listado
    pub async fn submit(&self, draft: DonationDraft) -> Result<Route, ActionError> {
        let donation = draft
            .validate()
            .map_err(|e| ActionError::invalid(Action::CreateDonation, e))?;

        let created: Donation = self
            .service
            .create(&donation)
            .await
            .map_err(|e| ActionError::from_api(Action::CreateDonation, &e))?;
        log::info!("✅ [DONATION] Donación #{} publicada", created.id);
        Ok(Route::Donations)
    }
}
