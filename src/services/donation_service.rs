use crate::models::{Donation, DonationRequest, NewDonation, NewDonationRequest};
use crate::utils::{item_path, DONATIONS_PATH, DONATION_REQUESTS_PATH};

use super::api_client::ApiClient;
use super::http::ApiError;

/// Donaciones y solicitudes de recogida
#[derive(Clone)]
pub struct DonationService {
    api: ApiClient,
}

impl DonationService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn list(&self) -> Result<Vec<Donation>, ApiError> {
        self.api.get(DONATIONS_PATH).await
    }

    pub async fn get(&self, id: u64) -> Result<Donation, ApiError> {
        self.api.get(&item_path(DONATIONS_PATH, id)).await
    }

    /// Publicar donación (sólo restaurantes, lo valida el backend)
    pub async fn create(&self, donation: &NewDonation) -> Result<Donation, ApiError> {
        log::info!("🍱 Publicando donación: {} x{}", donation.food_type, donation.quantity);
        self.api.post_json(DONATIONS_PATH, donation).await
    }

    /// Solicitar recogida (sólo ONGs, lo valida el backend)
    pub async fn request_pickup(&self, request: &NewDonationRequest) -> Result<DonationRequest, ApiError> {
        log::info!("🙋 Solicitando recogida de donación #{}", request.donation);
        self.api.post_json(DONATION_REQUESTS_PATH, request).await
    }
}
