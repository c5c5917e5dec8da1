// ============================================================================
// TRACKING VIEWMODEL - Seguimiento de una donación
// ============================================================================

use crate::models::Donation;
use crate::services::DonationService;
use crate::state::{ReactiveState, SessionManager};

/// Margen del mapa alrededor del punto de recogida (grados)
const MAP_SPAN: f64 = 0.01;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TrackingState {
    pub donation_id: Option<u64>,
    pub donation: Option<Donation>,
    pub loading: bool,
}

#[derive(Clone)]
pub struct TrackingViewModel {
    service: DonationService,
    pub state: ReactiveState<TrackingState>,
}

impl TrackingViewModel {
    pub fn new(session: &SessionManager) -> Self {
        Self {
            service: DonationService::new(session.api().clone()),
            state: ReactiveState::default(),
        }
    }

    pub async fn load(&self, donation_id: u64) {
        self.state.set(TrackingState {
            donation_id: Some(donation_id),
            donation: None,
            loading: true,
        });

        let donation = match self.service.get(donation_id).await {
            Ok(donation) => Some(donation),
            Err(e) => {
                log::warn!("⚠️ [TRACKING] Donación #{} no disponible: {}", donation_id, e);
                None
            }
        };

        self.state.update(|state| {
            // Otra donación pedida mientras tanto: esta respuesta ya no aplica
            if state.donation_id == Some(donation_id) {
                state.donation = donation;
                state.loading = false;
            }
        });
    }
}

/// Mapa OpenStreetMap embebido centrado en la recogida
pub fn map_embed_url(donation: &Donation) -> Option<String> {
    let (lat, lng) = donation.location()?;
    Some(format!(
        "https://www.openstreetmap.org/export/embed.html?bbox={:.6}%2C{:.6}%2C{:.6}%2C{:.6}&layer=mapnik&marker={:.6}%2C{:.6}",
        lng - MAP_SPAN,
        lat - MAP_SPAN,
        lng + MAP_SPAN,
        lat + MAP_SPAN,
        lat,
        lng
    ))
}
