// ============================================================================
// SCAN VIEWMODEL - Escaneo de comida antes de la entrega
// ============================================================================

use crate::models::{ScanImage, ScanResult};
use crate::services::ScanService;
use crate::state::{ReactiveState, SessionManager};

use super::errors::{Action, ActionError, FormError};

#[derive(Clone)]
pub struct ScanViewModel {
    service: ScanService,
    pub result: ReactiveState<Option<ScanResult>>,
}

impl ScanViewModel {
    pub fn new(session: &SessionManager) -> Self {
        Self {
            service: ScanService::new(session.api().clone()),
            result: ReactiveState::default(),
        }
    }

    /// Olvida el último resultado (al entrar de nuevo en la página)
    pub fn reset(&self) {
        if self.result.with(Option::is_some) {
            self.result.set(None);
        }
    }

    pub async fn scan(&self, image: Option<ScanImage>) -> Result<ScanResult, ActionError> {
        let image = image
            .filter(|image| !image.bytes.is_empty())
            .ok_or_else(|| ActionError::invalid(Action::FoodScan, FormError::MissingImage))?;

        let result = self
            .service
            .scan(image)
            .await
            .map_err(|e| ActionError::from_api(Action::FoodScan, &e))?;
        self.result.set(Some(result.clone()));
        Ok(result)
    }
}
