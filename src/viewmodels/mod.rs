// ============================================================================
// VIEWMODELS - Validación de formularios + lógica de UI
// ============================================================================
// Llaman a los services, devuelven valores y actualizan estado reactivo.
// Nunca tocan el DOM.
// ============================================================================

pub mod errors;
pub mod login_viewmodel;
pub mod register_viewmodel;
pub mod donations_viewmodel;
pub mod donation_form_viewmodel;
pub mod tracking_viewmodel;
pub mod notifications_viewmodel;
pub mod scan_viewmodel;

pub use errors::{Action, ActionError, FormError};
pub use login_viewmodel::{LoginForm, LoginViewModel};
pub use register_viewmodel::{RegisterViewModel, RegistrationForm};
pub use donations_viewmodel::DonationsViewModel;
pub use donation_form_viewmodel::{DonationDraft, DonationFormViewModel};
pub use tracking_viewmodel::{map_embed_url, TrackingState, TrackingViewModel};
pub use notifications_viewmodel::NotificationsViewModel;
pub use scan_viewmodel::ScanViewModel;

/// Estado de una lista cargada desde la API
#[derive(Clone, Debug, PartialEq)]
pub struct ListState<T> {
    pub items: Vec<T>,
    pub loading: bool,
}

impl<T> Default for ListState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            loading: false,
        }
    }
}

/// Campo de texto obligatorio (tras `trim`)
pub(crate) fn required(value: &str, field: &'static str) -> Result<String, FormError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(FormError::Required(field))
    } else {
        Ok(trimmed.to_string())
    }
}

pub(crate) fn optional(value: &str) -> Option<String> {
    Some(value.trim().to_string()).filter(|v| !v.is_empty())
}
