// ============================================================================
// ERRORS - Errores de formulario y de acciones visibles para el usuario
// ============================================================================

use std::fmt;

use thiserror::Error;

use crate::services::ApiError;

/// Acciones que modifican algo en el backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Login,
    Registration,
    CreateDonation,
    FoodScan,
    PickupRequest,
}

impl Action {
    pub fn label(&self) -> &'static str {
        match self {
            Action::Login => "Login",
            Action::Registration => "Registration",
            Action::CreateDonation => "Creating the donation",
            Action::FoodScan => "Scan",
            Action::PickupRequest => "Pickup request",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Validación local, antes de enviar nada
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormError {
    #[error("{0} is required")]
    Required(&'static str),
    #[error("Enter a valid email address")]
    InvalidEmail,
    #[error("Quantity must be a whole number of at least 1")]
    InvalidQuantity,
    #[error("Expiry must be a valid date and time")]
    InvalidExpiry,
    #[error("{0} must be a number")]
    InvalidNumber(&'static str),
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: &'static str, min: f64, max: f64 },
    #[error("Select a food image.")]
    MissingImage,
}

/// Fallo de una acción, tal como se muestra en el aviso bloqueante
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ActionError {
    #[error("{source}")]
    Invalid { action: Action, source: FormError },
    #[error("{action} failed: {detail}")]
    Rejected { action: Action, detail: String },
    #[error("{action} failed. Please try again.")]
    Failed { action: Action },
}

impl ActionError {
    pub fn invalid(action: Action, source: FormError) -> Self {
        log::debug!("[FORM] {} rechazado localmente: {}", action, source);
        ActionError::Invalid { action, source }
    }

    /// Usa el `detail` del backend cuando lo hay, mensaje genérico si no
    pub fn from_api(action: Action, error: &ApiError) -> Self {
        log::error!("❌ [ACTION] {}: {}", action, error);
        match error.detail() {
            Some(detail) => ActionError::Rejected {
                action,
                detail: detail.to_string(),
            },
            None => ActionError::Failed { action },
        }
    }

    pub fn action(&self) -> Action {
        match self {
            ActionError::Invalid { action, .. }
            | ActionError::Rejected { action, .. }
            | ActionError::Failed { action } => *action,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_detail_is_shown_when_present() {
        let error = ApiError::Http {
            status: 400,
            detail: Some("quantity: Ensure this value is greater than or equal to 1.".to_string()),
        };
        let action_error = ActionError::from_api(Action::CreateDonation, &error);
        assert_eq!(
            action_error.to_string(),
            "Creating the donation failed: quantity: Ensure this value is greater than or equal to 1."
        );
    }

    #[test]
    fn generic_message_without_detail() {
        let network = ApiError::Network("offline".to_string());
        assert_eq!(
            ActionError::from_api(Action::Login, &network).to_string(),
            "Login failed. Please try again."
        );
        let bare = ApiError::Http { status: 500, detail: None };
        assert_eq!(
            ActionError::from_api(Action::FoodScan, &bare),
            ActionError::Failed { action: Action::FoodScan }
        );
    }

    #[test]
    fn validation_errors_read_like_the_field_problem() {
        let error = ActionError::invalid(Action::Registration, FormError::Required("Username"));
        assert_eq!(error.to_string(), "Username is required");
        assert_eq!(error.action(), Action::Registration);
        assert_eq!(
            FormError::OutOfRange { field: "Latitude", min: -90.0, max: 90.0 }.to_string(),
            "Latitude must be between -90 and 90"
        );
    }
}
