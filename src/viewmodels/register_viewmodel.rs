// ============================================================================
// REGISTER VIEWMODEL - Alta de restaurantes, ONGs y repartidores
// ============================================================================

use crate::models::{RegistrationRequest, Role};
use crate::router::Route;
use crate::services::AuthService;
use crate::state::SessionManager;

use super::errors::{Action, ActionError, FormError};
use super::{optional, required};

#[derive(Clone, Debug, PartialEq)]
pub struct RegistrationForm {
    pub role: Role,
    pub username: String,
    pub email: String,
    pub password: String,
    pub organization_name: String,
    pub phone: String,
    pub address: String,
}

impl RegistrationForm {
    /// Restaurantes y ONGs registran una organización
    pub fn needs_organization(role: Role) -> bool {
        matches!(role, Role::Restaurant | Role::Ngo)
    }

    pub fn validate(&self) -> Result<RegistrationRequest, FormError> {
        let username = required(&self.username, "Username")?;
        let email = required(&self.email, "Email")?;
        if !email.contains('@') {
            return Err(FormError::InvalidEmail);
        }
        if self.password.is_empty() {
            return Err(FormError::Required("Password"));
        }

        let (organization_name, address) = if Self::needs_organization(self.role) {
            (
                Some(required(&self.organization_name, "Organization name")?),
                optional(&self.address),
            )
        } else {
            (None, None)
        };

        Ok(RegistrationRequest {
            username,
            email,
            password: self.password.clone(),
            organization_name,
            phone: self.phone.trim().to_string(),
            address,
        })
    }
}

#[derive(Clone)]
pub struct RegisterViewModel {
    auth: AuthService,
}

impl RegisterViewModel {
    pub fn new(session: &SessionManager) -> Self {
        Self {
            auth: AuthService::new(session.api().clone()),
        }
    }

    /// Registra la cuenta; el siguiente paso es el login con el rol ya elegido
    pub async fn submit(&self, form: RegistrationForm) -> Result<Route, ActionError> {
        let request = form
            .validate()
            .map_err(|e| ActionError::invalid(Action::Registration, e))?;

        let account = self
            .auth
            .register(form.role, &request)
            .await
            .map_err(|e| ActionError::from_api(Action::Registration, &e))?;
        log::info!("✅ [REGISTER] Cuenta creada: {}", account.username);

        Ok(Route::Login {
            next: None,
            role: Some(form.role),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::http::{Body, Method};
    use crate::services::testing::MockTransport;
    use crate::services::ApiClient;
    use crate::utils::MemoryStore;
    use futures::executor::LocalPool;
    use std::rc::Rc;

    fn restaurant_form() -> RegistrationForm {
        RegistrationForm {
            role: Role::Restaurant,
            username: "bistro".to_string(),
            email: "hello@bistro.example".to_string(),
            password: "secret".to_string(),
            organization_name: "The Daily Bread Bistro".to_string(),
            phone: "555-0100".to_string(),
            address: " 1 Main St ".to_string(),
        }
    }

    #[test]
    fn organization_is_required_for_restaurants_and_ngos() {
        for role in [Role::Restaurant, Role::Ngo] {
            let form = RegistrationForm {
                role,
                organization_name: " ".to_string(),
                ..restaurant_form()
            };
            assert_eq!(form.validate(), Err(FormError::Required("Organization name")));
        }

        let rider = RegistrationForm {
            role: Role::DeliveryAgent,
            organization_name: String::new(),
            ..restaurant_form()
        };
        let request = rider.validate().unwrap();
        assert_eq!(request.organization_name, None);
        assert_eq!(request.address, None);
        assert_eq!(request.phone, "555-0100");
    }

    #[test]
    fn email_must_contain_an_at_sign() {
        let form = RegistrationForm {
            email: "bistro.example".to_string(),
            ..restaurant_form()
        };
        assert_eq!(form.validate(), Err(FormError::InvalidEmail));
    }

    #[test]
    fn successful_registration_goes_to_login_with_the_role() {
        let mut pool = LocalPool::new();
        let transport = MockTransport::new();
        transport.respond(
            Method::Post,
            "/api/accounts/register/restaurant/",
            201,
            r#"{"id": 4, "username": "bistro", "role": "restaurant"}"#,
        );
        let api = ApiClient::new("http://backend", transport.clone());
        let session = SessionManager::new(api, Rc::new(MemoryStore::new()), Rc::new(pool.spawner()));
        let vm = RegisterViewModel::new(&session);

        let route = pool.run_until(vm.submit(restaurant_form())).unwrap();
        assert_eq!(route, Route::Login { next: None, role: Some(Role::Restaurant) });

        let Body::Json(json) = transport.last_request().unwrap().body else {
            panic!("expected a JSON body");
        };
        let sent: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(sent["organization_name"], "The Daily Bread Bistro");
        assert_eq!(sent["address"], "1 Main St");
        assert!(!session.is_authenticated());
    }

    #[test]
    fn field_errors_from_the_backend_are_flattened() {
        let mut pool = LocalPool::new();
        let transport = MockTransport::new();
        transport.respond(
            Method::Post,
            "/api/accounts/register/ngo/",
            400,
            r#"{"username": ["A user with that username already exists."]}"#,
        );
        let api = ApiClient::new("http://backend", transport.clone());
        let session = SessionManager::new(api, Rc::new(MemoryStore::new()), Rc::new(pool.spawner()));
        let vm = RegisterViewModel::new(&session);

        let form = RegistrationForm { role: Role::Ngo, ..restaurant_form() };
        let err = pool.run_until(vm.submit(form)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Registration failed: username: A user with that username already exists."
        );
    }
}
