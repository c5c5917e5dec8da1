// ============================================================================
// LOGIN VIEWMODEL
// ============================================================================

use crate::models::Role;
use crate::router::{after_login, Route};
use crate::services::AuthService;
use crate::state::SessionManager;

use super::errors::{Action, ActionError};
use super::required;

/// Datos del formulario de login
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    /// Destino pedido antes del login (`?next=`)
    pub next: Option<String>,
    /// Rol elegido en la pantalla de login (`?role=`)
    pub role_hint: Option<Role>,
}

#[derive(Clone)]
pub struct LoginViewModel {
    session: SessionManager,
    auth: AuthService,
}

impl LoginViewModel {
    pub fn new(session: SessionManager) -> Self {
        let auth = AuthService::new(session.api().clone());
        Self { session, auth }
    }

    /// Login completo: token, sesión y ruta de destino
    pub async fn submit(&self, form: LoginForm) -> Result<Route, ActionError> {
        let username = required(&form.username, "Username")
            .map_err(|e| ActionError::invalid(Action::Login, e))?;
        if form.password.is_empty() {
            return Err(ActionError::invalid(
                Action::Login,
                super::FormError::Required("Password"),
            ));
        }

        let tokens = self
            .auth
            .obtain_token(&username, &form.password)
            .await
            .map_err(|e| ActionError::from_api(Action::Login, &e))?;
        log::info!("✅ [LOGIN] Token recibido para {}", username);

        let resolution = self.session.sign_in(&tokens.access, form.role_hint);
        let role = match form.role_hint {
            Some(hint) => Some(hint),
            None => match resolution.await {
                Some(role) => Some(role),
                None => self.session.role(),
            },
        };

        let destination = after_login(form.next.as_deref(), role);
        log::info!("🧭 [LOGIN] Destino: {}", destination.path());
        Ok(destination)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::http::{Body, Method};
    use crate::services::testing::MockTransport;
    use crate::services::ApiClient;
    use crate::utils::{MemoryStore, ME_PATH, TOKEN_PATH};
    use futures::executor::LocalPool;
    use std::rc::Rc;

    struct Harness {
        pool: LocalPool,
        transport: Rc<MockTransport>,
        session: SessionManager,
    }

    fn harness() -> Harness {
        let pool = LocalPool::new();
        let transport = MockTransport::new();
        let api = ApiClient::new("http://backend", transport.clone());
        let session = SessionManager::new(api, Rc::new(MemoryStore::new()), Rc::new(pool.spawner()));
        Harness { pool, transport, session }
    }

    fn form(username: &str, password: &str) -> LoginForm {
        LoginForm {
            username: username.to_string(),
            password: password.to_string(),
            ..LoginForm::default()
        }
    }

    #[test]
    fn ngo_login_lands_on_the_ngo_page() {
        let mut h = harness();
        h.transport
            .respond(Method::Post, TOKEN_PATH, 200, r#"{"access": "tok123", "refresh": "r1"}"#);
        h.transport.respond(
            Method::Get,
            ME_PATH,
            200,
            r#"{"id": 3, "username": "alice", "email": "alice@example.org", "role": "ngo"}"#,
        );
        let vm = LoginViewModel::new(h.session.clone());

        let route = h.pool.run_until(vm.submit(form("alice", "pw"))).unwrap();

        assert_eq!(route, Route::Ngo);
        assert!(h.session.is_authenticated());
        assert_eq!(h.session.token().as_deref(), Some("tok123"));
        assert_eq!(h.session.role(), Some(Role::Ngo));

        let token_request = &h.transport.requests()[0];
        assert_eq!(
            token_request.body,
            Body::Json(r#"{"username":"alice","password":"pw"}"#.to_string())
        );
    }

    #[test]
    fn explicit_next_wins_over_role_landing() {
        let mut h = harness();
        h.transport.respond(Method::Post, TOKEN_PATH, 200, r#"{"access": "tok"}"#);
        h.transport
            .respond(Method::Get, ME_PATH, 200, r#"{"username": "bob", "role": "restaurant"}"#);
        let vm = LoginViewModel::new(h.session.clone());

        let mut login = form("bob", "pw");
        login.next = Some("/track/5".to_string());
        let route = h.pool.run_until(vm.submit(login)).unwrap();
        assert_eq!(route, Route::Track { donation_id: 5 });
    }

    #[test]
    fn role_hint_decides_the_landing_without_waiting() {
        let mut h = harness();
        h.transport.respond(Method::Post, TOKEN_PATH, 200, r#"{"access": "tok"}"#);
        let _gate = h.transport.hold(Method::Get, ME_PATH);
        let vm = LoginViewModel::new(h.session.clone());

        let mut login = form("carol", "pw");
        login.role_hint = Some(Role::DeliveryAgent);
        let route = h.pool.run_until(vm.submit(login)).unwrap();

        assert_eq!(route, Route::DeliveryScan);
        assert_eq!(h.session.role(), Some(Role::DeliveryAgent));
    }

    #[test]
    fn rejected_credentials_surface_the_backend_detail() {
        let mut h = harness();
        h.transport.respond(
            Method::Post,
            TOKEN_PATH,
            401,
            r#"{"detail": "No active account found with the given credentials"}"#,
        );
        let vm = LoginViewModel::new(h.session.clone());

        let err = h.pool.run_until(vm.submit(form("alice", "wrong"))).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Login failed: No active account found with the given credentials"
        );
        assert!(!h.session.is_authenticated());
    }

    #[test]
    fn empty_fields_are_rejected_before_any_request() {
        let mut h = harness();
        let vm = LoginViewModel::new(h.session.clone());

        let err = h.pool.run_until(vm.submit(form("  ", "pw"))).unwrap_err();
        assert!(matches!(err, ActionError::Invalid { action: Action::Login, .. }));
        let err = h.pool.run_until(vm.submit(form("alice", ""))).unwrap_err();
        assert_eq!(err.to_string(), "Password is required");
        assert!(h.transport.requests().is_empty());
    }
}
