use std::future::Future;

use crate::models::{Identity, RegisteredAccount, RegistrationRequest, Role, TokenPair, TokenRequest};
use crate::utils::{ME_PATH, REGISTER_PATH, TOKEN_PATH};

use super::api_client::ApiClient;
use super::http::ApiError;

/// Login, identidad y registro de cuentas
#[derive(Clone)]
pub struct AuthService {
    api: ApiClient,
}

impl AuthService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Perform login with username and password
    pub async fn obtain_token(&self, username: &str, password: &str) -> Result<TokenPair, ApiError> {
        log::info!("🔐 Solicitando token para usuario: {}", username);
        let request = TokenRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        self.api.post_json(TOKEN_PATH, &request).await
    }

    /// Identity of the current bearer. Headers are captured here, at call
    /// time, not when the returned future is first polled.
    pub fn me(&self) -> impl Future<Output = Result<Identity, ApiError>> + 'static {
        self.api.get(ME_PATH)
    }

    /// Register a new account for the given role
    pub async fn register(&self, role: Role, request: &RegistrationRequest) -> Result<RegisteredAccount, ApiError> {
        let path = format!("{}{}/", REGISTER_PATH, role.as_str());
        log::info!("📝 Registrando cuenta {} como {}", request.username, role.label());
        self.api.post_json(&path, request).await
    }
}
