// ============================================================================
// CONSTANTES - Claves de storage y rutas del backend
// ============================================================================

/// Clave del access token en localStorage
pub const TOKEN_STORAGE_KEY: &str = "sb_access";

/// Clave del rol cacheado en localStorage
pub const ROLE_STORAGE_KEY: &str = "sb_role";

pub const AUTHORIZATION_HEADER: &str = "Authorization";

// Endpoints
pub const TOKEN_PATH: &str = "/api/accounts/auth/token/";
pub const ME_PATH: &str = "/api/accounts/me/";
pub const REGISTER_PATH: &str = "/api/accounts/register/";
pub const DONATIONS_PATH: &str = "/api/donations/items/";
pub const DONATION_REQUESTS_PATH: &str = "/api/donations/requests/";
pub const SCAN_PATH: &str = "/api/deliveries/scan/";
pub const NOTIFICATIONS_PATH: &str = "/api/notifications/";

/// Ruta de un recurso concreto dentro de una colección (`/api/x/` + `42` -> `/api/x/42/`)
pub fn item_path(collection: &str, id: impl std::fmt::Display) -> String {
    format!("{}{}/", collection, id)
}
