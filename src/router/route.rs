// ============================================================================
// ROUTES - Rutas navegables y su nivel de acceso
// ============================================================================

use url::form_urlencoded;

use crate::models::Role;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Route {
    Home,
    /// `next`: destino tras el login; `role`: rol sugerido para el formulario
    Login { next: Option<String>, role: Option<Role> },
    Register { role: Option<Role> },
    Dashboard,
    Donations,
    NewDonation,
    Restaurants,
    Ngo,
    DeliveryScan,
    Notifications,
    Track { donation_id: u64 },
    Logout,
    NotFound { path: String },
}

/// Quién puede ver una ruta
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Access {
    Public,
    Authenticated,
    /// Requiere sesión y este rol; si no, se redirige a `fallback`
    RoleOnly { role: Role, fallback: Route },
}

impl Route {
    pub fn login() -> Self {
        Route::Login { next: None, role: None }
    }

    /// Parsear `path?query#fragment` tal como viene de `location`
    pub fn parse(location: &str) -> Self {
        let without_fragment = location.split('#').next().unwrap_or_default();
        let (raw_path, query) = match without_fragment.split_once('?') {
            Some((path, query)) => (path, query),
            None => (without_fragment, ""),
        };
        let path = normalize(raw_path);

        let param = |name: &str| -> Option<String> {
            form_urlencoded::parse(query.as_bytes())
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.into_owned())
                .filter(|value| !value.is_empty())
        };
        let role_param = || param("role").and_then(|raw| raw.parse::<Role>().ok());

        match path.as_str() {
            "/" => Route::Home,
            "/login" => Route::Login {
                next: param("next").filter(|next| is_return_target(next)),
                role: role_param(),
            },
            "/register" => Route::Register { role: role_param() },
            "/dashboard" => Route::Dashboard,
            "/donations" => Route::Donations,
            "/donations/new" => Route::NewDonation,
            "/restaurants" => Route::Restaurants,
            "/ngo" => Route::Ngo,
            "/delivery/scan" => Route::DeliveryScan,
            "/notifications" => Route::Notifications,
            "/logout" => Route::Logout,
            other => match other.strip_prefix("/track/").map(str::parse::<u64>) {
                Some(Ok(donation_id)) => Route::Track { donation_id },
                _ => Route::NotFound { path: other.to_string() },
            },
        }
    }

    /// Path (con query) para `history.pushState` y enlaces
    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Login { next, role } => {
                let mut query = form_urlencoded::Serializer::new(String::new());
                if let Some(next) = next {
                    query.append_pair("next", next);
                }
                if let Some(role) = role {
                    query.append_pair("role", role.as_str());
                }
                with_query("/login", query.finish())
            }
            Route::Register { role } => match role {
                Some(role) => format!("/register?role={}", role.as_str()),
                None => "/register".to_string(),
            },
            Route::Dashboard => "/dashboard".to_string(),
            Route::Donations => "/donations".to_string(),
            Route::NewDonation => "/donations/new".to_string(),
            Route::Restaurants => "/restaurants".to_string(),
            Route::Ngo => "/ngo".to_string(),
            Route::DeliveryScan => "/delivery/scan".to_string(),
            Route::Notifications => "/notifications".to_string(),
            Route::Track { donation_id } => format!("/track/{}", donation_id),
            Route::Logout => "/logout".to_string(),
            Route::NotFound { path } => path.clone(),
        }
    }

    pub fn access(&self) -> Access {
        match self {
            Route::Home
            | Route::Login { .. }
            | Route::Register { .. }
            | Route::Logout
            | Route::NotFound { .. } => Access::Public,
            Route::NewDonation => Access::RoleOnly {
                role: Role::Restaurant,
                fallback: Route::Donations,
            },
            Route::Restaurants => Access::RoleOnly {
                role: Role::Restaurant,
                fallback: Route::Home,
            },
            Route::Dashboard
            | Route::Donations
            | Route::Ngo
            | Route::DeliveryScan
            | Route::Notifications
            | Route::Track { .. } => Access::Authenticated,
        }
    }
}

/// Página de inicio según el rol efectivo
pub fn landing_for(role: Option<Role>) -> Route {
    match role {
        Some(Role::Ngo) => Route::Ngo,
        Some(Role::DeliveryAgent) => Route::DeliveryScan,
        Some(Role::Restaurant) | None => Route::Restaurants,
    }
}

/// Sólo paths internos (`/algo`), nunca `//host` ni el propio login/logout
fn is_return_target(next: &str) -> bool {
    if !next.starts_with('/') || next.starts_with("//") || next.contains('\\') {
        return false;
    }
    !matches!(Route::parse(next), Route::Login { .. } | Route::Logout)
}

fn normalize(path: &str) -> String {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    }
}

fn with_query(path: &str, query: String) -> String {
    if query.is_empty() {
        path.to_string()
    } else {
        format!("{}?{}", path, query)
    }
}
