use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Rol de la cuenta. Sólo decide qué páginas muestra la UI; la autorización
/// real la hace el backend en cada llamada.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Debug)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Restaurant,
    Ngo,
    DeliveryAgent,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Restaurant, Role::Ngo, Role::DeliveryAgent];

    /// Valor tal como lo envía/espera el backend
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Restaurant => "restaurant",
            Role::Ngo => "ngo",
            Role::DeliveryAgent => "delivery_agent",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Role::Restaurant => "Restaurant",
            Role::Ngo => "NGO",
            Role::DeliveryAgent => "Delivery Agent",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == s.trim())
            .ok_or_else(|| UnknownRole(s.to_string()))
    }
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct TokenRequest {
    pub username: String,
    pub password: String,
}

/// Respuesta de `/api/accounts/auth/token/`
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct TokenPair {
    pub access: String,
    #[serde(default)]
    pub refresh: Option<String>,
}

/// Respuesta de `/api/accounts/me/`
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct Identity {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    /// Puede traer roles que la UI no maneja (p.ej. `admin`)
    #[serde(default)]
    pub role: Option<String>,
}

impl Identity {
    pub fn known_role(&self) -> Result<Option<Role>, UnknownRole> {
        self.role.as_deref().map(str::parse).transpose()
    }
}

/// Cuerpo de `/api/accounts/register/{role}/`
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct RegistrationRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_name: Option<String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug, Default)]
pub struct RegisteredAccount {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub role: Option<String>,
}
