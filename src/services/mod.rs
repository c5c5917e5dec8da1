// ============================================================================
// SERVICES - SOLO comunicación con la API REST
// ============================================================================

pub mod http;
pub mod api_client;
pub mod auth_service;
pub mod donation_service;
pub mod notification_service;
pub mod scan_service;

#[cfg(test)]
pub mod testing;

pub use http::{ApiError, HttpTransport};
pub use api_client::ApiClient;
pub use auth_service::AuthService;
pub use donation_service::DonationService;
pub use notification_service::NotificationService;
pub use scan_service::ScanService;
