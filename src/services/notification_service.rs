use crate::models::{Notification, ReadFlagUpdate};
use crate::utils::{item_path, NOTIFICATIONS_PATH};

use super::api_client::ApiClient;
use super::http::ApiError;

#[derive(Clone)]
pub struct NotificationService {
    api: ApiClient,
}

impl NotificationService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn list(&self) -> Result<Vec<Notification>, ApiError> {
        self.api.get(NOTIFICATIONS_PATH).await
    }

    /// PATCH del flag de lectura; devuelve la notificación actualizada
    pub async fn set_read(&self, id: u64, is_read: bool) -> Result<Notification, ApiError> {
        self.api
            .patch_json(&item_path(NOTIFICATIONS_PATH, id), &ReadFlagUpdate { is_read })
            .await
    }
}
