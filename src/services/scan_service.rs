use crate::models::{ScanImage, ScanResult};
use crate::utils::SCAN_PATH;

use super::api_client::ApiClient;
use super::http::{ApiError, FormPart};

/// Escaneo de frescura de comida antes de la entrega
#[derive(Clone)]
pub struct ScanService {
    api: ApiClient,
}

impl ScanService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn scan(&self, image: ScanImage) -> Result<ScanResult, ApiError> {
        log::info!("📷 Escaneando imagen: {} ({} bytes)", image.file_name, image.bytes.len());
        let parts = vec![FormPart::File {
            name: "image".to_string(),
            file_name: image.file_name,
            content_type: image.content_type,
            bytes: image.bytes,
        }];
        let result: ScanResult = self.api.post_multipart(SCAN_PATH, parts).await?;
        log::info!("✅ Escaneo: {} ({}%)", result.label, result.confidence_percent());
        Ok(result)
    }
}
