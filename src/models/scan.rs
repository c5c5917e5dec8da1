use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Resultado de `/api/deliveries/scan/`
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct ScanResult {
    pub label: String,
    /// 0.0 - 1.0
    pub confidence: f64,
    #[serde(default)]
    pub metrics: BTreeMap<String, serde_json::Value>,
    #[serde(default)]
    pub engine: String,
}

impl ScanResult {
    /// Confianza en porcentaje entero (0-100)
    pub fn confidence_percent(&self) -> u8 {
        (self.confidence.clamp(0.0, 1.0) * 100.0).round() as u8
    }

    /// Métricas como pares `clave: valor` para mostrar
    pub fn metric_lines(&self) -> Vec<String> {
        self.metrics
            .iter()
            .map(|(key, value)| match value {
                serde_json::Value::String(text) => format!("{}: {}", key, text),
                other => format!("{}: {}", key, other),
            })
            .collect()
    }
}

/// Imagen seleccionada por el repartidor, ya leída en memoria
#[derive(Clone, PartialEq, Debug)]
pub struct ScanImage {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}
