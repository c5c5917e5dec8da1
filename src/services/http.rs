// ============================================================================
// HTTP TRANSPORT - Envío de requests crudos
// ============================================================================
// ApiClient arma el request (URL, headers por defecto, cuerpo) y el
// transport sólo lo envía. En el navegador: gloo-net (fetch).
// ============================================================================

use futures::future::LocalBoxFuture;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Patch,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Patch => "PATCH",
        }
    }
}

/// Parte de un formulario multipart
#[derive(Clone, Debug, PartialEq)]
pub enum FormPart {
    Text {
        name: String,
        value: String,
    },
    File {
        name: String,
        file_name: String,
        content_type: String,
        bytes: Vec<u8>,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub enum Body {
    Empty,
    Json(String),
    Multipart(Vec<FormPart>),
}

#[derive(Clone, Debug, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Body,
}

impl HttpRequest {
    /// Header por nombre (sin distinguir mayúsculas)
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("HTTP {status}: {}", .detail.as_deref().unwrap_or("request failed"))]
    Http { status: u16, detail: Option<String> },
    #[error("parse error: {0}")]
    Decode(String),
    #[error("serialization error: {0}")]
    Encode(String),
}

impl ApiError {
    /// Error a partir de una respuesta no-2xx, extrayendo el mensaje del backend
    pub fn from_response(response: &HttpResponse) -> Self {
        ApiError::Http {
            status: response.status,
            detail: extract_detail(&response.body),
        }
    }

    /// Mensaje del backend, si lo hubo
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::Http { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }
}

/// Cuerpos de error de DRF:
/// - `{"detail": "..."}`
/// - `{"campo": ["msg", ...], "non_field_errors": ["msg"]}`
/// - `["msg", ...]`
fn extract_detail(body: &str) -> Option<String> {
    use serde_json::Value;

    fn messages(value: &Value) -> Vec<String> {
        match value {
            Value::String(text) => vec![text.clone()],
            Value::Array(items) => items.iter().flat_map(messages).collect(),
            _ => Vec::new(),
        }
    }

    let parsed: Value = serde_json::from_str(body).ok()?;
    let detail = match &parsed {
        Value::Object(fields) => {
            if let Some(Value::String(detail)) = fields.get("detail") {
                detail.clone()
            } else {
                fields
                    .iter()
                    .filter_map(|(field, value)| {
                        let joined = messages(value).join(" ");
                        if joined.is_empty() {
                            None
                        } else if field == "non_field_errors" {
                            Some(joined)
                        } else {
                            Some(format!("{}: {}", field, joined))
                        }
                    })
                    .collect::<Vec<_>>()
                    .join("; ")
            }
        }
        other => messages(other).join(" "),
    };

    let detail = detail.trim().to_string();
    (!detail.is_empty()).then_some(detail)
}

/// Envío de requests. Los futures son `'static` para poder lanzarlos con
/// `spawn_local` sin tomar prestado el cliente.
pub trait HttpTransport {
    fn send(&self, request: HttpRequest) -> LocalBoxFuture<'static, Result<HttpResponse, ApiError>>;
}

#[cfg(target_arch = "wasm32")]
pub use browser::GlooTransport;

#[cfg(target_arch = "wasm32")]
mod browser {
    use super::{ApiError, Body, FormPart, HttpRequest, HttpResponse, HttpTransport, Method};
    use futures::future::LocalBoxFuture;
    use gloo_net::http::RequestBuilder;
    use wasm_bindgen::JsValue;
    use web_sys::{Blob, BlobPropertyBag, FormData};

    /// Transport sobre `fetch` (gloo-net)
    #[derive(Clone, Copy, Default)]
    pub struct GlooTransport;

    fn js_error(value: JsValue) -> ApiError {
        ApiError::Encode(format!("{:?}", value))
    }

    fn to_form_data(parts: &[FormPart]) -> Result<FormData, ApiError> {
        let form = FormData::new().map_err(js_error)?;
        for part in parts {
            match part {
                FormPart::Text { name, value } => form.append_with_str(name, value),
                FormPart::File { name, file_name, content_type, bytes } => {
                    let array = js_sys::Uint8Array::from(bytes.as_slice());
                    let blob_parts = js_sys::Array::of1(&array);
                    let options = BlobPropertyBag::new();
                    options.set_type(content_type);
                    let blob = Blob::new_with_u8_array_sequence_and_options(&blob_parts, &options)
                        .map_err(js_error)?;
                    form.append_with_blob_and_filename(name, &blob, file_name)
                }
            }
            .map_err(js_error)?;
        }
        Ok(form)
    }

    impl HttpTransport for GlooTransport {
        fn send(&self, request: HttpRequest) -> LocalBoxFuture<'static, Result<HttpResponse, ApiError>> {
            Box::pin(async move {
                let method = match request.method {
                    Method::Get => gloo_net::http::Method::GET,
                    Method::Post => gloo_net::http::Method::POST,
                    Method::Patch => gloo_net::http::Method::PATCH,
                };
                let mut builder = RequestBuilder::new(&request.url).method(method);
                for (name, value) in &request.headers {
                    builder = builder.header(name, value);
                }

                // Para multipart el navegador pone el Content-Type con el boundary
                let built = match request.body {
                    Body::Empty => builder.build(),
                    Body::Json(json) => builder
                        .header("Content-Type", "application/json")
                        .body(json),
                    Body::Multipart(parts) => builder.body(to_form_data(&parts)?),
                }
                .map_err(|e| ApiError::Encode(e.to_string()))?;

                let response = built
                    .send()
                    .await
                    .map_err(|e| ApiError::Network(e.to_string()))?;
                let status = response.status();
                let body = response
                    .text()
                    .await
                    .map_err(|e| ApiError::Network(e.to_string()))?;

                Ok(HttpResponse { status, body })
            })
        }
    }
}
