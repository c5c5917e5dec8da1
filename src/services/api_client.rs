// ============================================================================
// API CLIENT - Cliente HTTP compartido
// ============================================================================
// Único cliente HTTP de la app. Los clones comparten los headers por
// defecto, así el SessionManager arma/desarma el Bearer para todos.
// NO tiene lógica de negocio.
// ============================================================================

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::future::Future;
use std::rc::Rc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::http::{ApiError, Body, FormPart, HttpRequest, HttpResponse, HttpTransport, Method};

#[derive(Clone)]
pub struct ApiClient {
    base_url: Rc<str>,
    default_headers: Rc<RefCell<BTreeMap<String, String>>>,
    transport: Rc<dyn HttpTransport>,
}

impl ApiClient {
    pub fn new(base_url: &str, transport: Rc<dyn HttpTransport>) -> Self {
        Self {
            base_url: Rc::from(base_url.trim_end_matches('/')),
            default_headers: Rc::new(RefCell::new(BTreeMap::new())),
            transport,
        }
    }

    /// Cliente del navegador contra la URL configurada
    #[cfg(target_arch = "wasm32")]
    pub fn browser() -> Self {
        Self::new(crate::config::CONFIG.backend_url(), Rc::new(super::http::GlooTransport))
    }

    /// Header enviado en todos los requests siguientes
    pub fn set_default_header(&self, name: &str, value: &str) {
        self.default_headers
            .borrow_mut()
            .insert(name.to_string(), value.to_string());
    }

    pub fn remove_default_header(&self, name: &str) {
        self.default_headers.borrow_mut().remove(name);
    }

    pub fn default_header(&self, name: &str) -> Option<String> {
        self.default_headers.borrow().get(name).cloned()
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn get<T>(&self, path: &str) -> impl Future<Output = Result<T, ApiError>> + 'static
    where
        T: DeserializeOwned + 'static,
    {
        self.execute(Method::Get, path, Body::Empty)
    }

    pub fn post_json<B, T>(&self, path: &str, body: &B) -> impl Future<Output = Result<T, ApiError>> + 'static
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned + 'static,
    {
        self.with_json(Method::Post, path, body)
    }

    pub fn patch_json<B, T>(&self, path: &str, body: &B) -> impl Future<Output = Result<T, ApiError>> + 'static
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned + 'static,
    {
        self.with_json(Method::Patch, path, body)
    }

    pub fn post_multipart<T>(&self, path: &str, parts: Vec<FormPart>) -> impl Future<Output = Result<T, ApiError>> + 'static
    where
        T: DeserializeOwned + 'static,
    {
        self.execute(Method::Post, path, Body::Multipart(parts))
    }

    fn with_json<B, T>(&self, method: Method, path: &str, body: &B) -> impl Future<Output = Result<T, ApiError>> + 'static
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned + 'static,
    {
        let pending = serde_json::to_string(body)
            .map_err(|e| ApiError::Encode(e.to_string()))
            .map(|json| self.execute(method, path, Body::Json(json)));
        async move { pending?.await }
    }

    /// El request (con los headers actuales) se arma y se entrega al
    /// transport en el momento de la llamada, no al hacer poll.
    fn execute<T>(&self, method: Method, path: &str, body: Body) -> impl Future<Output = Result<T, ApiError>> + 'static
    where
        T: DeserializeOwned + 'static,
    {
        let request = HttpRequest {
            method,
            url: self.url(path),
            headers: self
                .default_headers
                .borrow()
                .iter()
                .map(|(name, value)| (name.clone(), value.clone()))
                .collect(),
            body,
        };
        log::debug!("🌐 [API] {} {}", method.as_str(), request.url);
        let sent = self.transport.send(request);

        async move {
            let response = sent.await?;
            decode(response)
        }
    }
}

fn decode<T: DeserializeOwned>(response: HttpResponse) -> Result<T, ApiError> {
    if !response.is_success() {
        let error = ApiError::from_response(&response);
        log::warn!("⚠️ [API] {}", error);
        return Err(error);
    }
    serde_json::from_str(&response.body).map_err(|e| ApiError::Decode(e.to_string()))
}
