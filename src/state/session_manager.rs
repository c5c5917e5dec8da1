// ============================================================================
// SESSION MANAGER - Única autoridad de "¿hay sesión y con qué rol?"
// ============================================================================
// - Token y rol viven en storage durable (sb_access / sb_role)
// - El Bearer se arma en el ApiClient compartido de forma síncrona
// - El rol se resuelve en segundo plano con /api/accounts/me/
// Se construye una vez al arrancar (dentro de AppState) y se pasa a quien
// lo necesite; nadie más escribe token ni rol.
// ============================================================================

use std::cell::Cell;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll};

use futures::channel::oneshot;
use futures::task::{LocalSpawn, LocalSpawnExt};

use crate::models::Role;
use crate::services::{ApiClient, AuthService};
use crate::utils::{KeyValueStore, AUTHORIZATION_HEADER, ROLE_STORAGE_KEY, TOKEN_STORAGE_KEY};

/// Lectura de sesión que necesitan el router y las vistas
pub trait SessionView {
    fn is_authenticated(&self) -> bool;
    fn role(&self) -> Option<Role>;
}

/// Resultado del lookup de rol lanzado por `sign_in`.
///
/// Resuelve al rol devuelto por el backend (`None` si el lookup falló, el
/// rol es desconocido o la sesión cambió mientras tanto). Soltarlo no
/// cancela el lookup.
pub struct RoleResolution {
    receiver: oneshot::Receiver<Option<Role>>,
}

impl RoleResolution {
    /// Resolución ya terminada, sin lookup
    fn settled() -> Self {
        let (sender, receiver) = oneshot::channel();
        let _ = sender.send(None);
        Self { receiver }
    }
}

impl Future for RoleResolution {
    type Output = Option<Role>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match Pin::new(&mut self.receiver).poll(cx) {
            Poll::Ready(Ok(role)) => Poll::Ready(role),
            Poll::Ready(Err(_)) => Poll::Ready(None),
            Poll::Pending => Poll::Pending,
        }
    }
}

#[derive(Clone)]
pub struct SessionManager {
    api: ApiClient,
    auth: AuthService,
    store: Rc<dyn KeyValueStore>,
    spawner: Rc<dyn LocalSpawn>,
    /// Se incrementa en cada login/logout; un lookup de otra generación no escribe
    generation: Rc<Cell<u64>>,
}

impl SessionManager {
    /// Crea el manager y, si hay un token guardado, re-arma el Bearer antes
    /// de que se renderice nada.
    pub fn new(api: ApiClient, store: Rc<dyn KeyValueStore>, spawner: Rc<dyn LocalSpawn>) -> Self {
        let manager = Self {
            auth: AuthService::new(api.clone()),
            api,
            store,
            spawner,
            generation: Rc::new(Cell::new(0)),
        };
        manager.restore();
        manager
    }

    fn restore(&self) {
        if let Some(token) = self.token() {
            log::info!("💾 [SESSION] Token encontrado en storage, restaurando sesión");
            // El lookup refresca el rol por si cambió en el backend
            drop(self.sign_in(&token, None));
        }
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// `Some(token)`: login. `None` o token vacío: logout.
    pub fn set_token(&self, token: Option<&str>) -> Option<RoleResolution> {
        match token.map(str::trim).filter(|t| !t.is_empty()) {
            Some(token) => Some(self.sign_in(token, None)),
            None => {
                self.sign_out();
                None
            }
        }
    }

    /// Guarda el token, arma el Bearer y lanza el lookup de rol.
    ///
    /// Con `role_hint` el rol elegido en el login se guarda de inmediato y
    /// prevalece sobre el que devuelva el backend.
    pub fn sign_in(&self, token: &str, role_hint: Option<Role>) -> RoleResolution {
        let token = token.trim();
        if token.is_empty() {
            log::warn!("⚠️ [SESSION] Token vacío, se trata como logout");
            self.sign_out();
            return RoleResolution::settled();
        }

        let generation = self.generation.get().wrapping_add(1);
        self.generation.set(generation);

        self.api
            .set_default_header(AUTHORIZATION_HEADER, &format!("Bearer {}", token));
        if let Err(e) = self.store.set(TOKEN_STORAGE_KEY, token) {
            log::error!("❌ [SESSION] Error guardando token: {}", e);
        }
        if let Some(role) = role_hint {
            persist_role(self.store.as_ref(), role);
        }

        let (sender, receiver) = oneshot::channel();
        let lookup = self.auth.me();
        let store = self.store.clone();
        let current = self.generation.clone();

        let task = async move {
            let resolved = match lookup.await {
                Ok(identity) => match identity.known_role() {
                    Ok(role) => role,
                    Err(e) => {
                        log::warn!("⚠️ [SESSION] {} ({}), se ignora", e, identity.username);
                        None
                    }
                },
                Err(e) => {
                    log::warn!("⚠️ [SESSION] No se pudo resolver el rol: {}", e);
                    None
                }
            };

            if current.get() != generation {
                log::debug!("[SESSION] Lookup de rol obsoleto descartado");
                let _ = sender.send(None);
                return;
            }
            if role_hint.is_none() {
                if let Some(role) = resolved {
                    persist_role(store.as_ref(), role);
                }
            }
            let _ = sender.send(resolved);
        };

        if let Err(e) = self.spawner.spawn_local(task) {
            log::error!("❌ [SESSION] No se pudo lanzar el lookup de rol: {:?}", e);
        }
        RoleResolution { receiver }
    }

    /// Logout: quita el Bearer y borra token y rol
    pub fn sign_out(&self) {
        self.generation.set(self.generation.get().wrapping_add(1));
        self.api.remove_default_header(AUTHORIZATION_HEADER);
        for key in [TOKEN_STORAGE_KEY, ROLE_STORAGE_KEY] {
            if let Err(e) = self.store.remove(key) {
                log::error!("❌ [SESSION] Error borrando {}: {}", key, e);
            }
        }
        log::info!("👋 [SESSION] Sesión cerrada");
    }

    pub fn token(&self) -> Option<String> {
        match self.store.get(TOKEN_STORAGE_KEY) {
            Ok(token) => token.filter(|t| !t.trim().is_empty()),
            Err(e) => {
                log::error!("❌ [SESSION] Error leyendo token: {}", e);
                None
            }
        }
    }

    /// Último rol guardado (síncrono, sin red)
    pub fn role(&self) -> Option<Role> {
        self.store
            .get(ROLE_STORAGE_KEY)
            .ok()
            .flatten()
            .and_then(|raw| raw.parse().ok())
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }
}

impl SessionView for SessionManager {
    fn is_authenticated(&self) -> bool {
        SessionManager::is_authenticated(self)
    }

    fn role(&self) -> Option<Role> {
        SessionManager::role(self)
    }
}

fn persist_role(store: &dyn KeyValueStore, role: Role) {
    match store.set(ROLE_STORAGE_KEY, role.as_str()) {
        Ok(()) => log::info!("🎭 [SESSION] Rol: {}", role.label()),
        Err(e) => log::error!("❌ [SESSION] Error guardando rol: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::http::Method;
    use crate::services::testing::MockTransport;
    use crate::utils::{MemoryStore, ME_PATH};
    use futures::executor::LocalPool;

    struct Harness {
        pool: LocalPool,
        transport: Rc<MockTransport>,
        store: MemoryStore,
    }

    impl Harness {
        fn new() -> Self {
            Self {
                pool: LocalPool::new(),
                transport: MockTransport::new(),
                store: MemoryStore::new(),
            }
        }

        fn manager(&self) -> SessionManager {
            let api = ApiClient::new("http://backend", self.transport.clone());
            SessionManager::new(api, Rc::new(self.store.clone()), Rc::new(self.pool.spawner()))
        }

        fn me_returns(&self, role: &str) {
            self.transport.respond(
                Method::Get,
                ME_PATH,
                200,
                &format!(r#"{{"id": 1, "username": "alice", "email": "a@x.org", "role": "{}"}}"#, role),
            );
        }
    }

    #[test]
    fn sign_in_persists_token_and_resolved_role() {
        let mut h = Harness::new();
        h.me_returns("ngo");
        let session = h.manager();

        let resolution = session.set_token(Some("tok123")).unwrap();
        assert!(session.is_authenticated());
        assert_eq!(session.token().as_deref(), Some("tok123"));

        let resolved = h.pool.run_until(resolution);
        assert_eq!(resolved, Some(Role::Ngo));
        assert_eq!(session.role(), Some(Role::Ngo));
        assert_eq!(h.store.get(ROLE_STORAGE_KEY).unwrap().as_deref(), Some("ngo"));
    }

    #[test]
    fn bearer_is_attached_before_the_role_lookup_resolves() {
        let mut h = Harness::new();
        let gate = h.transport.hold(Method::Get, ME_PATH);
        h.transport.respond(Method::Get, "/api/notifications/", 200, "[]");
        let session = h.manager();

        let _pending = session.set_token(Some("T"));
        let _ = session.api().get::<Vec<serde_json::Value>>("/api/notifications/");

        let sent = h.transport.last_request().unwrap();
        assert!(sent.url.ends_with("/api/notifications/"));
        assert_eq!(sent.header("Authorization"), Some("Bearer T"));
        assert_eq!(session.role(), None);

        h.pool.run_until_stalled();
        assert_eq!(gate.waiting(), 1);
    }

    #[test]
    fn logout_clears_everything_regardless_of_token() {
        for token in ["tok123", "x", "a.b.c"] {
            let mut h = Harness::new();
            h.me_returns("restaurant");
            let session = h.manager();

            let resolution = session.set_token(Some(token)).unwrap();
            h.pool.run_until(resolution);
            assert_eq!(session.role(), Some(Role::Restaurant));

            assert!(session.set_token(None).is_none());
            assert!(!session.is_authenticated());
            assert_eq!(session.role(), None);
            assert_eq!(session.api().default_header(AUTHORIZATION_HEADER), None);
        }
    }

    #[test]
    fn late_lookup_after_logout_does_not_resurrect_the_role() {
        let mut h = Harness::new();
        let gate = h.transport.hold(Method::Get, ME_PATH);
        let session = h.manager();

        let resolution = session.set_token(Some("T")).unwrap();
        h.pool.run_until_stalled();
        session.set_token(None);

        gate.release(200, r#"{"id": 1, "username": "alice", "role": "ngo"}"#);
        assert_eq!(h.pool.run_until(resolution), None);
        assert!(!session.is_authenticated());
        assert_eq!(session.role(), None);
    }

    #[test]
    fn failed_lookup_keeps_the_last_known_role() {
        let mut h = Harness::new();
        h.store.set(ROLE_STORAGE_KEY, "delivery_agent").unwrap();
        h.transport.respond(Method::Get, ME_PATH, 500, "");
        let session = h.manager();

        let resolution = session.set_token(Some("T")).unwrap();
        assert_eq!(h.pool.run_until(resolution), None);
        assert!(session.is_authenticated());
        assert_eq!(session.role(), Some(Role::DeliveryAgent));
    }

    #[test]
    fn unknown_server_role_is_not_persisted() {
        let mut h = Harness::new();
        h.me_returns("admin");
        let session = h.manager();

        let resolution = session.set_token(Some("T")).unwrap();
        assert_eq!(h.pool.run_until(resolution), None);
        assert_eq!(h.store.get(ROLE_STORAGE_KEY).unwrap(), None);
    }

    #[test]
    fn role_hint_wins_over_server_role() {
        let mut h = Harness::new();
        h.me_returns("restaurant");
        let session = h.manager();

        let resolution = session.sign_in("T", Some(Role::Ngo));
        assert_eq!(session.role(), Some(Role::Ngo));

        assert_eq!(h.pool.run_until(resolution), Some(Role::Restaurant));
        assert_eq!(session.role(), Some(Role::Ngo));
    }

    #[test]
    fn persisted_token_is_rearmed_on_startup_before_any_response() {
        let mut h = Harness::new();
        h.store.set(TOKEN_STORAGE_KEY, "persisted").unwrap();
        let gate = h.transport.hold(Method::Get, ME_PATH);

        let session = h.manager();
        assert!(session.is_authenticated());
        assert_eq!(
            session.api().default_header(AUTHORIZATION_HEADER).as_deref(),
            Some("Bearer persisted")
        );

        // El refresco del rol ya salió con la credencial
        h.pool.run_until_stalled();
        assert_eq!(gate.waiting(), 1);
        assert_eq!(
            h.transport.last_request().unwrap().header("Authorization"),
            Some("Bearer persisted")
        );
    }

    #[test]
    fn empty_token_is_a_logout() {
        for token in ["", "   "] {
            let mut h = Harness::new();
            h.me_returns("ngo");
            let session = h.manager();
            let resolution = session.set_token(Some("tok123")).unwrap();
            h.pool.run_until(resolution);
            let sent_before = h.transport.requests().len();

            assert!(session.set_token(Some(token)).is_none());
            h.pool.run_until_stalled();

            assert!(!session.is_authenticated());
            assert_eq!(session.role(), None);
            assert_eq!(session.api().default_header(AUTHORIZATION_HEADER), None);
            assert_eq!(h.store.get(TOKEN_STORAGE_KEY).unwrap(), None);
            assert_eq!(h.transport.requests().len(), sent_before);
        }
    }

    #[test]
    fn sign_in_with_empty_token_sends_nothing() {
        let mut h = Harness::new();
        let session = h.manager();

        let resolution = session.sign_in("", Some(Role::Ngo));
        assert_eq!(h.pool.run_until(resolution), None);
        assert!(!session.is_authenticated());
        assert_eq!(session.role(), None);
        assert_eq!(session.api().default_header(AUTHORIZATION_HEADER), None);
        assert!(h.transport.requests().is_empty());
    }

    #[test]
    fn fresh_start_without_token_is_anonymous() {
        let h = Harness::new();
        let session = h.manager();
        assert!(!session.is_authenticated());
        assert_eq!(session.role(), None);
        assert!(h.transport.requests().is_empty());
    }
}
