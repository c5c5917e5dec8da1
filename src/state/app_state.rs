// ============================================================================
// APP STATE - Estado global de la aplicación
// ============================================================================
// Se construye una sola vez al arrancar. Contiene el SessionManager (única
// autoridad de sesión), la ruta actual y los ViewModels persistentes.
// ============================================================================

use std::future::Future;
use std::rc::Rc;

use futures::task::{LocalSpawn, LocalSpawnExt};

use crate::router::{guard, Navigation, Route};
use crate::services::ApiClient;
use crate::state::{ReactiveState, SessionManager};
use crate::utils::KeyValueStore;
use crate::viewmodels::{
    DonationFormViewModel, DonationsViewModel, ListState, LoginViewModel, NotificationsViewModel,
    RegisterViewModel, ScanViewModel, TrackingState, TrackingViewModel,
};

/// Tope de redirecciones encadenadas por navegación
pub const MAX_REDIRECTS: usize = 4;

/// Ruta que finalmente se muestra tras pasar por el guard
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resolved {
    pub route: Route,
    /// Si hubo redirección, la entrada del historial se reemplaza
    pub replace: bool,
}

#[derive(Clone)]
pub struct AppState {
    pub session: SessionManager,
    pub route: ReactiveState<Route>,

    pub login: LoginViewModel,
    pub register: RegisterViewModel,
    pub donations: DonationsViewModel,
    pub donation_form: DonationFormViewModel,
    pub tracking: TrackingViewModel,
    pub notifications: NotificationsViewModel,
    pub scan: ScanViewModel,

    spawner: Rc<dyn LocalSpawn>,
}

impl AppState {
    pub fn new(api: ApiClient, store: Rc<dyn KeyValueStore>, spawner: Rc<dyn LocalSpawn>) -> Self {
        let session = SessionManager::new(api, store, spawner.clone());

        Self {
            login: LoginViewModel::new(session.clone()),
            register: RegisterViewModel::new(&session),
            donations: DonationsViewModel::new(&session),
            donation_form: DonationFormViewModel::new(&session),
            tracking: TrackingViewModel::new(&session),
            notifications: NotificationsViewModel::new(&session),
            scan: ScanViewModel::new(&session),
            route: ReactiveState::new(Route::Home),
            session,
            spawner,
        }
    }

    /// Estado del navegador: localStorage (o memoria si no está disponible),
    /// fetch y el event loop de wasm-bindgen-futures
    #[cfg(target_arch = "wasm32")]
    pub fn browser() -> Self {
        use crate::utils::{BrowserSpawner, LocalStorage, MemoryStore};

        let store: Rc<dyn KeyValueStore> = match LocalStorage::open() {
            Ok(storage) => Rc::new(storage),
            Err(e) => {
                log::warn!("⚠️ [STATE] {}; la sesión no sobrevivirá a una recarga", e);
                Rc::new(MemoryStore::new())
            }
        };
        Self::new(ApiClient::browser(), store, Rc::new(BrowserSpawner))
    }

    /// Suscribirse a cualquier cambio que requiera re-render
    pub fn subscribe_to_changes<F>(&self, callback: F)
    where
        F: Fn() + 'static,
    {
        let callback: Rc<dyn Fn()> = Rc::new(callback);
        forward(&self.route, &callback);
        forward(&self.donations.list, &callback);
        forward(&self.notifications.list, &callback);
        forward(&self.tracking.state, &callback);
        forward(&self.scan.result, &callback);
    }

    /// Pasa la ruta pedida por el guard hasta llegar a una que se puede
    /// mostrar. `/logout` cierra la sesión aquí mismo.
    pub fn resolve(&self, requested: Route) -> Resolved {
        let mut route = requested;
        let mut replace = false;

        for _ in 0..MAX_REDIRECTS {
            if route == Route::Logout {
                self.session.set_token(None);
                self.forget_user_data();
                route = Route::login();
                replace = true;
                continue;
            }
            match guard(&route, &self.session) {
                Navigation::Render => return Resolved { route, replace },
                Navigation::Redirect { to, replace: r } => {
                    route = to;
                    replace = replace || r;
                }
            }
        }

        log::error!("❌ [ROUTER] Demasiadas redirecciones, se muestra el inicio");
        Resolved {
            route: Route::Home,
            replace: true,
        }
    }

    /// Resolver, publicar la ruta y lanzar las cargas que necesita
    pub fn navigate(&self, requested: Route) -> Resolved {
        let resolved = self.resolve(requested);
        self.enter(&resolved.route);
        self.route.set(resolved.route.clone());
        resolved
    }

    fn enter(&self, route: &Route) {
        match route {
            Route::Donations | Route::Restaurants | Route::Ngo => {
                let vm = self.donations.clone();
                self.spawn(async move { vm.load().await });
            }
            Route::Dashboard => {
                let donations = self.donations.clone();
                let notifications = self.notifications.clone();
                self.spawn(async move {
                    donations.load().await;
                    notifications.load().await;
                });
            }
            Route::Notifications => {
                let vm = self.notifications.clone();
                self.spawn(async move { vm.load().await });
            }
            Route::Track { donation_id } => {
                let vm = self.tracking.clone();
                let id = *donation_id;
                self.spawn(async move { vm.load(id).await });
            }
            Route::DeliveryScan => self.scan.reset(),
            _ => {}
        }
    }

    /// Nada de la cuenta anterior queda visible tras el logout
    fn forget_user_data(&self) {
        self.donations.list.set(ListState::default());
        self.notifications.list.set(ListState::default());
        self.tracking.state.set(TrackingState::default());
        self.scan.reset();
    }

    fn spawn(&self, task: impl Future<Output = ()> + 'static) {
        if let Err(e) = self.spawner.spawn_local(task) {
            log::error!("❌ [STATE] No se pudo lanzar la carga: {:?}", e);
        }
    }
}

fn forward<T>(state: &ReactiveState<T>, callback: &Rc<dyn Fn()>) {
    let callback = callback.clone();
    state.subscribe(move || callback());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;
    use crate::services::http::Method;
    use crate::services::testing::MockTransport;
    use crate::utils::{MemoryStore, DONATIONS_PATH, ME_PATH, NOTIFICATIONS_PATH, ROLE_STORAGE_KEY, TOKEN_STORAGE_KEY};
    use futures::executor::LocalPool;
    use std::cell::Cell;

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

        /// Sesión ya guardada en storage, como tras una recarga
        fn signed_in(role: Role) -> Self {
            let h = Self::new();
            h.store.set(TOKEN_STORAGE_KEY, "T").unwrap();
            h.store.set(ROLE_STORAGE_KEY, role.as_str()).unwrap();
            h.transport.hold(Method::Get, ME_PATH);
            h
        }

        fn app(&self) -> AppState {
            let api = ApiClient::new("http://backend", self.transport.clone());
            AppState::new(api, Rc::new(self.store.clone()), Rc::new(self.pool.spawner()))
        }
    }

    #[test]
    fn anonymous_visit_to_a_private_page_lands_on_login() {
        let h = Harness::new();
        let app = h.app();

        let resolved = app.navigate(Route::Notifications);
        assert_eq!(
            resolved,
            Resolved {
                route: Route::Login { next: Some("/notifications".to_string()), role: None },
                replace: true,
            }
        );
        assert_eq!(app.route.get(), resolved.route);
    }

    #[test]
    fn public_pages_render_without_redirect() {
        let h = Harness::new();
        let app = h.app();
        assert_eq!(app.resolve(Route::Home), Resolved { route: Route::Home, replace: false });
    }

    #[test]
    fn role_restricted_page_redirects_other_roles() {
        let h = Harness::signed_in(Role::Ngo);
        let app = h.app();

        assert_eq!(
            app.resolve(Route::NewDonation),
            Resolved { route: Route::Donations, replace: true }
        );
        assert_eq!(app.resolve(Route::Restaurants), Resolved { route: Route::Home, replace: true });
        assert_eq!(app.resolve(Route::Ngo), Resolved { route: Route::Ngo, replace: false });
    }

    #[test]
    fn logout_clears_the_session_and_shows_login() {
        let mut h = Harness::signed_in(Role::Restaurant);
        h.transport.respond(Method::Get, DONATIONS_PATH, 200, r#"[
            {"id": 1, "food_type": "Bread", "quantity": 2, "created_at": "2024-10-25T12:30:00Z"}
        ]"#);
        let app = h.app();
        app.navigate(Route::Donations);
        h.pool.run_until_stalled();
        assert_eq!(app.donations.list.get().items.len(), 1);

        let resolved = app.navigate(Route::Logout);
        assert_eq!(resolved, Resolved { route: Route::login(), replace: true });
        assert!(!app.session.is_authenticated());
        assert_eq!(app.session.role(), None);
        assert!(app.donations.list.get().items.is_empty());
    }

    #[test]
    fn entering_a_page_starts_its_loads() {
        let mut h = Harness::signed_in(Role::Restaurant);
        h.transport.respond(Method::Get, DONATIONS_PATH, 200, "[]");
        h.transport.respond(Method::Get, NOTIFICATIONS_PATH, 200, "[]");
        let app = h.app();

        app.navigate(Route::Dashboard);
        h.pool.run_until_stalled();
        assert_eq!(h.transport.count(Method::Get, DONATIONS_PATH), 1);
        assert_eq!(h.transport.count(Method::Get, NOTIFICATIONS_PATH), 1);

        app.navigate(Route::Home);
        h.pool.run_until_stalled();
        assert_eq!(h.transport.count(Method::Get, DONATIONS_PATH), 1);
    }

    #[test]
    fn subscribers_hear_route_and_list_changes() {
        let mut h = Harness::signed_in(Role::Restaurant);
        h.transport.respond(Method::Get, NOTIFICATIONS_PATH, 200, "[]");
        let app = h.app();
        let renders = Rc::new(Cell::new(0));
        {
            let renders = renders.clone();
            app.subscribe_to_changes(move || renders.set(renders.get() + 1));
        }

        app.navigate(Route::Notifications);
        assert_eq!(renders.get(), 1);

        // loading = true, y luego la lista
        h.pool.run_until_stalled();
        assert_eq!(renders.get(), 3);
    }
}
