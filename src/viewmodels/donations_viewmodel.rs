// ============================================================================
// DONATIONS VIEWMODEL - Listado de donaciones y solicitudes de recogida
// ============================================================================

use crate::models::{Donation, DonationRequest, NewDonationRequest};
use crate::services::DonationService;
use crate::state::{ReactiveState, SessionManager};

use super::errors::{Action, ActionError};
use super::ListState;

#[derive(Clone)]
pub struct DonationsViewModel {
    service: DonationService,
    pub list: ReactiveState<ListState<Donation>>,
}

impl DonationsViewModel {
    pub fn new(session: &SessionManager) -> Self {
        Self {
            service: DonationService::new(session.api().clone()),
            list: ReactiveState::default(),
        }
    }

    /// Recarga la lista. Un fallo deja la lista vacía (sólo se loguea).
    pub async fn load(&self) {
        self.list.update(|state| state.loading = true);

        let items = match self.service.list().await {
            Ok(items) => {
                log::info!("🍱 [DONATIONS] {} donaciones cargadas", items.len());
                items
            }
            Err(e) => {
                log::warn!("⚠️ [DONATIONS] No se pudo cargar el listado: {}", e);
                Vec::new()
            }
        };

        self.list.set(ListState { items, loading: false });
    }

    /// Donaciones que una ONG todavía puede pedir
    pub fn available(&self) -> Vec<Donation> {
        self.list.with(|state| {
            state
                .items
                .iter()
                .filter(|donation| donation.is_available())
                .cloned()
                .collect()
        })
    }

    pub async fn request_pickup(&self, donation: u64, message: &str) -> Result<DonationRequest, ActionError> {
        let request = NewDonationRequest {
            donation,
            message: message.trim().to_string(),
        };
        let created = self
            .service
            .request_pickup(&request)
            .await
            .map_err(|e| ActionError::from_api(Action::PickupRequest, &e))?;
        log::info!("✅ [DONATIONS] Solicitud #{} creada ({:?})", created.id, created.status);
        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::http::Method;
    use crate::services::testing::MockTransport;
    use crate::services::ApiClient;
    use crate::utils::{MemoryStore, DONATIONS_PATH, DONATION_REQUESTS_PATH};
    use futures::executor::LocalPool;
    use futures::task::LocalSpawnExt;
    use std::rc::Rc;

    const TWO_DONATIONS: &str = r#"[
        {"id": 1, "food_type": "Bread", "quantity": 10, "status": "available",
         "created_at": "2024-10-25T12:30:00Z"},
        {"id": 2, "food_type": "Soup", "quantity": 4, "status": "assigned",
         "created_at": "2024-10-25T13:00:00Z"}
    ]"#;

    fn setup() -> (LocalPool, Rc<MockTransport>, DonationsViewModel) {
        let pool = LocalPool::new();
        let transport = MockTransport::new();
        let api = ApiClient::new("http://backend", transport.clone());
        let session = SessionManager::new(api, Rc::new(MemoryStore::new()), Rc::new(pool.spawner()));
        let vm = DonationsViewModel::new(&session);
        (pool, transport, vm)
    }

    #[test]
    fn load_fills_the_list_and_filters_available() {
        let (mut pool, transport, vm) = setup();
        transport.respond(Method::Get, DONATIONS_PATH, 200, TWO_DONATIONS);

        pool.run_until(vm.load());

        let state = vm.list.get();
        assert!(!state.loading);
        assert_eq!(state.items.len(), 2);
        let available: Vec<u64> = vm.available().iter().map(|d| d.id).collect();
        assert_eq!(available, vec![1]);
    }

    #[test]
    fn failed_load_shows_an_empty_list() {
        let (mut pool, transport, vm) = setup();
        transport.respond(Method::Get, DONATIONS_PATH, 200, TWO_DONATIONS);
        pool.run_until(vm.load());

        transport.respond(Method::Get, DONATIONS_PATH, 500, "");
        pool.run_until(vm.load());
        assert_eq!(vm.list.get(), ListState::default());
    }

    #[test]
    fn loading_flag_is_visible_while_the_request_is_pending() {
        let (mut pool, transport, vm) = setup();
        let gate = transport.hold(Method::Get, DONATIONS_PATH);

        let task = vm.clone();
        pool.spawner()
            .spawn_local(async move { task.load().await })
            .unwrap();
        pool.run_until_stalled();
        assert!(vm.list.get().loading);

        gate.release(200, "[]");
        pool.run_until_stalled();
        assert!(!vm.list.get().loading);
    }

    #[test]
    fn pickup_request_posts_donation_and_message() {
        let (mut pool, transport, vm) = setup();
        transport.respond(
            Method::Post,
            DONATION_REQUESTS_PATH,
            201,
            r#"{"id": 8, "donation": 1, "status": "pending", "message": "Tonight at 8"}"#,
        );

        let created = pool.run_until(vm.request_pickup(1, " Tonight at 8 ")).unwrap();
        assert_eq!(created.id, 8);
        assert_eq!(
            transport.last_request().unwrap().body,
            crate::services::http::Body::Json(r#"{"donation":1,"message":"Tonight at 8"}"#.to_string())
        );
    }

    #[test]
    fn rejected_pickup_names_the_action() {
        let (mut pool, transport, vm) = setup();
        transport.respond(Method::Post, DONATION_REQUESTS_PATH, 403, r#"{"detail": "Only NGOs can request."}"#);

        let err = pool.run_until(vm.request_pickup(1, "")).unwrap_err();
        assert_eq!(err.to_string(), "Pickup request failed: Only NGOs can request.");
    }
}
