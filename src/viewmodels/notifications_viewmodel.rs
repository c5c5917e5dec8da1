// ============================================================================
// NOTIFICATIONS VIEWMODEL
// ============================================================================

use crate::models::Notification;
use crate::services::NotificationService;
use crate::state::{ReactiveState, SessionManager};

use super::ListState;

#[derive(Clone)]
pub struct NotificationsViewModel {
    service: NotificationService,
    pub list: ReactiveState<ListState<Notification>>,
}

impl NotificationsViewModel {
    pub fn new(session: &SessionManager) -> Self {
        Self {
            service: NotificationService::new(session.api().clone()),
            list: ReactiveState::default(),
        }
    }

    pub async fn load(&self) {
        self.list.update(|state| state.loading = true);

        let items = match self.service.list().await {
            Ok(items) => items,
            Err(e) => {
                log::warn!("⚠️ [NOTIFICATIONS] No se pudo cargar el listado: {}", e);
                Vec::new()
            }
        };

        self.list.set(ListState { items, loading: false });
    }

    /// El flag local sólo cambia cuando el backend confirma el PATCH.
    /// Un fallo no se muestra al usuario.
    /// `true` si el backend confirmó el cambio
    pub async fn mark_read(&self, id: u64) -> bool {
        match self.service.set_read(id, true).await {
            Ok(updated) => {
                self.list.update(|state| {
                    if let Some(item) = state.items.iter_mut().find(|n| n.id == id) {
                        item.is_read = updated.is_read;
                    }
                });
                true
            }
            Err(e) => {
                log::warn!("⚠️ [NOTIFICATIONS] No se pudo marcar #{} como leída: {}", id, e);
                false
            }
        }
    }

    pub fn unread_count(&self) -> usize {
        self.list
            .with(|state| state.items.iter().filter(|n| !n.is_read).count())
    }
}
