// ============================================================================
// APP - Aplicación principal: raíz del DOM, historial y re-render
// ============================================================================

use std::cell::Cell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::{append_child, current_location, get_element_by_id, set_inner_html, window};
use crate::router::Route;
use crate::state::{AppState, Resolved};
use crate::views::render_app;

/// Aplicación principal
pub struct App {
    state: AppState,
    root: Element,
}

impl App {
    /// Crear nueva aplicación montada sobre `#app`
    pub fn new() -> Result<Self, JsValue> {
        let root = get_element_by_id("app")
            .ok_or_else(|| JsValue::from_str("No #app element found"))?;

        let state = AppState::browser();

        // Varios cambios seguidos producen un único re-render
        let pending = Rc::new(Cell::new(false));
        state.subscribe_to_changes(move || {
            if pending.replace(true) {
                return;
            }
            let pending = pending.clone();
            Timeout::new(0, move || {
                pending.set(false);
                crate::rerender_app();
            })
            .forget();
        });

        Ok(Self { state, root })
    }

    /// Primera navegación (URL con la que se abrió la app)
    pub fn start(&self) {
        let location = current_location();
        log::info!("🚀 [APP] Iniciando en {}", location);
        self.navigate(Route::parse(&location), false);
    }

    /// Resuelve la ruta con el guard y sincroniza la barra de direcciones.
    /// `push`: navegación del usuario (nueva entrada). Sin `push` (arranque o
    /// popstate) solo se reescribe la URL si hubo redirección.
    pub fn navigate(&self, route: Route, push: bool) -> Resolved {
        let resolved = self.state.navigate(route);
        let path = resolved.route.path();

        if let Some(history) = window().and_then(|w| w.history().ok()) {
            let result = if push {
                history.push_state_with_url(&JsValue::NULL, "", Some(path.as_str()))
            } else if resolved.replace {
                history.replace_state_with_url(&JsValue::NULL, "", Some(path.as_str()))
            } else {
                Ok(())
            };
            if let Err(e) = result {
                log::warn!("⚠️ [APP] No se pudo actualizar el historial: {:?}", e);
            }
        }
        resolved
    }

    /// Re-render completo de `#app`
    pub fn render(&self) -> Result<(), JsValue> {
        let content = render_app(&self.state)?;
        set_inner_html(&self.root, "");
        append_child(&self.root, &content)
    }
}
