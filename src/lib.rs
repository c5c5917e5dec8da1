// ============================================================================
// SHAREBITE PWA - FRONTEND MVVM (RUST PURO + WASM)
// ============================================================================
// Arquitectura MVVM:
// - Views: Funciones que renderizan DOM (sin lógica)
// - ViewModels: Validación + acciones, publican en ReactiveState
// - Services: SOLO comunicación API
// - State: SessionManager (token + rol) y AppState con Rc<RefCell>
// - Router: rutas tipadas + guard de autenticación/rol
// - Models: Estructuras compartidas con backend
// ============================================================================

pub mod config;
pub mod models;
pub mod router;
pub mod services;
pub mod state;
pub mod utils;
pub mod viewmodels;

#[cfg(target_arch = "wasm32")]
mod app;
#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod views;

#[cfg(target_arch = "wasm32")]
pub use wasm::*;

#[cfg(target_arch = "wasm32")]
mod wasm {
    use std::cell::RefCell;

    use wasm_bindgen::prelude::*;
    use wasm_bindgen::JsCast;
    use wasm_logger::Config;

    use crate::app::App;
    use crate::config::CONFIG;
    use crate::dom::current_location;
    use crate::router::Route;

    // Variable estática global para mantener la instancia de App
    thread_local! {
        static APP: RefCell<Option<App>> = RefCell::new(None);
    }

    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        // Inicializar panic hook para mejor debugging
        console_error_panic_hook::set_once();

        if CONFIG.is_logging_enabled() {
            wasm_logger::init(Config::new(CONFIG.log_level()));
        }
        log::info!("🚀 ShareBite PWA - Rust Puro + MVVM ({})", CONFIG.backend_url());

        let app = App::new()?;
        APP.with(|cell| {
            *cell.borrow_mut() = Some(app);
        });
        with_app(|app| app.start());
        rerender_app();

        // Atrás/adelante del navegador: registrar UNA sola vez
        if let Some(win) = web_sys::window() {
            let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |_e: web_sys::Event| {
                let location = current_location();
                log::info!("🔙 [ROUTER] popstate -> {}", location);
                with_app(|app| {
                    app.navigate(Route::parse(&location), false);
                });
            }) as Box<dyn FnMut(web_sys::Event)>);
            win.add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn with_app(action: impl FnOnce(&App)) {
        APP.with(|cell| match cell.borrow().as_ref() {
            Some(app) => action(app),
            None => log::warn!("⚠️ [APP] App no está inicializada"),
        });
    }

    /// Navegación iniciada por el usuario (enlaces y acciones de formularios)
    pub fn navigate(route: Route) {
        with_app(|app| {
            app.navigate(route, true);
        });
    }

    /// Re-render completo de la app
    pub fn rerender_app() {
        with_app(|app| {
            if let Err(e) = app.render() {
                log::error!("❌ [RERENDER] Error re-renderizando: {:?}", e);
            }
        });
    }
}
