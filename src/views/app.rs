// ============================================================================
// APP VIEW - Navbar + página de la ruta actual + footer
// ============================================================================
// La ruta ya pasó por el guard: aquí solo se elige qué pintar.
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::ElementBuilder;
use crate::router::Route;
use crate::state::AppState;

use super::auth::{render_login, render_register};
use super::donations::{render_donations, render_new_donation};
use super::home::{render_home, render_not_found};
use super::layout::{render_footer, render_navbar};
use super::notifications::render_notifications;
use super::panels::{render_dashboard, render_ngo, render_restaurants};
use super::scan::render_scan;
use super::tracking::render_tracking;

fn render_page(state: &AppState, route: Route) -> Result<Element, JsValue> {
    match route {
        Route::Home => render_home(),
        Route::Login { next, role } => render_login(state, next, role),
        Route::Register { role } => render_register(state, role),
        Route::Dashboard => render_dashboard(state),
        Route::Donations => render_donations(state),
        Route::NewDonation => render_new_donation(state),
        Route::Restaurants => render_restaurants(state),
        Route::Ngo => render_ngo(state),
        Route::DeliveryScan => render_scan(state),
        Route::Notifications => render_notifications(state),
        Route::Track { donation_id } => render_tracking(state, donation_id),
        // resolve() nunca deja Logout como ruta actual
        Route::Logout => render_home(),
        Route::NotFound { path } => render_not_found(&path),
    }
}

pub fn render_app(state: &AppState) -> Result<Element, JsValue> {
    let page = render_page(state, state.route.get())?;
    Ok(ElementBuilder::new("div")?
        .class("d-flex flex-column min-vh-100")
        .child(render_navbar(state)?)?
        .child(ElementBuilder::new("main")?.class("flex-grow-1").child(page)?.build())?
        .child(render_footer()?)?
        .build())
}
