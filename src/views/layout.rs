// ============================================================================
// LAYOUT - Navbar y footer comunes a todas las páginas
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::ElementBuilder;
use crate::models::Role;
use crate::router::Route;
use crate::state::AppState;

fn brand(route: Option<Route>) -> Result<Element, JsValue> {
    let container = match route {
        Some(route) => ElementBuilder::link(route, "")?,
        None => ElementBuilder::new("div")?,
    };
    let share = ElementBuilder::new("span")?.class("text-success").text("Share").build();
    let bite = ElementBuilder::new("span")?.class("text-warning").text("Bite").build();
    Ok(container.class("navbar-brand fw-bold").child(share)?.child(bite)?.build())
}

fn nav_item(route: Route, text: &str, active: &Route) -> Result<Element, JsValue> {
    let class = if &route == active { "nav-link active" } else { "nav-link" };
    let link = ElementBuilder::link(route, text)?.class(class).build();
    Ok(ElementBuilder::new("li")?.class("nav-item").child(link)?.build())
}

/// Los enlaces dependen del rol guardado (UI, no seguridad)
pub fn render_navbar(state: &AppState) -> Result<Element, JsValue> {
    let current = state.route.get();
    let role = state.session.role();
    let authenticated = state.session.is_authenticated();

    let mut links = vec![nav_item(Route::Home, "Home", &current)?];
    match role {
        Some(Role::Restaurant) => links.push(nav_item(Route::Restaurants, "Restaurants", &current)?),
        Some(Role::Ngo) => links.push(nav_item(Route::Ngo, "NGOs", &current)?),
        _ => {}
    }
    links.push(nav_item(Route::Donations, "Donations", &current)?);
    if role == Some(Role::DeliveryAgent) {
        links.push(nav_item(Route::DeliveryScan, "Scan", &current)?);
    }

    if authenticated {
        let unread = state.notifications.unread_count();
        let label = if unread > 0 {
            format!("Notifications ({})", unread)
        } else {
            "Notifications".to_string()
        };
        links.push(nav_item(Route::Notifications, &label, &current)?);
        let logout = ElementBuilder::link(Route::Logout, "Logout")?
            .class("btn btn-sm btn-outline-secondary ms-2")
            .build();
        links.push(ElementBuilder::new("li")?.class("nav-item").child(logout)?.build());
    } else {
        let login = ElementBuilder::link(Route::login(), "Login")?
            .class("btn btn-sm btn-outline-primary ms-2")
            .build();
        links.push(ElementBuilder::new("li")?.class("nav-item").child(login)?.build());
    }
    let items = ElementBuilder::new("ul")?
        .class("navbar-nav ms-auto align-items-lg-center")
        .children(links)?
        .build();

    let container = ElementBuilder::new("div")?
        .class("container")
        .child(brand(Some(Route::Home))?)?
        .child(items)?
        .build();
    Ok(ElementBuilder::new("nav")?
        .class("navbar navbar-expand-lg navbar-light bg-light shadow-sm")
        .child(container)?
        .build())
}

pub fn render_footer() -> Result<Element, JsValue> {
    let links = ElementBuilder::new("nav")?
        .class("d-flex gap-3 small")
        .children(
            ["Privacy Policy", "Terms", "Contact"]
                .iter()
                .map(|text| -> Result<Element, JsValue> {
                    Ok(ElementBuilder::new("span")?.class("text-body-secondary").text(text).build())
                })
                .collect::<Result<Vec<_>, _>>()?,
        )?
        .build();
    let container = ElementBuilder::new("div")?
        .class("container d-flex justify-content-between align-items-center")
        .child(brand(None)?)?
        .child(links)?
        .build();
    Ok(ElementBuilder::new("footer")?
        .class("border-top py-3 bg-white")
        .child(container)?
        .build())
}
