// ============================================================================
// PANELS - Dashboard y paneles por rol (restaurante / ONG)
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::{append_child, field_value, on_click, ElementBuilder};
use crate::models::Donation;
use crate::router::Route;
use crate::state::AppState;
use crate::viewmodels::ActionError;

use super::donations::donations_table;
use super::forms::run_action;

fn stat_card(title: &str, value: String, route: Route) -> Result<Element, JsValue> {
    let card = ElementBuilder::new("div")?
        .class("card p-3 shadow-sm")
        .child(ElementBuilder::new("div")?.class("small text-body-secondary").text(title).build())?
        .child(ElementBuilder::new("div")?.class("fs-3 fw-semibold").text(&value).build())?
        .child(ElementBuilder::link(route, "Open")?.class("stretched-link small").build())?
        .build();
    Ok(ElementBuilder::new("div")?.class("col-md-4").child(card)?.build())
}

fn sidebar(title: &str, links: &[(Route, &str)]) -> Result<Element, JsValue> {
    let list = ElementBuilder::new("div")?.class("list-group shadow-sm rounded-4").build();
    append_child(&list, &ElementBuilder::new("div")?.class("list-group-item fw-semibold").text(title).build())?;
    for (route, text) in links {
        let link = ElementBuilder::link(route.clone(), text)?
            .class("list-group-item list-group-item-action")
            .build();
        append_child(&list, &link)?;
    }
    Ok(list)
}

pub fn render_dashboard(state: &AppState) -> Result<Element, JsValue> {
    let donations = state.donations.list.get();
    let loading = |count: usize| if donations.loading { "…".to_string() } else { count.to_string() };

    let cards = ElementBuilder::new("div")?
        .class("row g-3")
        .child(stat_card("Donations", loading(donations.items.len()), Route::Donations)?)?
        .child(stat_card("Available", loading(state.donations.available().len()), Route::Donations)?)?
        .child(stat_card(
            "Unread notifications",
            state.notifications.unread_count().to_string(),
            Route::Notifications,
        )?)?
        .build();

    let header = ElementBuilder::new("div")?
        .class("d-flex justify-content-between align-items-center mb-3")
        .child(ElementBuilder::new("h4")?.text("Dashboard").build())?
        .child(ElementBuilder::link(Route::Logout, "Logout")?.class("btn btn-outline-secondary").build())?
        .build();

    Ok(ElementBuilder::new("div")?
        .class("container py-4")
        .child(header)?
        .child(cards)?
        .build())
}

pub fn render_restaurants(state: &AppState) -> Result<Element, JsValue> {
    let list = state.donations.list.get();

    let aside = ElementBuilder::new("aside")?
        .class("col-12 col-lg-3 mb-4")
        .child(sidebar(
            "Restaurant Panel",
            &[(Route::Dashboard, "Dashboard"), (Route::Donations, "My Donations"), (Route::Logout, "Logout")],
        )?)?
        .child(
            ElementBuilder::link(Route::NewDonation, "Create Donation")?
                .class("btn btn-success btn-lg w-100 shadow-sm mt-3")
                .build(),
        )?
        .build();

    let current = if list.loading {
        ElementBuilder::new("div")?.text("Loading…").build()
    } else {
        donations_table(&list.items)?
    };
    let main = ElementBuilder::new("main")?
        .class("col-12 col-lg-9")
        .child(
            ElementBuilder::new("div")?
                .class("card shadow-sm rounded-4 p-4")
                .child(ElementBuilder::new("h5")?.class("mb-3").text("My Current Donations").build())?
                .child(current)?
                .build(),
        )?
        .build();

    Ok(ElementBuilder::new("div")?
        .class("container py-4")
        .child(ElementBuilder::new("div")?.class("row g-4").child(aside)?.child(main)?.build())?
        .build())
}

/// Tarjeta de donación disponible con su botón de solicitud
fn pickup_card(state: &AppState, donation: &Donation) -> Result<Element, JsValue> {
    let message_name = format!("message-{}", donation.id);
    let message = ElementBuilder::new("input")?
        .class("form-control form-control-sm")
        .attr("name", &message_name)?
        .attr("placeholder", "Message for the restaurant (optional)")?
        .build();
    let button = ElementBuilder::new("button")?
        .class("btn btn-warning btn-sm mt-2")
        .attr("type", "button")?
        .text("Request pickup")
        .build();

    let card = ElementBuilder::new("div")?
        .class("card shadow-sm rounded-4 p-3 h-100")
        .child(ElementBuilder::new("div")?.class("fw-semibold").text(donation.display_title()).build())?
        .child(
            ElementBuilder::new("div")?
                .class("small text-body-secondary mb-2")
                .text(&format!("{} portions · {}", donation.quantity, donation.pickup_address))
                .build(),
        )?
        .child(message)?
        .child(button.clone())?
        .build();

    {
        let vm = state.donations.clone();
        let id = donation.id;
        let card_ref = card.clone();
        let button_ref = button.clone();
        on_click(&button, move |_| {
            let text = field_value(&card_ref, &message_name);
            let vm = vm.clone();
            run_action(&button_ref, async move {
                vm.request_pickup(id, &text).await?;
                crate::dom::alert("Pickup requested.");
                Ok::<_, ActionError>(Route::Ngo)
            });
        })?;
    }

    Ok(ElementBuilder::new("div")?.class("col-md-6").child(card)?.build())
}

pub fn render_ngo(state: &AppState) -> Result<Element, JsValue> {
    let loading = state.donations.list.with(|list| list.loading);
    let available = state.donations.available();

    let content = if loading {
        ElementBuilder::new("div")?.text("Loading…").build()
    } else if available.is_empty() {
        ElementBuilder::new("div")?.class("text-muted").text("No donations available right now.").build()
    } else {
        let grid = ElementBuilder::new("div")?.class("row g-3").build();
        for donation in &available {
            append_child(&grid, &pickup_card(state, donation)?)?;
        }
        grid
    };

    let aside = ElementBuilder::new("aside")?
        .class("col-12 col-lg-3 mb-4")
        .child(sidebar(
            "NGO Panel",
            &[(Route::Dashboard, "Dashboard"), (Route::Notifications, "Notifications"), (Route::Logout, "Logout")],
        )?)?
        .build();
    let main = ElementBuilder::new("main")?
        .class("col-12 col-lg-9")
        .child(ElementBuilder::new("h5")?.class("mb-3").text("Available Donations").build())?
        .child(content)?
        .build();

    Ok(ElementBuilder::new("div")?
        .class("container py-4")
        .child(ElementBuilder::new("div")?.class("row g-4").child(aside)?.child(main)?.build())?
        .build())
}
