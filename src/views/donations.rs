// ============================================================================
// DONATIONS VIEWS - Listado y formulario de nueva donación
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::{append_child, field_value, on_submit, ElementBuilder};
use crate::models::{Donation, Role};
use crate::router::Route;
use crate::state::AppState;
use crate::viewmodels::DonationDraft;

use super::forms::{field, run_action, submit_button, textarea};

fn cell(text: &str) -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("td")?.text(text).build())
}

/// Tabla de donaciones (también la usa el panel de restaurante)
pub fn donations_table(items: &[Donation]) -> Result<Element, JsValue> {
    if items.is_empty() {
        return Ok(ElementBuilder::new("div")?
            .class("text-muted")
            .text("No donations to display.")
            .build());
    }

    let head = ElementBuilder::new("tr")?.build();
    for title in ["Title", "Quantity", "Status", "Created", ""] {
        append_child(&head, &ElementBuilder::new("th")?.text(title).build())?;
    }

    let body = ElementBuilder::new("tbody")?.build();
    for donation in items {
        let track = ElementBuilder::link(Route::Track { donation_id: donation.id }, "Track")?
            .class("btn btn-sm btn-outline-secondary")
            .build();
        let row = ElementBuilder::new("tr")?
            .child(cell(donation.display_title())?)?
            .child(cell(&donation.quantity.to_string())?)?
            .child(cell(&donation.status.label())?)?
            .child(cell(&donation.created_at.format("%Y-%m-%d %H:%M").to_string())?)?
            .child(ElementBuilder::new("td")?.child(track)?.build())?
            .build();
        append_child(&body, &row)?;
    }

    Ok(ElementBuilder::new("table")?
        .class("table table-striped")
        .child(ElementBuilder::new("thead")?.child(head)?.build())?
        .child(body)?
        .build())
}

pub fn render_donations(state: &AppState) -> Result<Element, JsValue> {
    let list = state.donations.list.get();

    let header = ElementBuilder::new("div")?
        .class("d-flex justify-content-between align-items-center mb-3")
        .child(ElementBuilder::new("h4")?.text("Donations").build())?
        .build();
    if state.session.role() == Some(Role::Restaurant) {
        let new_link = ElementBuilder::link(Route::NewDonation, "New Donation")?
            .class("btn btn-primary")
            .build();
        append_child(&header, &new_link)?;
    }

    let content = if list.loading {
        ElementBuilder::new("div")?.text("Loading…").build()
    } else {
        donations_table(&list.items)?
    };

    Ok(ElementBuilder::new("div")?
        .class("container py-4")
        .child(header)?
        .child(content)?
        .build())
}

pub fn render_new_donation(state: &AppState) -> Result<Element, JsValue> {
    let button = submit_button("Save", "btn btn-primary")?;
    let cancel = ElementBuilder::link(Route::Donations, "Cancel")?
        .class("btn btn-link ms-2")
        .build();

    let coordinates = ElementBuilder::new("div")?
        .class("row")
        .child(ElementBuilder::new("div")?.class("col").child(field("Latitude", "latitude", "text", "")?)?.build())?
        .child(ElementBuilder::new("div")?.class("col").child(field("Longitude", "longitude", "text", "")?)?.build())?
        .build();

    let form = ElementBuilder::new("form")?
        .id("donation-form")?
        .class("col-md-6")
        .child(field("Food type", "food_type", "text", "")?)?
        .child(textarea("Description", "description")?)?
        .child(field("Quantity", "quantity", "number", "1")?)?
        .child(field("Expiry", "expiry", "datetime-local", "")?)?
        .child(field("Pickup address", "pickup_address", "text", "")?)?
        .child(coordinates)?
        .child(textarea("Notes", "notes")?)?
        .child(button.clone())?
        .child(cancel)?
        .build();

    {
        let vm = state.donation_form.clone();
        on_submit(&form, move |form| {
            let draft = DonationDraft {
                food_type: field_value(form, "food_type"),
                description: field_value(form, "description"),
                quantity: field_value(form, "quantity"),
                expiry: field_value(form, "expiry"),
                pickup_address: field_value(form, "pickup_address"),
                latitude: field_value(form, "latitude"),
                longitude: field_value(form, "longitude"),
                notes: field_value(form, "notes"),
            };
            let vm = vm.clone();
            run_action(&button, async move { vm.submit(draft).await });
        })?;
    }

    Ok(ElementBuilder::new("div")?
        .class("container py-4")
        .child(ElementBuilder::new("h4")?.class("mb-3").text("New Donation").build())?
        .child(form)?
        .build())
}
