// ============================================================================
// TRACKING VIEW - Estado y ubicación de una donación
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::{append_child, ElementBuilder};
use crate::models::Donation;
use crate::router::Route;
use crate::state::AppState;
use crate::viewmodels::map_embed_url;

fn detail(label: &str, value: &str) -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("div")?
        .class("mb-2")
        .child(ElementBuilder::new("span")?.class("fw-semibold me-2").text(label).build())?
        .child(ElementBuilder::new("span")?.text(value).build())?
        .build())
}

fn donation_details(donation: &Donation) -> Result<Element, JsValue> {
    let expiry = donation
        .expiry
        .map(|e| e.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string());

    let card = ElementBuilder::new("div")?
        .class("card shadow-sm rounded-4 p-4")
        .child(ElementBuilder::new("h5")?.class("mb-3").text(donation.display_title()).build())?
        .child(detail("Status:", &donation.status.label())?)?
        .child(detail("Quantity:", &donation.quantity.to_string())?)?
        .child(detail("Pickup address:", &donation.pickup_address)?)?
        .child(detail("Expires:", &expiry)?)?
        .build();

    match map_embed_url(donation) {
        Some(url) => {
            let map = ElementBuilder::new("iframe")?
                .class("w-100 rounded-3 mt-3")
                .attr("src", &url)?
                .attr("height", "320")?
                .attr("loading", "lazy")?
                .attr("title", "Pickup location")?
                .build();
            append_child(&card, &map)?;
        }
        None => {
            let note = ElementBuilder::new("div")?
                .class("text-muted mt-3")
                .text("No location shared for this donation.")
                .build();
            append_child(&card, &note)?;
        }
    }
    Ok(card)
}

pub fn render_tracking(state: &AppState, donation_id: u64) -> Result<Element, JsValue> {
    let tracking = state.tracking.state.get();

    let content = match (&tracking.donation, tracking.loading) {
        (_, true) => ElementBuilder::new("div")?.text("Loading…").build(),
        (Some(donation), false) if donation.id == donation_id => donation_details(donation)?,
        _ => ElementBuilder::new("div")?
            .class("text-muted")
            .text("Tracking information is not available.")
            .build(),
    };

    Ok(ElementBuilder::new("div")?
        .class("container py-4 col-md-8")
        .child(ElementBuilder::new("h4")?.class("mb-3").text(&format!("Tracking #{}", donation_id)).build())?
        .child(content)?
        .child(ElementBuilder::link(Route::Donations, "Back to donations")?.class("btn btn-link mt-3").build())?
        .build())
}
