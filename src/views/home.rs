// ============================================================================
// HOME VIEW - Portada pública
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::ElementBuilder;
use crate::router::Route;

const FEATURES: [(&str, &str); 4] = [
    ("Live Tracking", "Track delivery routes live."),
    ("Food Expiry Prediction", "Scan and assess freshness."),
    ("Role-Based Access", "Secure access for all roles."),
    ("Notifications", "Email/SMS on key events."),
];

pub fn render_home() -> Result<Element, JsValue> {
    let actions = ElementBuilder::new("div")?
        .class("mt-3 d-flex gap-3 justify-content-center")
        .child(ElementBuilder::link(Route::NewDonation, "Post Donation")?.class("btn btn-success btn-lg").build())?
        .child(ElementBuilder::link(Route::Donations, "Request Food")?.class("btn btn-warning btn-lg").build())?
        .build();
    let hero = ElementBuilder::new("section")?
        .class("container py-4")
        .child(
            ElementBuilder::new("div")?
                .class("hero rounded-4 text-center text-white p-5")
                .child(
                    ElementBuilder::new("h1")?
                        .class("fw-bold display-5")
                        .text("Reduce Food Waste. Feed Communities.")
                        .build(),
                )?
                .child(actions)?
                .build(),
        )?
        .build();

    let mut cards = Vec::with_capacity(FEATURES.len());
    for (title, description) in FEATURES {
        let card = ElementBuilder::new("div")?
            .class("p-3 bg-white rounded-4 shadow-sm h-100 text-center")
            .child(ElementBuilder::new("div")?.class("fw-semibold").text(title).build())?
            .child(ElementBuilder::new("div")?.class("text-body-secondary small").text(description).build())?
            .build();
        cards.push(ElementBuilder::new("div")?.class("col-12 col-md-6 col-lg-3").child(card)?.build());
    }
    let features = ElementBuilder::new("section")?
        .class("container pb-4")
        .child(ElementBuilder::new("h5")?.class("mb-3").text("Features").build())?
        .child(ElementBuilder::new("div")?.class("row g-3").children(cards)?.build())?
        .build();

    Ok(ElementBuilder::new("div")?
        .class("bg-body-tertiary")
        .child(hero)?
        .child(features)?
        .build())
}

pub fn render_not_found(path: &str) -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("div")?
        .class("container py-5 text-center")
        .child(ElementBuilder::new("h3")?.text("Page not found").build())?
        .child(
            ElementBuilder::new("p")?
                .class("text-body-secondary")
                .text(&format!("Nothing lives at {}", path))
                .build(),
        )?
        .child(ElementBuilder::link(Route::Home, "Back home")?.class("btn btn-primary").build())?
        .build())
}
