// ============================================================================
// NOTIFICATIONS VIEW
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::dom::{append_child, on_click, set_disabled, ElementBuilder};
use crate::models::Notification;
use crate::state::AppState;

fn notification_item(state: &AppState, notification: &Notification) -> Result<Element, JsValue> {
    let class = if notification.is_read {
        "list-group-item d-flex justify-content-between align-items-center"
    } else {
        "list-group-item list-group-item-warning d-flex justify-content-between align-items-center"
    };
    let text = ElementBuilder::new("div")?
        .child(ElementBuilder::new("div")?.text(&notification.message).build())?
        .child(
            ElementBuilder::new("div")?
                .class("small text-body-secondary")
                .text(&notification.created_at.format("%Y-%m-%d %H:%M").to_string())
                .build(),
        )?
        .build();
    let item = ElementBuilder::new("li")?.class(class).child(text)?.build();

    if !notification.is_read {
        let button = ElementBuilder::new("button")?
            .class("btn btn-sm btn-outline-primary")
            .attr("type", "button")?
            .text("Mark as read")
            .build();
        let vm = state.notifications.clone();
        let id = notification.id;
        let button_ref = button.clone();
        on_click(&button, move |_| {
            let _ = set_disabled(&button_ref, true);
            let vm = vm.clone();
            let button = button_ref.clone();
            spawn_local(async move {
                // Si falla no cambia el estado ni hay re-render: reactivar
                if !vm.mark_read(id).await {
                    let _ = set_disabled(&button, false);
                }
            });
        })?;
        append_child(&item, &button)?;
    }
    Ok(item)
}

pub fn render_notifications(state: &AppState) -> Result<Element, JsValue> {
    let list = state.notifications.list.get();

    let content = if list.loading {
        ElementBuilder::new("div")?.text("Loading…").build()
    } else if list.items.is_empty() {
        ElementBuilder::new("div")?.class("text-muted").text("No notifications.").build()
    } else {
        let ul = ElementBuilder::new("ul")?.class("list-group").build();
        for notification in &list.items {
            append_child(&ul, &notification_item(state, notification)?)?;
        }
        ul
    };

    Ok(ElementBuilder::new("div")?
        .class("container py-4")
        .child(ElementBuilder::new("h4")?.class("mb-3").text("Notifications").build())?
        .child(content)?
        .build())
}
