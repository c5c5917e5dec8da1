// ============================================================================
// FORM HELPERS - Campos, botones y envío de acciones
// ============================================================================

use std::future::Future;

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::dom::{alert, append_child, set_disabled, ElementBuilder};
use crate::router::Route;
use crate::viewmodels::ActionError;

/// `<div class="mb-3"><label/><input/></div>`
pub fn field(label: &str, name: &str, input_type: &str, value: &str) -> Result<Element, JsValue> {
    let input = ElementBuilder::new("input")?
        .class("form-control")
        .attr("type", input_type)?
        .attr("name", name)?
        .attr("id", name)?
        .attr("value", value)?
        .build();
    group(label, name, input)
}

pub fn textarea(label: &str, name: &str) -> Result<Element, JsValue> {
    let area = ElementBuilder::new("textarea")?
        .class("form-control")
        .attr("name", name)?
        .attr("id", name)?
        .attr("rows", "3")?
        .build();
    group(label, name, area)
}

/// Select con `(valor, etiqueta)`; `selected` marca la opción inicial
pub fn select(label: &str, name: &str, options: &[(&str, &str)], selected: &str) -> Result<Element, JsValue> {
    let select = ElementBuilder::new("select")?
        .class("form-select")
        .attr("name", name)?
        .attr("id", name)?
        .build();
    for (value, text) in options {
        let option = ElementBuilder::new("option")?
            .attr("value", value)?
            .text(text)
            .build();
        if *value == selected {
            option.set_attribute("selected", "")?;
        }
        append_child(&select, &option)?;
    }
    group(label, name, select)
}

fn group(label: &str, name: &str, control: Element) -> Result<Element, JsValue> {
    let label = ElementBuilder::new("label")?
        .class("form-label")
        .attr("for", name)?
        .text(label)
        .build();
    Ok(ElementBuilder::new("div")?
        .class("mb-3")
        .child(label)?
        .child(control)?
        .build())
}

pub fn submit_button(text: &str, class: &str) -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("button")?
        .class(class)
        .attr("type", "submit")?
        .text(text)
        .build())
}

/// Ejecuta una acción con el botón deshabilitado. Éxito: navegar a la ruta
/// devuelta. Error: aviso bloqueante con el mensaje de la acción.
pub fn run_action<F>(button: &Element, task: F)
where
    F: Future<Output = Result<Route, ActionError>> + 'static,
{
    let button = button.clone();
    if let Err(e) = set_disabled(&button, true) {
        log::warn!("⚠️ [FORM] No se pudo deshabilitar el botón: {:?}", e);
    }
    spawn_local(async move {
        match task.await {
            Ok(route) => crate::navigate(route),
            Err(error) => {
                log::warn!("⚠️ [FORM] {}: {}", error.action(), error);
                alert(&error.to_string());
                let _ = set_disabled(&button, false);
            }
        }
    });
}
