// ============================================================================
// EVENT HANDLING - Sistema de eventos
// ============================================================================
// closure.forget() filtra la closure para siempre: cada re-render completo
// deja atrás las de los elementos reemplazados. Se acepta mientras los
// re-renders sean por navegación o por datos nuevos.
// Listeners globales (window): registrar UNA sola vez al arrancar.
// ============================================================================

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, MouseEvent};

use crate::router::Route;

/// Helper para crear click handler simple
pub fn on_click<F>(element: &Element, handler: F) -> Result<(), JsValue>
where
    F: FnMut(MouseEvent) + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(MouseEvent)>);
    element.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

/// Submit de un `<form>`: cancela el envío nativo y entrega el formulario
pub fn on_submit<F>(form: &Element, mut handler: F) -> Result<(), JsValue>
where
    F: FnMut(&Element) + 'static,
{
    let form_ref = form.clone();
    let closure = Closure::wrap(Box::new(move |e: Event| {
        e.prevent_default();
        handler(&form_ref);
    }) as Box<dyn FnMut(Event)>);
    form.add_event_listener_with_callback("submit", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

/// Enlaces internos: pushState en lugar de recargar
pub fn on_link_click(element: &Element, route: Route) -> Result<(), JsValue> {
    on_click(element, move |e: MouseEvent| {
        // Ctrl/Cmd+click abre en otra pestaña como un enlace normal
        if e.ctrl_key() || e.meta_key() || e.shift_key() || e.button() != 0 {
            return;
        }
        e.prevent_default();
        crate::navigate(route.clone());
    })
}
