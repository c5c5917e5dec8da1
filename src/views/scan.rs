// ============================================================================
// SCAN VIEW - Análisis de frescura de alimentos por imagen
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{Element, File};

use crate::dom::{alert, append_child, on_submit, selected_file, set_disabled, ElementBuilder};
use crate::models::{ScanImage, ScanResult};
use crate::state::AppState;

use super::forms::submit_button;

/// Lee el archivo completo como bytes para el multipart
async fn read_image(file: File) -> Result<ScanImage, JsValue> {
    let buffer = JsFuture::from(file.array_buffer()).await?;
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
    Ok(ScanImage {
        file_name: file.name(),
        content_type: file.type_(),
        bytes,
    })
}

fn result_card(result: &ScanResult) -> Result<Element, JsValue> {
    let metrics = ElementBuilder::new("ul")?.class("small mb-0").build();
    for line in result.metric_lines() {
        append_child(&metrics, &ElementBuilder::new("li")?.text(&line).build())?;
    }

    let mut card = ElementBuilder::new("div")?
        .class("card shadow-sm rounded-4 p-4 mt-4")
        .child(ElementBuilder::new("h5")?.text(&result.label).build())?
        .child(
            ElementBuilder::new("div")?
                .class("text-body-secondary mb-2")
                .text(&format!("Confidence: {}%", result.confidence_percent()))
                .build(),
        )?
        .child(metrics)?;
    if !result.engine.is_empty() {
        card = card.child(
            ElementBuilder::new("div")?
                .class("small text-muted mt-2")
                .text(&format!("Engine: {}", result.engine))
                .build(),
        )?;
    }
    Ok(card.build())
}

pub fn render_scan(state: &AppState) -> Result<Element, JsValue> {
    let button = submit_button("Scan", "btn btn-success")?;
    let input = ElementBuilder::new("input")?
        .class("form-control")
        .attr("type", "file")?
        .attr("name", "image")?
        .attr("accept", "image/*")?
        .build();
    let form = ElementBuilder::new("form")?
        .id("scan-form")?
        .child(ElementBuilder::new("div")?.class("mb-3").child(input)?.build())?
        .child(button.clone())?
        .build();

    {
        let vm = state.scan.clone();
        on_submit(&form, move |form| {
            let file = selected_file(form, "image");
            let vm = vm.clone();
            let button = button.clone();
            let _ = set_disabled(&button, true);
            spawn_local(async move {
                let image = match file {
                    Some(file) => match read_image(file).await {
                        Ok(image) => Some(image),
                        Err(e) => {
                            log::error!("❌ [SCAN] No se pudo leer la imagen: {:?}", e);
                            None
                        }
                    },
                    None => None,
                };
                // El resultado llega por ReactiveState y provoca re-render
                if let Err(error) = vm.scan(image).await {
                    alert(&error.to_string());
                }
                let _ = set_disabled(&button, false);
            });
        })?;
    }

    let page = ElementBuilder::new("div")?
        .class("container py-4 col-md-6")
        .child(ElementBuilder::new("h4")?.class("mb-3").text("Food Scan").build())?
        .child(form)?
        .build();
    if let Some(result) = state.scan.result.get() {
        append_child(&page, &result_card(&result)?)?;
    }
    Ok(page)
}
