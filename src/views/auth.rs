// ============================================================================
// AUTH VIEWS - Login y registro
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::{append_child, field_value, on_submit, ElementBuilder};
use crate::models::Role;
use crate::router::Route;
use crate::state::AppState;
use crate::viewmodels::{LoginForm, RegistrationForm};

use super::forms::{field, run_action, select, submit_button};

fn card(title: &str, body: Element) -> Result<Element, JsValue> {
    let column = ElementBuilder::new("div")?
        .class("col-md-4")
        .child(ElementBuilder::new("h3")?.class("mb-4").text(title).build())?
        .child(body)?
        .build();
    Ok(ElementBuilder::new("div")?
        .class("container py-5")
        .child(ElementBuilder::new("div")?.class("row justify-content-center").child(column)?.build())?
        .build())
}

fn role_options() -> Vec<(&'static str, &'static str)> {
    Role::ALL.iter().map(|role| (role.as_str(), role.label())).collect()
}

/// `/login?next=...&role=...`
pub fn render_login(state: &AppState, next: Option<String>, role: Option<Role>) -> Result<Element, JsValue> {
    let mut options = vec![("", "Use my account role")];
    options.extend(role_options());

    let button = submit_button("Sign in", "btn btn-primary w-100")?;
    let form = ElementBuilder::new("form")?
        .id("login-form")?
        .child(field("Username", "username", "text", "")?)?
        .child(field("Password", "password", "password", "")?)?
        .child(select("Sign in as", "role", &options, role.map(|r| r.as_str()).unwrap_or(""))?)?
        .child(button.clone())?
        .build();

    {
        let vm = state.login.clone();
        on_submit(&form, move |form| {
            let login = LoginForm {
                username: field_value(form, "username"),
                password: field_value(form, "password"),
                next: next.clone(),
                role_hint: field_value(form, "role").parse().ok(),
            };
            let vm = vm.clone();
            run_action(&button, async move { vm.submit(login).await });
        })?;
    }

    let footer = ElementBuilder::new("div")?
        .class("mt-3 text-center")
        .child(ElementBuilder::link(Route::Register { role }, "Create account")?.build())?
        .build();
    let body = ElementBuilder::new("div")?.child(form)?.child(footer)?.build();
    card("Login", body)
}

/// `/register?role=...`: el rol elige los campos del formulario
pub fn render_register(state: &AppState, role: Option<Role>) -> Result<Element, JsValue> {
    let role = role.unwrap_or(Role::Restaurant);

    let tabs = ElementBuilder::new("div")?.class("btn-group w-100 mb-3").build();
    for candidate in Role::ALL {
        let class = if candidate == role { "btn btn-success" } else { "btn btn-outline-success" };
        let tab = ElementBuilder::link(Route::Register { role: Some(candidate) }, candidate.label())?
            .class(class)
            .build();
        append_child(&tabs, &tab)?;
    }

    let button = submit_button("Create account", "btn btn-success w-100")?;
    let form = ElementBuilder::new("form")?
        .id("register-form")?
        .child(field("Username", "username", "text", "")?)?
        .child(field("Email", "email", "email", "")?)?
        .child(field("Password", "password", "password", "")?)?
        .build();
    if RegistrationForm::needs_organization(role) {
        append_child(&form, &field("Organization name", "organization_name", "text", "")?)?;
        append_child(&form, &field("Address", "address", "text", "")?)?;
    }
    append_child(&form, &field("Phone", "phone", "tel", "")?)?;
    append_child(&form, &button)?;

    {
        let vm = state.register.clone();
        on_submit(&form, move |form| {
            let registration = RegistrationForm {
                role,
                username: field_value(form, "username"),
                email: field_value(form, "email"),
                password: field_value(form, "password"),
                organization_name: field_value(form, "organization_name"),
                phone: field_value(form, "phone"),
                address: field_value(form, "address"),
            };
            let vm = vm.clone();
            run_action(&button, async move { vm.submit(registration).await });
        })?;
    }

    let footer = ElementBuilder::new("div")?
        .class("mt-3 text-center")
        .child(ElementBuilder::link(Route::Login { next: None, role: Some(role) }, "Already registered? Sign in")?.build())?
        .build();
    let body = ElementBuilder::new("div")?.child(tabs)?.child(form)?.child(footer)?.build();
    card("Register", body)
}
