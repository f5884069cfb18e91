// ============================================================================
// REGISTER VIEW
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::dom::{
    field_value, labelled_input, labelled_select, on_click, on_submit, set_disabled, set_text_content, text_element, ElementBuilder,
};
use crate::models::{Role, SignupData};
use crate::state::{AppState, Screen};

pub fn render_register(state: &AppState) -> Result<Element, JsValue> {
    let error = text_element("p", "form-error", "")?;
    let submit = ElementBuilder::new("button")?
        .attr("type", "submit")?
        .class("btn-primary")
        .text("Create account")
        .build();

    let roles = [(Role::Employee.as_str(), "Employee"), (Role::Admin.as_str(), "Administrator")];
    let form = ElementBuilder::new("form")?
        .class("auth-form")
        .child(text_element("h1", "auth-title", "Create account")?)?
        .child(labelled_input("First name", "firstName", "text", "")?)?
        .child(labelled_input("Last name", "lastName", "text", "")?)?
        .child(labelled_input("Email", "email", "email", "")?)?
        .child(labelled_input("Password", "password", "password", "")?)?
        .child(labelled_select("Role", "role", &roles, Role::Employee.as_str())?)?
        .child(error.clone())?
        .child(submit.clone())?
        .build();

    {
        let state = state.clone();
        let form_ref = form.clone();
        on_submit(&form, move || {
            let email = field_value(&form_ref, "input[name=email]");
            let password = field_value(&form_ref, "input[name=password]");
            let data = SignupData {
                first_name: field_value(&form_ref, "input[name=firstName]").trim().to_string(),
                last_name: field_value(&form_ref, "input[name=lastName]").trim().to_string(),
                role: match field_value(&form_ref, "select[name=role]").as_str() {
                    "admin" => Some(Role::Admin),
                    "employee" => Some(Role::Employee),
                    _ => None,
                },
            };
            let state = state.clone();
            let submit = submit.clone();
            let error = error.clone();
            let _ = set_disabled(&submit, true);
            set_text_content(&error, "");

            spawn_local(async move {
                match state.manager.sign_up(email.trim(), &password, data).await {
                    Ok(()) => {
                        state.navigate(Screen::Login);
                        state.show_info("Account created. Please sign in.");
                    }
                    Err(e) => {
                        let _ = set_disabled(&submit, false);
                        set_text_content(&error, &e.message());
                    }
                }
            });
        })?;
    }

    let back = ElementBuilder::new("button")?
        .attr("type", "button")?
        .class("btn-link")
        .text("Already registered? Sign in")
        .build();
    {
        let state = state.clone();
        on_click(&back, move |_| state.navigate(Screen::Login))?;
    }

    Ok(ElementBuilder::new("div")?
        .class("auth-screen")
        .child(form)?
        .child(back)?
        .build())
}
