// ============================================================================
// LOGIN VIEW
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::dom::{field_value, labelled_input, on_click, on_submit, set_disabled, set_text_content, text_element, ElementBuilder};
use crate::models::AuthError;
use crate::state::{AppState, Screen};

pub fn render_login(state: &AppState) -> Result<Element, JsValue> {
    let error = text_element("p", "form-error", "")?;
    let submit = ElementBuilder::new("button")?
        .attr("type", "submit")?
        .class("btn-primary")
        .text("Sign in")
        .build();

    let form = ElementBuilder::new("form")?
        .class("auth-form")
        .child(text_element("h1", "auth-title", "HR Portal")?)?
        .child(text_element("p", "auth-subtitle", "Sign in to your account")?)?
        .child(labelled_input("Email", "email", "email", "")?)?
        .child(labelled_input("Password", "password", "password", "")?)?
        .child(error.clone())?
        .child(submit.clone())?
        .build();

    {
        let state = state.clone();
        let form_ref = form.clone();
        on_submit(&form, move || {
            let email = field_value(&form_ref, "input[name=email]");
            let password = field_value(&form_ref, "input[name=password]");
            let state = state.clone();
            let submit = submit.clone();
            let error = error.clone();
            let _ = set_disabled(&submit, true);
            set_text_content(&error, "");

            spawn_local(async move {
                match state.manager.sign_in(email.trim(), &password).await {
                    Ok(()) => state.navigate_home(),
                    // A newer attempt or a sign-out owns the screen now
                    Err(AuthError::Superseded) => {}
                    Err(e) => {
                        log::warn!("⚠️ [LOGIN] {}", e);
                        let _ = set_disabled(&submit, false);
                        set_text_content(&error, &e.message());
                    }
                }
            });
        })?;
    }

    let register = ElementBuilder::new("button")?
        .attr("type", "button")?
        .class("btn-link")
        .text("No account yet? Create one")
        .build();
    {
        let state = state.clone();
        on_click(&register, move |_| state.navigate(Screen::Register))?;
    }

    Ok(ElementBuilder::new("div")?
        .class("auth-screen")
        .child(form)?
        .child(register)?
        .build())
}
