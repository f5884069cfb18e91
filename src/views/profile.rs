// ============================================================================
// PROFILE VIEW
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::dom::{
    clear, field_value, labelled_input, on_submit, set_disabled, set_text_content, text_element, ElementBuilder,
};
use crate::models::EmployeeProfile;
use crate::state::AppState;
use crate::viewmodels::{ProfileError, ProfileViewModel};

/// `(key, label, input type)` in display order
const FIELDS: [(&str, &str, &str); 16] = [
    ("firstName", "First Name", "text"),
    ("lastName", "Last Name", "text"),
    ("email", "Email", "email"),
    ("phone", "Mobile", "tel"),
    ("dob", "Date of birth", "date"),
    ("gender", "Gender", "text"),
    ("bloodGroup", "Blood Group", "text"),
    ("address", "Address", "text"),
    ("emergencyContactPerson", "Emergency Contact Person", "text"),
    ("emergencyContactNo", "Emergency Contact No.", "tel"),
    ("hireDate", "Date of joining", "date"),
    ("position", "Designation", "text"),
    ("department", "Department", "text"),
    ("salary", "Salary", "number"),
    ("education", "Education", "text"),
    ("documentsSubmitted", "Documents submitted", "text"),
];

pub fn render_profile(state: &AppState) -> Result<Element, JsValue> {
    let body = text_element("div", "profile-body", "Loading profile...")?;
    let root = ElementBuilder::new("section")?
        .class("profile-screen")
        .child(text_element("h1", "screen-title", "My Profile")?)?
        .child(body.clone())?
        .build();

    let vm = state.profile();
    spawn_local(async move {
        let rendered = match vm.load().await {
            Ok(profile) => render_form(&body, &vm, profile),
            Err(ProfileError::AccessDenied) => {
                text_element("h2", "", "Please log in to view your profile").and_then(|denied| {
                    clear(&body);
                    body.append_child(&denied).map(|_| ())
                })
            }
            Err(e) => {
                set_text_content(&body, &e.to_string());
                Ok(())
            }
        };
        if let Err(e) = rendered {
            log::error!("❌ [PROFILE] Render failed: {:?}", e);
        }
    });
    Ok(root)
}

fn current_value(profile: &EmployeeProfile, key: &str) -> String {
    match key {
        "firstName" => profile.first_name.clone(),
        "lastName" => profile.last_name.clone(),
        "email" => profile.email.clone(),
        "phone" => profile.phone.clone(),
        "hireDate" => profile.hire_date.get(..10).unwrap_or(profile.hire_date.as_str()).to_string(),
        "position" => profile.position.clone(),
        "department" => profile.department.clone(),
        "salary" if profile.salary > 0.0 => profile.salary.to_string(),
        "salary" => String::new(),
        other => profile.extra_text(other).unwrap_or_default().to_string(),
    }
}

fn render_form(body: &Element, vm: &ProfileViewModel, profile: EmployeeProfile) -> Result<(), JsValue> {
    clear(body);

    let header = format!("{} {} · {} · {}", profile.first_name, profile.last_name, profile.position, profile.status);
    let summary = text_element("p", "profile-summary", &header)?;
    body.append_child(&summary)?;

    let form = ElementBuilder::new("form")?.class("profile-form").build();
    for (key, label, input_type) in FIELDS {
        let field = labelled_input(label, key, input_type, &current_value(&profile, key))?;
        form.append_child(&field)?;
    }
    let message = text_element("p", "form-message", "")?;
    let save = ElementBuilder::new("button")?
        .attr("type", "submit")?
        .class("btn-primary")
        .text("Save")
        .build();
    form.append_child(&message)?;
    form.append_child(&save)?;
    body.append_child(&form)?;

    let body = body.clone();
    let vm = vm.clone();
    let form_ref = form.clone();
    on_submit(&form, move || {
        let values: Vec<(&str, String)> = FIELDS
            .iter()
            .map(|(key, _, _)| (*key, field_value(&form_ref, &format!("input[name={}]", key))))
            .collect();
        let (body, vm, profile, message, save) =
            (body.clone(), vm.clone(), profile.clone(), message.clone(), save.clone());
        let _ = set_disabled(&save, true);

        spawn_local(async move {
            let entries = values.iter().map(|(k, v)| (*k, v.as_str()));
            match vm.save(&profile, entries).await {
                Ok(updated) => {
                    if let Err(e) = render_form(&body, &vm, updated) {
                        log::error!("❌ [PROFILE] Render failed: {:?}", e);
                    }
                }
                Err(e) => {
                    let _ = set_disabled(&save, false);
                    set_text_content(&message, &e.to_string());
                }
            }
        });
    })?;
    Ok(())
}
