use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::{on_click, text_element, ElementBuilder};
use crate::state::AppState;

pub fn render_access_denied(state: &AppState) -> Result<Element, JsValue> {
    let home = ElementBuilder::new("button")?
        .attr("type", "button")?
        .class("btn-primary")
        .text("Back to my workspace")
        .build();
    {
        let state = state.clone();
        on_click(&home, move |_| state.navigate_home())?;
    }

    Ok(ElementBuilder::new("div")?
        .class("access-denied")
        .child(text_element("h2", "", "Access denied")?)?
        .child(text_element("p", "", "This page is only available to administrators.")?)?
        .child(home)?
        .build())
}
