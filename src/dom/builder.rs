// ============================================================================
// ELEMENT BUILDER
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::{append_child, create_element, set_attribute, set_text_content};

pub struct ElementBuilder {
    element: Element,
}

impl ElementBuilder {
    pub fn new(tag: &str) -> Result<Self, JsValue> {
        Ok(Self {
            element: create_element(tag)?,
        })
    }

    /// Replaces all classes
    pub fn class(self, class: &str) -> Self {
        self.element.set_class_name(class);
        self
    }

    pub fn text(self, text: &str) -> Self {
        set_text_content(&self.element, text);
        self
    }

    pub fn attr(self, name: &str, value: &str) -> Result<Self, JsValue> {
        set_attribute(&self.element, name, value)?;
        Ok(self)
    }

    pub fn child(self, child: Element) -> Result<Self, JsValue> {
        append_child(&self.element, &child)?;
        Ok(self)
    }

    pub fn children<I>(self, children: I) -> Result<Self, JsValue>
    where
        I: IntoIterator<Item = Element>,
    {
        for child in children {
            append_child(&self.element, &child)?;
        }
        Ok(self)
    }

    pub fn build(self) -> Element {
        self.element
    }
}

/// `<tag class=..>text</tag>`
pub fn text_element(tag: &str, class: &str, text: &str) -> Result<Element, JsValue> {
    Ok(ElementBuilder::new(tag)?.class(class).text(text).build())
}

/// Labelled `<input>`; the input gets `name` so forms can read it back
pub fn labelled_input(label: &str, name: &str, input_type: &str, value: &str) -> Result<Element, JsValue> {
    let input = ElementBuilder::new("input")?
        .attr("type", input_type)?
        .attr("name", name)?
        .attr("value", value)?
        .build();
    Ok(ElementBuilder::new("label")?
        .class("form-group")
        .child(text_element("span", "form-label", label)?)?
        .child(input)?
        .build())
}

/// Labelled `<select>` from `(value, label)` pairs
pub fn labelled_select(label: &str, name: &str, options: &[(&str, &str)], selected: &str) -> Result<Element, JsValue> {
    let select = ElementBuilder::new("select")?.attr("name", name)?.build();
    for (value, text) in options {
        let option = ElementBuilder::new("option")?.attr("value", value)?.text(text);
        let option = if *value == selected {
            option.attr("selected", "")?
        } else {
            option
        };
        append_child(&select, &option.build())?;
    }
    Ok(ElementBuilder::new("label")?
        .class("form-group")
        .child(text_element("span", "form-label", label)?)?
        .child(select)?
        .build())
}

/// `<tr>` of `<th>` cells
pub fn table_header(titles: &[&str]) -> Result<Element, JsValue> {
    let row = ElementBuilder::new("tr")?.build();
    for title in titles {
        append_child(&row, &text_element("th", "", title)?)?;
    }
    Ok(row)
}
