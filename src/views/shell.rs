// ============================================================================
// SHELL - navigation bar, notice banner, current screen
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::{on_click, text_element, ElementBuilder};
use crate::state::{AppState, Notice, Screen, SessionPhase};
use crate::views::{access_denied, attendance, dashboard, documents, login, profile, register};

pub fn render_shell(state: &AppState) -> Result<Element, JsValue> {
    let session = state.session.snapshot();
    let screen = state.current_screen();

    if session.phase() == SessionPhase::Bootstrapping {
        return text_element("div", "app-loading", "Loading...");
    }

    let root = ElementBuilder::new("div")?.class("app-shell").build();
    if session.is_authenticated() {
        let nav = render_nav(state, screen)?;
        root.append_child(&nav)?;
    }
    if let Some(notice) = state.notice.get() {
        let banner = render_notice(&notice)?;
        root.append_child(&banner)?;
    }

    let content = match screen {
        Screen::Login => login::render_login(state)?,
        Screen::Register => register::render_register(state)?,
        Screen::Dashboard if !session.is_admin() => access_denied::render_access_denied(state)?,
        Screen::Dashboard => dashboard::render_dashboard(state)?,
        Screen::Attendance => attendance::render_attendance(state)?,
        Screen::Documents => documents::render_documents(state)?,
        Screen::Profile => profile::render_profile(state)?,
    };
    let main = ElementBuilder::new("main")?.class("app-content").child(content)?.build();
    root.append_child(&main)?;
    Ok(root)
}

fn render_nav(state: &AppState, current: Screen) -> Result<Element, JsValue> {
    let nav = ElementBuilder::new("nav")?.class("app-nav").build();
    let brand = text_element("span", "app-brand", "HR Portal")?;
    nav.append_child(&brand)?;

    let mut links = Vec::new();
    if state.session.is_admin() {
        links.push(Screen::Dashboard);
    }
    links.extend([Screen::Attendance, Screen::Documents, Screen::Profile]);

    for target in links {
        let class = if target == current { "nav-link active" } else { "nav-link" };
        let link = ElementBuilder::new("button")?
            .attr("type", "button")?
            .class(class)
            .text(target.title())
            .build();
        let state = state.clone();
        on_click(&link, move |_| state.navigate(target))?;
        nav.append_child(&link)?;
    }

    if let Some(user) = state.session.user() {
        let who = format!("{} ({})", user.full_name(), user.role);
        let user_label = text_element("span", "nav-user", &who)?;
        nav.append_child(&user_label)?;
    }

    let sign_out = ElementBuilder::new("button")?
        .attr("type", "button")?
        .class("btn-secondary")
        .text("Sign out")
        .build();
    {
        let state = state.clone();
        on_click(&sign_out, move |_| state.sign_out())?;
    }
    nav.append_child(&sign_out)?;
    Ok(nav)
}

fn render_notice(notice: &Notice) -> Result<Element, JsValue> {
    match notice {
        Notice::Info(message) => text_element("div", "notice notice-info", message),
        Notice::Error(message) => text_element("div", "notice notice-error", message),
    }
}
