// ============================================================================
// ATTENDANCE VIEW
// ============================================================================

use chrono::Utc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::dom::{clear, on_click, set_disabled, set_text_content, table_header, text_element, ElementBuilder};
use crate::state::AppState;
use crate::viewmodels::attendance_viewmodel::format_working_hours;
use crate::viewmodels::{AttendanceSheet, AttendanceViewModel};

pub fn render_attendance(state: &AppState) -> Result<Element, JsValue> {
    let body = text_element("div", "attendance-body", "Loading attendance records...")?;
    let root = ElementBuilder::new("section")?
        .class("attendance-screen")
        .child(text_element("h1", "screen-title", "Attendance Tracker")?)?
        .child(body.clone())?
        .build();

    let vm = state.attendance();
    spawn_local(async move {
        let sheet = vm.load().await;
        if let Err(e) = render_sheet(&body, &vm, sheet) {
            log::error!("❌ [ATTENDANCE] Render failed: {:?}", e);
        }
    });
    Ok(root)
}

fn render_sheet(body: &Element, vm: &AttendanceViewModel, sheet: AttendanceSheet) -> Result<(), JsValue> {
    clear(body);
    let today = Utc::now().date_naive();

    let status = match &sheet.today {
        Some(record) if record.is_open() => format!(
            "Clocked in at {}",
            record.clock_in.as_deref().and_then(|t| t.get(11..16)).unwrap_or("-")
        ),
        Some(_) => "You have completed today's attendance.".to_string(),
        None => "You have not clocked in today.".to_string(),
    };
    let status_line = text_element("p", "attendance-status", &status)?;
    body.append_child(&status_line)?;

    let error = text_element("p", "form-error", "")?;
    let clock_in = ElementBuilder::new("button")?
        .attr("type", "button")?
        .class("btn-primary")
        .text("Clock In")
        .build();
    let clock_out = ElementBuilder::new("button")?
        .attr("type", "button")?
        .class("btn-secondary")
        .text("Clock Out")
        .build();
    set_disabled(&clock_in, !sheet.can_clock_in())?;
    set_disabled(&clock_out, !sheet.can_clock_out())?;

    {
        let (body, vm, sheet, error, button) = (body.clone(), vm.clone(), sheet.clone(), error.clone(), clock_in.clone());
        on_click(&clock_in, move |_| {
            let (body, vm, sheet, error, button) = (body.clone(), vm.clone(), sheet.clone(), error.clone(), button.clone());
            let _ = set_disabled(&button, true);
            set_text_content(&button, "Clocking In...");
            spawn_local(async move {
                match vm.clock_in(&sheet, today).await {
                    Ok(next) => {
                        if let Err(e) = render_sheet(&body, &vm, next) {
                            log::error!("❌ [ATTENDANCE] Render failed: {:?}", e);
                        }
                    }
                    Err(e) => {
                        set_text_content(&button, "Clock In");
                        let _ = set_disabled(&button, false);
                        set_text_content(&error, &e.to_string());
                    }
                }
            });
        })?;
    }
    {
        let (body, vm, sheet, error, button) = (body.clone(), vm.clone(), sheet.clone(), error.clone(), clock_out.clone());
        on_click(&clock_out, move |_| {
            let (body, vm, sheet, error, button) = (body.clone(), vm.clone(), sheet.clone(), error.clone(), button.clone());
            let _ = set_disabled(&button, true);
            set_text_content(&button, "Clocking Out...");
            spawn_local(async move {
                match vm.clock_out(&sheet, today).await {
                    Ok(next) => {
                        if let Err(e) = render_sheet(&body, &vm, next) {
                            log::error!("❌ [ATTENDANCE] Render failed: {:?}", e);
                        }
                    }
                    Err(e) => {
                        set_text_content(&button, "Clock Out");
                        let _ = set_disabled(&button, false);
                        set_text_content(&error, &e.to_string());
                    }
                }
            });
        })?;
    }

    let actions = ElementBuilder::new("div")?
        .class("attendance-actions")
        .child(clock_in)?
        .child(clock_out)?
        .build();
    body.append_child(&actions)?;
    body.append_child(&error)?;

    if sheet.records.is_empty() {
        let empty = text_element("p", "empty-state", "No attendance records found.")?;
        body.append_child(&empty)?;
        return Ok(());
    }

    let table = ElementBuilder::new("table")?.class("data-table").build();
    let header = table_header(&["Date", "Clock In", "Clock Out", "Hours", "Status"])?;
    table.append_child(&header)?;
    for record in &sheet.records {
        let date = record.day().map(|d| d.to_string()).unwrap_or_else(|| record.date.clone());
        let time = |t: &Option<String>| t.as_deref().and_then(|t| t.get(11..16)).unwrap_or("-").to_string();
        let row = ElementBuilder::new("tr")?
            .children([
                text_element("td", "", &date)?,
                text_element("td", "", &time(&record.clock_in))?,
                text_element("td", "", &time(&record.clock_out))?,
                text_element("td", "", &format_working_hours(record.working_hours))?,
                text_element("td", &format!("status status-{}", record.status), &record.status)?,
            ])?
            .build();
        table.append_child(&row)?;
    }
    body.append_child(&table)?;
    Ok(())
}
