// ============================================================================
// DASHBOARD VIEW - admin only
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::dom::{clear, on_click, set_text_content, table_header, text_element, ElementBuilder};
use crate::models::DashboardStats;
use crate::state::AppState;
use crate::viewmodels::{DashboardData, DashboardView, DashboardViewModel};
use crate::views::access_denied::render_access_denied;

pub fn render_dashboard(state: &AppState) -> Result<Element, JsValue> {
    let body = text_element("div", "dashboard-body", "Loading dashboard...")?;
    let root = ElementBuilder::new("section")?
        .class("dashboard-screen")
        .child(text_element("h1", "screen-title", "Admin Dashboard")?)?
        .child(body.clone())?
        .build();

    let vm = state.dashboard();
    let state = state.clone();
    spawn_local(async move {
        let rendered = match vm.load().await {
            DashboardView::Ready(data) => render_data(&state, &body, &vm, &data),
            DashboardView::AccessDenied => render_access_denied(&state).and_then(|denied| {
                clear(&body);
                body.append_child(&denied).map(|_| ())
            }),
        };
        if let Err(e) = rendered {
            log::error!("❌ [DASHBOARD] Render failed: {:?}", e);
        }
    });
    Ok(root)
}

fn stat_cards(stats: &DashboardStats) -> Result<Element, JsValue> {
    let cards = [
        ("Total Employees", stats.total_employees.to_string()),
        ("Present Today", stats.present_today.to_string()),
        ("Attendance Rate", format!("{:.1}%", stats.attendance_rate)),
        ("Documents", stats.documents_uploaded.to_string()),
        ("Total Salary Paid", format!("{:.2}", stats.total_salary_paid)),
        ("Average Salary", format!("{:.2}", stats.avg_salary)),
        ("Approved Leaves", stats.approved_leaves.to_string()),
        ("Pending Leaves", stats.pending_leaves.to_string()),
    ];
    let grid = ElementBuilder::new("div")?.class("stat-grid").build();
    for (label, value) in cards {
        let card = ElementBuilder::new("div")?
            .class("stat-card")
            .child(text_element("span", "stat-label", label)?)?
            .child(text_element("strong", "stat-value", &value)?)?
            .build();
        grid.append_child(&card)?;
    }
    Ok(grid)
}

fn render_data(state: &AppState, body: &Element, vm: &DashboardViewModel, data: &DashboardData) -> Result<(), JsValue> {
    clear(body);
    let cards = stat_cards(&data.stats)?;
    body.append_child(&cards)?;

    let heading = text_element("h2", "", "Recent Documents")?;
    body.append_child(&heading)?;
    if data.recent_documents.is_empty() {
        let empty = text_element("p", "empty-state", "No recent documents.")?;
        body.append_child(&empty)?;
    } else {
        let table = ElementBuilder::new("table")?.class("data-table").build();
        let header = table_header(&["Name", "Employee", "Category", "Uploaded"])?;
        table.append_child(&header)?;
        for doc in &data.recent_documents {
            let owner = doc
                .employee
                .as_ref()
                .map(|e| e.display_name())
                .unwrap_or_else(|| "Unknown User".to_string());
            let row = ElementBuilder::new("tr")?
                .children([
                    text_element("td", "", &doc.display_name())?,
                    text_element("td", "", &owner)?,
                    text_element("td", "", &doc.category)?,
                    text_element("td", "", &doc.upload_date())?,
                ])?
                .build();
            table.append_child(&row)?;
        }
        body.append_child(&table)?;
    }

    let heading = text_element("h2", "", "Recent Leave Requests")?;
    body.append_child(&heading)?;
    let details = text_element("pre", "leave-details", "")?;
    if data.recent_leaves.is_empty() {
        let empty = text_element("p", "empty-state", "No recent leave requests.")?;
        body.append_child(&empty)?;
    } else {
        let table = ElementBuilder::new("table")?.class("data-table").build();
        let header = table_header(&["Employee", "Type", "From", "To", "Status", ""])?;
        table.append_child(&header)?;
        for leave in &data.recent_leaves {
            let view = ElementBuilder::new("button")?
                .attr("type", "button")?
                .class("btn-link")
                .text("View")
                .build();
            {
                let (state, vm, details, id) = (state.clone(), vm.clone(), details.clone(), leave.id.clone());
                on_click(&view, move |_| {
                    let (state, vm, details, id) = (state.clone(), vm.clone(), details.clone(), id.clone());
                    spawn_local(async move {
                        match vm.leave_details(&id).await {
                            Ok(leave) => set_text_content(&details, &leave.summary()),
                            Err(e) => {
                                log::error!("❌ [DASHBOARD] Leave {} unavailable: {}", id, e);
                                state.show_error(e.to_string());
                            }
                        }
                    });
                })?;
            }
            let row = ElementBuilder::new("tr")?
                .children([
                    text_element("td", "", &leave.employee_name())?,
                    text_element("td", "", &leave.leave_type)?,
                    text_element("td", "", leave.start_date.get(..10).unwrap_or(leave.start_date.as_str()))?,
                    text_element("td", "", leave.end_date.get(..10).unwrap_or(leave.end_date.as_str()))?,
                    text_element("td", &format!("status status-{}", leave.status), &leave.status)?,
                    ElementBuilder::new("td")?.child(view)?.build(),
                ])?
                .build();
            table.append_child(&row)?;
        }
        body.append_child(&table)?;
    }
    body.append_child(&details)?;
    Ok(())
}
