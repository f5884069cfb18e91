// ============================================================================
// DOCUMENTS VIEW
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Element, HtmlInputElement};

use crate::dom::{
    clear, field_value, labelled_input, labelled_select, on_change, on_click, on_input, read_selected_file,
    save_file, set_text_content, table_header, text_element, ElementBuilder,
};
use crate::state::AppState;
use crate::viewmodels::documents_viewmodel::{filter_rows, CATEGORY_ALL, CATEGORY_OTHER, DOCUMENT_CATEGORIES};
use crate::viewmodels::{DocumentRow, DocumentsViewModel};

/// Widgets shared by the upload panel, the filters and the table
#[derive(Clone)]
struct DocumentsScreen {
    vm: DocumentsViewModel,
    rows: Rc<RefCell<Vec<DocumentRow>>>,
    filters: Element,
    table: Element,
    error: Element,
}

pub fn render_documents(state: &AppState) -> Result<Element, JsValue> {
    let vm = state.documents();
    let subtitle = if vm.can_delete() {
        "Manage all employees documents"
    } else {
        "Upload and manage your documents"
    };

    let screen = DocumentsScreen {
        rows: Rc::new(RefCell::new(Vec::new())),
        filters: render_filters()?,
        table: text_element("div", "documents-table", "Loading documents...")?,
        error: text_element("p", "form-error", "")?,
        vm,
    };

    let root = ElementBuilder::new("section")?
        .class("documents-screen")
        .child(text_element("h1", "screen-title", "Document Management")?)?
        .child(text_element("p", "screen-subtitle", subtitle)?)?
        .build();
    if screen.vm.can_upload() {
        let upload = render_upload(&screen)?;
        root.append_child(&upload)?;
    }
    root.append_child(&screen.error)?;
    root.append_child(&screen.filters)?;
    root.append_child(&screen.table)?;

    {
        let screen = screen.clone();
        on_input(&screen.filters.clone(), move |_| screen.refresh())?;
    }
    {
        let screen = screen.clone();
        on_change(&screen.filters.clone(), move |_| screen.refresh())?;
    }

    spawn_local(async move {
        let rows = screen.vm.load().await;
        screen.replace_rows(rows);
    });
    Ok(root)
}

fn render_filters() -> Result<Element, JsValue> {
    let mut categories = vec![(CATEGORY_ALL, "All Categories")];
    categories.extend(DOCUMENT_CATEGORIES);
    Ok(ElementBuilder::new("div")?
        .class("documents-filters")
        .child(labelled_input("Search", "search", "search", "")?)?
        .child(labelled_select("Category", "category", &categories, CATEGORY_ALL)?)?
        .build())
}

fn render_upload(screen: &DocumentsScreen) -> Result<Element, JsValue> {
    let file_input = ElementBuilder::new("input")?
        .attr("type", "file")?
        .attr("accept", ".pdf,application/pdf")?
        .attr("name", "document")?
        .build();
    let panel = ElementBuilder::new("div")?
        .class("upload-panel")
        .child(text_element("h2", "", "Upload New Document")?)?
        .child(labelled_select("Document type", "documentType", &DOCUMENT_CATEGORIES, CATEGORY_OTHER)?)?
        .child(labelled_input("Custom category", "customCategory", "text", "")?)?
        .child(file_input.clone())?
        .build();

    let screen = screen.clone();
    let panel_ref = panel.clone();
    on_change(&file_input, move |event| {
        let Some(input) = event.target().and_then(|t| t.dyn_into::<HtmlInputElement>().ok()) else {
            return;
        };
        let selected = field_value(&panel_ref, "select[name=documentType]");
        let custom = field_value(&panel_ref, "input[name=customCategory]");
        let screen = screen.clone();
        set_text_content(&screen.error, "");

        spawn_local(async move {
            let file = match read_selected_file(&input).await {
                Ok(Some(file)) => file,
                Ok(None) => return,
                Err(e) => {
                    log::error!("❌ [DOCS] Could not read file: {:?}", e);
                    set_text_content(&screen.error, "Failed to read the selected file");
                    return;
                }
            };
            match screen.vm.upload(file, &selected, &custom).await {
                Ok(rows) => screen.replace_rows(rows),
                Err(e) => set_text_content(&screen.error, &e.to_string()),
            }
            input.set_value("");
        });
    })?;
    Ok(panel)
}

impl DocumentsScreen {
    fn replace_rows(&self, rows: Vec<DocumentRow>) {
        *self.rows.borrow_mut() = rows;
        self.refresh();
    }

    fn refresh(&self) {
        if let Err(e) = self.render_table() {
            log::error!("❌ [DOCS] Render failed: {:?}", e);
        }
    }

    fn render_table(&self) -> Result<(), JsValue> {
        clear(&self.table);
        let search = field_value(&self.filters, "input[name=search]");
        let category = field_value(&self.filters, "select[name=category]");
        let category = if category.is_empty() { CATEGORY_ALL.to_string() } else { category };

        let rows = self.rows.borrow();
        let visible = filter_rows(&rows, &search, &category);
        if visible.is_empty() {
            let empty = text_element("p", "empty-state", "No documents found.")?;
            self.table.append_child(&empty)?;
            return Ok(());
        }

        let table = ElementBuilder::new("table")?.class("data-table").build();
        let header = table_header(&["Name", "Employee", "Category", "Size", "Uploaded", ""])?;
        table.append_child(&header)?;
        for row in visible {
            let tr = self.render_row(row)?;
            table.append_child(&tr)?;
        }
        self.table.append_child(&table)?;
        Ok(())
    }

    fn render_row(&self, row: &DocumentRow) -> Result<Element, JsValue> {
        let download = ElementBuilder::new("button")?
            .attr("type", "button")?
            .class("btn-link")
            .text("Download")
            .build();
        {
            let screen = self.clone();
            let row = row.clone();
            on_click(&download, move |_| {
                let screen = screen.clone();
                let row = row.clone();
                spawn_local(async move {
                    let result = match screen.vm.download(&row).await {
                        Ok(file) => save_file(&file).map_err(|e| format!("{:?}", e)),
                        Err(e) => Err(e.to_string()),
                    };
                    if let Err(message) = result {
                        set_text_content(&screen.error, &message);
                    }
                });
            })?;
        }

        let actions = ElementBuilder::new("td")?.class("row-actions").child(download)?.build();
        if self.vm.can_delete() {
            let delete = ElementBuilder::new("button")?
                .attr("type", "button")?
                .class("btn-link danger")
                .text("Delete")
                .build();
            let screen = self.clone();
            let id = row.id.clone();
            on_click(&delete, move |_| {
                let confirmed = web_sys::window()
                    .and_then(|w| w.confirm_with_message("Are you sure you want to delete this document?").ok())
                    .unwrap_or(false);
                if !confirmed {
                    return;
                }
                let screen = screen.clone();
                let id = id.clone();
                spawn_local(async move {
                    match screen.vm.delete(&id).await {
                        Ok(rows) => screen.replace_rows(rows),
                        Err(e) => set_text_content(&screen.error, &e.to_string()),
                    }
                });
            })?;
            actions.append_child(&delete)?;
        }

        Ok(ElementBuilder::new("tr")?
            .children([
                text_element("td", "", &row.name)?,
                text_element("td", "", &row.owner)?,
                text_element("td", &format!("category category-{}", row.category), &row.category)?,
                text_element("td", "", &row.size_label())?,
                text_element("td", "", &row.upload_date)?,
                actions,
            ])?
            .build())
    }
}
