// ============================================================================
// APP - mounts the shell on #app and re-renders on state changes
// ============================================================================

use std::cell::Cell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::config::CONFIG;
use crate::dom::{clear, get_element_by_id};
use crate::services::GlooTransport;
use crate::state::AppState;
use crate::utils::storage::LocalStorage;
use crate::views::render_shell;

#[derive(Clone)]
pub struct App {
    state: AppState,
    root: Element,
    render_queued: Rc<Cell<bool>>,
}

impl App {
    pub fn new() -> Result<Self, JsValue> {
        let root = get_element_by_id("app").ok_or_else(|| JsValue::from_str("No #app element found"))?;
        let base_url = CONFIG.api_base_url();
        log::info!("🌐 [APP] API base URL: {}", base_url);

        let state = AppState::new(base_url, Rc::new(GlooTransport::new(CONFIG.network_timeout_seconds)), Rc::new(LocalStorage));
        Ok(Self {
            state,
            root,
            render_queued: Rc::new(Cell::new(false)),
        })
    }

    /// Wires subscriptions, runs bootstrap and draws the first frame
    pub fn start(&self) -> Result<(), JsValue> {
        {
            let app = self.clone();
            self.state.session.subscribe(move |_| app.schedule_render());
        }
        {
            let app = self.clone();
            self.state.screen.subscribe(move |_| app.schedule_render());
        }
        {
            let app = self.clone();
            self.state.notice.subscribe(move |_| app.schedule_render());
        }

        self.render()?;
        self.state.manager.bootstrap();
        Ok(())
    }

    /// Coalesces bursts of changes into one render on the next tick
    fn schedule_render(&self) {
        if self.render_queued.replace(true) {
            return;
        }
        let app = self.clone();
        Timeout::new(0, move || {
            app.render_queued.set(false);
            if let Err(e) = app.render() {
                log::error!("❌ [APP] Render failed: {:?}", e);
            }
        })
        .forget();
    }

    pub fn render(&self) -> Result<(), JsValue> {
        log::debug!("🔄 [APP] Render {:?}", self.state.current_screen());
        let shell = render_shell(&self.state)?;
        clear(&self.root);
        self.root.append_child(&shell)?;
        Ok(())
    }
}
