// ============================================================================
// HR PORTAL - browser client (Rust + WASM, MVVM)
// ============================================================================
// - Views: functions that build DOM, no logic
// - ViewModels: screen logic and the session manager
// - Services: HTTP only
// - State: Rc<RefCell> containers with subscriptions
// - Models: shapes shared with the backend
// ============================================================================

pub mod config;
pub mod models;
pub mod services;
pub mod viewmodels;
pub mod state;
pub mod utils;
mod dom;
mod views;
mod app;

use wasm_bindgen::prelude::*;
use wasm_logger::Config;

use crate::app::App;
use crate::config::CONFIG;

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    wasm_logger::init(Config::new(CONFIG.log_level()));
    log::info!("🚀 HR Portal ({})", CONFIG.environment);

    let app = App::new()?;
    app.start()?;
    Ok(())
}
