pub mod events;
pub mod setup;

use wasm_bindgen::prelude::*;

use crate::components;
use crate::dom_utils::{capture_focus, restore_focus, set_visible};
use crate::state::APP_STATE;

/// Redraw everything that depends on state.  Focus and caret of a per-node
/// input survive the rebuild.
pub fn render() -> Result<(), JsValue> {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return Ok(());
    };

    APP_STATE.with(|state| {
        let state = state.borrow();
        let focus = capture_focus(&document);

        components::canvas_editor::render_nodes(&document, &state)?;
        components::auth::render_auth_area(&document, &state)?;
        if let Some(selector) = document.get_element_by_id("component-selector") {
            set_visible(&selector, state.show_component_selector);
        }

        restore_focus(&document, focus);
        Ok(())
    })
}
