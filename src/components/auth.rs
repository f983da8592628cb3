//! Sign-in button / signed-in badge in the header.

use wasm_bindgen::prelude::*;
use web_sys::Document;

use crate::dom_utils::{action_button, element, text_element};
use crate::state::AppState;

pub fn render_auth_area(document: &Document, state: &AppState) -> Result<(), JsValue> {
    let Some(area) = document.get_element_by_id("auth-area") else {
        return Ok(());
    };
    area.set_inner_html("");

    let Some(user) = state.session.user() else {
        area.append_child(&action_button(document, "sign-in-button", "Sign in with Google", "sign-in")?.into())?;
        return Ok(());
    };

    let badge = element(document, "div", "user-badge")?;
    if let Some(picture) = &user.picture {
        let img = element(document, "img", "user-avatar")?;
        img.set_attribute("src", picture)?;
        img.set_attribute("alt", user.name.as_deref().unwrap_or(""))?;
        badge.append_child(&img)?;
    }
    badge.append_child(&text_element(document, "div", "user-name", user.display_name())?.into())?;
    area.append_child(&badge)?;
    area.append_child(&action_button(document, "sign-out-button", "Sign out", "sign-out")?.into())?;
    Ok(())
}
