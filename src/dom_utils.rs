//! dom_utils.rs – thin helper layer for repetitive DOM operations.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};

/// Attribute that marks an element as a click/input target for the
/// delegated handlers in `ui::events`.
pub const ACTION_ATTR: &str = "data-action";
pub const NODE_ATTR: &str = "data-node-id";
// Stable across re-renders so focus can be restored.
pub const FOCUS_ATTR: &str = "data-focus-key";

/// Remove the `hidden` class so the element becomes visible.
pub fn show(el: &Element) {
    let _ = el.class_list().remove_1("hidden");
    let _ = el.class_list().add_1("visible");
}

/// Hide the element by toggling CSS classes.
pub fn hide(el: &Element) {
    let _ = el.class_list().remove_1("visible");
    let _ = el.class_list().add_1("hidden");
}

pub fn set_visible(el: &Element, visible: bool) {
    if visible {
        show(el)
    } else {
        hide(el)
    }
}

/// `<tag class="...">`
pub fn element(document: &Document, tag: &str, class: &str) -> Result<Element, JsValue> {
    let el = document.create_element(tag)?;
    if !class.is_empty() {
        el.set_class_name(class);
    }
    Ok(el)
}

/// `<tag class="...">text</tag>`, text set via `textContent`.
pub fn text_element(document: &Document, tag: &str, class: &str, text: &str) -> Result<Element, JsValue> {
    let el = element(document, tag, class)?;
    el.set_text_content(Some(text));
    Ok(el)
}

/// A button wired to a delegated action.
pub fn action_button(
    document: &Document,
    class: &str,
    label: &str,
    action: &str,
) -> Result<Element, JsValue> {
    let btn = text_element(document, "button", class, label)?;
    btn.set_attribute("type", "button")?;
    btn.set_attribute(ACTION_ATTR, action)?;
    Ok(btn)
}

/// Nearest ancestor-or-self carrying `data-action`, with the action name.
pub fn action_target(target: &Element) -> Option<(Element, String)> {
    let el = target.closest(&format!("[{}]", ACTION_ATTR)).ok()??;
    let action = el.get_attribute(ACTION_ATTR)?;
    Some((el, action))
}

/// `data-node-id` of the element or the card around it.
pub fn node_id_of(el: &Element) -> Option<String> {
    el.get_attribute(NODE_ATTR).or_else(|| {
        el.closest(&format!("[{}]", NODE_ATTR))
            .ok()
            .flatten()
            .and_then(|card| card.get_attribute(NODE_ATTR))
    })
}

/// Current value of an `<input>`, `<textarea>` or `<select>`.
pub fn control_value(el: &Element) -> Option<String> {
    if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
        Some(input.value())
    } else if let Some(area) = el.dyn_ref::<HtmlTextAreaElement>() {
        Some(area.value())
    } else {
        el.dyn_ref::<HtmlSelectElement>().map(|select| select.value())
    }
}

/// Focused input and caret, captured before a subtree is rebuilt.
pub struct FocusSnapshot {
    key: String,
    caret: Option<u32>,
}

pub fn capture_focus(document: &Document) -> Option<FocusSnapshot> {
    let active = document.active_element()?;
    let key = active.get_attribute(FOCUS_ATTR)?;
    let caret = active
        .dyn_ref::<HtmlInputElement>()
        .and_then(|input| input.selection_start().ok().flatten());
    Some(FocusSnapshot { key, caret })
}

pub fn restore_focus(document: &Document, snapshot: Option<FocusSnapshot>) {
    let Some(snapshot) = snapshot else { return };
    let selector = format!("[{}=\"{}\"]", FOCUS_ATTR, snapshot.key);
    let Ok(Some(el)) = document.query_selector(&selector) else {
        return;
    };
    if let Some(html) = el.dyn_ref::<HtmlElement>() {
        let _ = html.focus();
    }
    if let (Some(input), Some(caret)) = (el.dyn_ref::<HtmlInputElement>(), snapshot.caret) {
        let _ = input.set_selection_range(caret, caret);
    }
}

/// `FOCUS_ATTR` value for a per-node input.
pub fn focus_key(kind: &str, node_id: &str) -> String {
    format!("{}:{}", kind, node_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn focus_keys_are_distinct_per_input_kind() {
        assert_eq!(focus_key("search", "n1"), "search:n1");
        assert_ne!(focus_key("search", "n1"), focus_key("content", "n1"));
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod browser_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn action_target_walks_up_to_marked_ancestor() {
        let document = web_sys::window().unwrap().document().unwrap();
        let btn = action_button(&document, "", "Go", "select-tool").unwrap();
        btn.set_attribute(NODE_ATTR, "n7").unwrap();
        let icon = element(&document, "span", "icon").unwrap();
        btn.append_child(&icon).unwrap();
        document.body().unwrap().append_child(&btn).unwrap();

        let (el, action) = action_target(&icon).unwrap();
        assert_eq!(action, "select-tool");
        assert_eq!(node_id_of(&el).as_deref(), Some("n7"));

        btn.remove();
    }
}
