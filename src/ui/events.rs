//! Delegated UI event handlers.
//!
//! The workflow area is rebuilt on every render, so handlers are attached
//! once to stable ancestors and route on `data-action` / `data-input`
//! attributes instead of being bound to each card.

use wasm_bindgen::prelude::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, MouseEvent};

use crate::dom_utils::{action_target, control_value, node_id_of};
use crate::messages::Message;
use crate::models::{NodeId, NodeKind, Point, ToolId};
use crate::services::GoogleService;
use crate::state::{dispatch_global_message, APP_STATE};

// Pressing inside these never starts a drag.
const NO_DRAG_SELECTOR: &str = "input, textarea, select, button, .tool-search-results";

/// Entry point – call once after the base UI was created.
pub fn setup_ui_event_handlers(document: &Document) -> Result<(), JsValue> {
    let root = document
        .get_element_by_id("app-root")
        .ok_or_else(|| JsValue::from_str("app-root not found"))?;
    let workflow_area = document
        .get_element_by_id("workflow-area")
        .ok_or_else(|| JsValue::from_str("workflow-area not found"))?;

    setup_click_handler(&root)?;
    setup_input_handler(&root)?;
    setup_drag_start_handler(&workflow_area)?;
    setup_pointer_handlers(document)?;
    setup_resize_handler()?;
    Ok(())
}

/// Measure the workflow area and feed it to default placement.
pub fn report_canvas_size(document: &Document) {
    if let Some(area) = document.get_element_by_id("workflow-area") {
        let (width, height) = (area.client_width() as f64, area.client_height() as f64);
        // Not laid out yet: keep the defaults.
        if width > 0.0 && height > 0.0 {
            dispatch_global_message(Message::ResizeCanvas { width, height });
        }
    }
}

fn event_element(e: &Event) -> Option<Element> {
    e.target().and_then(|t| t.dyn_into::<Element>().ok())
}

fn node_id(el: &Element) -> Option<NodeId> {
    node_id_of(el).map(NodeId::from)
}

fn tool_id(el: &Element) -> Option<ToolId> {
    el.get_attribute("data-tool-id")?.parse().ok()
}

fn click_message(el: &Element, action: &str) -> Option<Message> {
    let msg = match action {
        "add-component" => {
            let kind = el.get_attribute("data-kind")?.parse::<NodeKind>().ok()?;
            Message::AddComponent { kind, position: None }
        }
        "open-selector" => Message::ShowComponentSelector(true),
        "close-selector" => Message::ShowComponentSelector(false),
        "delete-node" => Message::DeleteNode { node_id: node_id(el)? },
        "toggle-search" => Message::ToggleExpandedNode(node_id(el)?),
        "close-search" => Message::SetExpandedNode(None),
        "select-tool" => Message::SelectTool {
            node_id: node_id(el)?,
            tool_id: tool_id(el)?,
        },
        "reset-tool" => Message::ResetToolSelection { node_id: node_id(el)? },
        "remove-tool" => Message::RemoveToolFromNode {
            node_id: node_id(el)?,
            tool_id: tool_id(el)?,
        },
        "connect-service" => {
            let service = el.get_attribute("data-service")?.parse::<GoogleService>().ok()?;
            Message::ConnectService(service)
        }
        "sign-in" => Message::SignIn,
        "sign-out" => Message::SignOut,
        "inert" => {
            let label = el.get_attribute("data-label").unwrap_or_default();
            tracing::info!(button = %label, "not available yet");
            return None;
        }
        other => {
            tracing::warn!(action = other, "unknown UI action");
            return None;
        }
    };
    Some(msg)
}

fn setup_click_handler(root: &Element) -> Result<(), JsValue> {
    let cb = Closure::<dyn FnMut(_)>::wrap(Box::new(move |e: MouseEvent| {
        let Some(target) = event_element(&e) else { return };

        if let Some((el, action)) = action_target(&target) {
            if let Some(msg) = click_message(&el, &action) {
                dispatch_global_message(msg);
            }
            return;
        }

        // Empty workflow area closes the tool search popup.
        let in_area = target.closest("#workflow-area").ok().flatten().is_some();
        let in_card = target.closest(".workflow-node").ok().flatten().is_some();
        if in_area && !in_card {
            dispatch_global_message(Message::SetExpandedNode(None));
        }
    }));
    root.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())?;
    cb.forget();
    Ok(())
}

fn setup_input_handler(root: &Element) -> Result<(), JsValue> {
    let cb = Closure::<dyn FnMut(_)>::wrap(Box::new(move |e: Event| {
        let Some(control) = event_element(&e) else { return };
        let Some(value) = control_value(&control) else { return };
        let Some(node_id) = node_id(&control) else { return };

        let msg = match control.get_attribute("data-input").as_deref() {
            Some("search") => Message::SetSearchQuery { node_id, query: value },
            Some("content") => Message::UpdateNodeContent { node_id, content: value },
            Some("config") => {
                let Some(field) = control.get_attribute("data-field") else { return };
                Message::UpdateConfigField { node_id, field, value }
            }
            _ => return,
        };
        dispatch_global_message(msg);
    }));
    // `input` covers text, textarea, datetime and select controls.
    root.add_event_listener_with_callback("input", cb.as_ref().unchecked_ref())?;
    cb.forget();
    Ok(())
}

/// mousedown on a card starts dragging it
fn setup_drag_start_handler(workflow_area: &Element) -> Result<(), JsValue> {
    let cb = Closure::<dyn FnMut(_)>::wrap(Box::new(move |e: MouseEvent| {
        let Some(target) = event_element(&e) else { return };
        if target.closest(NO_DRAG_SELECTOR).ok().flatten().is_some() {
            return;
        }
        let Some(card) = target.closest(".workflow-node").ok().flatten() else {
            return;
        };
        let Some(node_id) = node_id(&card) else { return };

        dispatch_global_message(Message::BeginDrag {
            node_id,
            pointer: Point::new(e.client_x() as f64, e.client_y() as f64),
        });
    }));
    workflow_area.add_event_listener_with_callback("mousedown", cb.as_ref().unchecked_ref())?;
    cb.forget();
    Ok(())
}

fn is_dragging() -> bool {
    APP_STATE.with(|state| state.borrow().dragging.is_some())
}

/// Moves and releases are tracked on the document so a fast pointer that
/// leaves the card keeps dragging it.
fn setup_pointer_handlers(document: &Document) -> Result<(), JsValue> {
    let move_cb = Closure::<dyn FnMut(_)>::wrap(Box::new(move |e: MouseEvent| {
        if is_dragging() {
            dispatch_global_message(Message::PointerMove {
                pointer: Point::new(e.client_x() as f64, e.client_y() as f64),
            });
        }
    }));
    document.add_event_listener_with_callback("mousemove", move_cb.as_ref().unchecked_ref())?;
    move_cb.forget();

    let up_cb = Closure::<dyn FnMut(_)>::wrap(Box::new(move |_e: MouseEvent| {
        if is_dragging() {
            dispatch_global_message(Message::EndDrag);
        }
    }));
    document.add_event_listener_with_callback("mouseup", up_cb.as_ref().unchecked_ref())?;
    up_cb.forget();

    Ok(())
}

fn setup_resize_handler() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))?;
    let cb = Closure::<dyn FnMut()>::wrap(Box::new(move || {
        if let Some(document) = web_sys::window().and_then(|w| w.document()) {
            report_canvas_size(&document);
        }
    }));
    window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref())?;
    cb.forget();
    Ok(())
}
