use wasm_bindgen::prelude::*;
use web_sys::Document;

use crate::dom_utils::{action_button, element, text_element};
use crate::models::NodeKind;

const GRID_STYLE: &str = "
.grid-pattern {
  background-size: 20px 20px;
  background-image:
    linear-gradient(to right, rgba(0, 0, 0, 0.05) 1px, transparent 1px),
    linear-gradient(to bottom, rgba(0, 0, 0, 0.05) 1px, transparent 1px);
}
.hidden { display: none !important; }
.workflow-area { position: relative; overflow: auto; min-height: 100vh; }
.workflow-node { position: absolute; width: 256px; cursor: move; }
";

pub fn create_base_ui(document: &Document) -> Result<(), JsValue> {
    // Avoid a second shell if start() runs twice (hot reload).
    if document.get_element_by_id("app-root").is_some() {
        return Ok(());
    }

    let head = document.head().ok_or(JsValue::from_str("No head found"))?;
    let style = document.create_element("style")?;
    style.set_id("workflow-builder-style");
    style.set_text_content(Some(GRID_STYLE));
    head.append_child(&style)?;

    let root = element(document, "div", "app-root")?;
    root.set_id("app-root");

    root.append_child(&create_header(document)?.into())?;

    let body_row = element(document, "div", "builder-body")?;
    body_row.append_child(&create_sidebar(document)?.into())?;

    let workflow_area = element(document, "div", "workflow-area grid-pattern")?;
    workflow_area.set_id("workflow-area");
    body_row.append_child(&workflow_area)?;
    root.append_child(&body_row)?;

    // Floating "+" and the component selector it opens
    let fab = action_button(document, "floating-add", "+", "open-selector")?;
    fab.set_attribute("title", "Add component")?;
    root.append_child(&fab)?;
    root.append_child(&create_component_selector(document)?.into())?;

    let body = document.body().ok_or(JsValue::from_str("No body found"))?;
    body.append_child(&root)?;

    Ok(())
}

fn create_header(document: &Document) -> Result<web_sys::Element, JsValue> {
    let header = element(document, "div", "header")?;
    header.set_id("header");

    let title = text_element(document, "h1", "", "Workflow Builder")?;
    header.append_child(&title)?;

    // Test / Save / Load do nothing yet
    let actions = element(document, "div", "header-actions")?;
    for label in ["Test", "Save", "Load"] {
        let btn = action_button(document, "header-button", label, "inert")?;
        btn.set_attribute("data-label", label)?;
        actions.append_child(&btn)?;
    }
    header.append_child(&actions)?;

    let auth_area = element(document, "div", "auth-area")?;
    auth_area.set_id("auth-area");
    header.append_child(&auth_area)?;

    Ok(header)
}

fn create_sidebar(document: &Document) -> Result<web_sys::Element, JsValue> {
    let sidebar = element(document, "div", "sidebar")?;
    sidebar.set_id("sidebar");
    sidebar.append_child(&text_element(document, "h2", "", "Add Component")?.into())?;

    for kind in NodeKind::ALL {
        sidebar.append_child(&add_component_button(document, kind)?.into())?;
    }
    Ok(sidebar)
}

fn create_component_selector(document: &Document) -> Result<web_sys::Element, JsValue> {
    let selector = element(document, "div", "component-selector hidden")?;
    selector.set_id("component-selector");
    selector.append_child(&text_element(document, "h3", "", "Add Component")?.into())?;

    for kind in NodeKind::ALL {
        selector.append_child(&add_component_button(document, kind)?.into())?;
    }
    selector.append_child(&action_button(document, "cancel-button", "Cancel", "close-selector")?.into())?;
    Ok(selector)
}

fn add_component_button(document: &Document, kind: NodeKind) -> Result<web_sys::Element, JsValue> {
    let btn = action_button(
        document,
        &format!("add-component {}", kind.css_class()),
        kind.button_label(),
        "add-component",
    )?;
    btn.set_attribute("data-kind", kind.as_str())?;
    Ok(btn)
}
