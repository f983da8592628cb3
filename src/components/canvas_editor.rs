//! Node cards in the workflow area.

use wasm_bindgen::prelude::*;
use web_sys::{Document, Element};

use crate::components::{tool_config, tool_search};
use crate::dom_utils::{action_button, element, focus_key, text_element, FOCUS_ATTR, NODE_ATTR};
use crate::models::{NodeKind, WorkflowNode};
use crate::state::AppState;

/// Rebuild every card from state.
pub fn render_nodes(document: &Document, state: &AppState) -> Result<(), JsValue> {
    let area = document
        .get_element_by_id("workflow-area")
        .ok_or_else(|| JsValue::from_str("workflow-area not found"))?;
    area.set_inner_html("");

    for node in &state.nodes {
        area.append_child(&render_node(document, state, node)?.into())?;
    }
    Ok(())
}

fn render_node(document: &Document, state: &AppState, node: &WorkflowNode) -> Result<Element, JsValue> {
    let card = element(document, "div", &format!("workflow-node {}", node.kind.css_class()))?;
    card.set_attribute(NODE_ATTR, node.id.as_str())?;
    card.set_attribute(
        "style",
        &format!("left: {}px; top: {}px;", node.position.x, node.position.y),
    )?;

    let header = element(document, "div", "node-header")?;
    header.append_child(&text_element(document, "div", "node-title", &node.title())?.into())?;
    let delete = action_button(document, "delete-node", "×", "delete-node")?;
    delete.set_attribute("title", "Delete node")?;
    header.append_child(&delete)?;
    card.append_child(&header)?;

    match node.kind {
        NodeKind::Tool => {
            card.append_child(&render_tool_body(document, state, node)?.into())?;
            if !node.tools.is_empty() {
                card.append_child(&render_tool_chips(document, node)?.into())?;
            }
        }
        NodeKind::Starter | NodeKind::Prompt => {
            let body = element(document, "div", "node-content")?;
            let input = element(document, "input", "content-input")?;
            input.set_attribute("type", "text")?;
            input.set_attribute("value", &node.content)?;
            input.set_attribute("data-input", "content")?;
            input.set_attribute(FOCUS_ATTR, &focus_key("content", node.id.as_str()))?;
            body.append_child(&input)?;
            card.append_child(&body)?;
        }
    }
    Ok(card)
}

fn render_tool_body(document: &Document, state: &AppState, node: &WorkflowNode) -> Result<Element, JsValue> {
    let body = element(document, "div", "tool-body")?;

    // A single active tool shows its configuration instead of the search.
    if let (1, Some(tool)) = (node.tools.len(), node.active_tool()) {
        let header = element(document, "div", "tool-header")?;
        header.append_child(&text_element(
            document,
            "span",
            "tool-name",
            &format!("{} {}", tool.icon, tool.name),
        )?.into())?;
        let change = action_button(document, "change-tool", "🔍", "reset-tool")?;
        change.set_attribute("title", "Change tool")?;
        header.append_child(&change)?;
        body.append_child(&header)?;

        let connected = state.connected_services.is_connected(tool.service);
        body.append_child(&tool_config::render_config(document, node, tool.service, connected)?.into())?;
        return Ok(body);
    }

    let query = state.search_query(&node.id);
    let input = element(document, "input", "tool-search-input")?;
    input.set_attribute("type", "text")?;
    input.set_attribute("placeholder", "Search for tools...")?;
    input.set_attribute("value", query)?;
    input.set_attribute("data-input", "search")?;
    input.set_attribute("data-action", "toggle-search")?;
    input.set_attribute(FOCUS_ATTR, &focus_key("search", node.id.as_str()))?;
    body.append_child(&input)?;

    if state.is_expanded(&node.id) {
        body.append_child(&tool_search::render_results(
            document,
            node,
            query,
            state.session.is_signed_in(),
            &state.connected_services,
        )?.into())?;
    }
    Ok(body)
}

fn render_tool_chips(document: &Document, node: &WorkflowNode) -> Result<Element, JsValue> {
    let chips = element(document, "div", "selected-tools")?;
    chips.append_child(&text_element(document, "div", "selected-tools-label", "Selected Tools:")?.into())?;

    let list = element(document, "div", "chip-list")?;
    for tool in &node.tools {
        let chip = element(document, "div", "tool-chip")?;
        chip.append_child(&text_element(document, "span", "", &tool.name)?.into())?;
        let remove = action_button(document, "remove-tool", "×", "remove-tool")?;
        remove.set_attribute("data-tool-id", &tool.id.to_string())?;
        chip.append_child(&remove)?;
        list.append_child(&chip)?;
    }
    chips.append_child(&list)?;
    Ok(chips)
}
