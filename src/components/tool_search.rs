//! Tool search popup embedded in a tool node.

use wasm_bindgen::prelude::*;
use web_sys::{Document, Element};

use crate::catalog::search_tools;
use crate::dom_utils::{action_button, element, text_element, NODE_ATTR};
use crate::models::{Tool, WorkflowNode};
use crate::services::ConnectedServices;

/// Auth hint shown next to a Google tool in the results.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToolAuthStatus {
    RequiresSignIn,
    NotConnected,
    Connected,
}

impl ToolAuthStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ToolAuthStatus::RequiresSignIn => "Requires Google Auth",
            ToolAuthStatus::NotConnected => "Click to connect",
            ToolAuthStatus::Connected => "Connected",
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            ToolAuthStatus::RequiresSignIn => "auth-status requires-auth",
            ToolAuthStatus::NotConnected => "auth-status not-connected",
            ToolAuthStatus::Connected => "auth-status connected",
        }
    }
}

/// `None` for tools that need no Google connection.
pub fn auth_status(tool: &Tool, signed_in: bool, connected: &ConnectedServices) -> Option<ToolAuthStatus> {
    if !tool.needs_google_connection() {
        return None;
    }
    Some(if !signed_in {
        ToolAuthStatus::RequiresSignIn
    } else if !connected.is_connected(tool.service) {
        ToolAuthStatus::NotConnected
    } else {
        ToolAuthStatus::Connected
    })
}

pub fn render_results(
    document: &Document,
    node: &WorkflowNode,
    query: &str,
    signed_in: bool,
    connected: &ConnectedServices,
) -> Result<Element, JsValue> {
    let popup = element(document, "div", "tool-search-results")?;
    popup.set_attribute(NODE_ATTR, node.id.as_str())?;
    popup.append_child(&action_button(document, "close-search", "×", "close-search")?.into())?;

    for tool in search_tools(query) {
        let selected = node.has_tool(tool.id);
        let row = element(document, "div", if selected { "tool-row selected" } else { "tool-row" })?;
        row.set_attribute("data-action", "select-tool")?;
        row.set_attribute("data-tool-id", &tool.id.to_string())?;

        let header = element(document, "div", "tool-row-header")?;
        header.append_child(&text_element(
            document,
            "span",
            "tool-name",
            &format!("{} {}", tool.icon, tool.name),
        )?.into())?;
        let status = auth_status(tool, signed_in, connected);
        if let Some(status) = status {
            // Clicking the hint selects the tool like the row does.
            header.append_child(&text_element(document, "span", status.css_class(), status.label())?.into())?;
        }
        row.append_child(&header)?;
        row.append_child(&text_element(document, "div", "tool-description", &tool.description)?.into())?;

        if status == Some(ToolAuthStatus::NotConnected) && !selected {
            row.append_child(&render_connector(document, tool)?.into())?;
        }
        popup.append_child(&row)?;
    }

    let footer = element(document, "div", "search-footer")?;
    footer.append_child(&action_button(document, "done-button", "Done", "close-search")?.into())?;
    popup.append_child(&footer)?;
    Ok(popup)
}

fn render_connector(document: &Document, tool: &Tool) -> Result<Element, JsValue> {
    let connector = element(document, "div", "service-connector")?;
    connector.append_child(&text_element(
        document,
        "span",
        "service-name",
        &format!("{} {}", tool.service.glyph(), tool.service.display_name()),
    )?.into())?;
    connector.append_child(&text_element(document, "span", "service-state", "Not connected")?.into())?;
    let btn = action_button(document, "connect-button", "Connect", "connect-service")?;
    btn.set_attribute("data-service", tool.service.as_str())?;
    connector.append_child(&btn)?;
    Ok(connector)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::find_tool;
    use crate::services::GoogleService;

    #[test]
    fn status_follows_sign_in_then_connection() {
        let gmail = find_tool(1).unwrap();
        let mut connected = ConnectedServices::default();

        assert_eq!(auth_status(gmail, false, &connected), Some(ToolAuthStatus::RequiresSignIn));
        assert_eq!(auth_status(gmail, true, &connected), Some(ToolAuthStatus::NotConnected));

        connected.mark_connected(GoogleService::Gmail);
        assert_eq!(auth_status(gmail, true, &connected).map(|s| s.label()), Some("Connected"));
    }

    #[test]
    fn tools_without_auth_have_no_hint() {
        let mut tool = find_tool(2).unwrap().clone();
        tool.requires_auth = false;
        assert_eq!(auth_status(&tool, true, &ConnectedServices::default()), None);
    }
}
