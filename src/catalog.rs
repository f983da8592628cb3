//! Tool catalog shown in a tool node's search popup.

use lazy_static::lazy_static;

use crate::constants::MAX_SEARCH_RESULTS;
use crate::models::{Tool, ToolCategory, ToolId};
use crate::services::GoogleService;

lazy_static! {
    static ref AVAILABLE_TOOLS: Vec<Tool> = vec![
        google_tool(1, "Gmail", "Access and process emails from Gmail", GoogleService::Gmail, "✉"),
        google_tool(2, "Google Drive", "Access and manage files in Google Drive", GoogleService::Drive, "🗎"),
        google_tool(3, "Google Calendar", "Access and manage Google Calendar events", GoogleService::Calendar, "🗓"),
        google_tool(4, "Google Sheets", "Access and manage Google Sheets data", GoogleService::Sheets, "▦"),
    ];
}

fn google_tool(id: ToolId, name: &str, description: &str, service: GoogleService, icon: &str) -> Tool {
    Tool {
        id,
        name: name.to_string(),
        description: description.to_string(),
        category: ToolCategory::Google,
        service,
        icon: icon.to_string(),
        requires_auth: true,
    }
}

/// Catalog in display order.
pub fn available_tools() -> &'static [Tool] {
    &AVAILABLE_TOOLS
}

pub fn find_tool(id: ToolId) -> Option<&'static Tool> {
    AVAILABLE_TOOLS.iter().find(|t| t.id == id)
}

/// Filter the catalog for a search popup.
///
/// A blank query lists everything.  Otherwise name and description are
/// matched case-insensitively and only the first few hits are returned,
/// always in catalog order.
pub fn search_tools(query: &str) -> Vec<&'static Tool> {
    if query.trim().is_empty() {
        return AVAILABLE_TOOLS.iter().collect();
    }

    let needle = query.to_lowercase();
    AVAILABLE_TOOLS
        .iter()
        .filter(|tool| {
            tool.name.to_lowercase().contains(&needle)
                || tool.description.to_lowercase().contains(&needle)
        })
        .take(MAX_SEARCH_RESULTS)
        .collect()
}
