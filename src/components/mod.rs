pub mod auth;
pub mod canvas_editor;
pub mod tool_config;
pub mod tool_search;
