//! Per-service configuration panel shown once a tool node has its tool.
//!
//! Typed values live in `WorkflowNode::config` under [`input_key`], so a
//! re-render puts them back.

use wasm_bindgen::prelude::*;
use web_sys::{Document, Element};

use crate::dom_utils::{action_button, element, focus_key, text_element, FOCUS_ATTR};
use crate::models::WorkflowNode;
use crate::services::GoogleService;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FieldInput {
    Text(&'static str),
    DateTime,
    Number(&'static str),
    TextArea(&'static str),
    Choice(&'static [&'static str]),
    Button(&'static str),
}

#[derive(Debug, PartialEq)]
pub struct FormField {
    pub key: &'static str,
    pub label: &'static str,
    pub inputs: &'static [FieldInput],
}

#[derive(Debug, PartialEq)]
pub struct ConfigForm {
    pub title: &'static str,
    pub connection_label: &'static str,
    pub connect_label: &'static str,
    pub fields: &'static [FormField],
}

static CALENDAR_FORM: ConfigForm = ConfigForm {
    title: "Google Calendar Configuration",
    connection_label: "Connection*",
    connect_label: "Create a connection",
    fields: &[
        FormField { key: "calendar_id", label: "Calendar ID*", inputs: &[FieldInput::Text("primary")] },
        FormField { key: "event_name", label: "Event Name*", inputs: &[FieldInput::Text("Meeting with client")] },
        FormField { key: "start_date", label: "Start Date", inputs: &[FieldInput::DateTime] },
        FormField { key: "duration", label: "Duration (minutes)", inputs: &[FieldInput::Number("30")] },
    ],
};

static GMAIL_FORM: ConfigForm = ConfigForm {
    title: "Gmail Configuration",
    connection_label: "Connection:",
    connect_label: "Connect with Google",
    fields: &[
        FormField {
            key: "to",
            label: "To: *",
            inputs: &[
                FieldInput::Choice(&["Direct Input", "From Variable"]),
                FieldInput::Text("Enter recipient email address"),
                FieldInput::Button("+ Add a recipient"),
            ],
        },
        FormField { key: "subject", label: "Subject:", inputs: &[FieldInput::Text("Email subject")] },
        FormField { key: "content", label: "Content:", inputs: &[FieldInput::TextArea("You can use HTML tags")] },
        FormField { key: "attachments", label: "Attachments:", inputs: &[FieldInput::Button("Add file")] },
    ],
};

static DRIVE_FORM: ConfigForm = ConfigForm {
    title: "Google Drive Configuration",
    connection_label: "Connection*",
    connect_label: "Create a connection",
    fields: &[FormField { key: "file_path", label: "File Path", inputs: &[FieldInput::Text("/path/to/file")] }],
};

/// State key of the `index`th input of `field`.
pub fn input_key(field: &FormField, index: usize) -> String {
    if field.inputs.len() == 1 {
        field.key.to_string()
    } else {
        format!("{}.{}", field.key, index)
    }
}

/// Dedicated form for `service`, `None` for services shown generically.
pub fn config_form(service: GoogleService) -> Option<&'static ConfigForm> {
    match service {
        GoogleService::Calendar => Some(&CALENDAR_FORM),
        GoogleService::Gmail => Some(&GMAIL_FORM),
        GoogleService::Drive => Some(&DRIVE_FORM),
        GoogleService::Sheets | GoogleService::Docs => None,
    }
}

pub fn render_config(
    document: &Document,
    node: &WorkflowNode,
    service: GoogleService,
    connected: bool,
) -> Result<Element, JsValue> {
    let Some(form) = config_form(service) else {
        return text_element(
            document,
            "div",
            "tool-config generic",
            &format!("Configuration options for {}", service),
        );
    };

    let panel = element(document, "div", "tool-config")?;
    panel.append_child(&text_element(document, "h3", "tool-config-title", form.title)?.into())?;

    let connection = element(document, "div", "config-row connection-row")?;
    connection.append_child(&text_element(document, "label", "", form.connection_label)?.into())?;
    if connected {
        connection.append_child(&text_element(document, "span", "connected", "✓ Connected")?.into())?;
    } else {
        let btn = action_button(document, "connect-button", form.connect_label, "connect-service")?;
        btn.set_attribute("data-service", service.as_str())?;
        connection.append_child(&btn)?;
    }
    panel.append_child(&connection)?;

    for field in form.fields {
        let row = element(document, "div", "config-row")?;
        row.append_child(&text_element(document, "label", "", field.label)?.into())?;
        for (index, input) in field.inputs.iter().enumerate() {
            let el = render_input(document, input, node.config.get(&input_key(field, index)))?;
            if !matches!(input, FieldInput::Button(_)) {
                let key = input_key(field, index);
                el.set_attribute("data-input", "config")?;
                el.set_attribute("data-field", &key)?;
                el.set_attribute(FOCUS_ATTR, &focus_key(&format!("config:{}", key), node.id.as_str()))?;
            }
            row.append_child(&el)?;
        }
        panel.append_child(&row)?;
    }
    Ok(panel)
}

fn render_input(document: &Document, input: &FieldInput, value: Option<&String>) -> Result<Element, JsValue> {
    let el = match input {
        FieldInput::Text(placeholder) | FieldInput::Number(placeholder) => {
            let el = element(document, "input", "config-input")?;
            let kind = if matches!(input, FieldInput::Number(_)) { "number" } else { "text" };
            el.set_attribute("type", kind)?;
            el.set_attribute("placeholder", placeholder)?;
            if let Some(value) = value {
                el.set_attribute("value", value)?;
            }
            el
        }
        FieldInput::DateTime => {
            let el = element(document, "input", "config-input")?;
            el.set_attribute("type", "datetime-local")?;
            if let Some(value) = value {
                el.set_attribute("value", value)?;
            }
            el
        }
        FieldInput::TextArea(placeholder) => {
            let el = element(document, "textarea", "config-input")?;
            el.set_attribute("placeholder", placeholder)?;
            if let Some(value) = value {
                el.set_text_content(Some(value));
            }
            el
        }
        FieldInput::Choice(options) => {
            let select = element(document, "select", "config-input")?;
            for option in options.iter() {
                let opt = text_element(document, "option", "", option)?;
                if value.map(String::as_str) == Some(*option) {
                    opt.set_attribute("selected", "")?;
                }
                select.append_child(&opt)?;
            }
            select
        }
        FieldInput::Button(label) => {
            let btn = text_element(document, "button", "config-button", label)?;
            btn.set_attribute("type", "button")?;
            btn
        }
    };
    Ok(el)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dedicated_forms_for_calendar_gmail_drive() {
        assert_eq!(config_form(GoogleService::Calendar).unwrap().fields.len(), 4);
        assert_eq!(config_form(GoogleService::Drive).unwrap().fields[0].label, "File Path");
        assert!(config_form(GoogleService::Sheets).is_none());
        assert!(config_form(GoogleService::Docs).is_none());
    }

    #[test]
    fn gmail_recipient_offers_direct_or_variable() {
        let to = &config_form(GoogleService::Gmail).unwrap().fields[0];
        assert_eq!(to.label, "To: *");
        assert_eq!(to.inputs[0], FieldInput::Choice(&["Direct Input", "From Variable"]));
    }

    #[test]
    fn input_keys_are_unique_within_each_form() {
        for service in [GoogleService::Calendar, GoogleService::Gmail, GoogleService::Drive] {
            let form = config_form(service).unwrap();
            let mut keys: Vec<String> = form
                .fields
                .iter()
                .flat_map(|f| (0..f.inputs.len()).map(move |i| input_key(f, i)))
                .collect();
            let total = keys.len();
            keys.sort();
            keys.dedup();
            assert_eq!(keys.len(), total, "{:?}", service);
        }
        let to = &config_form(GoogleService::Gmail).unwrap().fields[0];
        assert_eq!(input_key(to, 1), "to.1");
        assert_eq!(input_key(&config_form(GoogleService::Drive).unwrap().fields[0], 0), "file_path");
    }
}
