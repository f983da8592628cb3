//! Google services a tool node can connect to, and the session-scoped
//! record of which of them the user has connected.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Debug)]
#[serde(rename_all = "lowercase")]
pub enum GoogleService {
    Gmail,
    Drive,
    Calendar,
    Sheets,
    Docs,
}

impl GoogleService {
    pub const ALL: [GoogleService; 5] = [
        GoogleService::Gmail,
        GoogleService::Drive,
        GoogleService::Calendar,
        GoogleService::Sheets,
        GoogleService::Docs,
    ];

    /// The single scope requested on top of the base identity scopes.
    pub fn scope(&self) -> &'static str {
        match self {
            GoogleService::Gmail => "https://www.googleapis.com/auth/gmail.readonly",
            GoogleService::Drive => "https://www.googleapis.com/auth/drive.readonly",
            GoogleService::Calendar => "https://www.googleapis.com/auth/calendar.readonly",
            GoogleService::Sheets => "https://www.googleapis.com/auth/spreadsheets.readonly",
            GoogleService::Docs => "https://www.googleapis.com/auth/documents.readonly",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            GoogleService::Gmail => "Gmail",
            GoogleService::Drive => "Google Drive",
            GoogleService::Calendar => "Google Calendar",
            GoogleService::Sheets => "Google Sheets",
            GoogleService::Docs => "Google Docs",
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            GoogleService::Gmail => "📧",
            GoogleService::Drive => "📁",
            GoogleService::Calendar => "📅",
            GoogleService::Sheets => "📊",
            GoogleService::Docs => "📝",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GoogleService::Gmail => "gmail",
            GoogleService::Drive => "drive",
            GoogleService::Calendar => "calendar",
            GoogleService::Sheets => "sheets",
            GoogleService::Docs => "docs",
        }
    }
}

impl fmt::Display for GoogleService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error, PartialEq)]
#[error("unknown Google service '{0}'")]
pub struct UnknownService(pub String);

impl FromStr for GoogleService {
    type Err = UnknownService;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GoogleService::ALL
            .into_iter()
            .find(|svc| svc.as_str() == s)
            .ok_or_else(|| UnknownService(s.to_string()))
    }
}

/// Which services are marked connected for this page session.
///
/// Marking is optimistic: it happens when the connect flow starts, and the
/// scopes on the returned token are never inspected.  `mark_connected` is the
/// only write path, so a verifying policy can replace the call site there.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ConnectedServices {
    flags: HashMap<GoogleService, bool>,
}

impl ConnectedServices {
    pub fn is_connected(&self, service: GoogleService) -> bool {
        self.flags.get(&service).copied().unwrap_or(false)
    }

    pub fn mark_connected(&mut self, service: GoogleService) {
        self.flags.insert(service, true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_service_identifiers() {
        assert_eq!("gmail".parse::<GoogleService>(), Ok(GoogleService::Gmail));
        assert_eq!("sheets".parse::<GoogleService>(), Ok(GoogleService::Sheets));
        assert!("photos".parse::<GoogleService>().is_err());
    }

    #[test]
    fn every_service_has_a_single_googleapis_scope() {
        for svc in GoogleService::ALL {
            assert!(svc.scope().starts_with("https://www.googleapis.com/auth/"));
            assert!(!svc.scope().contains(' '));
        }
    }

    #[test]
    fn connected_flags_default_to_false() {
        let mut connected = ConnectedServices::default();
        assert!(!connected.is_connected(GoogleService::Drive));
        connected.mark_connected(GoogleService::Drive);
        assert!(connected.is_connected(GoogleService::Drive));
        assert!(!connected.is_connected(GoogleService::Gmail));
    }
}
