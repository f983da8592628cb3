// Canvas footprint used for overlap checks.  Matches the rendered card
// width (16rem) and an approximate card height.
pub const NODE_WIDTH: f64 = 256.0;
pub const NODE_HEIGHT: f64 = 120.0;
pub const NODE_PADDING: f64 = 20.0;

// Diagonal nudge applied while searching for a free spot
pub const PLACEMENT_STEP: f64 = 30.0;
pub const MAX_PLACEMENT_ATTEMPTS: usize = 10;

// Viewport fallback until the first resize event reports real dimensions
pub const DEFAULT_CANVAS_WIDTH: f64 = 800.0;
pub const DEFAULT_CANVAS_HEIGHT: f64 = 600.0;

/// Non-empty search queries show at most this many catalog entries.
pub const MAX_SEARCH_RESULTS: usize = 3;

// OAuth implicit grant
pub const GOOGLE_AUTH_ENDPOINT: &str = "https://accounts.google.com/o/oauth2/v2/auth";
pub const BASE_SCOPES: [&str; 2] = ["email", "profile"];
pub const DEFAULT_REDIRECT_URI: &str = "http://localhost:3000/auth/google/callback";
// Globals a host page may set before the module loads.
pub const PAGE_CLIENT_ID_GLOBAL: &str = "GOOGLE_CLIENT_ID";
pub const PAGE_REDIRECT_URI_GLOBAL: &str = "GOOGLE_REDIRECT_URI";
pub const POPUP_FEATURES: &str = "width=500,height=600";

/// Name of the opener-side function the popup looks up on `window.opener`.
pub const OPENER_CALLBACK_NAME: &str = "handleGoogleCallback";

// Durable storage keys
pub const STORAGE_KEY_ACCESS_TOKEN: &str = "google_access_token";
pub const STORAGE_KEY_USER: &str = "google_user";
