use crate::auth::popup::{launch, BrowserPopup};
use crate::messages::Command;

/// Run one side effect.  Called with no borrow of `APP_STATE` held.
pub fn execute(cmd: Command) {
    match cmd {
        Command::OpenAuthPopup(request) => {
            // Blocked popups dead-end here; the opener keeps waiting.
            launch(&BrowserPopup, &request.to_url());
        }
        Command::Render => {
            if let Err(e) = crate::ui::render() {
                web_sys::console::warn_1(&format!("Failed to refresh UI: {:?}", e).into());
            }
        }
    }
}
