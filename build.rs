// Build script for the OAuth client configuration
// Reruns whenever the Google client settings change in the environment

fn main() {
    let client_id_var = "GOOGLE_CLIENT_ID";
    let redirect_var = "GOOGLE_REDIRECT_URI";

    // Tell Cargo to rerun if the OAuth settings change
    println!("cargo:rerun-if-env-changed={}", client_id_var);
    println!("cargo:rerun-if-env-changed={}", redirect_var);

    // A missing client id still builds; the runtime can inject one via
    // `init_oauth_config_js`.
    if std::env::var(client_id_var).map(|v| v.is_empty()).unwrap_or(true) {
        println!(
            "cargo:warning={} not set, sign-in needs init_oauth_config_js() at runtime",
            client_id_var
        );
    }

    if std::env::var(redirect_var).is_err() {
        println!(
            "cargo:warning={} not set, using the local development callback URL",
            redirect_var
        );
    }
}
