use web_sys::window;

// Give up on a claim that hangs; the session then allows another spin
pub const CLAIM_TIMEOUT_MS: u32 = 15_000;

const DEV_API_BASE_URL: &str = "http://127.0.0.1:3000";

pub fn get_api_base_url() -> String {
    // The reward API is served from the same origin as the page
    if let Some(window) = window() {
        if let Ok(host) = window.location().host() {
            if !host.is_empty() {
                let protocol = window.location().protocol().unwrap_or_else(|_| "http:".to_string());
                return format!("{}//{}", protocol, host);
            }
        }
    }

    // Default to 127.0.0.1 for development
    DEV_API_BASE_URL.to_string()
}
