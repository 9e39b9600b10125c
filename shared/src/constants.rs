pub const REWARDS_API_PREFIX: &str = "/api/rewards/mission-sets";
pub const MY_REWARD_ENDPOINT: &str = "my-reward";
pub const OPTIONS_ENDPOINT: &str = "options";
pub const CLAIM_ENDPOINT: &str = "claim";

pub const NO_OPTIONS_ERROR: &str = "No options available for this mission set";
pub const OPTIONS_LOAD_ERROR: &str = "Could not load the reward options";
pub const CLAIM_FAILED_ERROR: &str = "The reward could not be claimed";
pub const NETWORK_ERROR: &str = "Network error. Please try again";
pub const TIMEOUT_ERROR: &str = "The reward service did not answer in time";

/// Builds `/api/rewards/mission-sets/{id}/{endpoint}` relative to the API base URL.
pub fn reward_endpoint(mission_set_id: &str, endpoint: &str) -> String {
    format!("{}/{}/{}", REWARDS_API_PREFIX, mission_set_id, endpoint)
}
