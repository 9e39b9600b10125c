use futures::future::{select, Either};
use gloo::net::http::{Request, RequestBuilder, Response};
use gloo_timers::future::TimeoutFuture;
use shared::constants::{
    reward_endpoint, CLAIM_ENDPOINT, MY_REWARD_ENDPOINT, NETWORK_ERROR, OPTIONS_ENDPOINT, TIMEOUT_ERROR,
};
use shared::roulette_session::RewardService;
use shared::shared_roulette::{
    parse_claim_response, parse_my_reward, parse_options, ClaimRequest, ClaimResponse, MyReward, RewardOption,
};
use crate::config::{get_api_base_url, CLAIM_TIMEOUT_MS};
use super::wheel_utils::get_auth_token;

/// Reward service reached over the REST API of the current origin.
pub struct HttpRewardService {
    base_url: String,
    token: Option<String>,
}

impl HttpRewardService {
    pub fn new() -> Self {
        Self {
            base_url: get_api_base_url(),
            token: get_auth_token(),
        }
    }

    fn url(&self, mission_set_id: &str, endpoint: &str) -> String {
        format!("{}{}", self.base_url, reward_endpoint(mission_set_id, endpoint))
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => builder.header("Authorization", &format!("Bearer {}", token)),
            None => builder,
        }
    }

    async fn get(&self, mission_set_id: &str, endpoint: &str) -> Result<(u16, String), String> {
        let response = self
            .authorize(Request::get(&self.url(mission_set_id, endpoint)))
            .send()
            .await
            .map_err(|e| format!("{}: {:?}", NETWORK_ERROR, e))?;
        read_body(response).await
    }

    async fn post_claim(&self, request: &ClaimRequest) -> Result<ClaimResponse, String> {
        let response = self
            .authorize(Request::post(&self.url(&request.mission_set_id, CLAIM_ENDPOINT)))
            .json(request)
            .map_err(|e| format!("Failed to build request: {:?}", e))?
            .send()
            .await
            .map_err(|e| format!("{}: {:?}", NETWORK_ERROR, e))?;

        let (status, body) = read_body(response).await?;
        parse_claim_response(status, &body)
    }
}

// Empty bodies (204) read as an empty string
async fn read_body(response: Response) -> Result<(u16, String), String> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| format!("{}: {:?}", NETWORK_ERROR, e))?;
    Ok((status, body))
}

impl RewardService for HttpRewardService {
    async fn my_reward(&self, mission_set_id: &str) -> Result<Option<MyReward>, String> {
        let (status, body) = self.get(mission_set_id, MY_REWARD_ENDPOINT).await?;
        parse_my_reward(status, &body)
    }

    async fn options(&self, mission_set_id: &str) -> Result<Vec<RewardOption>, String> {
        let (status, body) = self.get(mission_set_id, OPTIONS_ENDPOINT).await?;
        parse_options(status, &body)
    }

    async fn claim(&self, request: &ClaimRequest) -> Result<ClaimResponse, String> {
        // A timed out claim may still land on the server; its duplicate guard decides
        let claim = Box::pin(self.post_claim(request));
        match select(claim, TimeoutFuture::new(CLAIM_TIMEOUT_MS)).await {
            Either::Left((result, _)) => result,
            Either::Right(_) => {
                log::warn!("Claim for mission set {} timed out", request.mission_set_id);
                Err(TIMEOUT_ERROR.to_string())
            }
        }
    }
}
