//! Playback token exchange
//!
//! Exchanges a channel login for a short-lived signed playback token via
//! a single GraphQL request to the upstream service. Any failure along
//! the way (transport, status, decode, missing fields) is a
//! [`RelayError::CredentialExchange`]; there are no retries.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::UpstreamConfig;
use crate::error::{RelayError, Result};

const OPERATION_NAME: &str = "PlaybackAccessToken_Template";

const QUERY: &str = r#"query PlaybackAccessToken_Template($login: String!, $isLive: Boolean!, $vodID: ID!, $isVod: Boolean!, $playerType: String!) {  streamPlaybackAccessToken(channelName: $login, params: {platform: "web", playerBackend: "mediaplayer", playerType: $playerType}) @include(if: $isLive) {    value    signature   authorization { isForbidden forbiddenReasonCode }   __typename  }  videoPlaybackAccessToken(id: $vodID, params: {platform: "web", playerBackend: "mediaplayer", playerType: $playerType}) @include(if: $isVod) {    value    signature   __typename  }}"#;

/// Signed playback credential for one channel
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackToken {
    pub value: String,
    pub signature: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TokenRequest<'a> {
    operation_name: &'a str,
    query: &'a str,
    variables: TokenVariables<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TokenVariables<'a> {
    is_live: bool,
    is_vod: bool,
    login: &'a str,
    player_type: &'a str,
    #[serde(rename = "vodID")]
    vod_id: &'a str,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    data: Option<TokenData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TokenData {
    stream_playback_access_token: Option<AccessToken>,
}

#[derive(Debug, Deserialize)]
struct AccessToken {
    value: Option<String>,
    signature: Option<String>,
}

/// Client for the upstream token-exchange endpoint
pub struct TokenClient {
    client: Client,
    gql_url: String,
    client_id: String,
    user_agent: String,
}

impl TokenClient {
    /// Create a client from upstream configuration
    pub fn new(config: &UpstreamConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| RelayError::Config(format!("HTTP client: {}", e)))?;

        Ok(Self {
            client,
            gql_url: config.gql_url.clone(),
            client_id: config.client_id.clone(),
            user_agent: config.user_agent.clone(),
        })
    }

    /// Exchange a login for a live playback token
    pub async fn playback_token(&self, login: &str) -> Result<PlaybackToken> {
        let payload = TokenRequest {
            operation_name: OPERATION_NAME,
            query: QUERY,
            variables: TokenVariables {
                is_live: true,
                is_vod: false,
                login,
                player_type: "site",
                vod_id: "",
            },
        };

        let response = self
            .client
            .post(&self.gql_url)
            .header("Client-Id", &self.client_id)
            .header("User-Agent", &self.user_agent)
            .json(&payload)
            .send()
            .await
            .map_err(|e| RelayError::CredentialExchange(format!("request: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RelayError::CredentialExchange(format!(
                "upstream status {}",
                status
            )));
        }

        let body: TokenResponse = response
            .json()
            .await
            .map_err(|e| RelayError::CredentialExchange(format!("decode: {}", e)))?;

        let token = body
            .data
            .and_then(|d| d.stream_playback_access_token)
            .ok_or_else(|| {
                RelayError::CredentialExchange("no streamPlaybackAccessToken in response".into())
            })?;

        match (token.value, token.signature) {
            (Some(value), Some(signature)) if !value.is_empty() && !signature.is_empty() => {
                Ok(PlaybackToken { value, signature })
            }
            _ => Err(RelayError::CredentialExchange(
                "missing token value or signature".into(),
            )),
        }
    }
}
