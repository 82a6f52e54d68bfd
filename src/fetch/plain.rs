//! Plain HTTP adapter.

use async_trait::async_trait;
use reqwest::header::USER_AGENT;

use super::response::read_body;
use super::{FetchOutcome, FetchedResponse, Fetcher};
use crate::error_handling::FetchError;
use crate::user_agent::UserAgentPool;

/// Single non-following GET over the shared async client.
///
/// The client must have redirects disabled (see
/// [`init_redirect_client`](crate::initialization::init_redirect_client)).
pub struct PlainFetcher {
    client: reqwest::Client,
    user_agents: UserAgentPool,
}

impl PlainFetcher {
    pub fn new(client: reqwest::Client, user_agents: UserAgentPool) -> Self {
        Self {
            client,
            user_agents,
        }
    }
}

#[async_trait]
impl Fetcher for PlainFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchOutcome, FetchError> {
        let response = self
            .client
            .get(url)
            .header(USER_AGENT, self.user_agents.random())
            .send()
            .await?;

        let status = response.status().as_u16();
        if status >= 400 {
            return Err(FetchError::Status(status));
        }

        let headers = response.headers().clone();
        // Only a 200 page can carry an embedded redirect worth reading
        let body = if status == 200 {
            read_body(response).await?
        } else {
            None
        };

        Ok(FetchOutcome::Response(FetchedResponse {
            status,
            headers,
            body,
        }))
    }
}
