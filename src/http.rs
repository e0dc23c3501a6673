use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::remote::{clamp_limit, LeaderboardEntry, ScoreService};

/// Highest score the backend accepts.
pub const MAX_SCORE: u32 = 999_999;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SubmitScoreBody<'a> {
    player_name: &'a str,
    score: u32,
}

// {"success": true, "data": [{"playerName": "...", "score": N}, ...], "count": N}
#[derive(Debug, Deserialize)]
struct LeaderboardResponse {
    #[serde(default)]
    data: Vec<LeaderboardEntry>,
}

/// Blocking REST client for the score backend.
pub struct HttpScoreClient {
    base_url: String,
    agent: ureq::Agent,
}

impl HttpScoreClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            agent,
        }
    }

    fn scores_url(&self) -> String {
        format!("{}/scores", self.base_url)
    }

    fn convert_error(e: ureq::Error) -> ApiError {
        match e {
            ureq::Error::Status(code, _) => ApiError::Status(code),
            other => ApiError::Transport(other.to_string()),
        }
    }
}

impl ScoreService for HttpScoreClient {
    fn submit_score(&self, player_name: &str, score: u32) -> Result<(), ApiError> {
        if score > MAX_SCORE {
            return Err(ApiError::InvalidScore(score));
        }
        self.agent
            .post(&self.scores_url())
            .send_json(SubmitScoreBody { player_name, score })
            .map_err(Self::convert_error)?;
        Ok(())
    }

    fn fetch_leaderboard(&self, limit: usize) -> Result<Vec<LeaderboardEntry>, ApiError> {
        let response = self
            .agent
            .get(&self.scores_url())
            .query("limit", &clamp_limit(limit).to_string())
            .call()
            .map_err(Self::convert_error)?;
        let body: LeaderboardResponse = response
            .into_json()
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        Ok(body.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submit_body_uses_backend_field_names() {
        let body = SubmitScoreBody { player_name: "ACE", score: 4200 };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json, serde_json::json!({ "playerName": "ACE", "score": 4200 }));
    }

    #[test]
    fn leaderboard_response_reads_data_array() {
        let raw = r#"{"success":true,"data":[{"playerName":"A","score":900},{"playerName":"B","score":500}],"count":2}"#;
        let parsed: LeaderboardResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.data.len(), 2);
        assert_eq!(parsed.data[0].player_name, "A");
        assert_eq!(parsed.data[1].score, 500);
    }

    #[test]
    fn leaderboard_response_without_data_is_empty() {
        let parsed: LeaderboardResponse = serde_json::from_str(r#"{"success":true}"#).unwrap();
        assert!(parsed.data.is_empty());
    }

    #[test]
    fn base_url_trailing_slash_is_dropped() {
        let client = HttpScoreClient::new("http://localhost:4000/api/", Duration::from_millis(10));
        assert_eq!(client.scores_url(), "http://localhost:4000/api/scores");
    }

    #[test]
    fn oversized_score_is_rejected_before_sending() {
        // Unroutable address: the request must never be attempted.
        let client = HttpScoreClient::new("http://127.0.0.1:9", Duration::from_millis(10));
        assert_eq!(
            client.submit_score("ACE", MAX_SCORE + 1),
            Err(ApiError::InvalidScore(MAX_SCORE + 1))
        );
    }
}
