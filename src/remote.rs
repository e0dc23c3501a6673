//! Score backend capability and the off-frame dispatcher that calls it.
//!
//! Requests run on short-lived worker threads and report back over a channel
//! that the frame driver drains once per frame, so the simulation never waits
//! on the network.

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::ApiError;

pub const MIN_LEADERBOARD_LIMIT: usize = 1;
pub const MAX_LEADERBOARD_LIMIT: usize = 100;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub player_name: String,
    pub score: u32,
}

// Port for the external score service.
pub trait ScoreService: Send + Sync {
    fn submit_score(&self, player_name: &str, score: u32) -> Result<(), ApiError>;

    /// Top `limit` entries, best score first, newest first among ties.
    fn fetch_leaderboard(&self, limit: usize) -> Result<Vec<LeaderboardEntry>, ApiError>;
}

/// Service used when no backend is configured; every call fails.
pub struct OfflineScores;

impl ScoreService for OfflineScores {
    fn submit_score(&self, _player_name: &str, _score: u32) -> Result<(), ApiError> {
        Err(ApiError::Unavailable)
    }

    fn fetch_leaderboard(&self, _limit: usize) -> Result<Vec<LeaderboardEntry>, ApiError> {
        Err(ApiError::Unavailable)
    }
}

pub fn clamp_limit(limit: usize) -> usize {
    limit.clamp(MIN_LEADERBOARD_LIMIT, MAX_LEADERBOARD_LIMIT)
}

/// Fetch the leaderboard, treating any failure as an empty board.
pub fn fetch_leaderboard_or_empty(service: &dyn ScoreService, limit: usize) -> Vec<LeaderboardEntry> {
    match service.fetch_leaderboard(clamp_limit(limit)) {
        Ok(entries) => entries,
        Err(e) => {
            warn!(error = %e, "leaderboard fetch failed");
            Vec::new()
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum RemoteEvent {
    /// `session` is the id passed to [`RemoteScores::submit`].
    ScoreSubmitted { session: u64, result: Result<(), ApiError> },
    /// `visit` is the id passed to [`RemoteScores::request_leaderboard`].
    LeaderboardLoaded { visit: u64, entries: Vec<LeaderboardEntry> },
}

pub struct RemoteScores {
    service: Arc<dyn ScoreService>,
    tx: Sender<RemoteEvent>,
    rx: Receiver<RemoteEvent>,
}

impl RemoteScores {
    pub fn new(service: Arc<dyn ScoreService>) -> Self {
        let (tx, rx) = mpsc::channel();
        Self { service, tx, rx }
    }

    /// Fire and forget. The outcome arrives later as
    /// [`RemoteEvent::ScoreSubmitted`] tagged with `session`.
    pub fn submit(&self, session: u64, player_name: &str, score: u32) {
        let service = Arc::clone(&self.service);
        let tx = self.tx.clone();
        let player_name = player_name.to_string();
        thread::spawn(move || {
            let result = service.submit_score(&player_name, score);
            match &result {
                Ok(()) => info!(player = %player_name, score, "score saved"),
                Err(e) => warn!(player = %player_name, score, error = %e, "score not saved"),
            }
            // Receiver gone means the game is shutting down.
            let _ = tx.send(RemoteEvent::ScoreSubmitted { session, result });
        });
    }

    /// Load the board in the background; failures arrive as an empty list
    /// tagged with `visit`.
    pub fn request_leaderboard(&self, visit: u64, limit: usize) {
        let service = Arc::clone(&self.service);
        let tx = self.tx.clone();
        thread::spawn(move || {
            let entries = fetch_leaderboard_or_empty(service.as_ref(), limit);
            let _ = tx.send(RemoteEvent::LeaderboardLoaded { visit, entries });
        });
    }

    /// Everything that has completed since the last call. Never blocks.
    pub fn poll(&self) -> Vec<RemoteEvent> {
        self.rx.try_iter().collect()
    }
}
