//! Per-frame scheduling: navigation, simulation update, delayed scene
//! changes, then a draw pass.
//!
//! One call to [`FrameDriver::frame`] is one tick. The host loop calls it
//! again only after it returns, so ticks never overlap.

use std::io;
use std::sync::Arc;

use tracing::{debug, info};

use crate::input::{Action, InputSnapshot};
use crate::ports::{Clock, RandomSource};
use crate::remote::{RemoteEvent, RemoteScores, ScoreService};
use crate::scene::{Payload, Scene, SceneManager, SceneName};

/// Read-only view handed to the renderer each frame.
pub struct DrawContext<'a> {
    pub scene: &'a Scene,
    pub player_name: &'a str,
    /// `None` while a submission is in flight or none was made.
    pub score_saved: Option<bool>,
}

// Port for the draw pass. The core never inspects what it draws.
pub trait RenderSurface {
    fn draw(&mut self, ctx: &DrawContext<'_>) -> io::Result<()>;
}

/// Score-submission bookkeeping for one play session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SessionRecord {
    pub id: u64,
    pub submitted: bool,
    pub saved: Option<bool>,
}

pub struct FrameDriver<C, R> {
    scenes: SceneManager,
    clock: C,
    rng: R,
    remote: RemoteScores,
    player_name: String,
    leaderboard_limit: usize,
    session: SessionRecord,
    leaderboard_visit: u64,
    frames: u64,
}

impl<C: Clock, R: RandomSource> FrameDriver<C, R> {
    pub fn new(
        clock: C,
        rng: R,
        service: Arc<dyn ScoreService>,
        player_name: impl Into<String>,
        leaderboard_limit: usize,
    ) -> Self {
        Self {
            scenes: SceneManager::new(),
            clock,
            rng,
            remote: RemoteScores::new(service),
            player_name: player_name.into(),
            leaderboard_limit,
            session: SessionRecord::default(),
            leaderboard_visit: 0,
            frames: 0,
        }
    }

    pub fn scene(&self) -> &Scene {
        self.scenes.current()
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        self.scenes.current_mut()
    }

    pub fn session(&self) -> SessionRecord {
        self.session
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn player_name(&self) -> &str {
        &self.player_name
    }

    /// Run one tick: collect finished background work, react to navigation
    /// input, advance the simulation, commit any due transition, draw.
    pub fn frame(&mut self, input: &InputSnapshot, surface: &mut dyn RenderSurface) -> io::Result<()> {
        self.frames += 1;
        let now = self.clock.now_ms();

        self.drain_remote();
        if !self.navigate(input) {
            self.update(input, now);
        }

        let ctx = DrawContext {
            scene: self.scenes.current(),
            player_name: &self.player_name,
            score_saved: self.session.saved,
        };
        surface.draw(&ctx)
    }

    /// Scene-level key handling. Returns true when a transition was made, in
    /// which case the simulation does not run this frame.
    fn navigate(&mut self, input: &InputSnapshot) -> bool {
        match self.scenes.current_name() {
            SceneName::Start => {
                if input.is_active(Action::Fire) {
                    self.change_scene(SceneName::Playing, Payload::default());
                    return true;
                }
                if input.is_active(Action::Confirm) {
                    self.show_leaderboard();
                    return true;
                }
            }
            SceneName::Playing => {
                if input.is_active(Action::Back) {
                    self.change_scene(SceneName::Start, Payload::default());
                    return true;
                }
            }
            SceneName::GameOver | SceneName::Leaderboard => {
                if input.is_active(Action::Confirm) || input.is_active(Action::Back) {
                    self.change_scene(SceneName::Start, Payload::default());
                    return true;
                }
            }
        }
        false
    }

    fn update(&mut self, input: &InputSnapshot, now: u64) {
        let due = match self.scenes.current_mut() {
            Scene::Playing(play) => {
                play.handle_input(input, now);
                play.update(now, &mut self.rng);
                play.take_due_transition(now)
            }
            _ => None,
        };
        if let Some(payload) = due {
            self.change_scene(SceneName::GameOver, payload);
        }
    }

    /// Commit a transition and run the side effects tied to its target.
    pub fn change_scene(&mut self, name: SceneName, payload: Payload) {
        let merged = self.scenes.change_scene(name, payload);
        match name {
            SceneName::Playing => {
                self.session = SessionRecord { id: self.session.id + 1, ..SessionRecord::default() };
            }
            SceneName::GameOver => {
                if let Some(score) = merged.score {
                    self.submit_score(score);
                }
            }
            _ => {}
        }
    }

    /// Open the leaderboard in its loading state and start the fetch. Each
    /// call is a new visit; answers for earlier visits are dropped.
    pub fn show_leaderboard(&mut self) {
        self.change_scene(SceneName::Leaderboard, Payload::default());
        self.leaderboard_visit += 1;
        self.remote.request_leaderboard(self.leaderboard_visit, self.leaderboard_limit);
    }

    fn submit_score(&mut self, score: u32) {
        if self.session.submitted {
            debug!(score, "score already submitted this session");
            return;
        }
        self.session.submitted = true;
        info!(player = %self.player_name, score, "submitting score");
        self.remote.submit(self.session.id, &self.player_name, score);
    }

    fn drain_remote(&mut self) {
        for event in self.remote.poll() {
            match event {
                // Answers for an abandoned session are stale.
                RemoteEvent::ScoreSubmitted { session, result } if session == self.session.id => {
                    self.session.saved = Some(result.is_ok());
                }
                RemoteEvent::ScoreSubmitted { .. } => {}
                RemoteEvent::LeaderboardLoaded { visit, entries }
                    if visit == self.leaderboard_visit =>
                {
                    if let Scene::Leaderboard(board) = self.scenes.current_mut() {
                        board.entries = entries;
                        board.loading = false;
                    }
                }
                RemoteEvent::LeaderboardLoaded { visit, .. } => {
                    debug!(visit, "dropping leaderboard for an earlier visit");
                }
            }
        }
    }
}
