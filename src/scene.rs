use std::fmt;
use std::str::FromStr;

use tracing::{debug, info};

use crate::play::PlayState;
use crate::remote::LeaderboardEntry;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SceneName {
    Start,
    Playing,
    GameOver,
    Leaderboard,
}

impl SceneName {
    pub fn as_str(&self) -> &'static str {
        match self {
            SceneName::Start => "start",
            SceneName::Playing => "game",
            SceneName::GameOver => "gameover",
            SceneName::Leaderboard => "leaderboard",
        }
    }
}

impl fmt::Display for SceneName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownScene(pub String);

impl FromStr for SceneName {
    type Err = UnknownScene;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "start" => Ok(SceneName::Start),
            "game" | "playing" => Ok(SceneName::Playing),
            "gameover" => Ok(SceneName::GameOver),
            "leaderboard" => Ok(SceneName::Leaderboard),
            other => Err(UnknownScene(other.to_string())),
        }
    }
}

/// Data handed from one scene to the next. Absent fields fall back to the
/// entering scene's defaults.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Payload {
    pub score: Option<u32>,
    pub won: Option<bool>,
    pub entries: Option<Vec<LeaderboardEntry>>,
}

impl Payload {
    pub fn result(score: u32, won: bool) -> Self {
        Self { score: Some(score), won: Some(won), entries: None }
    }

    /// Overlay every field `other` sets.
    pub fn merge(&mut self, other: Payload) {
        if other.score.is_some() {
            self.score = other.score;
        }
        if other.won.is_some() {
            self.won = other.won;
        }
        if other.entries.is_some() {
            self.entries = other.entries;
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameOverState {
    pub score: u32,
    pub won: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LeaderboardState {
    pub entries: Vec<LeaderboardEntry>,
    /// Set until the fetch for this visit has answered.
    pub loading: bool,
}

/// The single live scene.
#[derive(Clone, Debug)]
pub enum Scene {
    Start,
    Playing(Box<PlayState>),
    GameOver(GameOverState),
    Leaderboard(LeaderboardState),
}

impl Scene {
    pub fn name(&self) -> SceneName {
        match self {
            Scene::Start => SceneName::Start,
            Scene::Playing(_) => SceneName::Playing,
            Scene::GameOver(_) => SceneName::GameOver,
            Scene::Leaderboard(_) => SceneName::Leaderboard,
        }
    }

    /// Enter hook: build the scene from the merged payload.
    fn enter(name: SceneName, payload: &Payload) -> Scene {
        match name {
            SceneName::Start => Scene::Start,
            SceneName::Playing => Scene::Playing(Box::new(PlayState::new())),
            SceneName::GameOver => Scene::GameOver(GameOverState {
                score: payload.score.unwrap_or(0),
                won: payload.won.unwrap_or(false),
            }),
            SceneName::Leaderboard => match &payload.entries {
                Some(entries) => Scene::Leaderboard(LeaderboardState {
                    entries: entries.clone(),
                    loading: false,
                }),
                None => Scene::Leaderboard(LeaderboardState { entries: Vec::new(), loading: true }),
            },
        }
    }

    /// Exit hook: extra payload fields the outgoing scene contributes.
    fn exit(&self) -> Option<Payload> {
        match self {
            Scene::Playing(play) => play.exit_payload(),
            _ => None,
        }
    }
}

/// Owns the current scene and commits transitions between frames.
#[derive(Debug)]
pub struct SceneManager {
    current: Scene,
}

impl Default for SceneManager {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneManager {
    pub fn new() -> Self {
        Self { current: Scene::Start }
    }

    pub fn current(&self) -> &Scene {
        &self.current
    }

    pub fn current_mut(&mut self) -> &mut Scene {
        &mut self.current
    }

    pub fn current_name(&self) -> SceneName {
        self.current.name()
    }

    /// Run the outgoing exit hook, merge its fields over `payload`, then enter
    /// `name`. Returns the merged payload the new scene was built from.
    pub fn change_scene(&mut self, name: SceneName, mut payload: Payload) -> Payload {
        if let Some(extra) = self.current.exit() {
            payload.merge(extra);
        }
        let from = self.current.name();
        self.current = Scene::enter(name, &payload);
        info!(%from, to = %name, "scene changed");
        payload
    }

    /// Like [`change_scene`](Self::change_scene) but addressed by name.
    /// Unknown names leave the current scene untouched and return `None`.
    pub fn change_scene_named(&mut self, name: &str, payload: Payload) -> Option<Payload> {
        match name.parse::<SceneName>() {
            Ok(scene) => Some(self.change_scene(scene, payload)),
            Err(UnknownScene(name)) => {
                debug!(%name, "ignoring request for unknown scene");
                None
            }
        }
    }
}
