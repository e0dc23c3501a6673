//! Simulation core for a terminal Space Invaders.
//!
//! The library owns everything that decides what happens in a frame: entity
//! behaviour, collision, enemy fire, the Playing round, the scene state
//! machine and the frame driver. Time and randomness come in through the
//! traits in [`ports`], rendering through [`RenderSurface`] and the score
//! backend through [`remote::ScoreService`]. Input arrives each frame as an
//! [`input::InputSnapshot`].

pub mod collision;
pub mod config;
pub mod driver;
pub mod entities;
pub mod error;
pub mod http;
pub mod input;
pub mod play;
pub mod ports;
pub mod remote;
pub mod scene;
pub mod scheduler;
pub mod tuning;

pub use driver::{DrawContext, FrameDriver, RenderSurface};
pub use error::ApiError;
pub use scene::{Payload, Scene, SceneManager, SceneName};
