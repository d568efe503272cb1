//! The main game module for the flappy bird clone.
//!
//! This module contains all the gameplay logic including:
//! - Bird physics (gravity integration, jumping, rotation)
//! - Pipe obstacles (spawning, scrolling, recycling)
//! - Collision detection and scoring
//! - Game phase management (ready / playing / game over)
//!
//! All simulation state is kept in screen coordinates (origin top-left,
//! y growing downwards, 400x600 logical pixels). Presentation systems
//! translate it into Bevy world transforms every frame, so the simulation
//! can be tested without touching the renderer.

mod bird;
mod collision;
mod ground;
mod hud;
mod pipe;
mod state;

use bevy::prelude::*;

pub use state::{BestScore, GamePhase, Score};

/// Logical window width in pixels.
pub const WINDOW_WIDTH: f32 = 400.0;

/// Logical window height in pixels.
pub const WINDOW_HEIGHT: f32 = 600.0;

/// Height of the ground strip at the bottom of the screen.
pub const GROUND_HEIGHT: f32 = 50.0;

/// Fixed simulation rate in steps per second.
pub const SIMULATION_HZ: f64 = 60.0;

pub(super) fn plugin(app: &mut App) {
    app.add_plugins((
        state::plugin,
        bird::plugin,
        pipe::plugin,
        collision::plugin,
        ground::plugin,
        hud::plugin,
    ));

    // One simulation pass per fixed step: physics, then obstacle movement,
    // then collision/scoring on the resulting positions. The run condition
    // also halts catch-up steps once a crash has ended the session.
    app.configure_sets(
        FixedUpdate,
        (
            SimulationSet::Physics,
            SimulationSet::Obstacles,
            SimulationSet::Evaluate,
        )
            .chain()
            .run_if(state::simulation_active),
    );
}

/// Ordering of the per-step simulation systems in `FixedUpdate`.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    /// Bird gravity integration.
    Physics,
    /// Pipe spawning, scrolling and recycling.
    Obstacles,
    /// Collision detection and scoring.
    Evaluate,
}

/// Convert a screen-space point to a Bevy world translation.
pub fn to_world(x: f32, y: f32, z: f32) -> Vec3 {
    Vec3::new(x - WINDOW_WIDTH / 2.0, WINDOW_HEIGHT / 2.0 - y, z)
}
