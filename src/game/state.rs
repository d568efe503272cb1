//! Game phase management, score bookkeeping and input handling.
//!
//! The phase machine cycles Ready -> Playing -> GameOver -> Playing until the
//! process exits. Every new game rebuilds the playfield from scratch; only
//! the best score survives between sessions, and only in memory.

use bevy::prelude::*;

use super::{
    bird::{Bird, spawn_bird},
    pipe::{Pipe, PipeSpawnTimer},
};
use crate::AppSystems;

pub(super) fn plugin(app: &mut App) {
    app.init_state::<GamePhase>();

    app.init_resource::<Score>();
    app.init_resource::<BestScore>();
    app.register_type::<Score>();
    app.register_type::<BestScore>();

    app.add_systems(
        OnEnter(GamePhase::Playing),
        (reset_session, rebuild_playfield).chain(),
    );

    app.add_systems(
        Update,
        (
            handle_start_input
                .run_if(in_state(GamePhase::Ready).or(in_state(GamePhase::GameOver))),
            handle_jump_input.run_if(in_state(GamePhase::Playing)),
            quit_on_escape,
        )
            .in_set(AppSystems::RecordInput),
    );
}

/// The game's phase.
#[derive(States, Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum GamePhase {
    /// Idle, awaiting the first input. No simulation updates.
    #[default]
    Ready,
    /// The simulation advances each fixed step.
    Playing,
    /// Frozen after a crash, awaiting input to restart.
    GameOver,
}

/// Resource tracking the current session's score.
#[derive(Resource, Debug, Default, Reflect)]
#[reflect(Resource)]
pub struct Score(pub u32);

/// Best score across all sessions in this process run. Never decreases.
#[derive(Resource, Debug, Default, Reflect)]
#[reflect(Resource)]
pub struct BestScore(pub u32);

/// Whether a jump/start press happened this frame: space, or any pointer
/// button. Everything else is ignored.
fn jump_pressed(keyboard: &ButtonInput<KeyCode>, mouse: &ButtonInput<MouseButton>) -> bool {
    keyboard.just_pressed(KeyCode::Space) || mouse.get_just_pressed().next().is_some()
}

/// Start a new game from the ready or game over screen. The starting press
/// only starts; it does not also flap.
fn handle_start_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mouse: Res<ButtonInput<MouseButton>>,
    mut next_phase: ResMut<NextState<GamePhase>>,
) {
    if jump_pressed(&keyboard, &mouse) {
        next_phase.set(GamePhase::Playing);
    }
}

/// Flap while playing.
fn handle_jump_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mouse: Res<ButtonInput<MouseButton>>,
    mut bird_query: Query<&mut Bird>,
) {
    if !jump_pressed(&keyboard, &mouse) {
        return;
    }
    let Ok(mut bird) = bird_query.single_mut() else {
        return;
    };
    bird.jump();
}

fn quit_on_escape(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut app_exit: MessageWriter<AppExit>,
) {
    if keyboard.just_pressed(KeyCode::Escape) {
        app_exit.write(AppExit::Success);
    }
}

/// Reset the session bookkeeping when a new game starts.
fn reset_session(mut score: ResMut<Score>, mut spawn_timer: ResMut<PipeSpawnTimer>) {
    score.0 = 0;
    spawn_timer.0.reset();
    info!("New game started");
}

/// Throw away last session's entities and spawn a fresh bird.
fn rebuild_playfield(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    stale_query: Query<Entity, Or<(With<Bird>, With<Pipe>)>>,
) {
    for entity in &stale_query {
        commands.entity(entity).despawn();
    }
    spawn_bird(&mut commands, &mut meshes, &mut materials);
}

/// Run condition for the per-step simulation.
///
/// `FixedUpdate` can run several catch-up steps inside one render frame,
/// while the phase transition only applies at the next `StateTransition`.
/// Checking the pending transition as well keeps later steps of the same
/// frame from simulating past a crash.
pub(super) fn simulation_active(
    phase: Res<State<GamePhase>>,
    next_phase: Res<NextState<GamePhase>>,
) -> bool {
    *phase.get() == GamePhase::Playing && matches!(*next_phase, NextState::Unchanged)
}

/// Fold the finished session's score into the best score. Called by the
/// collision evaluator when the session ends.
pub(super) fn settle_best(score: &Score, best: &mut BestScore) {
    if score.0 > best.0 {
        best.0 = score.0;
        info!("New best score: {}", best.0);
    }
}
