//! The "press to start" prompt shown while the game is idle.

use bevy::prelude::*;

use crate::{game::GamePhase, theme::widget};

pub(super) fn plugin(app: &mut App) {
    app.add_systems(OnEnter(GamePhase::Ready), spawn_ready_prompt);
}

fn spawn_ready_prompt(mut commands: Commands) {
    commands.spawn((
        widget::ui_root("Ready Prompt"),
        GlobalZIndex(2),
        DespawnOnExit(GamePhase::Ready),
        children![
            widget::header("Flappy Bird"),
            widget::label("Click to play!"),
        ],
    ));
}
