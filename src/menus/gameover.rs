//! The game over overlay.

use bevy::prelude::*;

use crate::{
    game::{BestScore, GamePhase, Score},
    theme::widget,
};

pub(super) fn plugin(app: &mut App) {
    app.add_systems(OnEnter(GamePhase::GameOver), spawn_gameover_overlay);
}

fn spawn_gameover_overlay(mut commands: Commands, score: Res<Score>, best: Res<BestScore>) {
    commands.spawn((
        widget::ui_root("Game Over Overlay"),
        GlobalZIndex(2),
        DespawnOnExit(GamePhase::GameOver),
        children![
            widget::header("Game Over!"),
            widget::label(format!("Score: {}", score.0)),
            widget::label(format!("Best: {}", best.0)),
            widget::label("Click to play!"),
        ],
    ));
}
