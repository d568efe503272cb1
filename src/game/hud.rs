//! The in-game score readout.

use bevy::prelude::*;

use super::state::Score;
use crate::{AppSystems, theme::palette};

pub(super) fn plugin(app: &mut App) {
    app.add_systems(Startup, spawn_score_hud);
    app.add_systems(Update, update_score_hud.in_set(AppSystems::Update));
}

/// Marker for the score text node.
#[derive(Component)]
struct ScoreLabel;

fn spawn_score_hud(mut commands: Commands) {
    commands.spawn((
        Name::new("Score HUD"),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(50.0),
            width: Val::Percent(100.0),
            justify_content: JustifyContent::Center,
            ..default()
        },
        GlobalZIndex(1),
        children![(
            Name::new("Score"),
            ScoreLabel,
            Text("0".to_string()),
            TextFont::from_font_size(48.0),
            TextColor(palette::HUD_TEXT),
        )],
    ));
}

fn update_score_hud(score: Res<Score>, mut label_query: Query<&mut Text, With<ScoreLabel>>) {
    if !score.is_changed() {
        return;
    }
    for mut text in &mut label_query {
        text.0 = score.0.to_string();
    }
}
