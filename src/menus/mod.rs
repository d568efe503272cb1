//! State-keyed UI overlays: the start prompt and the game over screen.

mod gameover;
mod ready;

use bevy::prelude::*;

pub(super) fn plugin(app: &mut App) {
    app.add_plugins((gameover::plugin, ready::plugin));
}
