//! The ground strip at the bottom of the screen.
//!
//! Pure scenery. The matching collision boundary lives in the bird's bounds
//! check, which stops the bird at the top of this strip.

use bevy::prelude::*;

use super::{GROUND_HEIGHT, WINDOW_HEIGHT, WINDOW_WIDTH, to_world};
use crate::theme::palette;

pub(super) fn plugin(app: &mut App) {
    app.add_systems(Startup, spawn_ground);
}

/// Horizontal distance between the diagonal stripes.
const STRIPE_SPACING: f32 = 30.0;

/// Horizontal run of each stripe over the height of the strip.
const STRIPE_RUN: f32 = 15.0;

fn spawn_ground(mut commands: Commands) {
    let stripe_length = (STRIPE_RUN.powi(2) + GROUND_HEIGHT.powi(2)).sqrt();
    let stripe_tilt = (STRIPE_RUN / GROUND_HEIGHT).atan();

    commands
        .spawn((
            Name::new("Ground"),
            Sprite::from_color(palette::GROUND, Vec2::new(WINDOW_WIDTH, GROUND_HEIGHT)),
            Transform::from_translation(to_world(
                WINDOW_WIDTH / 2.0,
                WINDOW_HEIGHT - GROUND_HEIGHT / 2.0,
                1.0,
            )),
        ))
        .with_children(|parent| {
            let mut x = 0.0;
            while x < WINDOW_WIDTH {
                parent.spawn((
                    Name::new("Stripe"),
                    Sprite::from_color(palette::GROUND_STRIPE, Vec2::new(3.0, stripe_length)),
                    Transform::from_xyz(x + STRIPE_RUN / 2.0 - WINDOW_WIDTH / 2.0, 0.0, 0.1)
                        .with_rotation(Quat::from_rotation_z(stripe_tilt)),
                ));
                x += STRIPE_SPACING;
            }
        });
}
