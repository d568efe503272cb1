//! The player-controlled bird.
//!
//! The bird only ever moves vertically: gravity pulls it down every fixed
//! step and a jump overwrites its velocity with a fixed upward kick. Its
//! rotation and wing flapping are derived from the simulation state and
//! applied to the transform by a separate presentation system.

use bevy::prelude::*;

use super::{GROUND_HEIGHT, SimulationSet, WINDOW_HEIGHT, WINDOW_WIDTH, to_world};
use crate::{AppSystems, theme::palette};

pub(super) fn plugin(app: &mut App) {
    app.register_type::<Bird>();

    // The idle bird shown on the ready screen.
    app.add_systems(Startup, spawn_initial_bird);

    app.add_systems(FixedUpdate, integrate_bird.in_set(SimulationSet::Physics));

    // Presentation runs every render frame, including while frozen on the
    // game over screen.
    app.add_systems(Update, sync_bird_transform.in_set(AppSystems::Update));
}

/// Downward acceleration in pixels per step, per step.
pub const GRAVITY: f32 = 0.25;

/// Velocity applied by a jump, in pixels per step (negative is up).
pub const JUMP_VELOCITY: f32 = -7.0;

/// Horizontal position of the bird. Fixed for the whole session.
pub const BIRD_X: f32 = WINDOW_WIDTH / 3.0;

/// Visual tuning: degrees of tilt per pixel-per-step of upward velocity.
const ROTATION_SCALE: f32 = 4.0;

/// Visual tuning: steepest nose-down tilt in degrees.
const ROTATION_MIN: f32 = -70.0;

/// Visual tuning: steepest nose-up tilt in degrees.
const ROTATION_MAX: f32 = 30.0;

/// Steps between wing up/down toggles.
const WING_FLAP_STEPS: u32 = 15;

/// Drawn sprite bounds.
const SPRITE_WIDTH: f32 = 40.0;
const SPRITE_HEIGHT: f32 = 30.0;

/// The collider is inset from the sprite bounds to be forgiving.
const COLLIDER_INSET: f32 = 5.0;
const COLLIDER_SIZE: f32 = 25.0;

/// The bird's simulation state, in screen coordinates (y grows downwards).
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct Bird {
    /// Top edge of the sprite bounds.
    pub y: f32,
    /// Vertical velocity in pixels per step.
    pub velocity: f32,
    /// Tilt in degrees, derived from velocity.
    pub angle: f32,
    /// Whether the wing is currently raised.
    pub wing_up: bool,
    /// Steps since the wing last toggled.
    animation_steps: u32,
}

impl Default for Bird {
    fn default() -> Self {
        Self {
            y: WINDOW_HEIGHT / 2.0,
            velocity: 0.0,
            angle: 0.0,
            wing_up: false,
            animation_steps: 0,
        }
    }
}

impl Bird {
    /// Overwrite the velocity with the fixed jump kick. Not additive: the
    /// result is the same regardless of how fast the bird was falling.
    pub fn jump(&mut self) {
        self.velocity = JUMP_VELOCITY;
        // Snap the nose up immediately; the next integration step takes over.
        self.angle = ROTATION_MAX;
    }

    /// Advance the bird by one fixed step. Position moves by the current
    /// velocity, then gravity accelerates the next step.
    pub fn integrate(&mut self) {
        self.y += self.velocity;
        self.velocity += GRAVITY;
        self.angle = (-self.velocity * ROTATION_SCALE).clamp(ROTATION_MIN, ROTATION_MAX);

        self.animation_steps += 1;
        if self.animation_steps >= WING_FLAP_STEPS {
            self.animation_steps = 0;
            self.wing_up = !self.wing_up;
        }
    }

    /// Axis-aligned collision rectangle, inset from the sprite bounds.
    pub fn collider(&self) -> Rect {
        Rect::new(
            BIRD_X + COLLIDER_INSET,
            self.y + COLLIDER_INSET,
            BIRD_X + COLLIDER_INSET + COLLIDER_SIZE,
            self.y + COLLIDER_INSET + COLLIDER_SIZE,
        )
    }

    /// Whether the collider pokes above the ceiling or below the ground line.
    pub fn hits_bounds(&self) -> bool {
        let collider = self.collider();
        collider.min.y < 0.0 || collider.max.y > WINDOW_HEIGHT - GROUND_HEIGHT
    }
}

/// Marker for the wing child entity, so the flap animation can move it.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
struct Wing;

fn spawn_initial_bird(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    spawn_bird(&mut commands, &mut meshes, &mut materials);
}

/// Spawn a fresh bird at the center of the screen.
///
/// The visual is composed from primitive meshes parented to the simulation
/// entity: body, eye, beak and a wing that bobs with the flap animation.
/// The whole hierarchy rotates with the bird's tilt.
pub fn spawn_bird(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<ColorMaterial>,
) -> Entity {
    let bird = Bird::default();
    let translation = to_world(
        BIRD_X + SPRITE_WIDTH / 2.0,
        bird.y + SPRITE_HEIGHT / 2.0,
        2.0,
    );

    commands
        .spawn((
            Name::new("Bird"),
            bird,
            Transform::from_translation(translation),
            Visibility::default(),
        ))
        .with_children(|parent| {
            parent.spawn((
                Name::new("Body"),
                Mesh2d(meshes.add(Ellipse::new(15.0, 15.0))),
                MeshMaterial2d(materials.add(ColorMaterial::from_color(palette::BIRD_BODY))),
                Transform::from_xyz(-5.0, 0.0, 0.0),
            ));
            parent.spawn((
                Name::new("Beak"),
                Mesh2d(meshes.add(Triangle2d::new(
                    Vec2::new(10.0, 0.0),
                    Vec2::new(20.0, 5.0),
                    Vec2::new(10.0, -5.0),
                ))),
                MeshMaterial2d(materials.add(ColorMaterial::from_color(palette::BIRD_BEAK))),
                Transform::from_xyz(0.0, 0.0, 0.1),
            ));
            parent.spawn((
                Name::new("Eye"),
                Mesh2d(meshes.add(Circle::new(6.0))),
                MeshMaterial2d(materials.add(ColorMaterial::from_color(palette::EYE_WHITE))),
                Transform::from_xyz(5.0, 5.0, 0.1),
            ));
            parent.spawn((
                Name::new("Pupil"),
                Mesh2d(meshes.add(Circle::new(3.0))),
                MeshMaterial2d(materials.add(ColorMaterial::from_color(palette::EYE_PUPIL))),
                Transform::from_xyz(5.0, 5.0, 0.2),
            ));
            parent.spawn((
                Name::new("Wing"),
                Wing,
                Mesh2d(meshes.add(Ellipse::new(7.5, 5.0))),
                MeshMaterial2d(materials.add(ColorMaterial::from_color(palette::BIRD_WING))),
                Transform::from_xyz(-7.5, 0.0, 0.3),
            ));
        })
        .id()
}

/// Apply gravity to the bird each fixed step.
fn integrate_bird(mut bird_query: Query<&mut Bird>) {
    for mut bird in &mut bird_query {
        bird.integrate();
    }
}

/// Copy the simulation state onto the render transform.
fn sync_bird_transform(
    mut bird_query: Query<(&Bird, &mut Transform)>,
    mut wing_query: Query<&mut Transform, (With<Wing>, Without<Bird>)>,
) {
    let Ok((bird, mut transform)) = bird_query.single_mut() else {
        return;
    };

    transform.translation = to_world(
        BIRD_X + SPRITE_WIDTH / 2.0,
        bird.y + SPRITE_HEIGHT / 2.0,
        2.0,
    );
    transform.rotation = Quat::from_rotation_z(bird.angle.to_radians());

    for mut wing in &mut wing_query {
        wing.translation.y = if bird.wing_up { 2.0 } else { 0.0 };
    }
}
