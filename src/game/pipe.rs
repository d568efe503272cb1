//! Pipe obstacles and the stream that spawns and recycles them.
//!
//! Each pipe is a pair of axis-aligned rectangles above and below a randomly
//! placed gap. Two rectangles keep the collision test to two AABB checks
//! instead of one non-convex shape. Pipes scroll left at a constant speed
//! and are despawned once fully off screen.

use std::time::Duration;

use bevy::prelude::*;
use rand::{Rng, SeedableRng, rngs::SmallRng};

use super::{SimulationSet, WINDOW_HEIGHT, WINDOW_WIDTH, to_world};
use crate::{AppSystems, theme::palette};

pub(super) fn plugin(app: &mut App) {
    app.register_type::<Pipe>();
    app.init_resource::<GameRng>();
    app.init_resource::<PipeSpawnTimer>();

    app.add_systems(
        FixedUpdate,
        (spawn_pipes, advance_pipes, recycle_pipes)
            .chain()
            .in_set(SimulationSet::Obstacles),
    );

    app.add_systems(Update, sync_pipe_transforms.in_set(AppSystems::Update));
}

/// Horizontal scroll speed in pixels per step.
pub const PIPE_SPEED: f32 = 3.0;

/// Width of a pipe in pixels.
pub const PIPE_WIDTH: f32 = 50.0;

/// Vertical size of the passable opening.
pub const PIPE_GAP: f32 = 150.0;

/// Interval between pipe spawns.
const SPAWN_INTERVAL: Duration = Duration::from_millis(1500);

/// The gap center is drawn at least this far from the top and bottom edges,
/// so neither rectangle degenerates to nothing.
const GAP_MARGIN: f32 = 200.0;

/// Size of the lip sprite at the gap-facing end of each pipe half.
const CAP_WIDTH: f32 = PIPE_WIDTH + 10.0;
const CAP_HEIGHT: f32 = 10.0;

/// Seeded random source for gap placement.
///
/// Kept as an explicit resource rather than a process-global generator so
/// simulation outcomes are reproducible under a fixed seed.
#[derive(Resource)]
pub struct GameRng(pub SmallRng);

impl Default for GameRng {
    fn default() -> Self {
        Self(SmallRng::from_os_rng())
    }
}

impl GameRng {
    /// A generator with a fixed seed, for reproducible runs.
    #[cfg(test)]
    pub fn seeded(seed: u64) -> Self {
        Self(SmallRng::seed_from_u64(seed))
    }
}

/// Repeating timer driving pipe spawns. Ticked on the fixed schedule, so the
/// spawn cadence is independent of the render rate.
#[derive(Resource, Debug)]
pub struct PipeSpawnTimer(pub Timer);

impl Default for PipeSpawnTimer {
    fn default() -> Self {
        Self(Timer::new(SPAWN_INTERVAL, TimerMode::Repeating))
    }
}

/// A single pipe obstacle, in screen coordinates.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct Pipe {
    /// Left edge. Decreases every step.
    pub x: f32,
    /// Vertical midpoint of the opening. Fixed at spawn.
    pub gap_center: f32,
    /// Set once the bird has passed this pipe, so it scores exactly once.
    pub passed: bool,
}

impl Pipe {
    /// A new pipe at the right screen edge.
    pub fn new(gap_center: f32) -> Self {
        Self {
            x: WINDOW_WIDTH,
            gap_center,
            passed: false,
        }
    }

    /// Scroll one step to the left.
    pub fn advance(&mut self) {
        self.x -= PIPE_SPEED;
    }

    /// The obstacle rectangle above the gap.
    pub fn top_rect(&self) -> Rect {
        Rect::new(
            self.x,
            0.0,
            self.x + PIPE_WIDTH,
            self.gap_center - PIPE_GAP / 2.0,
        )
    }

    /// The obstacle rectangle below the gap.
    pub fn bottom_rect(&self) -> Rect {
        Rect::new(
            self.x,
            self.gap_center + PIPE_GAP / 2.0,
            self.x + PIPE_WIDTH,
            WINDOW_HEIGHT,
        )
    }

    /// Whether the pipe's right edge has moved past the left screen edge.
    pub fn offscreen(&self) -> bool {
        self.x + PIPE_WIDTH < 0.0
    }

    /// Mark the pipe as passed if the bird is now ahead of it. Returns true
    /// the first time this happens and never again.
    pub fn try_pass(&mut self, bird_x: f32) -> bool {
        if !self.passed && self.x < bird_x {
            self.passed = true;
            true
        } else {
            false
        }
    }
}

/// Draw a gap center uniformly from the safe vertical band.
fn random_gap_center(rng: &mut impl Rng) -> f32 {
    rng.random_range(GAP_MARGIN..=WINDOW_HEIGHT - GAP_MARGIN)
}

/// Tick the spawn timer and append a new pipe when it fires.
fn spawn_pipes(
    mut commands: Commands,
    time: Res<Time>,
    mut timer: ResMut<PipeSpawnTimer>,
    mut rng: ResMut<GameRng>,
) {
    timer.0.tick(time.delta());
    if !timer.0.just_finished() {
        return;
    }

    let pipe = Pipe::new(random_gap_center(&mut rng.0));
    info!("Spawned pipe with gap center {:.0}", pipe.gap_center);
    spawn_pipe(&mut commands, pipe);
}

/// Spawn the pipe entity with its sprite children.
///
/// The parent carries the simulation state and scrolls horizontally; the
/// children are sized once at spawn since the gap never changes.
fn spawn_pipe(commands: &mut Commands, pipe: Pipe) {
    let top = pipe.top_rect();
    let bottom = pipe.bottom_rect();
    let translation = to_world(pipe.x + PIPE_WIDTH / 2.0, WINDOW_HEIGHT / 2.0, 0.0);

    // Screen y to child-local y, with the parent sitting at mid-screen.
    let local_y = |screen_y: f32| WINDOW_HEIGHT / 2.0 - screen_y;

    commands
        .spawn((
            Name::new("Pipe"),
            pipe,
            Transform::from_translation(translation),
            Visibility::default(),
        ))
        .with_children(|parent| {
            parent.spawn((
                Name::new("Top Pipe"),
                Sprite::from_color(palette::PIPE_GREEN, Vec2::new(PIPE_WIDTH, top.height())),
                Transform::from_xyz(0.0, local_y(top.height() / 2.0), 0.0),
            ));
            parent.spawn((
                Name::new("Top Cap"),
                Sprite::from_color(palette::PIPE_CAP, Vec2::new(CAP_WIDTH, CAP_HEIGHT)),
                Transform::from_xyz(0.0, local_y(top.max.y - CAP_HEIGHT / 2.0), 0.1),
            ));
            parent.spawn((
                Name::new("Bottom Pipe"),
                Sprite::from_color(palette::PIPE_GREEN, Vec2::new(PIPE_WIDTH, bottom.height())),
                Transform::from_xyz(0.0, local_y(bottom.min.y + bottom.height() / 2.0), 0.0),
            ));
            parent.spawn((
                Name::new("Bottom Cap"),
                Sprite::from_color(palette::PIPE_CAP, Vec2::new(CAP_WIDTH, CAP_HEIGHT)),
                Transform::from_xyz(0.0, local_y(bottom.min.y + CAP_HEIGHT / 2.0), 0.1),
            ));
        });
}

/// Scroll every pipe one step to the left.
fn advance_pipes(mut pipe_query: Query<&mut Pipe>) {
    for mut pipe in &mut pipe_query {
        pipe.advance();
    }
}

/// Despawn pipes whose right edge has left the screen.
fn recycle_pipes(mut commands: Commands, pipe_query: Query<(Entity, &Pipe)>) {
    for (entity, pipe) in &pipe_query {
        if pipe.offscreen() {
            info!("Recycled off-screen pipe");
            commands.entity(entity).despawn();
        }
    }
}

/// Copy the simulation position onto the render transform.
fn sync_pipe_transforms(mut pipe_query: Query<(&Pipe, &mut Transform)>) {
    for (pipe, mut transform) in &mut pipe_query {
        transform.translation.x = pipe.x + PIPE_WIDTH / 2.0 - WINDOW_WIDTH / 2.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_heights_account_for_the_whole_screen() {
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..100 {
            let pipe = Pipe::new(random_gap_center(&mut rng));
            let total = pipe.top_rect().height() + PIPE_GAP + pipe.bottom_rect().height();
            assert!((total - WINDOW_HEIGHT).abs() < 1e-3);
        }
    }

    #[test]
    fn gap_center_stays_inside_the_safe_band() {
        let mut rng = SmallRng::seed_from_u64(42);
        for _ in 0..100 {
            let gap = random_gap_center(&mut rng);
            assert!(gap >= GAP_MARGIN);
            assert!(gap <= WINDOW_HEIGHT - GAP_MARGIN);
        }
    }

    #[test]
    fn same_seed_gives_the_same_gaps() {
        let mut a = GameRng::seeded(123);
        let mut b = GameRng::seeded(123);
        for _ in 0..10 {
            assert_eq!(random_gap_center(&mut a.0), random_gap_center(&mut b.0));
        }
    }

    #[test]
    fn pipe_is_not_recycled_while_visible() {
        let mut pipe = Pipe::new(300.0);
        pipe.x = -PIPE_WIDTH + 0.1;
        assert!(!pipe.offscreen());

        pipe.x = -PIPE_WIDTH - 0.1;
        assert!(pipe.offscreen());
    }

    #[test]
    fn pipe_crosses_the_screen_in_150_steps() {
        let mut pipe = Pipe::new(300.0);
        for _ in 0..150 {
            pipe.advance();
            assert!(
                pipe.x + PIPE_WIDTH >= 0.0,
                "pipe left early at x={}",
                pipe.x
            );
        }
        // 400 - 150 * 3 = -50: right edge exactly on the screen edge.
        assert_eq!(pipe.x, -PIPE_WIDTH);
        assert!(!pipe.offscreen());

        pipe.advance();
        assert!(pipe.offscreen());
    }

    #[test]
    fn pass_is_counted_exactly_once() {
        let mut pipe = Pipe::new(300.0);
        assert!(!pipe.try_pass(100.0));

        pipe.x = 99.0;
        assert!(pipe.try_pass(100.0));
        assert!(!pipe.try_pass(100.0));

        pipe.advance();
        assert!(!pipe.try_pass(100.0));
    }

    #[test]
    fn pass_requires_strictly_smaller_x() {
        let mut pipe = Pipe::new(300.0);
        pipe.x = 100.0;
        assert!(!pipe.try_pass(100.0));
    }
}
