//! Per-step collision detection and scoring.
//!
//! Runs once per fixed step after physics and obstacle movement. Collision
//! and passing are independent checks in the same pass: a pipe can be scored
//! and still end the game on the same step if the bird clips its rectangle.

use bevy::prelude::*;

use super::{
    SimulationSet,
    bird::{BIRD_X, Bird},
    pipe::Pipe,
    state::{BestScore, GamePhase, Score, settle_best},
};

pub(super) fn plugin(app: &mut App) {
    app.add_systems(FixedUpdate, evaluate.in_set(SimulationSet::Evaluate));
}

/// Axis-aligned overlap with open intervals: rectangles that merely touch
/// along an edge do not collide.
fn rects_overlap(a: Rect, b: Rect) -> bool {
    !a.intersect(b).is_empty()
}

/// Test the bird against every pipe and the screen bounds, and award points
/// for pipes passed this step.
fn evaluate(
    bird_query: Query<&Bird>,
    mut pipe_query: Query<&mut Pipe>,
    mut score: ResMut<Score>,
    mut best: ResMut<BestScore>,
    mut next_phase: ResMut<NextState<GamePhase>>,
) {
    let Ok(bird) = bird_query.single() else {
        return;
    };

    let collider = bird.collider();
    let mut crashed = bird.hits_bounds();

    for mut pipe in &mut pipe_query {
        if rects_overlap(collider, pipe.top_rect()) || rects_overlap(collider, pipe.bottom_rect())
        {
            crashed = true;
        }

        if pipe.try_pass(BIRD_X) {
            score.0 += 1;
            info!("Passed a pipe, score is now {}", score.0);
        }
    }

    if crashed {
        info!("Bird crashed with a score of {}", score.0);
        settle_best(&score, &mut best);
        next_phase.set(GamePhase::GameOver);
    }
}

#[cfg(test)]
mod tests {
    use bevy::state::app::StatesPlugin;

    use super::*;
    use crate::game::{pipe::PIPE_GAP, state::simulation_active};

    /// A headless app running the evaluator under the real run condition.
    fn test_app() -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, StatesPlugin));
        app.init_state::<GamePhase>();
        app.init_resource::<Score>();
        app.init_resource::<BestScore>();
        app.configure_sets(FixedUpdate, SimulationSet::Evaluate.run_if(simulation_active));
        app.add_systems(FixedUpdate, evaluate.in_set(SimulationSet::Evaluate));
        app
    }

    /// An app in the Playing phase with a bird wedged into a pipe: the
    /// pipe straddles the bird's x position and its gap sits well below,
    /// so the collider overlaps the top rectangle.
    fn crashing_app() -> App {
        let mut app = test_app();
        app.update();

        app.world_mut()
            .resource_mut::<NextState<GamePhase>>()
            .set(GamePhase::Playing);
        app.update();

        app.world_mut().spawn(Bird::default());
        app.world_mut().spawn(Pipe {
            x: BIRD_X,
            gap_center: 450.0,
            passed: false,
        });
        app.world_mut().resource_mut::<Score>().0 = 2;
        app
    }

    #[test]
    fn crash_transitions_to_game_over_and_settles_best() {
        let mut app = crashing_app();

        app.world_mut().run_schedule(FixedUpdate);
        assert!(matches!(
            *app.world().resource::<NextState<GamePhase>>(),
            NextState::Pending(GamePhase::GameOver)
        ));
        assert_eq!(app.world().resource::<BestScore>().0, 2);

        app.update();
        let phase = *app.world().resource::<State<GamePhase>>().get();
        assert_eq!(phase, GamePhase::GameOver);
    }

    #[test]
    fn no_scoring_after_a_fatal_collision() {
        let mut app = crashing_app();

        // First fixed step of the frame: the crash.
        app.world_mut().run_schedule(FixedUpdate);
        assert_eq!(app.world().resource::<Score>().0, 2);

        // A pipe slides behind the bird before the next step, as if the
        // stream had kept scrolling.
        app.world_mut().spawn(Pipe {
            x: BIRD_X - 1.0,
            gap_center: 300.0,
            passed: false,
        });

        // A catch-up step in the same frame, before the transition applies,
        // must not simulate: the dead session scores nothing.
        app.world_mut().run_schedule(FixedUpdate);
        assert_eq!(app.world().resource::<Score>().0, 2);

        // The overlay reads a settled best, equal to the final score.
        app.update();
        assert_eq!(app.world().resource::<Score>().0, 2);
        assert_eq!(app.world().resource::<BestScore>().0, 2);
    }

    #[test]
    fn overlapping_rects_collide() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 15.0, 15.0);
        assert!(rects_overlap(a, b));
        assert!(rects_overlap(b, a));
    }

    #[test]
    fn touching_edges_do_not_collide() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 20.0, 10.0);
        assert!(!rects_overlap(a, b));

        let c = Rect::new(0.0, 10.0, 10.0, 20.0);
        assert!(!rects_overlap(a, c));
    }

    #[test]
    fn bird_centered_in_the_gap_is_safe() {
        let bird = Bird::default();
        let collider = bird.collider();

        // Gap centered on the bird, pipe straddling the bird's x position.
        let mut pipe = Pipe::new(collider.center().y);
        pipe.x = BIRD_X;

        assert!(!rects_overlap(collider, pipe.top_rect()));
        assert!(!rects_overlap(collider, pipe.bottom_rect()));
    }

    #[test]
    fn bird_above_the_gap_hits_the_top_pipe() {
        let mut bird = Bird::default();
        let mut pipe = Pipe::new(300.0);
        pipe.x = BIRD_X;

        // Put the collider above the gap's top edge.
        bird.y = 300.0 - PIPE_GAP / 2.0 - 40.0;
        assert!(rects_overlap(bird.collider(), pipe.top_rect()));
        assert!(!rects_overlap(bird.collider(), pipe.bottom_rect()));
    }

    #[test]
    fn bird_below_the_gap_hits_the_bottom_pipe() {
        let mut bird = Bird::default();
        let mut pipe = Pipe::new(300.0);
        pipe.x = BIRD_X;

        bird.y = 300.0 + PIPE_GAP / 2.0 + 10.0;
        assert!(rects_overlap(bird.collider(), pipe.bottom_rect()));
        assert!(!rects_overlap(bird.collider(), pipe.top_rect()));
    }

    #[test]
    fn distant_pipe_does_not_collide() {
        let bird = Bird::default();
        let pipe = Pipe::new(300.0);
        assert!(!rects_overlap(bird.collider(), pipe.top_rect()));
        assert!(!rects_overlap(bird.collider(), pipe.bottom_rect()));
    }
}
