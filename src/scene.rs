//! Scene flow: Start -> Game -> Game Over
//!
//! A `Session` owns the current scene, the live run (if any) and the
//! leaderboard. Storage is injected so the flow runs the same in the browser,
//! natively and in tests.

use glam::Vec2;

use crate::consts::SIM_DT;
use crate::highscores::HighScores;
use crate::platform::storage::Storage;
use crate::sim::{GameEvent, GameState, TickInput, tick};
use crate::tuning::Tuning;

/// Result of a finished run, shown on the game over screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Whole seconds survived plus bonuses
    pub final_time: u64,
    /// Best score after this run was recorded
    pub high_score: u64,
    /// This run beat the previous best
    pub new_best: bool,
    /// Leaderboard placement, if any
    pub rank: Option<usize>,
}

/// Which screen is active
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scene {
    Start,
    Game,
    GameOver(RunSummary),
}

impl Scene {
    pub fn name(&self) -> &'static str {
        match self {
            Scene::Start => "start",
            Scene::Game => "game",
            Scene::GameOver(_) => "game-over",
        }
    }
}

/// Button presses that move between scenes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiAction {
    /// Start screen play button
    Play,
    /// Game over "Play Again"
    PlayAgain,
    /// Game over "Exit" back to the start screen
    Exit,
}

pub struct Session<S: Storage> {
    scene: Scene,
    game: Option<GameState>,
    high_scores: HighScores,
    /// Best score when the current run started (what the HUD shows)
    run_high_score: u64,
    tuning: Tuning,
    world: Vec2,
    storage: S,
}

impl<S: Storage> Session<S> {
    pub fn new(storage: S, tuning: Tuning, world: Vec2) -> Self {
        let high_scores = HighScores::load(&storage);
        Self {
            scene: Scene::Start,
            game: None,
            run_high_score: high_scores.best(),
            high_scores,
            tuning,
            world,
            storage,
        }
    }

    pub fn scene(&self) -> Scene {
        self.scene
    }

    pub fn game(&self) -> Option<&GameState> {
        self.game.as_ref()
    }

    pub fn high_scores(&self) -> &HighScores {
        &self.high_scores
    }

    pub fn run_high_score(&self) -> u64 {
        self.run_high_score
    }

    pub fn world(&self) -> Vec2 {
        self.world
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    /// Apply a button press; returns true if the scene changed
    pub fn apply(&mut self, action: UiAction, seed: u64) -> bool {
        match (self.scene, action) {
            (Scene::Start, UiAction::Play) | (Scene::GameOver(_), UiAction::PlayAgain) => {
                self.start_run(seed);
                true
            }
            (Scene::GameOver(_), UiAction::Exit) => {
                self.game = None;
                self.scene = Scene::Start;
                log::info!("Back to start screen");
                true
            }
            (scene, action) => {
                log::warn!("Ignoring {:?} in {} scene", action, scene.name());
                false
            }
        }
    }

    fn start_run(&mut self, seed: u64) {
        self.run_high_score = self.high_scores.best();
        self.game = Some(GameState::new(seed, self.world, self.tuning.clone()));
        self.scene = Scene::Game;
        log::info!("Run started with seed: {}", seed);
    }

    /// Advance the live run by one fixed step
    ///
    /// Returns the events produced. A capture finishes the run and switches
    /// to the game over scene.
    pub fn tick(&mut self, input: &TickInput, timestamp: f64) -> Vec<GameEvent> {
        if self.scene != Scene::Game {
            return Vec::new();
        }
        let Some(game) = self.game.as_mut() else {
            return Vec::new();
        };

        tick(game, input, SIM_DT);
        let events = game.drain_events();

        if game.is_over() {
            let score = game.score;
            self.finish_run(score, timestamp);
        }

        events
    }

    /// Record the score and show the summary
    fn finish_run(&mut self, score: u64, timestamp: f64) {
        let previous_best = self.high_scores.best();
        let new_best = score > previous_best;
        let rank = self.high_scores.add_score(score, timestamp);

        if rank.is_some() {
            if let Err(e) = self.high_scores.save(&mut self.storage) {
                log::warn!("Failed to save high scores: {}", e);
            }
        }

        let summary = RunSummary {
            final_time: score,
            high_score: self.high_scores.best(),
            new_best,
            rank,
        };
        log::info!(
            "Run over: survived {}s (best {}, rank {:?})",
            summary.final_time,
            summary.high_score,
            summary.rank
        );
        self.scene = Scene::GameOver(summary);
    }

    /// Window size changed
    pub fn resize(&mut self, world: Vec2) {
        self.world = world;
        if let Some(game) = self.game.as_mut() {
            game.resize(world);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::platform::KeyState;
    use crate::platform::storage::MemoryStorage;
    use crate::sim::body::Body;
    use crate::sim::{GamePhase, Skeleton, SkeletonKind};

    fn session() -> Session<MemoryStorage> {
        let tuning = Tuning {
            static_count: 0,
            wanderer_count: 0,
            chaser_count: 0,
            ..Default::default()
        };
        Session::new(MemoryStorage::new(), tuning, Vec2::new(800.0, 600.0))
    }

    /// Drop a skeleton on the player so the next tick ends the run
    fn ambush(session: &mut Session<MemoryStorage>) {
        let game = session.game.as_mut().unwrap();
        let id = game.next_entity_id();
        let pos = game.player.pos();
        game.skeletons.push(Skeleton {
            id,
            kind: SkeletonKind::Wanderer,
            body: Body::new(pos, SKELETON_SIZE),
        });
    }

    fn survive(session: &mut Session<MemoryStorage>, seconds: u32) {
        for _ in 0..(seconds * 120) {
            session.tick(&TickInput::default(), 0.0);
        }
    }

    #[test]
    fn test_starts_on_title() {
        let session = session();
        assert_eq!(session.scene(), Scene::Start);
        assert!(session.game().is_none());
    }

    #[test]
    fn test_scene_transitions() {
        let mut session = session();
        assert!(!session.apply(UiAction::PlayAgain, 1));
        assert!(!session.apply(UiAction::Exit, 1));
        assert!(session.apply(UiAction::Play, 1));
        assert_eq!(session.scene(), Scene::Game);
        assert!(!session.apply(UiAction::Play, 2));

        ambush(&mut session);
        session.tick(&TickInput::default(), 0.0);
        assert!(matches!(session.scene(), Scene::GameOver(_)));

        assert!(session.apply(UiAction::Exit, 3));
        assert_eq!(session.scene(), Scene::Start);
        assert!(session.game().is_none());
    }

    #[test]
    fn test_new_best_is_persisted() {
        let mut session = session();
        session.apply(UiAction::Play, 1);
        survive(&mut session, 3);
        ambush(&mut session);
        let events = session.tick(&TickInput::default(), 1234.0);
        assert!(events.contains(&GameEvent::PlayerCaught { score: 3 }));

        let Scene::GameOver(summary) = session.scene() else {
            panic!("expected game over");
        };
        assert_eq!(summary.final_time, 3);
        assert_eq!(summary.high_score, 3);
        assert!(summary.new_best);
        assert_eq!(summary.rank, Some(1));

        // A fresh session sees the saved score
        let storage = session.storage_mut().clone();
        let reloaded = Session::new(storage, Tuning::default(), Vec2::new(800.0, 600.0));
        assert_eq!(reloaded.high_scores().best(), 3);
        assert_eq!(reloaded.run_high_score(), 3);
    }

    #[test]
    fn test_worse_run_keeps_high_score() {
        let mut session = session();
        session.apply(UiAction::Play, 1);
        survive(&mut session, 2);
        ambush(&mut session);
        session.tick(&TickInput::default(), 0.0);

        session.apply(UiAction::PlayAgain, 2);
        assert_eq!(session.run_high_score(), 2);
        survive(&mut session, 1);
        ambush(&mut session);
        session.tick(&TickInput::default(), 0.0);

        let Scene::GameOver(summary) = session.scene() else {
            panic!("expected game over");
        };
        assert_eq!(summary.final_time, 1);
        assert_eq!(summary.high_score, 2);
        assert!(!summary.new_best);
        assert_eq!(summary.rank, Some(2));
    }

    #[test]
    fn test_zero_score_run_is_not_recorded() {
        let mut session = session();
        session.apply(UiAction::Play, 1);
        ambush(&mut session);
        session.tick(&TickInput::default(), 0.0);
        let Scene::GameOver(summary) = session.scene() else {
            panic!("expected game over");
        };
        assert_eq!(summary.final_time, 0);
        assert!(!summary.new_best);
        assert_eq!(summary.rank, None);
        assert!(session.high_scores().is_empty());
    }

    #[test]
    fn test_paused_run_does_not_score() {
        let mut session = session();
        session.apply(UiAction::Play, 1);
        let pause = TickInput {
            pause: true,
            ..Default::default()
        };
        session.tick(&pause, 0.0);
        survive(&mut session, 2);
        let game = session.game().unwrap();
        assert_eq!(game.phase, GamePhase::Paused);
        assert_eq!(game.score, 0);
    }

    #[test]
    fn test_menu_pause_key_does_not_reach_next_run() {
        let mut session = session();
        let mut keys = KeyState::new();

        // Escape on the start screen, then Play
        keys.key_down("Escape");
        assert!(session.apply(UiAction::Play, 1));
        keys.release_all();
        session.tick(&keys.take_input(), 0.0);
        assert_eq!(session.game().unwrap().phase, GamePhase::Playing);

        // Same from the game over screen
        ambush(&mut session);
        session.tick(&keys.take_input(), 0.0);
        keys.key_down("p");
        assert!(session.apply(UiAction::PlayAgain, 2));
        keys.release_all();
        session.tick(&keys.take_input(), 0.0);
        assert_eq!(session.game().unwrap().phase, GamePhase::Playing);
    }

    #[test]
    fn test_resize_applies_to_live_run() {
        let mut session = session();
        session.apply(UiAction::Play, 1);
        session.resize(Vec2::new(200.0, 100.0));
        assert_eq!(session.world(), Vec2::new(200.0, 100.0));
        let game = session.game().unwrap();
        assert_eq!(game.world, Vec2::new(200.0, 100.0));
        assert!(game.player.body.aabb().max.x <= 200.0);
    }
}
