//! Game loop controller
//!
//! Owns the session, the timestep and pending input. The host feeds it
//! lifecycle [`Command`]s and animation-frame timestamps; it answers each
//! frame with a draw list, HUD notifications and a [`LoopControl`].

use crate::render::{RenderSink, build_draw_list};
use crate::sim::{FrameInput, GameEvent, GamePhase, GameState, LoopControl, TimeStep, run_frame};
use crate::tuning::Tuning;

/// Commands delivered by input handlers, buttons and the asset gate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Begin the first run (start screen button)
    Start,
    /// Begin a new run from any phase
    Restart,
    /// Jump on the next frame
    RequestJump,
    /// Every required asset is decoded
    AllAssetsReady,
}

/// Consumer of score and game-over notifications (score label, game-over panel)
pub trait HudSink {
    fn score_changed(&mut self, score: u32);
    fn game_over(&mut self, final_score: u32);
    /// Anything else the simulation reported (audio cues)
    fn event(&mut self, _event: &GameEvent) {}
}

/// HUD that ignores everything
impl HudSink for () {
    fn score_changed(&mut self, _score: u32) {}
    fn game_over(&mut self, _final_score: u32) {}
}

pub struct Game {
    pub state: GameState,
    timestep: TimeStep,
    input: FrameInput,
    assets_ready: bool,
    start_requested: bool,
}

impl Game {
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let timestep = TimeStep::new(tuning.max_frame_delta_ms);
        let state = GameState::new(seed, tuning);
        for (kind, p) in state.spawner.table.probabilities() {
            log::info!("Spawn chance {}: {:.0}%", kind.as_str(), p * 100.0);
        }
        Self {
            state,
            timestep,
            input: FrameInput::default(),
            assets_ready: false,
            start_requested: false,
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn is_running(&self) -> bool {
        self.state.phase == GamePhase::Running
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    /// Apply a command. `seed` is used if the command begins a new run.
    pub fn handle(&mut self, command: Command, seed: u64) {
        match command {
            Command::RequestJump => {
                if self.is_running() {
                    self.input.jump = true;
                }
            }
            Command::AllAssetsReady => {
                self.assets_ready = true;
                if self.start_requested {
                    self.begin(seed);
                }
            }
            Command::Start => {
                if self.state.phase != GamePhase::Waiting {
                    log::warn!("Start ignored in phase {:?}", self.state.phase);
                } else if self.assets_ready {
                    self.begin(seed);
                } else {
                    log::info!("Start requested; waiting for assets");
                    self.start_requested = true;
                }
            }
            Command::Restart => {
                if self.assets_ready {
                    self.begin(seed);
                } else {
                    self.start_requested = true;
                }
            }
        }
    }

    fn begin(&mut self, seed: u64) {
        self.start_requested = false;
        self.state.restart(seed);
        self.timestep.reset();
        self.input = FrameInput::default();
        // Delivered with the first frame so the score label resets through the HUD
        self.state.events.push(GameEvent::ScoreChanged(0));
        log::info!("Run started with seed {}", seed);
    }

    /// Run one animation frame at host time `timestamp_ms`.
    ///
    /// Returns [`LoopControl::Stop`] when not running or when this frame ended
    /// the run; the host should then stop requesting frames.
    pub fn frame(
        &mut self,
        timestamp_ms: f64,
        renderer: &mut impl RenderSink,
        hud: &mut impl HudSink,
    ) -> LoopControl {
        if !self.is_running() {
            return LoopControl::Stop;
        }

        let delta_ms = self.timestep.advance(timestamp_ms);
        let input = std::mem::take(&mut self.input);
        let control = run_frame(&mut self.state, &input, delta_ms);

        renderer.present(&build_draw_list(&self.state));

        for event in self.state.drain_events() {
            match event {
                GameEvent::ScoreChanged(score) => hud.score_changed(score),
                GameEvent::GameOver { final_score } => hud.game_over(final_score),
                _ => {}
            }
            hud.event(&event);
        }

        control
    }
}
