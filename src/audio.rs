//! Audio using the Web Audio API
//!
//! Procedural sound effects plus a looping background track. Audio is a side
//! channel: it reacts to game events but never feeds back into the simulation.

use web_sys::{AudioContext, GainNode, HtmlAudioElement, OscillatorNode, OscillatorType};

use crate::settings::Settings;
use crate::sim::{GameEvent, ObstacleKind};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Player left the ground
    Jump,
    /// Burger eaten
    CollectBurger,
    /// Chocolate eaten
    CollectChocolate,
    /// Ran into a crate
    GameOver,
}

impl SoundEffect {
    /// The cue for a simulation event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Jumped => Some(Self::Jump),
            GameEvent::Collected { kind: ObstacleKind::Burger, .. } => Some(Self::CollectBurger),
            GameEvent::Collected { kind: ObstacleKind::Chocolate, .. } => {
                Some(Self::CollectChocolate)
            }
            GameEvent::GameOver { .. } => Some(Self::GameOver),
            _ => None,
        }
    }
}

/// Audio manager for the game
pub struct AudioManager {
    ctx: Option<AudioContext>,
    music: Option<HtmlAudioElement>,
    settings: Settings,
}

impl AudioManager {
    pub fn new(settings: Settings, music_src: &str) -> Self {
        // Try to create audio context (may fail if not in secure context)
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - effects disabled");
        }
        let music = match HtmlAudioElement::new_with_src(music_src) {
            Ok(el) => {
                el.set_loop(true);
                Some(el)
            }
            Err(e) => {
                log::warn!("Background music unavailable: {:?}", e);
                None
            }
        };
        let manager = Self {
            ctx,
            music,
            settings,
        };
        manager.apply_music_volume();
        manager
    }

    pub fn is_muted(&self) -> bool {
        self.settings.muted
    }

    /// Flip mute, persist it, and return the new state
    pub fn toggle_mute(&mut self) -> bool {
        let muted = self.settings.toggle_mute();
        self.apply_music_volume();
        self.settings.save();
        log::info!("Audio {}", if muted { "muted" } else { "unmuted" });
        muted
    }

    /// Start the background track (must follow a user gesture)
    pub fn start_music(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
        if let Some(music) = &self.music {
            if let Err(e) = music.play() {
                log::warn!("Music playback refused: {:?}", e);
            }
        }
    }

    fn apply_music_volume(&self) {
        if let Some(music) = &self.music {
            music.set_muted(self.settings.muted);
            music.set_volume(self.settings.effective_music_volume() as f64);
        }
    }

    /// Play the cue for an event, if any
    pub fn on_event(&self, event: &GameEvent) {
        if let Some(effect) = SoundEffect::for_event(event) {
            self.play(effect);
        }
    }

    /// Play a sound effect
    pub fn play(&self, effect: SoundEffect) {
        let vol = self.settings.effective_sfx_volume();
        if vol <= 0.0 {
            return;
        }

        let Some(ctx) = &self.ctx else { return };

        // Resume context if suspended (browsers require user gesture)
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        match effect {
            SoundEffect::Jump => self.play_jump(ctx, vol),
            SoundEffect::CollectBurger => self.play_collect(ctx, vol, &[520.0, 780.0]),
            SoundEffect::CollectChocolate => self.play_collect(ctx, vol, &[660.0, 880.0, 1100.0]),
            SoundEffect::GameOver => self.play_game_over(ctx, vol),
        }
    }

    /// Create an oscillator with gain envelope
    fn create_osc(
        &self,
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    /// Jump - rising chirp
    fn play_jump(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 220.0, OscillatorType::Triangle) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.3, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.18)
            .ok();
        osc.frequency().set_value_at_time(220.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(660.0, t + 0.12)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.2).ok();
    }

    /// Collect - quick ascending arpeggio
    fn play_collect(&self, ctx: &AudioContext, vol: f32, notes: &[f32]) {
        for (i, freq) in notes.iter().enumerate() {
            let delay = i as f64 * 0.06;
            if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Sine) {
                let t = ctx.current_time() + delay;
                gain.gain().set_value_at_time(vol * 0.25, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.12)
                    .ok();
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + 0.15).ok();
            }
        }
    }

    /// Game over - sad descending
    fn play_game_over(&self, ctx: &AudioContext, vol: f32) {
        for (i, freq) in [400.0, 350.0, 300.0, 200.0].iter().enumerate() {
            let delay = i as f64 * 0.2;
            if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Sine) {
                let t = ctx.current_time() + delay;
                gain.gain().set_value_at_time(vol * 0.3, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.3)
                    .ok();
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + 0.4).ok();
            }
        }
    }
}
