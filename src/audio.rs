//! Sound effects and background music
//!
//! Game events map to a handful of short procedural sounds; a soft drone
//! loops while the game timer runs. Playback uses the Web Audio API and only
//! exists on wasm; the event mapping and music cue are shared.

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// A cell turned green
    Blop,
    /// Caught with lives to spare
    Caught,
    /// Board filled
    LevelUp,
    /// Last life lost, dropped a level
    LevelDown,
    /// Last life lost on level 1
    GameOver,
    /// Passed the stored high score
    HighScore,
}

impl SoundEffect {
    /// The sound for an event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::CellClaimed { .. } => Some(SoundEffect::Blop),
            GameEvent::Captured { lives_left: 0 } => None,
            GameEvent::Captured { .. } => Some(SoundEffect::Caught),
            GameEvent::LevelComplete { .. } => Some(SoundEffect::LevelUp),
            GameEvent::LevelLost { .. } => Some(SoundEffect::LevelDown),
            GameEvent::GameOver { .. } => Some(SoundEffect::GameOver),
            GameEvent::HighScore { .. } => Some(SoundEffect::HighScore),
            GameEvent::RoundReset => None,
        }
    }

    /// Sounds for a batch of events, each effect at most once
    pub fn for_events(events: &[GameEvent]) -> Vec<Self> {
        let mut effects: Vec<Self> = Vec::new();
        for effect in events.iter().filter_map(Self::for_event) {
            if !effects.contains(&effect) {
                effects.push(effect);
            }
        }
        effects
    }
}

/// Transition for the background loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MusicChange {
    Start,
    Stop,
}

/// Tracks whether the background loop should be playing: only while the
/// timer runs and the music volume is audible.
#[derive(Debug, Clone, Default)]
pub struct MusicCue {
    running: bool,
    volume: f32,
    playing: bool,
}

impl MusicCue {
    pub fn new(volume: f32) -> Self {
        Self {
            volume,
            ..Self::default()
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Timer started or stopped
    pub fn set_running(&mut self, running: bool) -> Option<MusicChange> {
        self.running = running;
        self.reconcile()
    }

    pub fn set_volume(&mut self, volume: f32) -> Option<MusicChange> {
        self.volume = volume;
        self.reconcile()
    }

    fn reconcile(&mut self) -> Option<MusicChange> {
        let wanted = self.running && self.volume > 0.0;
        if wanted == self.playing {
            return None;
        }
        self.playing = wanted;
        Some(if wanted {
            MusicChange::Start
        } else {
            MusicChange::Stop
        })
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::{MusicChange, MusicCue, SoundEffect};

    /// Drone pitches (A2 and E3)
    const DRONE_FREQS: [f32; 2] = [110.0, 164.81];
    /// Slow swell applied to the drone level (Hz)
    const DRONE_SWELL_HZ: f32 = 0.25;
    /// Drone gain at full music volume
    const DRONE_LEVEL: f32 = 0.06;

    /// Nodes of the running background loop
    struct Drone {
        oscs: Vec<OscillatorNode>,
        gain: GainNode,
    }

    /// Audio manager for the game
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        volume: f32,
        music_volume: f32,
        cue: MusicCue,
        drone: Option<Drone>,
    }

    impl AudioManager {
        pub fn new(volume: f32, music_volume: f32) -> Self {
            // Fails outside a secure context
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            let music_volume = music_volume.clamp(0.0, 1.0);
            Self {
                ctx,
                volume: volume.clamp(0.0, 1.0),
                music_volume,
                cue: MusicCue::new(music_volume),
                drone: None,
            }
        }

        pub fn set_volume(&mut self, volume: f32) {
            self.volume = volume.clamp(0.0, 1.0);
        }

        pub fn set_music_volume(&mut self, volume: f32) {
            self.music_volume = volume.clamp(0.0, 1.0);
            if let (Some(ctx), Some(drone)) = (&self.ctx, &self.drone) {
                drone
                    .gain
                    .gain()
                    .set_value_at_time(self.music_volume * DRONE_LEVEL, ctx.current_time())
                    .ok();
            }
            let change = self.cue.set_volume(self.music_volume);
            self.apply(change);
        }

        /// Follow the game timer: loop while running, silent while paused
        pub fn sync_music(&mut self, running: bool) {
            let change = self.cue.set_running(running);
            self.apply(change);
        }

        fn apply(&mut self, change: Option<MusicChange>) {
            match change {
                Some(MusicChange::Start) => self.start_music(),
                Some(MusicChange::Stop) => self.stop_music(),
                None => {}
            }
        }

        fn start_music(&mut self) {
            let Some(ctx) = &self.ctx else { return };
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }
            let Ok(gain) = ctx.create_gain() else { return };
            gain.gain().set_value(self.music_volume * DRONE_LEVEL);
            if gain.connect_with_audio_node(&ctx.destination()).is_err() {
                return;
            }

            let mut oscs = Vec::with_capacity(DRONE_FREQS.len() + 1);
            for freq in DRONE_FREQS {
                let Ok(osc) = ctx.create_oscillator() else { continue };
                osc.set_type(OscillatorType::Sine);
                osc.frequency().set_value(freq);
                if osc.connect_with_audio_node(&gain).is_ok() && osc.start().is_ok() {
                    oscs.push(osc);
                }
            }

            // Low-frequency swell on the drone level
            if let (Ok(lfo), Ok(depth)) = (ctx.create_oscillator(), ctx.create_gain()) {
                lfo.frequency().set_value(DRONE_SWELL_HZ);
                depth.gain().set_value(self.music_volume * DRONE_LEVEL * 0.5);
                if lfo.connect_with_audio_node(&depth).is_ok()
                    && depth.connect_with_audio_param(&gain.gain()).is_ok()
                    && lfo.start().is_ok()
                {
                    oscs.push(lfo);
                }
            }

            log::debug!("Background music started");
            self.drone = Some(Drone { oscs, gain });
        }

        fn stop_music(&mut self) {
            let Some(drone) = self.drone.take() else { return };
            let Some(ctx) = &self.ctx else { return };
            let t = ctx.current_time();
            let level = drone.gain.gain();
            level.cancel_scheduled_values(t).ok();
            level.set_value_at_time(level.value(), t).ok();
            level.linear_ramp_to_value_at_time(0.0, t + 0.2).ok();
            for osc in &drone.oscs {
                osc.stop_with_when(t + 0.25).ok();
            }
            log::debug!("Background music stopped");
        }

        /// Play a sound effect; fire and forget
        pub fn play(&self, effect: SoundEffect) {
            let vol = self.volume;
            if vol <= 0.0 {
                return;
            }
            let Some(ctx) = &self.ctx else { return };

            // Browsers keep the context suspended until a user gesture
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            match effect {
                SoundEffect::Blop => self.play_blop(ctx, vol),
                SoundEffect::Caught => {
                    self.play_notes(ctx, vol * 0.35, &[300.0, 220.0], 0.12, OscillatorType::Square)
                }
                SoundEffect::LevelUp => self.play_notes(
                    ctx,
                    vol * 0.3,
                    &[400.0, 500.0, 600.0, 800.0],
                    0.1,
                    OscillatorType::Triangle,
                ),
                SoundEffect::LevelDown => self.play_notes(
                    ctx,
                    vol * 0.3,
                    &[600.0, 450.0, 300.0],
                    0.15,
                    OscillatorType::Sawtooth,
                ),
                SoundEffect::GameOver => self.play_notes(
                    ctx,
                    vol * 0.3,
                    &[400.0, 350.0, 300.0, 200.0],
                    0.2,
                    OscillatorType::Sine,
                ),
                SoundEffect::HighScore => self.play_notes(
                    ctx,
                    vol * 0.25,
                    &[500.0, 600.0, 700.0, 800.0, 1000.0],
                    0.08,
                    OscillatorType::Triangle,
                ),
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

        /// Short pitch drop, like a water droplet
        fn play_blop(&self, ctx: &AudioContext, vol: f32) {
            let Some((osc, gain)) = self.create_osc(ctx, 900.0, OscillatorType::Sine) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.3, t).ok();
            gain.gain().exponential_ramp_to_value_at_time(0.01, t + 0.08).ok();
            osc.frequency().set_value_at_time(900.0, t).ok();
            osc.frequency().exponential_ramp_to_value_at_time(300.0, t + 0.08).ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.1).ok();
        }

        /// Evenly spaced notes, each with a quick decay
        fn play_notes(
            &self,
            ctx: &AudioContext,
            level: f32,
            freqs: &[f32],
            spacing: f64,
            osc_type: OscillatorType,
        ) {
            for (i, freq) in freqs.iter().enumerate() {
                let Some((osc, gain)) = self.create_osc(ctx, *freq, osc_type) else {
                    continue;
                };
                let t = ctx.current_time() + i as f64 * spacing;
                gain.gain().set_value_at_time(level, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + spacing * 2.5)
                    .ok();
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + spacing * 3.0).ok();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Actor;
    use glam::IVec2;

    #[test]
    fn test_event_mapping() {
        let claimed = GameEvent::CellClaimed {
            cell: IVec2::new(25, 25),
            by: Actor::Pursuer,
        };
        assert_eq!(SoundEffect::for_event(&claimed), Some(SoundEffect::Blop));
        assert_eq!(
            SoundEffect::for_event(&GameEvent::Captured { lives_left: 2 }),
            Some(SoundEffect::Caught)
        );
        assert_eq!(SoundEffect::for_event(&GameEvent::RoundReset), None);
    }

    #[test]
    fn test_last_life_plays_only_the_outcome() {
        let events = [
            GameEvent::Captured { lives_left: 0 },
            GameEvent::GameOver { final_score: 10 },
        ];
        assert_eq!(SoundEffect::for_events(&events), vec![SoundEffect::GameOver]);
    }

    #[test]
    fn test_music_follows_the_timer() {
        let mut cue = MusicCue::new(0.5);
        assert!(!cue.is_playing());
        assert_eq!(cue.set_running(true), Some(MusicChange::Start));
        assert_eq!(cue.set_running(true), None);
        assert_eq!(cue.set_running(false), Some(MusicChange::Stop));
        assert_eq!(cue.set_running(false), None);
    }

    #[test]
    fn test_muted_music_stays_silent() {
        let mut cue = MusicCue::new(0.0);
        assert_eq!(cue.set_running(true), None);
        assert_eq!(cue.set_volume(0.4), Some(MusicChange::Start));
        assert_eq!(cue.set_volume(0.0), Some(MusicChange::Stop));
        assert!(!cue.is_playing());
    }

    #[test]
    fn test_batch_dedups_blops() {
        let events: Vec<GameEvent> = (1..=3)
            .map(|i| GameEvent::CellClaimed {
                cell: IVec2::new(25 * i, 25),
                by: Actor::Pursuer,
            })
            .collect();
        assert_eq!(SoundEffect::for_events(&events), vec![SoundEffect::Blop]);
    }
}
