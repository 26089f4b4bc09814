//! Sound cues
//!
//! Three procedurally generated beeps, no external files. Playback is
//! fire-and-forget: every failure is logged and swallowed so the simulation
//! runs the same with or without sound.

use crate::settings::AudioSettings;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Player fired a bullet
    Shoot,
    /// Bullet destroyed an enemy
    Hit,
    /// Run ended
    GameOver,
}

/// Oscillator shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Triangle,
    Sawtooth,
    Square,
}

/// A single beep
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub frequency: f32,
    pub duration_ms: u32,
    /// Peak gain before the volume settings are applied
    pub gain: f32,
    pub waveform: Waveform,
}

impl SoundEffect {
    pub fn tone(self) -> Tone {
        match self {
            // Higher pitch, short
            SoundEffect::Shoot => Tone {
                frequency: 880.0,
                duration_ms: 50,
                gain: 0.03,
                waveform: Waveform::Triangle,
            },
            SoundEffect::Hit => Tone {
                frequency: 220.0,
                duration_ms: 80,
                gain: 0.05,
                waveform: Waveform::Sawtooth,
            },
            // Low long beep
            SoundEffect::GameOver => Tone {
                frequency: 110.0,
                duration_ms: 200,
                gain: 0.08,
                waveform: Waveform::Square,
            },
        }
    }
}

/// Audio cue emitter used by the game controller
pub trait AudioCues {
    fn play(&mut self, effect: SoundEffect);

    fn play_shoot_cue(&mut self) {
        self.play(SoundEffect::Shoot);
    }

    fn play_hit_cue(&mut self) {
        self.play(SoundEffect::Hit);
    }

    fn play_game_over_cue(&mut self) {
        self.play(SoundEffect::GameOver);
    }
}

/// No output; used by the native runner and tests
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentAudio;

impl AudioCues for SilentAudio {
    fn play(&mut self, effect: SoundEffect) {
        log::trace!("cue {:?}", effect);
    }
}

/// Final gain for a tone under the given settings
pub fn tone_gain(tone: &Tone, settings: &AudioSettings) -> f32 {
    tone.gain * settings.effective_volume()
}

#[cfg(target_arch = "wasm32")]
pub use web::WebAudio;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, AudioContextState, OscillatorType};

    use super::{AudioCues, SoundEffect, Waveform, tone_gain};
    use crate::settings::AudioSettings;

    /// Web Audio backed cues
    pub struct WebAudio {
        ctx: Option<AudioContext>,
        settings: AudioSettings,
    }

    impl WebAudio {
        pub fn new(settings: AudioSettings) -> Self {
            // Try to create audio context (may fail if not in secure context)
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self { ctx, settings }
        }

        /// Resume audio context (required after user gesture)
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
            }
        }

        fn beep(&self, ctx: &AudioContext, effect: SoundEffect) -> Option<()> {
            let tone = effect.tone();
            let gain_value = tone_gain(&tone, &self.settings);
            if gain_value <= 0.0 {
                return Some(());
            }

            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;
            osc.set_type(match tone.waveform {
                Waveform::Sine => OscillatorType::Sine,
                Waveform::Triangle => OscillatorType::Triangle,
                Waveform::Sawtooth => OscillatorType::Sawtooth,
                Waveform::Square => OscillatorType::Square,
            });
            osc.frequency().set_value(tone.frequency);
            gain.gain().set_value(gain_value);
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            let t = ctx.current_time();
            osc.start_with_when(t).ok()?;
            osc.stop_with_when(t + tone.duration_ms as f64 / 1000.0).ok()?;
            Some(())
        }
    }

    impl AudioCues for WebAudio {
        fn play(&mut self, effect: SoundEffect) {
            let Some(ctx) = &self.ctx else { return };

            // Resume context if suspended (browsers require user gesture)
            if ctx.state() == AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            if self.beep(ctx, effect).is_none() {
                log::warn!("Could not play {:?}", effect);
            }
        }
    }
}
