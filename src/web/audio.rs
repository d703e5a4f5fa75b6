//! WebAudio synth backend: short oscillator blips plus a looping arpeggio.
//! Nothing here is allowed to fail the game; errors are logged and dropped.

use wasm_bindgen::JsValue;
use web_sys::{AudioContext, AudioContextState, AudioNode, GainNode, OscillatorType};

use crate::audio::{AudioNotifier, MusicNote, MusicSequencer};

const SILENT: f32 = 0.0001;
const MUSIC_LEVEL: f32 = 0.12;

struct Tone {
    freq: f32,
    glide_to: Option<f32>,
    delay: f64,
    dur: f64,
    kind: OscillatorType,
    vol: f32,
}

const HIT: [Tone; 2] = [
    Tone { freq: 860.0, glide_to: Some(520.0), delay: 0.0, dur: 0.07, kind: OscillatorType::Triangle, vol: 0.28 },
    Tone { freq: 520.0, glide_to: Some(980.0), delay: 0.035, dur: 0.05, kind: OscillatorType::Square, vol: 0.18 },
];

const LEVEL_UP: Tone =
    Tone { freq: 330.0, glide_to: Some(660.0), delay: 0.0, dur: 0.12, kind: OscillatorType::Triangle, vol: 0.18 };

struct Armed {
    ctx: AudioContext,
    music_gain: GainNode,
}

#[derive(Default)]
pub struct WebAudio {
    armed: Option<Armed>,
    music_on: bool,
    sequencer: MusicSequencer,
}

impl WebAudio {
    /// Create the context on the first user gesture (autoplay policy); later calls
    /// only nudge a suspended context awake.
    pub fn arm(&mut self) {
        if let Some(armed) = &self.armed {
            if armed.ctx.state() == AudioContextState::Suspended {
                let _ = armed.ctx.resume();
            }
            return;
        }
        match build_context() {
            Ok(armed) => {
                log::info!("audio ready");
                self.armed = Some(armed);
                let on = self.music_on;
                self.set_music(on);
            }
            Err(e) => log::warn!("audio unavailable: {e:?}"),
        }
    }

    /// Advance the music clock; called once per animation frame.
    pub fn pump(&mut self, now_ms: f64) {
        let playing = self.music_on && self.armed.is_some();
        let Some(note) = self.sequencer.poll(now_ms, playing) else {
            return;
        };
        if let Some(armed) = &self.armed {
            if let Err(e) = play_note(&armed.ctx, &armed.music_gain, note) {
                log::warn!("music note dropped: {e:?}");
            }
        }
    }

    fn play(&self, tones: &[Tone]) {
        let Some(armed) = &self.armed else {
            return;
        };
        let dest = armed.ctx.destination();
        for tone in tones {
            if let Err(e) = beep(&armed.ctx, &dest, tone) {
                log::warn!("sound cue dropped: {e:?}");
            }
        }
    }
}

impl AudioNotifier for WebAudio {
    fn notify_hit(&mut self) {
        self.play(&HIT);
    }

    fn notify_level_up(&mut self) {
        self.play(std::slice::from_ref(&LEVEL_UP));
    }

    fn set_music(&mut self, enabled: bool) {
        self.music_on = enabled;
        let Some(armed) = &self.armed else {
            return;
        };
        let target = if enabled { MUSIC_LEVEL } else { SILENT };
        if let Err(e) = ramp_gain(&armed.ctx, &armed.music_gain, target) {
            log::warn!("music fade failed: {e:?}");
        }
    }
}

fn build_context() -> Result<Armed, JsValue> {
    let ctx = AudioContext::new()?;
    let _ = ctx.resume();
    let music_gain = ctx.create_gain()?;
    music_gain.gain().set_value(SILENT);
    music_gain.connect_with_audio_node(&ctx.destination())?;
    Ok(Armed { ctx, music_gain })
}

fn ramp_gain(ctx: &AudioContext, gain: &GainNode, to: f32) -> Result<(), JsValue> {
    let now = ctx.current_time();
    let param = gain.gain();
    param.cancel_scheduled_values(now)?;
    param.set_value_at_time(param.value().max(SILENT), now)?;
    param.exponential_ramp_to_value_at_time(to, now + 0.12)?;
    Ok(())
}

fn beep(ctx: &AudioContext, dest: &AudioNode, tone: &Tone) -> Result<(), JsValue> {
    let osc = ctx.create_oscillator()?;
    let gain = ctx.create_gain()?;

    let start = ctx.current_time() + tone.delay;
    let end = start + tone.dur;

    osc.set_type(tone.kind);
    osc.frequency().set_value_at_time(tone.freq, start)?;
    if let Some(to) = tone.glide_to {
        osc.frequency().exponential_ramp_to_value_at_time(to, end)?;
    }

    gain.gain().set_value_at_time(SILENT, start)?;
    gain.gain().exponential_ramp_to_value_at_time(tone.vol.clamp(SILENT, 1.0), start + 0.01)?;
    gain.gain().exponential_ramp_to_value_at_time(SILENT, end)?;

    osc.connect_with_audio_node(&gain)?;
    gain.connect_with_audio_node(dest)?;
    osc.start_with_when(start)?;
    osc.stop_with_when(end + 0.01)?;
    Ok(())
}

fn play_note(ctx: &AudioContext, bus: &GainNode, note: MusicNote) -> Result<(), JsValue> {
    let lead = Tone {
        freq: note.freq as f32,
        glide_to: None,
        delay: 0.0,
        dur: 0.12,
        kind: OscillatorType::Sawtooth,
        vol: if note.accent { 0.11 } else { 0.07 },
    };
    beep(ctx, bus, &lead)?;
    if note.support {
        let support = Tone {
            freq: note.freq as f32 * 2.0,
            glide_to: None,
            delay: 0.0,
            dur: 0.09,
            kind: OscillatorType::Square,
            vol: 0.035,
        };
        beep(ctx, bus, &support)?;
    }
    Ok(())
}
