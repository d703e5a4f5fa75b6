//! Sound cues. The game only ever *notifies*; it never waits on, or branches on,
//! what the backend did with the notification.

/// One-way sink for gameplay sound events.
pub trait AudioNotifier {
    fn notify_hit(&mut self);
    fn notify_level_up(&mut self);
    /// Whether the background loop should currently be audible.
    fn set_music(&mut self, enabled: bool);
}

/// Backend that plays nothing. Used before the page has audio and in tests.
#[derive(Debug, Default)]
pub struct NullAudio;

impl AudioNotifier for NullAudio {
    fn notify_hit(&mut self) {}
    fn notify_level_up(&mut self) {}
    fn set_music(&mut self, _enabled: bool) {}
}

/// C, Eb, G, Bb, C, Eb, G.
pub const MUSIC_SCALE: [f64; 7] = [261.63, 311.13, 392.0, 466.16, 523.25, 622.25, 784.0];
pub const MUSIC_BPM: f64 = 132.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MusicNote {
    pub freq: f64,
    /// First note of every bar of eight is louder.
    pub accent: bool,
    /// Even steps add an octave-up square voice.
    pub support: bool,
}

/// Eighth-note arpeggio clock, polled from the frame loop.
///
/// Restarts from the first step whenever playback stops.
#[derive(Clone, Debug)]
pub struct MusicSequencer {
    interval_ms: f64,
    step: usize,
    next_due_ms: Option<f64>,
}

impl MusicSequencer {
    pub fn new(bpm: f64) -> Self {
        Self { interval_ms: (60_000.0 / bpm / 2.0).round(), step: 0, next_due_ms: None }
    }

    pub fn interval_ms(&self) -> f64 {
        self.interval_ms
    }

    /// Returns at most one note per call. Missed steps (hidden tab, long frame)
    /// are dropped rather than replayed in a burst.
    pub fn poll(&mut self, now_ms: f64, playing: bool) -> Option<MusicNote> {
        if !playing {
            self.step = 0;
            self.next_due_ms = None;
            return None;
        }
        let due = match self.next_due_ms {
            None => {
                self.next_due_ms = Some(now_ms + self.interval_ms);
                return None;
            }
            Some(due) => due,
        };
        if now_ms < due {
            return None;
        }

        let step = self.step;
        self.step += 1;
        let next = due + self.interval_ms;
        self.next_due_ms = Some(if next <= now_ms { now_ms + self.interval_ms } else { next });

        Some(MusicNote {
            freq: MUSIC_SCALE[step % MUSIC_SCALE.len()],
            accent: step % 8 == 0,
            support: step % 2 == 0,
        })
    }
}

impl Default for MusicSequencer {
    fn default() -> Self {
        Self::new(MUSIC_BPM)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eighth_notes_at_132_bpm() {
        assert_eq!(MusicSequencer::default().interval_ms(), 227.0);
    }

    #[test]
    fn first_note_waits_one_interval() {
        let mut seq = MusicSequencer::default();
        assert_eq!(seq.poll(1000.0, true), None);
        assert_eq!(seq.poll(1200.0, true), None);
        let note = seq.poll(1227.0, true).unwrap();
        assert_eq!(note.freq, MUSIC_SCALE[0]);
        assert!(note.accent && note.support);
        let note = seq.poll(1454.0, true).unwrap();
        assert_eq!(note.freq, MUSIC_SCALE[1]);
        assert!(!note.accent && !note.support);
    }

    #[test]
    fn stopping_rewinds_and_silences() {
        let mut seq = MusicSequencer::default();
        seq.poll(0.0, true);
        seq.poll(227.0, true);
        seq.poll(454.0, true);
        assert_eq!(seq.poll(700.0, false), None);
        assert_eq!(seq.poll(5000.0, false), None);
        assert_eq!(seq.poll(6000.0, true), None);
        assert_eq!(seq.poll(6227.0, true).map(|n| n.freq), Some(MUSIC_SCALE[0]));
    }

    #[test]
    fn long_gap_does_not_burst() {
        let mut seq = MusicSequencer::default();
        seq.poll(0.0, true);
        assert!(seq.poll(10_000.0, true).is_some());
        assert!(seq.poll(10_016.0, true).is_none());
        assert!(seq.poll(10_227.0, true).is_some());
    }

    #[test]
    fn scale_wraps_and_accents_every_eighth_step() {
        let mut seq = MusicSequencer::default();
        seq.poll(0.0, true);
        let notes: Vec<MusicNote> = (1..=9).filter_map(|i| seq.poll(i as f64 * 227.0, true)).collect();
        assert_eq!(notes.len(), 9);
        assert_eq!(notes[7].freq, MUSIC_SCALE[0]);
        assert!(notes[8].accent);
        assert!(!notes[7].accent);
    }
}
