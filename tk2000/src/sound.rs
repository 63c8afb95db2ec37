//! Speaker toggle at 0xC030-0xC03F (spec §4.6).
//!
//! Every bus access to the range flips a 1-bit line. On each flip the
//! component computes how many audio samples the elapsed CPU-cycle gap
//! represents and pushes that many constant-amplitude samples to the host
//! audio sink before flipping — this is how a 1-bit toggle line becomes an
//! (approximately) square-wave speaker.

const TICK_SECONDS: f64 = 1.0 / 1_000_000.0; // nominal 1 MHz CPU
const SAMPLE_RATE: f64 = 16_000.0;
const MAX_BUFFERED_SAMPLES: usize = 16_000;
const AMPLITUDE_HIGH: u8 = 120;
const AMPLITUDE_LOW: u8 = 0;

/// Host collaborator receiving emitted audio. Out of the core's scope
/// (spec §1): the host owns the real device, the core only produces
/// signed-PCM 8-bit mono 16 kHz samples to feed it.
pub trait AudioSink {
    fn push_samples(&mut self, samples: &[u8]);
}

/// Sink used when no host audio device is available; drops samples
/// silently so the emulation keeps running (spec §7 "Audio unavailable").
#[derive(Default)]
pub struct NullSink;

impl AudioSink for NullSink {
    fn push_samples(&mut self, _samples: &[u8]) {}
}

pub struct Sound {
    line_high: bool,
    last_toggle_clock: u64,
    available: bool,
    last_error: Option<String>,
    /// User-facing mute toggle (spec §6 `setSoundEnabled`), independent of
    /// `available` which tracks hardware failure (spec §7).
    user_enabled: bool,
}

impl Default for Sound {
    fn default() -> Self {
        Self::new()
    }
}

impl Sound {
    pub fn new() -> Self {
        Self {
            line_high: false,
            last_toggle_clock: 0,
            available: true,
            last_error: None,
            user_enabled: true,
        }
    }

    pub fn is_available(&self) -> bool {
        self.available
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Recorded by the frontend if the host audio device failed to open;
    /// the component keeps running as a no-op (spec §7).
    pub fn mark_unavailable(&mut self, reason: impl Into<String>) {
        self.available = false;
        self.last_error = Some(reason.into());
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.user_enabled = enabled;
    }

    /// Any read or write to the softswitch range toggles the line.
    /// Returns the byte to answer a read with (0xFF, open-bus convention;
    /// the softswitch's own value is nominal per spec §4.6/glossary).
    pub fn toggle(&mut self, clock: u64, sink: &mut dyn AudioSink) -> u8 {
        if self.available && self.user_enabled {
            let duration = clock.wrapping_sub(self.last_toggle_clock);
            let samples = (duration as f64 * TICK_SECONDS * SAMPLE_RATE) as usize;
            if samples <= MAX_BUFFERED_SAMPLES {
                let amplitude = if self.line_high {
                    AMPLITUDE_HIGH
                } else {
                    AMPLITUDE_LOW
                };
                let buf = vec![amplitude; samples];
                sink.push_samples(&buf);
            }
        }
        self.last_toggle_clock = clock;
        self.line_high = !self.line_high;
        0xFF
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct CollectSink(Vec<u8>);
    impl AudioSink for CollectSink {
        fn push_samples(&mut self, samples: &[u8]) {
            self.0.extend_from_slice(samples);
        }
    }

    #[test]
    fn toggle_emits_samples_proportional_to_elapsed_cycles() {
        let mut sound = Sound::new();
        let mut sink = CollectSink::default();
        // First toggle: elapsed 0 cycles from startup, no samples (amplitude low, 0 samples).
        sound.toggle(0, &mut sink);
        // 1000 cycles @ 1 MHz = 1ms = 16 samples @ 16kHz.
        sound.toggle(1000, &mut sink);
        assert_eq!(sink.0.len(), 16);
        assert!(sink.0.iter().all(|&b| b == AMPLITUDE_LOW));
    }

    #[test]
    fn clamp_guards_against_huge_gaps() {
        let mut sound = Sound::new();
        let mut sink = CollectSink::default();
        sound.toggle(0, &mut sink);
        // A huge gap (> 16000 samples worth of cycles) emits nothing.
        sound.toggle(2_000_000_000, &mut sink);
        assert!(sink.0.is_empty());
    }

    #[test]
    fn unavailable_sound_is_a_no_op() {
        let mut sound = Sound::new();
        sound.mark_unavailable("no audio device");
        let mut sink = CollectSink::default();
        sound.toggle(0, &mut sink);
        sound.toggle(100_000, &mut sink);
        assert!(sink.0.is_empty());
        assert_eq!(sound.last_error(), Some("no audio device"));
    }

    #[test]
    fn user_mute_is_a_no_op_but_not_an_error() {
        let mut sound = Sound::new();
        sound.set_enabled(false);
        let mut sink = CollectSink::default();
        sound.toggle(0, &mut sink);
        sound.toggle(100_000, &mut sink);
        assert!(sink.0.is_empty());
        assert!(sound.is_available());
        assert_eq!(sound.last_error(), None);
    }
}
