// Copyright (c) 2023 Mike Tsao. All rights reserved.

use crate::{
    traits::{Configurable, Generates, SoundGenerator},
    types::{Normal, Sample, SampleRate},
};
use anyhow::anyhow;
use std::{fs::File, path::Path, sync::Arc};

/// A [SoundClip] plays back a recorded sample buffer, either once per
/// [play()](SoundGenerator::play) call (one-shot) or continuously until
/// stopped (loop). Buffers are shared via [Arc] so that many clips minted by
/// the same factory don't duplicate sample data.
#[derive(Debug)]
pub struct SoundClip {
    // None once disposed.
    samples: Option<Arc<Vec<Sample>>>,
    cursor: usize,
    is_playing: bool,
    is_looping: bool,
    output_level: Normal,
    sample_rate: SampleRate,
}
impl SoundClip {
    /// The registry key for the one-shot recorded clip.
    pub const ONE_SHOT_KEY: &'static str = "recorded-one-shot";
    /// The registry key for the looping recorded clip.
    pub const LOOP_KEY: &'static str = "recorded-loop";

    /// Creates a clip that plays its buffer once each time it is played.
    pub fn new_one_shot(samples: Arc<Vec<Sample>>) -> Self {
        Self::new_with(samples, false)
    }

    /// Creates a clip that repeats its buffer until stopped.
    pub fn new_looping(samples: Arc<Vec<Sample>>) -> Self {
        Self::new_with(samples, true)
    }

    fn new_with(samples: Arc<Vec<Sample>>, is_looping: bool) -> Self {
        Self {
            samples: Some(samples),
            cursor: 0,
            is_playing: false,
            is_looping,
            output_level: Normal::default(),
            sample_rate: SampleRate::DEFAULT,
        }
    }

    /// Reads a WAV file into a shareable mono sample buffer, averaging
    /// channels. Supports the PCM formats that [hound] decodes.
    pub fn read_samples_from_file(path: &Path) -> anyhow::Result<Arc<Vec<Sample>>> {
        let file = File::open(path)?;
        let mut reader = hound::WavReader::new(file)?;
        let spec = reader.spec();
        let channels = spec.channels.max(1) as usize;
        let frames: Vec<Sample> = match spec.sample_format {
            hound::SampleFormat::Int => {
                let samples: Result<Vec<i16>, _> = reader.samples::<i16>().collect();
                Self::mix_down(samples?.into_iter().map(Sample::from), channels)
            }
            hound::SampleFormat::Float => {
                let samples: Result<Vec<f32>, _> = reader.samples::<f32>().collect();
                Self::mix_down(samples?.into_iter().map(Sample::from), channels)
            }
        };
        if frames.is_empty() {
            return Err(anyhow!("WAV file {:?} contained no samples", path));
        }
        Ok(Arc::new(frames))
    }

    fn mix_down(samples: impl Iterator<Item = Sample>, channels: usize) -> Vec<Sample> {
        let interleaved: Vec<Sample> = samples.collect();
        interleaved
            .chunks_exact(channels)
            .map(|frame| frame.iter().copied().sum::<Sample>() * (1.0 / channels as f64))
            .collect()
    }

    /// Whether this clip repeats until stopped.
    pub fn is_looping(&self) -> bool {
        self.is_looping
    }
}
impl Generates for SoundClip {
    fn generate(&mut self, values: &mut [Sample]) {
        let Some(samples) = self.samples.as_ref().filter(|s| !s.is_empty()) else {
            values.fill(Sample::SILENCE);
            return;
        };
        for value in values.iter_mut() {
            if !self.is_playing {
                *value = Sample::SILENCE;
                continue;
            }
            *value = samples[self.cursor] * self.output_level;
            self.cursor += 1;
            if self.cursor == samples.len() {
                self.cursor = 0;
                if !self.is_looping {
                    self.is_playing = false;
                }
            }
        }
    }
}
impl Configurable for SoundClip {
    fn sample_rate(&self) -> SampleRate {
        self.sample_rate
    }

    fn update_sample_rate(&mut self, sample_rate: SampleRate) {
        self.sample_rate = sample_rate;
    }
}
impl SoundGenerator for SoundClip {
    fn play(&mut self) {
        // An empty buffer has nothing to play; starting it would leave the
        // clip reporting is_playing forever.
        if self.samples.as_ref().is_some_and(|s| !s.is_empty()) {
            self.cursor = 0;
            self.is_playing = true;
        }
    }

    fn stop(&mut self) {
        self.is_playing = false;
        self.cursor = 0;
    }

    fn is_playing(&self) -> bool {
        self.is_playing
    }

    fn output_level(&self) -> Normal {
        self.output_level
    }

    fn set_output_level(&mut self, level: Normal) {
        self.output_level = level;
    }

    fn dispose(&mut self) {
        // Dropping the Arc releases this clip's claim on the buffer. A second
        // call finds None and does nothing.
        self.is_playing = false;
        self.samples = None;
    }

    fn is_disposed(&self) -> bool {
        self.samples.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(len: usize) -> Arc<Vec<Sample>> {
        Arc::new((0..len).map(|i| Sample(i as f64 / len as f64)).collect())
    }

    #[test]
    fn one_shot_plays_once_and_stops() {
        let mut clip = SoundClip::new_one_shot(ramp(4));
        let mut buffer = [Sample::SILENCE; 8];

        clip.generate(&mut buffer);
        assert!(buffer.iter().all(|s| *s == Sample::SILENCE), "silent until played");

        clip.play();
        assert!(clip.is_playing());
        clip.generate(&mut buffer);
        assert_eq!(buffer[1], Sample(0.25));
        assert_eq!(buffer[4], Sample::SILENCE, "silent past the end of the buffer");
        assert!(!clip.is_playing(), "one-shot stops after a single pass");
    }

    #[test]
    fn looping_clip_wraps_until_stopped() {
        let mut clip = SoundClip::new_looping(ramp(4));
        clip.play();
        let mut buffer = [Sample::SILENCE; 10];
        clip.generate(&mut buffer);
        assert!(clip.is_playing(), "loop keeps going");
        assert_eq!(buffer[4], buffer[0]);
        clip.stop();
        assert!(!clip.is_playing());
    }

    #[test]
    fn output_level_scales_samples() {
        let mut clip = SoundClip::new_one_shot(Arc::new(vec![Sample::MAX; 4]));
        clip.set_output_level(Normal::new(0.5));
        clip.play();
        let mut buffer = [Sample::SILENCE; 1];
        clip.generate(&mut buffer);
        assert_eq!(buffer[0], Sample(0.5));
    }

    #[test]
    fn dispose_is_idempotent_and_silences() {
        let samples = ramp(4);
        let mut clip = SoundClip::new_one_shot(Arc::clone(&samples));
        clip.play();
        clip.dispose();
        assert!(clip.is_disposed());
        assert!(!clip.is_playing());
        clip.dispose(); // must not panic or double-release
        clip.play(); // disposed generators ignore play
        assert!(!clip.is_playing());

        let mut buffer = [Sample::MAX; 2];
        clip.generate(&mut buffer);
        assert_eq!(buffer, [Sample::SILENCE; 2]);
        assert_eq!(Arc::strong_count(&samples), 1, "clip released its buffer");
    }

    #[test]
    fn empty_buffer_never_plays_and_renders_silence() {
        let empty = Arc::new(Vec::default());
        for mut clip in [
            SoundClip::new_one_shot(Arc::clone(&empty)),
            SoundClip::new_looping(empty.clone()),
        ] {
            clip.play();
            assert!(!clip.is_playing(), "nothing to play in an empty buffer");
            let mut buffer = [Sample::MAX; 4];
            clip.generate(&mut buffer);
            assert_eq!(buffer, [Sample::SILENCE; 4]);
        }
    }

    #[test]
    fn wav_file_round_trips_as_mono_mix() {
        let path = std::env::temp_dir().join(format!(
            "sonify-clip-read-{}.wav",
            std::process::id()
        ));
        let spec = hound::WavSpec {
            channels: 2,
            sample_rate: 44100,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(&path, spec).unwrap();
        // Two stereo frames: (1000, 3000) and (-2000, 2000).
        for sample in [1000i16, 3000, -2000, 2000] {
            writer.write_sample(sample).unwrap();
        }
        writer.finalize().unwrap();

        let samples = SoundClip::read_samples_from_file(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(samples.len(), 2, "stereo frames average down to mono");
        assert_eq!(
            samples[0],
            (Sample::from(1000i16) + Sample::from(3000i16)) * 0.5
        );
        assert_eq!(
            samples[1],
            (Sample::from(-2000i16) + Sample::from(2000i16)) * 0.5
        );
    }

    #[test]
    fn wav_file_with_no_samples_is_an_error() {
        let path = std::env::temp_dir().join(format!(
            "sonify-clip-empty-{}.wav",
            std::process::id()
        ));
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: 44100,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        hound::WavWriter::create(&path, spec)
            .unwrap()
            .finalize()
            .unwrap();

        let result = SoundClip::read_samples_from_file(&path);
        let _ = std::fs::remove_file(&path);
        assert!(result.is_err(), "a WAV with no samples is not a clip");
    }
}
