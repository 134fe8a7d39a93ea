//! Planar multichannel audio buffer.

use crate::{Error, Result};

/// Planar audio: one `Vec<f32>` per channel, all the same length.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AudioBuffer {
    channels: Vec<Vec<f32>>,
}

impl AudioBuffer {
    /// Create a buffer from per-channel sample vectors.
    ///
    /// Fails if the channels differ in length.
    pub fn new(channels: Vec<Vec<f32>>) -> Result<Self> {
        if let Some(first) = channels.first() {
            let frames = first.len();
            if let Some((i, ch)) = channels
                .iter()
                .enumerate()
                .find(|(_, ch)| ch.len() != frames)
            {
                return Err(Error::Layout(format!(
                    "channel {i} has {} frames, channel 0 has {frames}",
                    ch.len()
                )));
            }
        }
        Ok(Self { channels })
    }

    /// Silent buffer of `num_channels` x `num_frames`.
    pub fn silence(num_channels: usize, num_frames: usize) -> Self {
        Self {
            channels: vec![vec![0.0; num_frames]; num_channels],
        }
    }

    /// Single-channel buffer.
    pub fn from_mono(samples: Vec<f32>) -> Self {
        Self {
            channels: vec![samples],
        }
    }

    /// Split interleaved frames into channels. A trailing partial frame is
    /// dropped.
    pub fn from_interleaved(interleaved: &[f32], num_channels: usize) -> Result<Self> {
        if num_channels == 0 {
            return Err(Error::Layout("zero channels".to_string()));
        }
        let frames = interleaved.len() / num_channels;
        let mut channels: Vec<Vec<f32>> = (0..num_channels)
            .map(|_| Vec::with_capacity(frames))
            .collect();
        for frame in interleaved.chunks_exact(num_channels) {
            for (channel, &sample) in channels.iter_mut().zip(frame) {
                channel.push(sample);
            }
        }
        Ok(Self { channels })
    }

    /// Interleave all channels frame by frame.
    pub fn to_interleaved(&self) -> Vec<f32> {
        let mut out = Vec::with_capacity(self.num_channels() * self.num_frames());
        for n in 0..self.num_frames() {
            out.extend(self.channels.iter().map(|ch| ch[n]));
        }
        out
    }

    /// Average all channels into one.
    pub fn to_mono(&self) -> Vec<f32> {
        let count = self.num_channels().max(1) as f32;
        (0..self.num_frames())
            .map(|n| self.channels.iter().map(|ch| ch[n]).sum::<f32>() / count)
            .collect()
    }

    /// Number of channels.
    pub fn num_channels(&self) -> usize {
        self.channels.len()
    }

    /// Number of frames (samples per channel).
    pub fn num_frames(&self) -> usize {
        self.channels.first().map_or(0, Vec::len)
    }

    /// Whether the buffer holds no frames.
    pub fn is_empty(&self) -> bool {
        self.num_frames() == 0
    }

    /// Samples of channel `index`.
    pub fn channel(&self, index: usize) -> Option<&[f32]> {
        self.channels.get(index).map(Vec::as_slice)
    }

    /// All channels.
    pub fn channels(&self) -> &[Vec<f32>] {
        &self.channels
    }

    /// Mutable access to all channels.
    pub fn channels_mut(&mut self) -> &mut [Vec<f32>] {
        &mut self.channels
    }

    /// Append `frames` frames of silence to every channel.
    pub fn extend_silence(&mut self, frames: usize) {
        for channel in &mut self.channels {
            channel.resize(channel.len() + frames, 0.0);
        }
    }

    /// Largest absolute sample value.
    pub fn peak(&self) -> f32 {
        self.channels
            .iter()
            .flatten()
            .map(|s| s.abs())
            .fold(0.0, f32::max)
    }

    /// RMS over all channels.
    pub fn rms(&self) -> f32 {
        let count = self.num_channels() * self.num_frames();
        if count == 0 {
            return 0.0;
        }
        let sum: f32 = self.channels.iter().flatten().map(|s| s * s).sum();
        (sum / count as f32).sqrt()
    }

    /// Consume the buffer, returning the channel vectors.
    pub fn into_channels(self) -> Vec<Vec<f32>> {
        self.channels
    }
}
