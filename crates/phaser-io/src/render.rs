//! Offline rendering: run a whole buffer through a phaser in fixed blocks.

use crate::{AudioBuffer, Result};
use phaser_core::{PhaserProcessor, ProcessSpec};

/// Settings for [`render`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Frames handed to the processor per call.
    pub block_size: usize,
    /// Silent frames appended before rendering so the feedback tail rings out.
    pub tail_frames: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            block_size: 512,
            tail_frames: 0,
        }
    }
}

/// Prepare `phaser` for `audio` and process it in place.
///
/// The processor is (re)prepared with the buffer's channel count, so any
/// previous state is cleared and every render starts from the same point.
pub fn render(
    phaser: &mut PhaserProcessor,
    audio: &mut AudioBuffer,
    sample_rate: f32,
    options: &RenderOptions,
) -> Result<()> {
    render_with_progress(phaser, audio, sample_rate, options, |_| {})
}

/// [`render`], calling `progress` with the number of frames done after
/// every block.
pub fn render_with_progress<F>(
    phaser: &mut PhaserProcessor,
    audio: &mut AudioBuffer,
    sample_rate: f32,
    options: &RenderOptions,
    mut progress: F,
) -> Result<()>
where
    F: FnMut(usize),
{
    phaser.prepare(ProcessSpec {
        sample_rate,
        max_block_size: options.block_size,
        num_channels: audio.num_channels(),
    })?;
    audio.extend_silence(options.tail_frames);

    let frames = audio.num_frames();
    tracing::info!(
        "rendering {} ch x {} frames at {} Hz, block {}",
        audio.num_channels(),
        frames,
        sample_rate,
        options.block_size
    );

    let mut start = 0;
    while start < frames {
        let end = (start + options.block_size).min(frames);
        let mut block: Vec<&mut [f32]> = audio
            .channels_mut()
            .iter_mut()
            .map(|ch| {
                let len = ch.len();
                &mut ch[start.min(len)..end.min(len)]
            })
            .collect();
        phaser.process_block(&mut block);
        progress(end);
        start = end;
    }
    Ok(())
}
