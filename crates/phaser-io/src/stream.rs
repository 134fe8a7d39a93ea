//! Real-time audio streaming via cpal.
//!
//! [`AudioStream`] opens an input and an output device, forwards captured
//! audio to the output callback over a bounded channel, and hands the caller
//! interleaved input and output buffers to fill.

use crate::{Error, Result};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Device, Host, Stream};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Extract device name via `description()` (cpal 0.17+).
pub(crate) fn device_name(device: &Device) -> std::result::Result<String, cpal::DeviceNameError> {
    device.description().map(|d| d.name().to_string())
}

/// Audio device information.
#[derive(Debug, Clone)]
pub struct AudioDevice {
    /// Human-readable device name.
    pub name: String,
    /// Whether the device supports audio input.
    pub is_input: bool,
    /// Whether the device supports audio output.
    pub is_output: bool,
    /// Default sample rate in Hz.
    pub default_sample_rate: u32,
}

/// Stream configuration.
#[derive(Debug, Clone, Default)]
pub struct StreamConfig {
    /// Input device name, partial name, or index (uses default if `None`).
    pub input_device: Option<String>,
    /// Output device name, partial name, or index (uses default if `None`).
    pub output_device: Option<String>,
}

/// List all available audio devices.
pub fn list_devices() -> Result<Vec<AudioDevice>> {
    let host = cpal::default_host();
    let mut devices = Vec::new();

    if let Ok(inputs) = host.input_devices() {
        for device in inputs {
            if let Ok(name) = device_name(&device) {
                let sample_rate = device
                    .default_input_config()
                    .map(|c| c.sample_rate())
                    .unwrap_or(48000);
                let is_output = device.default_output_config().is_ok();

                devices.push(AudioDevice {
                    name,
                    is_input: true,
                    is_output,
                    default_sample_rate: sample_rate,
                });
            }
        }
    }

    // Output-only devices
    if let Ok(outputs) = host.output_devices() {
        for device in outputs {
            if let Ok(name) = device_name(&device) {
                if devices.iter().any(|d| d.name == name) {
                    continue;
                }

                let sample_rate = device
                    .default_output_config()
                    .map(|c| c.sample_rate())
                    .unwrap_or(48000);

                devices.push(AudioDevice {
                    name,
                    is_input: false,
                    is_output: true,
                    default_sample_rate: sample_rate,
                });
            }
        }
    }

    Ok(devices)
}

/// Get the default input and output device info.
pub fn default_device() -> Result<(Option<AudioDevice>, Option<AudioDevice>)> {
    let host = cpal::default_host();

    let input = host.default_input_device().and_then(|d| {
        device_name(&d).ok().map(|name| AudioDevice {
            name,
            is_input: true,
            is_output: false,
            default_sample_rate: d
                .default_input_config()
                .map(|c| c.sample_rate())
                .unwrap_or(48000),
        })
    });

    let output = host.default_output_device().and_then(|d| {
        device_name(&d).ok().map(|name| AudioDevice {
            name,
            is_input: false,
            is_output: true,
            default_sample_rate: d
                .default_output_config()
                .map(|c| c.sample_rate())
                .unwrap_or(48000),
        })
    });

    Ok((input, output))
}

/// Copy interleaved `input` into interleaved `output`, mapping channel
/// counts.
///
/// Output channel `c` takes input channel `c % input_channels`: mono input
/// is duplicated to every output, surplus input channels are dropped.
/// Frames missing from `input` are written as silence.
pub fn remap_channels(
    input: &[f32],
    input_channels: usize,
    output: &mut [f32],
    output_channels: usize,
) {
    if input_channels == 0 || output_channels == 0 {
        output.fill(0.0);
        return;
    }
    let mut in_frames = input.chunks_exact(input_channels);
    for out_frame in output.chunks_mut(output_channels) {
        match in_frames.next() {
            Some(in_frame) => {
                for (c, sample) in out_frame.iter_mut().enumerate() {
                    *sample = in_frame[c % input_channels];
                }
            }
            None => out_frame.fill(0.0),
        }
    }
}

/// Real-time duplex audio stream.
pub struct AudioStream {
    input_device: Device,
    output_device: Device,
    running: Arc<AtomicBool>,
    _input_stream: Option<Stream>,
    _output_stream: Option<Stream>,
}

impl AudioStream {
    /// Open the configured (or default) input and output devices.
    pub fn new(config: &StreamConfig) -> Result<Self> {
        let host = cpal::default_host();

        let input_device = match &config.input_device {
            Some(name) => find_input_device(&host, name)?,
            None => host.default_input_device().ok_or(Error::NoDevice)?,
        };

        let output_device = match &config.output_device {
            Some(name) => find_output_device(&host, name)?,
            None => host.default_output_device().ok_or(Error::NoDevice)?,
        };

        tracing::info!(
            "audio stream: input '{}', output '{}'",
            device_name(&input_device).unwrap_or_default(),
            device_name(&output_device).unwrap_or_default()
        );

        Ok(Self {
            input_device,
            output_device,
            running: Arc::new(AtomicBool::new(false)),
            _input_stream: None,
            _output_stream: None,
        })
    }

    /// Sample rate the output device runs at.
    pub fn sample_rate(&self) -> Result<u32> {
        self.output_device
            .default_output_config()
            .map(|c| c.sample_rate())
            .map_err(|e| Error::Stream(e.to_string()))
    }

    /// Input device channel count.
    pub fn input_channels(&self) -> u16 {
        self.input_device
            .default_input_config()
            .map(|c| c.channels())
            .unwrap_or(1)
    }

    /// Output device channel count.
    pub fn output_channels(&self) -> u16 {
        self.output_device
            .default_output_config()
            .map(|c| c.channels())
            .unwrap_or(2)
    }

    /// Shared flag that keeps [`run`](Self::run) alive. Store `false` from
    /// any thread (e.g. a Ctrl+C handler) to stop the stream.
    pub fn running_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.running)
    }

    /// Run the audio stream with a processing callback.
    ///
    /// The callback receives interleaved input with
    /// [`input_channels`](Self::input_channels) channels and must fill the
    /// interleaved output buffer with
    /// [`output_channels`](Self::output_channels) channels. Output is silent
    /// while not enough input has arrived. Blocks until stopped.
    pub fn run<F>(&mut self, mut process: F) -> Result<()>
    where
        F: FnMut(&[f32], &mut [f32]) + Send + 'static,
    {
        use std::sync::mpsc;

        let input_config = self
            .input_device
            .default_input_config()
            .map_err(|e| Error::Stream(e.to_string()))?;

        let output_config = self
            .output_device
            .default_output_config()
            .map_err(|e| Error::Stream(e.to_string()))?;

        if input_config.sample_rate() != output_config.sample_rate() {
            tracing::warn!(
                "input runs at {} Hz, output at {} Hz; audio will drift",
                input_config.sample_rate(),
                output_config.sample_rate()
            );
        }

        let input_channels = usize::from(input_config.channels());
        let output_channels = usize::from(output_config.channels());

        // Captured audio travels to the output callback over a bounded channel
        let (tx, rx) = mpsc::sync_channel::<Vec<f32>>(4);

        self.running.store(true, Ordering::SeqCst);

        let input_running = Arc::clone(&self.running);
        let input_stream = self
            .input_device
            .build_input_stream(
                &input_config.into(),
                move |data: &[f32], _: &cpal::InputCallbackInfo| {
                    if input_running.load(Ordering::SeqCst) {
                        let _ = tx.try_send(data.to_vec());
                    }
                },
                |err| tracing::warn!("input stream error: {err}"),
                None,
            )
            .map_err(|e| Error::Stream(e.to_string()))?;

        let output_running = Arc::clone(&self.running);
        let mut pending_input: Vec<f32> = Vec::new();
        let mut block_input: Vec<f32> = Vec::new();
        let output_stream = self
            .output_device
            .build_output_stream(
                &output_config.into(),
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    if !output_running.load(Ordering::SeqCst) {
                        data.fill(0.0);
                        return;
                    }

                    while let Ok(samples) = rx.try_recv() {
                        pending_input.extend(samples);
                    }

                    let frames = data.len() / output_channels.max(1);
                    let needed = frames * input_channels;
                    if pending_input.len() >= needed {
                        block_input.clear();
                        block_input.extend(pending_input.drain(..needed));
                        process(&block_input, data);
                    } else {
                        data.fill(0.0);
                    }
                },
                |err| tracing::warn!("output stream error: {err}"),
                None,
            )
            .map_err(|e| Error::Stream(e.to_string()))?;

        input_stream
            .play()
            .map_err(|e| Error::Stream(e.to_string()))?;
        output_stream
            .play()
            .map_err(|e| Error::Stream(e.to_string()))?;

        self._input_stream = Some(input_stream);
        self._output_stream = Some(output_stream);

        // Block until stopped
        while self.running.load(Ordering::SeqCst) {
            std::thread::sleep(std::time::Duration::from_millis(100));
        }

        self._input_stream = None;
        self._output_stream = None;
        tracing::info!("audio stream stopped");
        Ok(())
    }

    /// Stop the audio stream.
    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    /// Check if the stream is running.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}

fn find_input_device(host: &Host, name_or_index: &str) -> Result<Device> {
    let devices: Vec<_> = host
        .input_devices()
        .map_err(|e| Error::Stream(e.to_string()))?
        .collect();

    find_device_from_list(&devices, name_or_index, "input")
}

fn find_output_device(host: &Host, name_or_index: &str) -> Result<Device> {
    let devices: Vec<_> = host
        .output_devices()
        .map_err(|e| Error::Stream(e.to_string()))?
        .collect();

    find_device_from_list(&devices, name_or_index, "output")
}

/// Find a device from a list by index, exact name, or case-insensitive
/// partial name.
fn find_device_from_list(devices: &[Device], name_or_index: &str, kind: &str) -> Result<Device> {
    if let Ok(index) = name_or_index.parse::<usize>() {
        return devices.get(index).cloned().ok_or_else(|| {
            Error::DeviceNotFound(format!(
                "{} device index {} (only {} devices available)",
                kind,
                index,
                devices.len()
            ))
        });
    }

    if let Some(device) = devices
        .iter()
        .find(|d| device_name(d).is_ok_and(|n| n == name_or_index))
    {
        return Ok(device.clone());
    }

    let search_lower = name_or_index.to_lowercase();
    let matches: Vec<_> = devices
        .iter()
        .filter_map(|d| {
            device_name(d)
                .ok()
                .filter(|name| name.to_lowercase().contains(&search_lower))
                .map(|name| (d, name))
        })
        .collect();

    match matches.as_slice() {
        [] => Err(Error::DeviceNotFound(format!(
            "no {kind} device matching '{name_or_index}'"
        ))),
        [(device, _)] => Ok((*device).clone()),
        [(device, first), ..] => {
            let names: Vec<_> = matches.iter().map(|(_, n)| n.as_str()).collect();
            tracing::warn!(
                "'{name_or_index}' matches multiple {kind} devices: {names:?}; using {first}"
            );
            Ok((*device).clone())
        }
    }
}
