//! Audio sink implementation using rodio.
//!
//! `RodioAudioSink` keeps one rodio `Sink` alive for the lifetime of the
//! clock so the cue can be paused and rewound, mirroring a media element.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

use rodio::source::SineWave;
use rodio::{Decoder, OutputStream, Sink, Source};
use tracing::{debug, error, warn};

use super::error::SoundError;
use super::source::{CueSource, DEFAULT_BEEP_DURATION_MS, DEFAULT_BEEP_FREQUENCY_HZ};
use super::{AudioSink, NullAudioSink};

/// Volume applied to the synthesized beep.
const BEEP_AMPLITUDE: f32 = 0.25;

/// An audio sink that plays the cue through the default output device.
pub struct RodioAudioSink {
    /// The audio output stream (must be kept alive for playback).
    _stream: OutputStream,
    /// Queue holding the cue while it plays.
    sink: Sink,
    /// The cue loaded on each fresh play.
    cue: CueSource,
}

impl RodioAudioSink {
    /// Opens the default output device.
    ///
    /// # Errors
    ///
    /// Returns `SoundError::DeviceNotAvailable` if no output device exists
    /// and `SoundError::StreamError` if the sink cannot be attached.
    pub fn new(cue: CueSource) -> Result<Self, SoundError> {
        let (stream, stream_handle) = OutputStream::try_default()
            .map_err(|e| SoundError::DeviceNotAvailable(e.to_string()))?;
        let sink =
            Sink::try_new(&stream_handle).map_err(|e| SoundError::StreamError(e.to_string()))?;

        debug!(cue = %cue.name(), "Audio output stream initialized");

        Ok(Self {
            _stream: stream,
            sink,
            cue,
        })
    }

    /// Queues the cue, falling back to the bundled beep if the file is unusable.
    fn load_cue(&self) -> Result<(), SoundError> {
        match &self.cue {
            CueSource::Beep {
                frequency_hz,
                duration_ms,
            } => {
                self.append_beep(*frequency_hz, *duration_ms);
                Ok(())
            }
            CueSource::File { path } => match self.append_file(path) {
                Ok(()) => Ok(()),
                Err(e) if e.should_fallback_to_beep() => {
                    warn!("Failed to load cue '{}': {}, falling back to beep", path.display(), e);
                    self.append_beep(DEFAULT_BEEP_FREQUENCY_HZ, DEFAULT_BEEP_DURATION_MS);
                    Ok(())
                }
                Err(e) => Err(e),
            },
        }
    }

    fn append_file(&self, path: &Path) -> Result<(), SoundError> {
        let file = File::open(path)
            .map_err(|e| SoundError::FileNotFound(format!("{}: {}", path.display(), e)))?;
        let decoder = Decoder::new(BufReader::new(file))
            .map_err(|e| SoundError::DecodeError(e.to_string()))?;

        self.sink.append(decoder);
        Ok(())
    }

    fn append_beep(&self, frequency_hz: u32, duration_ms: u64) {
        let beep = SineWave::new(frequency_hz as f32)
            .take_duration(Duration::from_millis(duration_ms))
            .amplify(BEEP_AMPLITUDE);
        self.sink.append(beep);
    }
}

impl AudioSink for RodioAudioSink {
    fn play(&self) -> Result<(), SoundError> {
        // A drained sink means the last cue finished; queue a fresh copy.
        if self.sink.empty() {
            self.load_cue()?;
        }
        self.sink.play();
        debug!("Cue playback started");
        Ok(())
    }

    fn pause(&self) -> Result<(), SoundError> {
        self.sink.pause();
        Ok(())
    }

    fn seek_to_start(&self) -> Result<(), SoundError> {
        // Dropping the queued cue makes the next play start from the top.
        self.sink.clear();
        Ok(())
    }
}

impl std::fmt::Debug for RodioAudioSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RodioAudioSink")
            .field("cue", &self.cue)
            .field("paused", &self.sink.is_paused())
            .finish_non_exhaustive()
    }
}

/// Creates the audio sink for the clock.
///
/// Falls back to a silent sink when `disabled` is set or the output device
/// cannot be opened, so the countdown never depends on audio hardware.
#[must_use]
pub fn try_create_sink(cue: CueSource, disabled: bool) -> Box<dyn AudioSink> {
    if disabled {
        debug!("Sound disabled, using null sink");
        return Box::new(NullAudioSink);
    }

    match RodioAudioSink::new(cue) {
        Ok(sink) => Box::new(sink),
        Err(e) => silent_after(&e),
    }
}

/// Logs why audio is off and returns a silent sink.
///
/// Device errors log at warn, anything else at error.
fn silent_after(err: &SoundError) -> Box<dyn AudioSink> {
    if err.is_device_error() {
        warn!("Audio not available, cue disabled: {}", err);
    } else {
        error!("Failed to initialize audio, cue disabled: {}", err);
    }
    Box::new(NullAudioSink)
}
