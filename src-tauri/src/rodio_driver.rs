use crate::playback_driver::{DriverCapabilities, PlaybackDriver, PlaybackError};
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

/// Mixer-backed driver. Each load gets a fresh sink on the shared output
/// stream; dropping the previous sink silences it.
///
/// `OutputStream` is not `Send`, so the driver has to be built on the thread
/// that runs the event loop.
pub struct RodioDriver {
    _stream: OutputStream,
    handle: OutputStreamHandle,
    sink: Option<Sink>,
    volume: f32,
}

impl RodioDriver {
    pub fn new() -> Result<Self, PlaybackError> {
        let (stream, handle) =
            OutputStream::try_default().map_err(|err| PlaybackError::Device(err.to_string()))?;
        Ok(Self {
            _stream: stream,
            handle,
            sink: None,
            volume: 1.0,
        })
    }
}

impl PlaybackDriver for RodioDriver {
    fn capabilities(&self) -> DriverCapabilities {
        DriverCapabilities::MIXER
    }

    fn load(&mut self, path: &Path) -> Result<(), PlaybackError> {
        let file = File::open(path).map_err(|source| PlaybackError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let source = Decoder::new(BufReader::new(file)).map_err(|err| PlaybackError::Decode {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;
        let sink =
            Sink::try_new(&self.handle).map_err(|err| PlaybackError::Device(err.to_string()))?;
        sink.pause();
        sink.set_volume(self.volume);
        sink.append(source);
        self.sink = Some(sink);
        Ok(())
    }

    fn play(&mut self) -> Result<(), PlaybackError> {
        let sink = self.sink.as_ref().ok_or(PlaybackError::NoTrackLoaded)?;
        sink.play();
        Ok(())
    }

    fn pause(&mut self) {
        if let Some(sink) = &self.sink {
            sink.pause();
        }
    }

    fn unpause(&mut self) {
        if let Some(sink) = &self.sink {
            sink.play();
        }
    }

    fn stop(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
        if let Some(sink) = &self.sink {
            sink.set_volume(self.volume);
        }
    }

    fn elapsed(&self) -> Duration {
        self.sink
            .as_ref()
            .map(|sink| sink.get_pos())
            .unwrap_or_default()
    }

    fn track_finished(&mut self) -> Option<bool> {
        Some(self.sink.as_ref().map_or(true, Sink::empty))
    }
}
