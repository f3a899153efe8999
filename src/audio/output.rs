//! rodio-backed engine writing to the default output device

use anyhow::{Context, Result};
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

use super::{EngineEvent, EngineEventKind, LoadId, PlaybackEngine};

pub struct RodioEngine {
    // Output stops when the stream is dropped.
    _stream: OutputStream,
    handle: OutputStreamHandle,
    sink: Option<Sink>,
    load_id: LoadId,
    duration: Option<Duration>,
    pending: Vec<EngineEvent>,
    end_reported: bool,
}

impl RodioEngine {
    /// Open the default output device
    pub fn new() -> Result<Self> {
        let (stream, handle) =
            OutputStream::try_default().context("No audio output device available")?;
        tracing::info!("Audio output opened");
        Ok(Self {
            _stream: stream,
            handle,
            sink: None,
            load_id: 0,
            duration: None,
            pending: Vec::new(),
            end_reported: false,
        })
    }
}

impl PlaybackEngine for RodioEngine {
    fn load(&mut self, source: &Path) -> Result<LoadId> {
        let file = File::open(source)
            .with_context(|| format!("Failed to open {}", source.display()))?;
        let decoder = Decoder::new(BufReader::new(file))
            .with_context(|| format!("Unsupported or corrupt audio file: {}", source.display()))?;
        let duration = decoder.total_duration();

        let sink = Sink::try_new(&self.handle).context("Failed to create audio sink")?;
        sink.pause();
        sink.append(decoder);

        // Dropping the previous sink stops it.
        self.sink = Some(sink);
        self.load_id += 1;
        self.duration = duration;
        self.end_reported = false;
        self.pending.push(EngineEvent {
            load_id: self.load_id,
            kind: EngineEventKind::ItemTransitioned,
        });
        self.pending.push(EngineEvent {
            load_id: self.load_id,
            kind: EngineEventKind::Ready { duration },
        });

        tracing::debug!(path = %source.display(), load_id = self.load_id, ?duration, "Source loaded");
        Ok(self.load_id)
    }

    fn play(&mut self) {
        if let Some(sink) = &self.sink {
            sink.play();
        }
    }

    fn pause(&mut self) {
        if let Some(sink) = &self.sink {
            sink.pause();
        }
    }

    fn seek(&mut self, position: Duration) -> Result<()> {
        let Some(sink) = &self.sink else {
            return Ok(());
        };
        sink.try_seek(position)
            .map_err(|e| anyhow::anyhow!("Seek failed: {e}"))
    }

    fn position(&self) -> Duration {
        self.sink.as_ref().map(Sink::get_pos).unwrap_or_default()
    }

    fn duration(&self) -> Option<Duration> {
        self.duration
    }

    fn poll_events(&mut self) -> Vec<EngineEvent> {
        if let Some(sink) = &self.sink {
            if !self.end_reported && sink.empty() {
                self.end_reported = true;
                self.pending.push(EngineEvent {
                    load_id: self.load_id,
                    kind: EngineEventKind::Ended,
                });
            }
        }
        std::mem::take(&mut self.pending)
    }

    fn release(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
        self.pending.clear();
        tracing::info!("Audio engine released");
    }
}
