//! Recording engine for tests

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::Duration;

use super::{EngineEvent, EngineEventKind, LoadId, PlaybackEngine};

pub const FAKE_DURATION: Duration = Duration::from_secs(200);

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EngineCall {
    Load(PathBuf),
    Play,
    Pause,
    Seek(Duration),
    Release,
}

#[derive(Debug, Default)]
struct FakeState {
    calls: Vec<EngineCall>,
    load_id: LoadId,
    position: Duration,
    loaded: bool,
    pending: Vec<EngineEvent>,
    fail_next_load: bool,
}

/// Cloneable handle; every clone sees the same recorded state.
#[derive(Clone, Debug, Default)]
pub struct FakeEngine {
    state: Rc<RefCell<FakeState>>,
}

impl FakeEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<EngineCall> {
        self.state.borrow().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.state.borrow_mut().calls.clear();
    }

    pub fn loads(&self) -> Vec<PathBuf> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                EngineCall::Load(path) => Some(path),
                _ => None,
            })
            .collect()
    }

    pub fn current_load(&self) -> LoadId {
        self.state.borrow().load_id
    }

    pub fn set_position(&self, position: Duration) {
        self.state.borrow_mut().position = position;
    }

    pub fn fail_next_load(&self) {
        self.state.borrow_mut().fail_next_load = true;
    }

    /// Queue an event as if the engine produced it
    pub fn emit(&self, load_id: LoadId, kind: EngineEventKind) {
        self.state
            .borrow_mut()
            .pending
            .push(EngineEvent { load_id, kind });
    }

    /// The current item plays to its end
    pub fn finish_current(&self) {
        let load_id = self.current_load();
        self.set_position(FAKE_DURATION);
        self.emit(load_id, EngineEventKind::Ended);
    }
}

impl PlaybackEngine for FakeEngine {
    fn load(&mut self, source: &Path) -> anyhow::Result<LoadId> {
        let mut state = self.state.borrow_mut();
        state.calls.push(EngineCall::Load(source.to_path_buf()));
        if std::mem::take(&mut state.fail_next_load) {
            anyhow::bail!("cannot decode {}", source.display());
        }
        state.load_id += 1;
        state.position = Duration::ZERO;
        state.loaded = true;
        let load_id = state.load_id;
        state.pending.push(EngineEvent {
            load_id,
            kind: EngineEventKind::ItemTransitioned,
        });
        state.pending.push(EngineEvent {
            load_id,
            kind: EngineEventKind::Ready {
                duration: Some(FAKE_DURATION),
            },
        });
        Ok(load_id)
    }

    fn play(&mut self) {
        self.state.borrow_mut().calls.push(EngineCall::Play);
    }

    fn pause(&mut self) {
        self.state.borrow_mut().calls.push(EngineCall::Pause);
    }

    fn seek(&mut self, position: Duration) -> anyhow::Result<()> {
        let mut state = self.state.borrow_mut();
        state.calls.push(EngineCall::Seek(position));
        state.position = position;
        Ok(())
    }

    fn position(&self) -> Duration {
        self.state.borrow().position
    }

    fn duration(&self) -> Option<Duration> {
        self.state.borrow().loaded.then_some(FAKE_DURATION)
    }

    fn poll_events(&mut self) -> Vec<EngineEvent> {
        std::mem::take(&mut self.state.borrow_mut().pending)
    }

    fn release(&mut self) {
        let mut state = self.state.borrow_mut();
        state.calls.push(EngineCall::Release);
        state.loaded = false;
        state.pending.clear();
    }
}
