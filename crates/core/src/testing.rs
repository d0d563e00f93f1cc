//! Recording doubles for the rendering boundary and image collaborator.

use std::sync::{Arc, Mutex};

use crate::render::{ImageLoader, RenderTarget};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Progress(u8),
    ProgressVisible(bool),
    Title(String),
    Author(String),
    CoverVisible(bool),
    LoadCover(String),
}

/// Shared call log. Outlives the `Recorder` so tests can inspect it after
/// the target is torn down.
#[derive(Debug, Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<Call>>>);

impl CallLog {
    pub fn push(&self, call: Call) {
        self.0.lock().unwrap().push(call);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.0.lock().unwrap().clone()
    }

    pub fn progress(&self) -> Vec<u8> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Progress(p) => Some(p),
                _ => None,
            })
            .collect()
    }
}

pub struct Recorder {
    log: CallLog,
}

impl Recorder {
    pub fn new() -> (Self, CallLog) {
        let log = CallLog::default();
        (Self { log: log.clone() }, log)
    }
}

impl RenderTarget for Recorder {
    type Slot = CallLog;

    fn set_progress(&self, percent: u8) {
        self.log.push(Call::Progress(percent));
    }
    fn set_progress_visible(&self, visible: bool) {
        self.log.push(Call::ProgressVisible(visible));
    }
    fn set_title(&self, text: &str) {
        self.log.push(Call::Title(text.to_string()));
    }
    fn set_author(&self, text: &str) {
        self.log.push(Call::Author(text.to_string()));
    }
    fn set_cover_visible(&self, visible: bool) {
        self.log.push(Call::CoverVisible(visible));
    }
    fn cover_slot(&self) -> CallLog {
        self.log.clone()
    }
}

pub struct RecordingLoader;

impl ImageLoader<CallLog> for RecordingLoader {
    fn load_into(&self, slot: CallLog, url: &str) {
        slot.push(Call::LoadCover(url.to_string()));
    }
}
