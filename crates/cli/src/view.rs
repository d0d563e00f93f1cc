//! Terminal stand-in for the book screen: a progress bar plus title, author
//! and cover fields that are printed once the lookup has rendered.

use std::sync::{Arc, Mutex, MutexGuard};

use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use whowroteit_core::render::RenderTarget;

use crate::cover::CoverSlot;

#[derive(Debug, Default, Clone, Serialize)]
pub struct ViewState {
    pub title: String,
    pub author: String,
    pub cover_visible: bool,
}

pub struct TerminalView {
    bar: ProgressBar,
    state: Mutex<ViewState>,
    cover: Arc<CoverSlot>,
}

impl TerminalView {
    pub fn new(show_progress: bool) -> Self {
        let bar = if show_progress {
            let bar = ProgressBar::new(100);
            if let Ok(style) = ProgressStyle::with_template("{spinner} searching [{bar:30}] {pos:>3}%") {
                bar.set_style(style.progress_chars("=> "));
            }
            bar
        } else {
            ProgressBar::hidden()
        };
        Self {
            bar,
            state: Mutex::new(ViewState::default()),
            cover: Arc::new(CoverSlot::default()),
        }
    }

    pub fn snapshot(&self) -> ViewState {
        self.lock().clone()
    }

    pub fn cover(&self) -> &CoverSlot {
        &self.cover
    }

    fn lock(&self) -> MutexGuard<'_, ViewState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl RenderTarget for TerminalView {
    type Slot = Arc<CoverSlot>;

    fn set_progress(&self, percent: u8) {
        self.bar.set_position(percent.into());
    }

    fn set_progress_visible(&self, visible: bool) {
        if visible {
            self.bar.reset();
        } else {
            self.bar.finish_and_clear();
        }
    }

    fn set_title(&self, text: &str) {
        self.lock().title = text.to_string();
    }

    fn set_author(&self, text: &str) {
        self.lock().author = text.to_string();
    }

    fn set_cover_visible(&self, visible: bool) {
        self.lock().cover_visible = visible;
    }

    fn cover_slot(&self) -> Arc<CoverSlot> {
        Arc::clone(&self.cover)
    }
}
