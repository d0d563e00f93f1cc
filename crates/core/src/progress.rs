//! Progress state shown while a lookup is in flight.

/// Shown as soon as a lookup is started, before any network work.
pub const PREPARED: u8 = 20;
/// Emitted by the worker right before the fetch.
pub const FETCHING: u8 = 50;
/// Emitted by the worker once the fetch returns, successful or not.
pub const FETCHED: u8 = 100;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProgressState {
    #[default]
    Idle,
    InProgress(u8),
    Done,
}

impl ProgressState {
    /// Build an in-progress state, clamping `percent` into `0..=100`.
    pub fn in_progress(percent: i32) -> Self {
        ProgressState::InProgress(clamp_percent(percent))
    }

    pub fn percent(&self) -> Option<u8> {
        match self {
            ProgressState::InProgress(p) => Some(*p),
            _ => None,
        }
    }
}

pub fn clamp_percent(percent: i32) -> u8 {
    percent.clamp(0, 100) as u8
}
