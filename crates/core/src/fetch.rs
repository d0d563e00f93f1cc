//! Fetch orchestration: prepare, fetch on a worker, render.
//!
//! `start` shows the progress indicator right away, then spawns a
//! continuation on the runtime. The continuation runs the blocking fetch under
//! `spawn_blocking`, relays the worker's progress checkpoints to the target in
//! the order they were sent, and finally renders the selected book. It only
//! holds a `Weak` to the target, so a torn-down UI is skipped instead of
//! updated.
//!
//! Overlapping `start` calls against the same target are not deduplicated;
//! each one runs to completion and renders its own outcome.

use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Weak};

use tokio::runtime::Handle;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use crate::config::{AppConfig, DEFAULT_NO_RESULTS_TEXT};
use crate::lookup::google_books::GoogleBooksFetcher;
use crate::lookup::{BookFetcher, Query};
use crate::progress::{ProgressState, FETCHED, FETCHING, PREPARED};
use crate::render::{apply_outcome, ImageLoader, RenderTarget};
use crate::select::select;

pub struct FetchBook<F, L> {
    fetcher: Arc<F>,
    images: Arc<L>,
    no_results_text: Arc<str>,
    runtime: Handle,
}

impl<L> FetchBook<GoogleBooksFetcher, L> {
    /// Google Books lookups configured from `cfg`.
    pub fn from_config(cfg: &AppConfig, images: L, runtime: Handle) -> Self {
        Self::new(GoogleBooksFetcher::from_config(&cfg.lookup), images, runtime)
            .with_no_results_text(cfg.display.no_results_text.clone())
    }
}

impl<F, L> FetchBook<F, L> {
    pub fn new(fetcher: F, images: L, runtime: Handle) -> Self {
        Self {
            fetcher: Arc::new(fetcher),
            images: Arc::new(images),
            no_results_text: Arc::from(DEFAULT_NO_RESULTS_TEXT),
            runtime,
        }
    }

    /// Text shown in place of the title when nothing usable was found.
    pub fn with_no_results_text(mut self, text: impl Into<String>) -> Self {
        self.no_results_text = Arc::from(text.into());
        self
    }

    pub fn no_results_text(&self) -> &str {
        &self.no_results_text
    }
}

impl<F, L> FetchBook<F, L>
where
    F: BookFetcher + 'static,
{
    /// Start a lookup for `query`, rendering into `target`.
    ///
    /// Must be called from the context that owns `target`; the first progress
    /// update is applied before this returns.
    pub fn start<T>(&self, target: &Arc<T>, query: Query) -> FetchTask
    where
        T: RenderTarget,
        L: ImageLoader<T::Slot> + 'static,
    {
        tracing::info!(query = %query, "starting book lookup");
        let (state_tx, state_rx) = watch::channel(ProgressState::in_progress(PREPARED.into()));
        target.set_progress_visible(true);
        target.set_progress(PREPARED);

        let target = Arc::downgrade(target);
        let fetcher = Arc::clone(&self.fetcher);
        let images = Arc::clone(&self.images);
        let no_results_text = Arc::clone(&self.no_results_text);
        let runtime = self.runtime.clone();

        let handle = self.runtime.spawn(async move {
            let (progress_tx, mut progress_rx) = mpsc::unbounded_channel();
            let worker = runtime.spawn_blocking(move || {
                let _ = progress_tx.send(FETCHING);
                let payload = panic::catch_unwind(AssertUnwindSafe(|| fetcher.fetch(&query)))
                    .unwrap_or_else(|_| {
                        tracing::warn!("fetcher panicked, treating as transport failure");
                        None
                    });
                let _ = progress_tx.send(FETCHED);
                payload
            });

            // The channel closes when the worker returns, so every
            // checkpoint is applied before the render below.
            while let Some(percent) = progress_rx.recv().await {
                state_tx.send_replace(ProgressState::in_progress(percent.into()));
                if let Some(t) = target.upgrade() {
                    t.set_progress(percent);
                }
            }

            let payload = match worker.await {
                Ok(payload) => payload,
                Err(e) => {
                    tracing::warn!(error = %e, "fetch worker failed");
                    None
                }
            };
            state_tx.send_replace(ProgressState::Done);

            render(&target, &*images, payload.as_deref(), &no_results_text);
        });

        FetchTask {
            handle,
            state: state_rx,
        }
    }
}

fn render<T, L>(target: &Weak<T>, images: &L, payload: Option<&str>, no_results_text: &str)
where
    T: RenderTarget,
    L: ImageLoader<T::Slot> + ?Sized,
{
    let Some(target) = target.upgrade() else {
        tracing::debug!("render target dropped before lookup finished");
        return;
    };
    target.set_progress_visible(false);
    target.set_progress(0);

    let outcome = select(payload);
    match outcome.book() {
        Some(book) => tracing::info!(title = book.title(), author = book.author(), "book found"),
        None => tracing::info!("no results"),
    }
    apply_outcome(&*target, images, &outcome, no_results_text);
}

/// A running lookup.
///
/// Dropping the task detaches it; use [`FetchTask::cancel`] on teardown.
pub struct FetchTask {
    handle: JoinHandle<()>,
    state: watch::Receiver<ProgressState>,
}

impl FetchTask {
    /// Stop the lookup. No further updates reach the target. A fetch already
    /// running on the worker finishes, but its result is discarded.
    pub fn cancel(&self) {
        self.handle.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    pub fn state(&self) -> ProgressState {
        *self.state.borrow()
    }

    /// Wait for the lookup to finish rendering (or to be cancelled).
    pub async fn join(self) {
        if let Err(e) = self.handle.await {
            if !e.is_cancelled() {
                tracing::warn!(error = %e, "lookup task failed");
            }
        }
    }
}
