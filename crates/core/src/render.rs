//! The UI-facing side of a lookup: the rendering boundary the host
//! implements and the image collaborator that fills the cover slot.

use crate::lookup::SelectionOutcome;

/// Widgets a lookup writes to. Implemented by the host UI.
///
/// Within one lookup the orchestrator calls these in order and never after
/// the target has been dropped. Lookups are not deduplicated: overlapping
/// `start` calls on the same target run separate continuations whose calls
/// may interleave, so hosts are expected to run one lookup per target at a
/// time.
pub trait RenderTarget: Send + Sync + 'static {
    /// Handle the image collaborator uses to populate the cover.
    type Slot;

    fn set_progress(&self, percent: u8);
    fn set_progress_visible(&self, visible: bool);
    fn set_title(&self, text: &str);
    fn set_author(&self, text: &str);
    /// `false` keeps the slot's layout space; it is not collapsed.
    fn set_cover_visible(&self, visible: bool);
    fn cover_slot(&self) -> Self::Slot;
}

/// Image collaborator. Loading is asynchronous and best-effort; nothing is
/// reported back.
pub trait ImageLoader<S>: Send + Sync {
    fn load_into(&self, slot: S, url: &str);
}

/// Never loads anything. Useful for hosts without image support.
pub struct NoopImageLoader;

impl<S> ImageLoader<S> for NoopImageLoader {
    fn load_into(&self, _slot: S, _url: &str) {}
}

/// Write a selection outcome to the target.
pub fn apply_outcome<T, L>(target: &T, images: &L, outcome: &SelectionOutcome, no_results_text: &str)
where
    T: RenderTarget + ?Sized,
    L: ImageLoader<T::Slot> + ?Sized,
{
    match outcome {
        SelectionOutcome::Found(book) => {
            target.set_title(book.title());
            target.set_author(book.author());
            match book.cover_url() {
                Some(url) => {
                    target.set_cover_visible(true);
                    images.load_into(target.cover_slot(), url);
                }
                None => target.set_cover_visible(false),
            }
        }
        SelectionOutcome::NotFound => {
            target.set_title(no_results_text);
            target.set_author("");
        }
    }
}
