pub mod config;
pub mod error;
pub mod fetch;
pub mod lookup;
pub mod progress;
pub mod render;
pub mod select;

#[cfg(test)]
mod testing;

pub mod prelude {
    pub use crate::error::*;
    pub use crate::fetch::{FetchBook, FetchTask};
    pub use crate::lookup::*;
    pub use crate::render::{ImageLoader, NoopImageLoader, RenderTarget};
}
