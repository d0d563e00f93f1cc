//! Cover thumbnails: downloaded on a background thread and decoded just far
//! enough to report their size.

use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;

use serde::Serialize;
use whowroteit_core::render::ImageLoader;

#[derive(Debug, Default, Clone, Serialize)]
pub struct CoverInfo {
    pub url: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub error: Option<String>,
}

#[derive(Debug, Default)]
pub struct CoverSlot {
    info: Mutex<CoverInfo>,
}

impl CoverSlot {
    pub fn info(&self) -> CoverInfo {
        self.info.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn update(&self, f: impl FnOnce(&mut CoverInfo)) {
        f(&mut self.info.lock().unwrap_or_else(|e| e.into_inner()));
    }
}

/// Clones share the same set of pending downloads.
#[derive(Clone)]
pub struct CoverLoader {
    client: reqwest::blocking::Client,
    pending: Arc<Mutex<Vec<JoinHandle<()>>>>,
}

impl CoverLoader {
    pub fn new(timeout_secs: u64) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "falling back to default HTTP client");
                reqwest::blocking::Client::new()
            });
        Self {
            client,
            pending: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Block until every started download has finished.
    pub fn wait(&self) {
        let handles: Vec<_> = std::mem::take(&mut *self.pending.lock().unwrap_or_else(|e| e.into_inner()));
        for h in handles {
            let _ = h.join();
        }
    }
}

impl ImageLoader<Arc<CoverSlot>> for CoverLoader {
    fn load_into(&self, slot: Arc<CoverSlot>, url: &str) {
        slot.update(|c| c.url = Some(url.to_string()));
        let client = self.client.clone();
        let url = url.to_string();
        let handle = std::thread::spawn(move || match download(&client, &url) {
            Ok((w, h)) => {
                tracing::debug!(%url, width = w, height = h, "cover loaded");
                slot.update(|c| {
                    c.width = Some(w);
                    c.height = Some(h);
                });
            }
            Err(e) => {
                tracing::warn!(%url, error = %e, "cover load failed");
                slot.update(|c| c.error = Some(e.to_string()));
            }
        });
        self.pending.lock().unwrap_or_else(|e| e.into_inner()).push(handle);
    }
}

fn download(
    client: &reqwest::blocking::Client,
    url: &str,
) -> Result<(u32, u32), Box<dyn std::error::Error + Send + Sync>> {
    let bytes = client.get(url).send()?.error_for_status()?.bytes()?;
    let img = image::load_from_memory(&bytes)?;
    Ok((img.width(), img.height()))
}
