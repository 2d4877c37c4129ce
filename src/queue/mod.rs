// pixform/src/queue/mod.rs
mod preview;

pub use preview::{PreviewHandle, PreviewStore};

use crate::core::{ConversionOptions, ConversionResult, Converter, Result};
use crate::processors::{package_results, Delivery};
use std::fmt;
use std::sync::Arc;

/// Queue-scoped item identity from a monotonic counter. Ids are never
/// reused within one queue's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ItemId(u64);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "file-{}", self.0)
    }
}

/// Lifecycle of a queued file. Transitions only move forward within a
/// conversion attempt: Pending -> Converting -> Done | Error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemStatus {
    Pending,
    Converting,
    Done,
    Error,
}

pub struct QueueItem {
    pub id: ItemId,
    pub filename: String,
    source: Arc<Vec<u8>>,
    preview: Option<PreviewHandle>,
    pub status: ItemStatus,
    pub result: Option<ConversionResult>,
    pub error: Option<String>,
}

impl QueueItem {
    pub fn source(&self) -> &[u8] {
        &self.source
    }

    pub fn preview(&self) -> Option<PreviewHandle> {
        self.preview
    }
}

/// Thin state holder over the conversion engine: owns the file queue,
/// per-item status, previews, and aggregate progress. All mutation is
/// single-threaded; the batch pass runs items strictly in order, one
/// at a time.
pub struct ConversionQueue {
    items: Vec<QueueItem>,
    previews: PreviewStore,
    next_id: u64,
    is_converting: bool,
    progress: (usize, usize),
}

impl ConversionQueue {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            previews: PreviewStore::new(),
            next_id: 0,
            is_converting: false,
            progress: (0, 0),
        }
    }

    /// Add a file to the queue in Pending state and register a preview
    /// handle for its source bytes.
    pub fn add_file(&mut self, filename: impl Into<String>, bytes: Vec<u8>) -> ItemId {
        let source = Arc::new(bytes);
        let preview = self.previews.insert(Arc::clone(&source));

        self.next_id += 1;
        let id = ItemId(self.next_id);

        self.items.push(QueueItem {
            id,
            filename: filename.into(),
            source,
            preview: Some(preview),
            status: ItemStatus::Pending,
            result: None,
            error: None,
        });

        id
    }

    /// Remove an item and release its preview handle. Returns false for
    /// unknown ids.
    pub fn remove(&mut self, id: ItemId) -> bool {
        let Some(position) = self.items.iter().position(|item| item.id == id) else {
            return false;
        };

        let item = self.items.remove(position);
        if let Some(handle) = item.preview {
            self.previews.release(handle);
        }
        true
    }

    /// Drop every item, release every preview handle, and reset
    /// progress.
    pub fn clear(&mut self) {
        for item in self.items.drain(..) {
            if let Some(handle) = item.preview {
                self.previews.release(handle);
            }
        }
        self.progress = (0, 0);
    }

    pub fn items(&self) -> &[QueueItem] {
        &self.items
    }

    pub fn item(&self, id: ItemId) -> Option<&QueueItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_converting(&self) -> bool {
        self.is_converting
    }

    /// `(completed, total)` for the current or most recent batch pass.
    pub fn progress(&self) -> (usize, usize) {
        self.progress
    }

    pub fn preview_bytes(&self, id: ItemId) -> Option<Arc<Vec<u8>>> {
        self.item(id)
            .and_then(|item| item.preview)
            .and_then(|handle| self.previews.get(handle))
            .map(Arc::clone)
    }

    pub fn preview_count(&self) -> usize {
        self.previews.len()
    }

    /// Convert everything not already Done, strictly in queue order,
    /// one item at a time. Per-item failures are recorded on the item
    /// and do not stop the pass; `on_progress(completed, total)` fires
    /// after every item regardless of outcome.
    pub fn convert_all<F>(&mut self, options: &ConversionOptions, mut on_progress: F)
    where
        F: FnMut(usize, usize),
    {
        let pending: Vec<ItemId> = self
            .items
            .iter()
            .filter(|item| item.status != ItemStatus::Done)
            .map(|item| item.id)
            .collect();

        let total = pending.len();
        if total == 0 {
            return;
        }

        let converter = Converter::new(options.clone());

        self.is_converting = true;
        self.progress = (0, total);

        for (index, id) in pending.into_iter().enumerate() {
            let Some(position) = self.items.iter().position(|item| item.id == id) else {
                continue;
            };

            self.items[position].status = ItemStatus::Converting;
            let source = Arc::clone(&self.items[position].source);
            let filename = self.items[position].filename.clone();

            let outcome = converter.convert(&source, &filename);

            let item = &mut self.items[position];
            match outcome {
                Ok(result) => {
                    item.status = ItemStatus::Done;
                    item.result = Some(result);
                    item.error = None;
                }
                Err(e) => {
                    log::warn!("conversion failed for {}: {}", filename, e);
                    item.status = ItemStatus::Error;
                    item.error = Some(e.to_string());
                    item.result = None;
                }
            }

            self.progress = (index + 1, total);
            on_progress(index + 1, total);
        }

        self.is_converting = false;
    }

    /// Delivery for one completed item, or None if it has no result.
    pub fn download_single(&self, id: ItemId) -> Option<Delivery> {
        self.item(id)
            .and_then(|item| item.result.as_ref())
            .map(|result| Delivery::Single {
                filename: result.filename.clone(),
                bytes: result.bytes.clone(),
            })
    }

    /// Delivery for every completed item: the file itself when one is
    /// done, an archive when several are. Failed items are excluded.
    /// None when nothing has completed.
    pub fn download_all(&self) -> Result<Option<Delivery>> {
        let done: Vec<&ConversionResult> = self
            .items
            .iter()
            .filter(|item| item.status == ItemStatus::Done)
            .filter_map(|item| item.result.as_ref())
            .collect();

        if done.is_empty() {
            return Ok(None);
        }

        package_results(&done).map(Some)
    }
}

impl Default for ConversionQueue {
    fn default() -> Self {
        Self::new()
    }
}
