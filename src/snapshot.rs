//! Latest-value handoff from the capture thread to the render thread.
//!
//! The capture side publishes immutable snapshots (a new [`StreamPlan`],
//! one frame's faces) and the render side only ever wants the newest one.
//! The cell is a crossbeam [`ArrayQueue`] of capacity one: publishing
//! force-pushes over any unread value, reading drains it. The reader keeps
//! the last value it saw so it can redraw without a new publication.
//!
//! [`StreamPlan`]: crate::plan::StreamPlan
//!
//! # Example
//!
//! ```
//! use scanframe::snapshot;
//!
//! let (publisher, mut reader) = snapshot::channel();
//! assert!(reader.latest().is_none());
//!
//! publisher.publish(1u32);
//! publisher.publish(2u32);
//! assert_eq!(reader.latest().as_deref(), Some(&2));
//! // Nothing new: the previous snapshot is kept.
//! assert_eq!(reader.latest().as_deref(), Some(&2));
//! ```

use std::sync::Arc;

use crossbeam_queue::ArrayQueue;

/// Create a connected publisher/reader pair.
pub fn channel<T>() -> (Publisher<T>, Reader<T>) {
    let cell = Arc::new(ArrayQueue::new(1));
    (
        Publisher {
            cell: Arc::clone(&cell),
        },
        Reader { cell, last: None },
    )
}

/// Writing half. There is exactly one per channel.
#[derive(Debug)]
pub struct Publisher<T> {
    cell: Arc<ArrayQueue<Arc<T>>>,
}

impl<T> Publisher<T> {
    /// Replace whatever the reader has not picked up yet.
    pub fn publish(&self, value: T) {
        self.publish_arc(Arc::new(value));
    }

    /// [`publish`](Self::publish) for a snapshot that is already shared.
    pub fn publish_arc(&self, value: Arc<T>) {
        // A superseded snapshot is dropped here.
        let _ = self.cell.force_push(value);
    }

    /// False once the reader is gone.
    pub fn is_connected(&self) -> bool {
        Arc::strong_count(&self.cell) > 1
    }
}

/// Reading half. There is exactly one per channel.
#[derive(Debug)]
pub struct Reader<T> {
    cell: Arc<ArrayQueue<Arc<T>>>,
    last: Option<Arc<T>>,
}

impl<T> Reader<T> {
    /// The newest published snapshot, or the previous one when nothing new
    /// arrived. `None` until the first publication.
    pub fn latest(&mut self) -> Option<Arc<T>> {
        while let Some(value) = self.cell.pop() {
            self.last = Some(value);
        }
        self.last.clone()
    }

    /// True when a snapshot newer than the last [`latest`](Self::latest) is
    /// waiting.
    pub fn has_update(&self) -> bool {
        !self.cell.is_empty()
    }
}
