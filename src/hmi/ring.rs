//! Receive ring between the UART interrupt and the input task.
//!
//! The ring is split once at start-up into an [`RxProducer`], owned by the
//! interrupt handler, and an [`RxConsumer`], owned by the input task. With one
//! writer and one reader neither side ever waits on the other. When the ring
//! is full the newest byte is dropped and counted.

use crate::config::RX_RING_CAPACITY;
use core::sync::atomic::{AtomicU32, Ordering};
use heapless::spsc::{Consumer, Producer, Queue};

// heapless keeps one slot free to tell "full" from "empty"
const RX_RING_SLOTS: usize = RX_RING_CAPACITY + 1;

/// Fixed-capacity byte ring shared by the interrupt and the input task.
pub struct RxRing {
    queue: Queue<u8, RX_RING_SLOTS>,
    dropped: AtomicU32,
}

impl RxRing {
    /// Creates an empty ring.
    pub const fn new() -> Self {
        Self {
            queue: Queue::new(),
            dropped: AtomicU32::new(0),
        }
    }

    /// Number of bytes the ring can hold.
    pub const fn capacity(&self) -> usize {
        RX_RING_CAPACITY
    }

    /// Splits the ring into its interrupt-side and task-side handles.
    pub fn split(&mut self) -> (RxProducer<'_>, RxConsumer<'_>) {
        let dropped = &self.dropped;
        let (producer, consumer) = self.queue.split();
        (
            RxProducer {
                inner: producer,
                dropped,
            },
            RxConsumer {
                inner: consumer,
                dropped,
            },
        )
    }
}

impl Default for RxRing {
    fn default() -> Self {
        Self::new()
    }
}

/// Write side of the ring, for interrupt context.
pub struct RxProducer<'a> {
    inner: Producer<'a, u8, RX_RING_SLOTS>,
    dropped: &'a AtomicU32,
}

impl RxProducer<'_> {
    /// Stores one received byte.
    ///
    /// # Returns
    /// `true` if the byte was stored; `false` if the ring was full and the
    /// byte was dropped.
    pub fn push(&mut self, byte: u8) -> bool {
        match self.inner.enqueue(byte) {
            Ok(()) => true,
            Err(_) => {
                self.dropped.fetch_add(1, Ordering::Relaxed);
                false
            }
        }
    }
}

/// Read side of the ring, for task context.
pub struct RxConsumer<'a> {
    inner: Consumer<'a, u8, RX_RING_SLOTS>,
    dropped: &'a AtomicU32,
}

impl RxConsumer<'_> {
    /// Pops the oldest byte, if any. Never waits.
    pub fn pop(&mut self) -> Option<u8> {
        self.inner.dequeue()
    }

    /// Number of bytes waiting to be read.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns `true` when no bytes are waiting.
    pub fn is_empty(&self) -> bool {
        self.inner.len() == 0
    }

    /// Returns and clears the number of bytes dropped since the last call.
    pub fn take_dropped(&self) -> u32 {
        self.dropped.swap(0, Ordering::Relaxed)
    }
}
