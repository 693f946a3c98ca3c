//! Bounded message queues between pipeline stages.
//!
//! Both operations return immediately: `enqueue` fails when the queue is full
//! and `dequeue` returns `None` when it is empty. Consumers poll at a fixed
//! period instead of being woken. Ordering is FIFO within one queue; nothing
//! is guaranteed across queues.

use crate::config::QUEUE_DEPTH;
use crate::error::QueueError;
use crate::messages::{HmiMessage, ServoMessage};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;

/// Fixed-capacity, non-blocking FIFO safe to share between tasks.
pub struct MessageQueue<T, const N: usize = QUEUE_DEPTH> {
    channel: Channel<CriticalSectionRawMutex, T, N>,
}

/// Input task to coordinator.
pub type HmiQueue = MessageQueue<HmiMessage>;

/// Coordinator to servo task.
pub type ServoQueue = MessageQueue<ServoMessage>;

impl<T, const N: usize> MessageQueue<T, N> {
    pub const fn new() -> Self {
        Self {
            channel: Channel::new(),
        }
    }

    /// Appends a message without waiting.
    ///
    /// # Errors
    /// [`QueueError::Full`] if `N` messages are already pending. The message
    /// is dropped; messages already queued are untouched.
    pub fn enqueue(&self, msg: T) -> Result<(), QueueError> {
        self.channel.try_send(msg).map_err(|_| QueueError::Full)
    }

    /// Removes the oldest message, if any, without waiting.
    pub fn dequeue(&self) -> Option<T> {
        self.channel.try_receive().ok()
    }

    /// Number of pending messages.
    pub fn len(&self) -> usize {
        self.channel.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channel.is_empty()
    }

    pub const fn capacity(&self) -> usize {
        N
    }
}

impl<T, const N: usize> Default for MessageQueue<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::{HmiCommand, HmiMessage};

    #[test]
    fn test_sixth_message_is_rejected_and_fifo_preserved() {
        let queue = HmiQueue::new();
        assert_eq!(queue.capacity(), 5);

        for v in 0..5 {
            queue.enqueue(HmiMessage::servo(HmiCommand::SetDuty(v))).unwrap();
        }
        assert_eq!(
            queue.enqueue(HmiMessage::servo(HmiCommand::SetDuty(99))),
            Err(QueueError::Full)
        );
        assert_eq!(queue.len(), 5);

        for v in 0..5 {
            assert_eq!(
                queue.dequeue(),
                Some(HmiMessage::servo(HmiCommand::SetDuty(v)))
            );
        }
        assert_eq!(queue.dequeue(), None);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_dequeue_on_empty_returns_none() {
        let queue: MessageQueue<u32> = MessageQueue::new();
        assert_eq!(queue.dequeue(), None);
        queue.enqueue(7).unwrap();
        assert_eq!(queue.dequeue(), Some(7));
        assert_eq!(queue.dequeue(), None);
    }

    #[test]
    fn test_space_frees_after_dequeue() {
        let queue: MessageQueue<u32> = MessageQueue::new();
        for v in 0..5 {
            queue.enqueue(v).unwrap();
        }
        assert!(queue.enqueue(5).is_err());
        assert_eq!(queue.dequeue(), Some(0));
        queue.enqueue(5).unwrap();
        let drained: std::vec::Vec<u32> = core::iter::from_fn(|| queue.dequeue()).collect();
        assert_eq!(drained, [1, 2, 3, 4, 5]);
    }
}
