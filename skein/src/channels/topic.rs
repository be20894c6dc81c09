//! Topic channel: append-only accumulation into a list.

use super::Channel;

/// Append channel for `Vec<T>` fields (e.g. message history).
///
/// New items go after the existing ones in the order given; nothing is
/// deduplicated or removed, so the list only grows.
#[derive(Debug, Clone, Copy, Default)]
pub struct Topic;

impl<T> Channel<Vec<T>> for Topic {
    fn merge(current: &mut Vec<T>, update: Vec<T>) {
        current.extend(update);
    }

    fn channel_type() -> &'static str {
        "Topic"
    }
}
