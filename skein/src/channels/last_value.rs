//! LastValue channel: keeps only the last written value.

use super::Channel;

/// Overwrite channel: the update replaces the current value.
///
/// The default strategy for scalar fields such as `graph_state`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LastValue;

impl<T> Channel<T> for LastValue {
    fn merge(current: &mut T, update: T) {
        *current = update;
    }

    fn channel_type() -> &'static str {
        "LastValue"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channels::apply;

    #[test]
    fn last_write_wins() {
        let mut v = 1;
        LastValue::merge(&mut v, 2);
        LastValue::merge(&mut v, 3);
        assert_eq!(v, 3);
    }

    #[test]
    fn none_update_keeps_value() {
        let mut v = String::from("Hi");
        apply::<LastValue, _>(&mut v, None);
        assert_eq!(v, "Hi");
        assert_eq!(<LastValue as Channel<String>>::channel_type(), "LastValue");
    }
}
