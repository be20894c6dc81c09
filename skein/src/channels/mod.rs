//! Merge channels: how one field of a state absorbs a node's partial update.
//!
//! A state type declares, per field, which channel folds updates into it:
//!
//! - [`LastValue`]: overwrite; the last write wins.
//! - [`Topic`]: append; new items are added after the existing ones, order kept,
//!   duplicates allowed.
//!
//! Fields missing from an update (`None`) are left untouched; see [`apply`].
//!
//! # Example
//!
//! ```rust
//! use skein::channels::{self, LastValue, Topic};
//!
//! let mut title = String::from("draft");
//! let mut log = vec!["a".to_string()];
//!
//! channels::apply::<LastValue, _>(&mut title, Some("final".to_string()));
//! channels::apply::<Topic, _>(&mut log, Some(vec!["b".to_string()]));
//! channels::apply::<Topic, _>(&mut log, None);
//!
//! assert_eq!(title, "final");
//! assert_eq!(log, vec!["a", "b"]);
//! ```

mod last_value;
mod topic;

pub use last_value::LastValue;
pub use topic::Topic;

/// Merge strategy for a field of type `T`.
///
/// Implemented by marker types; the state's `apply` names the channel for each field,
/// so the strategy is fixed at the type level rather than inferred at run time.
pub trait Channel<T> {
    /// Folds `update` into `current`.
    fn merge(current: &mut T, update: T);

    /// Channel name for logs and diagnostics.
    fn channel_type() -> &'static str;
}

/// Folds an optional field update through channel `C`; `None` leaves `current` as is.
pub fn apply<C, T>(current: &mut T, update: Option<T>)
where
    C: Channel<T>,
{
    if let Some(update) = update {
        C::merge(current, update);
    }
}
