//! Channel name utilities.

use std::borrow::Cow;

/// Returns true when the target names a channel (starts with `#`).
#[inline]
pub fn is_channel_name(target: &str) -> bool {
    target.starts_with('#')
}

/// Normalize a user-supplied channel name so it always carries the `#` prefix.
///
/// Case is preserved; channel keys are compared exactly.
pub fn normalize_channel(name: &str) -> Cow<'_, str> {
    if is_channel_name(name) {
        Cow::Borrowed(name)
    } else {
        Cow::Owned(format!("#{name}"))
    }
}
