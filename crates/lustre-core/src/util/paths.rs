//! Path expansion helpers for configured locations.

use std::borrow::Cow;
use std::path::PathBuf;

/// Expand a user-provided path string.
///
/// Expands `${VAR}`/`$VAR` first, then a leading `~`. Unknown variables are
/// left untouched. The result is not canonicalized.
///
/// # Examples
///
/// ```
/// use lustre_core::expand_path;
///
/// let p = expand_path("/var/lib/lustre/index");
/// assert_eq!(p.to_str(), Some("/var/lib/lustre/index"));
/// ```
pub fn expand_path<S: AsRef<str>>(input: S) -> PathBuf {
    let s = input.as_ref();
    let expanded_env = shellexpand::env(s).unwrap_or(Cow::Borrowed(s));
    let expanded = shellexpand::tilde(&expanded_env);
    PathBuf::from(expanded.as_ref())
}
