//! Free-function forms of the outcome operations
//!
//! Every function takes the outcome first and forwards to the method of the
//! same name on [`Outcome`]. Use whichever style reads better at the call
//! site; the behavior is identical.
//!
//! # Examples
//!
//! ```
//! use verdict::ops;
//! use verdict::Outcome;
//!
//! let o = ops::map(Outcome::<_, String>::success(2), |x| x + 1);
//! let o = ops::flat_map(o, |x| Outcome::success(x * 10));
//! assert_eq!(ops::or(o, 0), 30);
//! ```

use serde_json::Value;

use crate::{Fault, Outcome};

/// See [`Outcome::map`]
#[inline]
pub fn map<T, E, U, F>(outcome: Outcome<T, E>, f: F) -> Outcome<U, E>
where
    F: FnOnce(T) -> U,
{
    outcome.map(f)
}

/// See [`Outcome::map_err`]
#[inline]
pub fn map_err<T, E, E2, F>(outcome: Outcome<T, E>, f: F) -> Outcome<T, E2>
where
    F: FnOnce(E) -> E2,
{
    outcome.map_err(f)
}

/// See [`Outcome::flat_map`]
#[inline]
pub fn flat_map<T, E, U, F>(outcome: Outcome<T, E>, f: F) -> Outcome<U, E>
where
    F: FnOnce(T) -> Outcome<U, E>,
{
    outcome.flat_map(f)
}

/// See [`Outcome::unwrap`]
///
/// # Panics
///
/// Panics with the contained error if the outcome is a failure.
#[inline]
#[track_caller]
pub fn unwrap<T, E>(outcome: Outcome<T, E>) -> T
where
    E: Send + 'static,
{
    outcome.unwrap()
}

/// See [`Outcome::or`]
#[inline]
pub fn or<T, E>(outcome: Outcome<T, E>, fallback: T) -> T {
    outcome.or(fallback)
}

/// See [`Outcome::or_else`]
#[inline]
pub fn or_else<T, E, F>(outcome: Outcome<T, E>, f: F) -> T
where
    F: FnOnce(E) -> T,
{
    outcome.or_else(f)
}

/// See [`Outcome::fold`]
#[inline]
pub fn fold<T, E, R, F, G>(outcome: Outcome<T, E>, on_ok: F, on_err: G) -> R
where
    F: FnOnce(T) -> R,
    G: FnOnce(E) -> R,
{
    outcome.fold(on_ok, on_err)
}

/// The sequence view of an outcome: one element on success, none on failure
#[inline]
pub fn iter<T, E>(outcome: Outcome<T, E>) -> std::option::IntoIter<T> {
    outcome.into_iter()
}

/// See [`Outcome::annotate_with`]
#[inline]
pub fn annotate<T, E, K, V, I>(
    outcome: Outcome<T, E>,
    kind: impl Into<String>,
    fields: I,
) -> Outcome<T, Fault>
where
    E: Into<Fault>,
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<Value>,
{
    outcome.annotate_with(kind, fields)
}
