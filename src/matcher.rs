//! Two-level matching: on the outcome variant, then on the error discriminant
//!
//! Outer dispatch answers "did it fail?" and is a plain fold over
//! [`Outcome`]. Inner dispatch answers "which failure?" by looking up the
//! error's discriminant in a [`Cases`] table. Keeping the two apart means the
//! inner table never needs an "ok" arm.
//!
//! # Examples
//!
//! ```
//! use verdict::matcher::{match_failure, Cases};
//! use verdict::{Fault, Outcome};
//!
//! fn retry_delay(o: Outcome<u32, Fault>) -> u64 {
//!     match_failure(
//!         o,
//!         |_| 0,
//!         Cases::new()
//!             .on("Timeout", |f: &Fault| f.field("ms").and_then(|v| v.as_u64()).unwrap_or(0) * 2)
//!             .on("RateLimited", |_: &Fault| 60_000),
//!     )
//!     .unwrap_or(u64::MAX)
//! }
//!
//! assert_eq!(retry_delay(Outcome::success(1)), 0);
//! assert_eq!(retry_delay(Outcome::failure(Fault::new("Timeout").with("ms", 1000))), 2000);
//! assert_eq!(retry_delay(Outcome::failure(Fault::new("Corrupt"))), u64::MAX);
//! ```

use std::collections::HashMap;
use std::fmt;

use crate::{Fault, Outcome};

/// Types that carry a string discriminant
pub trait Discriminant {
    /// The tag identifying this value's logical kind
    fn discriminant(&self) -> &str;
}

impl Discriminant for str {
    fn discriminant(&self) -> &str {
        self
    }
}

impl Discriminant for String {
    fn discriminant(&self) -> &str {
        self
    }
}

impl Discriminant for Fault {
    fn discriminant(&self) -> &str {
        self.kind()
    }
}

impl<D: Discriminant + ?Sized> Discriminant for &D {
    fn discriminant(&self) -> &str {
        (**self).discriminant()
    }
}

impl<D: Discriminant + ?Sized> Discriminant for Box<D> {
    fn discriminant(&self) -> &str {
        (**self).discriminant()
    }
}

/// Error returned when no arm matches a discriminant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnmatchedCase {
    /// The discriminant that had no arm
    pub discriminant: String,
}

impl fmt::Display for UnmatchedCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "no case matches discriminant `{}`", self.discriminant)
    }
}

impl std::error::Error for UnmatchedCase {}

type Arm<'a, P, R> = Box<dyn FnOnce(&P) -> R + 'a>;

/// A table of arms keyed by discriminant
///
/// Each arm receives the full payload so sibling fields are reachable.
/// Registering the same discriminant twice keeps the later arm.
///
/// # Examples
///
/// ```
/// use verdict::matcher::{match_discriminant, Cases, UnmatchedCase};
///
/// let delay = match_discriminant("Timeout", Cases::new().on("Timeout", |_| 2500));
/// assert_eq!(delay, Ok(2500));
///
/// let missing = match_discriminant("Crash", Cases::new().on("Timeout", |_| 2500));
/// assert_eq!(missing, Err(UnmatchedCase { discriminant: "Crash".into() }));
/// ```
pub struct Cases<'a, P: ?Sized, R> {
    arms: HashMap<String, Arm<'a, P, R>>,
    otherwise: Option<Arm<'a, P, R>>,
}

impl<P: ?Sized, R> fmt::Debug for Cases<'_, P, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<&str> = self.arms.keys().map(String::as_str).collect();
        keys.sort_unstable();
        f.debug_struct("Cases")
            .field("arms", &keys)
            .field("otherwise", &self.otherwise.is_some())
            .finish()
    }
}

impl<P: ?Sized, R> Default for Cases<'_, P, R> {
    fn default() -> Self {
        Cases {
            arms: HashMap::new(),
            otherwise: None,
        }
    }
}

impl<'a, P: ?Sized, R> Cases<'a, P, R> {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the arm for `discriminant`
    pub fn on<F>(mut self, discriminant: impl Into<String>, arm: F) -> Self
    where
        F: FnOnce(&P) -> R + 'a,
    {
        self.arms.insert(discriminant.into(), Box::new(arm));
        self
    }

    /// Register a default arm, used when no discriminant matches
    ///
    /// Without it, a miss is reported as [`UnmatchedCase`].
    ///
    /// # Examples
    ///
    /// ```
    /// use verdict::matcher::{match_discriminant, Cases};
    ///
    /// let cases = Cases::new().on("Timeout", |_| 1).otherwise(|tag: &str| tag.len());
    /// assert_eq!(match_discriminant("Unknown", cases), Ok(7));
    /// ```
    pub fn otherwise<F>(mut self, arm: F) -> Self
    where
        F: FnOnce(&P) -> R + 'a,
    {
        self.otherwise = Some(Box::new(arm));
        self
    }

    /// Check whether an arm is registered for `discriminant`
    pub fn covers(&self, discriminant: &str) -> bool {
        self.arms.contains_key(discriminant)
    }

    /// Number of registered arms, not counting the default
    pub fn len(&self) -> usize {
        self.arms.len()
    }

    /// Check whether no arms are registered
    pub fn is_empty(&self) -> bool {
        self.arms.is_empty()
    }

    /// Look up the payload's discriminant and invoke the matching arm
    ///
    /// # Errors
    ///
    /// Returns [`UnmatchedCase`] when no arm matches and no default arm is
    /// registered.
    pub fn dispatch(mut self, payload: &P) -> Result<R, UnmatchedCase>
    where
        P: Discriminant,
    {
        let discriminant = payload.discriminant();
        match self.arms.remove(discriminant).or(self.otherwise) {
            Some(arm) => Ok(arm(payload)),
            None => Err(UnmatchedCase {
                discriminant: discriminant.to_string(),
            }),
        }
    }
}

/// Fold an outcome with one arm per variant
///
/// Free-function form of [`Outcome::fold`].
///
/// # Examples
///
/// ```
/// use verdict::matcher::match_outcome;
/// use verdict::{Fault, Outcome};
///
/// assert_eq!(match_outcome(Outcome::<i32, Fault>::success(5), |v| v * 2, |_| 0), 10);
///
/// let kind = match_outcome(
///     Outcome::<i32, _>::failure(Fault::new("Timeout").with("ms", 1000)),
///     |_| String::new(),
///     |e| e.kind().to_string(),
/// );
/// assert_eq!(kind, "Timeout");
/// ```
pub fn match_outcome<T, E, R, F, G>(outcome: Outcome<T, E>, on_ok: F, on_err: G) -> R
where
    F: FnOnce(T) -> R,
    G: FnOnce(E) -> R,
{
    outcome.fold(on_ok, on_err)
}

/// Dispatch a bare discriminant against a table of arms
///
/// # Errors
///
/// Returns [`UnmatchedCase`] on a lookup miss without a default arm.
pub fn match_discriminant<R>(
    discriminant: &str,
    cases: Cases<'_, str, R>,
) -> Result<R, UnmatchedCase> {
    cases.dispatch(discriminant)
}

/// Outer then inner dispatch in one call
///
/// Success goes to `on_ok`; a failure is dispatched on its discriminant.
///
/// # Errors
///
/// Returns [`UnmatchedCase`] when the failure's discriminant has no arm.
pub fn match_failure<T, E, R, F>(
    outcome: Outcome<T, E>,
    on_ok: F,
    cases: Cases<'_, E, R>,
) -> Result<R, UnmatchedCase>
where
    E: Discriminant,
    F: FnOnce(T) -> R,
{
    match outcome {
        Outcome::Success(value) => Ok(on_ok(value)),
        Outcome::Failure(error) => cases.dispatch(&error),
    }
}
