//! The `Outcome` type: success or failure as a plain value
//!
//! `Outcome<T, E>` is the core of this crate. It carries either a value
//! (`Success`) or an error (`Failure`), never both and never neither. Every
//! combinator consumes the outcome and returns a new one, so outcomes behave as
//! immutable data that can be stored, compared, serialized, and rebuilt later.
//!
//! # Examples
//!
//! ## Basic usage
//!
//! ```
//! use verdict::Outcome;
//!
//! let success = Outcome::<_, &str>::success(42);
//! let failure = Outcome::<i32, _>::failure("boom");
//!
//! assert!(success.is_ok());
//! assert!(!failure.is_ok());
//! ```
//!
//! ## Chaining fallible steps
//!
//! ```
//! use verdict::Outcome;
//!
//! fn parse(input: &str) -> Outcome<i32, String> {
//!     input.parse::<i32>().map_err(|e| e.to_string()).into()
//! }
//!
//! fn positive(n: i32) -> Outcome<i32, String> {
//!     if n > 0 {
//!         Outcome::success(n)
//!     } else {
//!         Outcome::failure(format!("{} is not positive", n))
//!     }
//! }
//!
//! assert_eq!(parse("21").flat_map(positive).map(|n| n * 2), Outcome::Success(42));
//! assert_eq!(
//!     parse("-1").flat_map(positive),
//!     Outcome::Failure("-1 is not positive".to_string())
//! );
//! ```
//!
//! ## Falling back
//!
//! ```
//! use verdict::Outcome;
//!
//! let greeting = Outcome::<String, &str>::failure("InvalidId")
//!     .map(|name| format!("Hi {}!", name))
//!     .or("Hi stranger!".to_string());
//!
//! assert_eq!(greeting, "Hi stranger!");
//! ```

/// The outcome of a fallible operation, represented as data
///
/// # Type Parameters
///
/// * `T` - The type of the success value
/// * `E` - The type of the error
///
/// # Examples
///
/// ```
/// use verdict::Outcome;
///
/// let doubled = Outcome::<_, String>::success(21).map(|x| x * 2);
/// assert_eq!(doubled, Outcome::Success(42));
///
/// let untouched = Outcome::<i32, _>::failure("nope").map(|x| x * 2);
/// assert_eq!(untouched, Outcome::Failure("nope"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[must_use = "this `Outcome` may be a `Failure`, which should be handled"]
pub enum Outcome<T, E> {
    /// The operation succeeded with a value
    Success(T),
    /// The operation failed with an error
    Failure(E),
}

impl<T, E> Outcome<T, E> {
    // ========== Constructors ==========

    /// Create a successful outcome
    ///
    /// # Examples
    ///
    /// ```
    /// use verdict::Outcome;
    ///
    /// let o = Outcome::<i32, String>::success(42);
    /// assert!(o.is_success());
    /// ```
    #[inline]
    pub fn success(value: T) -> Self {
        Outcome::Success(value)
    }

    /// Create a failed outcome
    ///
    /// # Examples
    ///
    /// ```
    /// use verdict::Outcome;
    ///
    /// let o = Outcome::<i32, _>::failure("error");
    /// assert!(o.is_failure());
    /// ```
    #[inline]
    pub fn failure(error: E) -> Self {
        Outcome::Failure(error)
    }

    /// Create an outcome from a `Result`
    ///
    /// # Examples
    ///
    /// ```
    /// use verdict::Outcome;
    ///
    /// assert_eq!(Outcome::from_result(Ok::<_, String>(1)), Outcome::Success(1));
    /// assert_eq!(Outcome::from_result(Err::<i32, _>("e")), Outcome::Failure("e"));
    /// ```
    #[inline]
    pub fn from_result(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Outcome::Success(value),
            Err(error) => Outcome::Failure(error),
        }
    }

    /// Create an outcome from an `Option`, using `error` when it is `None`
    ///
    /// # Examples
    ///
    /// ```
    /// use verdict::Outcome;
    ///
    /// assert_eq!(Outcome::from_option(Some(3), "missing"), Outcome::Success(3));
    /// assert_eq!(Outcome::from_option(None::<i32>, "missing"), Outcome::Failure("missing"));
    /// ```
    #[inline]
    pub fn from_option(option: Option<T>, error: E) -> Self {
        match option {
            Some(value) => Outcome::Success(value),
            None => Outcome::Failure(error),
        }
    }

    /// Convert this outcome into a `Result`
    ///
    /// This is the non-panicking way out of an outcome, suitable for `?`.
    ///
    /// # Examples
    ///
    /// ```
    /// use verdict::Outcome;
    ///
    /// fn half(o: Outcome<i32, String>) -> Result<i32, String> {
    ///     Ok(o.into_result()? / 2)
    /// }
    ///
    /// assert_eq!(half(Outcome::success(10)), Ok(5));
    /// assert_eq!(half(Outcome::failure("bad".into())), Err("bad".to_string()));
    /// ```
    #[inline]
    pub fn into_result(self) -> Result<T, E> {
        match self {
            Outcome::Success(value) => Ok(value),
            Outcome::Failure(error) => Err(error),
        }
    }

    // ========== Variant inspection ==========

    /// The discriminant flag: `true` for `Success`, `false` for `Failure`
    #[inline]
    pub fn is_ok(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    /// Check if this outcome is a success
    #[inline]
    pub fn is_success(&self) -> bool {
        self.is_ok()
    }

    /// Check if this outcome is a failure
    #[inline]
    pub fn is_failure(&self) -> bool {
        !self.is_ok()
    }

    /// Borrow the success value, if present
    ///
    /// # Examples
    ///
    /// ```
    /// use verdict::Outcome;
    ///
    /// assert_eq!(Outcome::<_, ()>::success(1).value(), Some(&1));
    /// assert_eq!(Outcome::<i32, _>::failure(()).value(), None);
    /// ```
    #[inline]
    pub fn value(&self) -> Option<&T> {
        match self {
            Outcome::Success(value) => Some(value),
            Outcome::Failure(_) => None,
        }
    }

    /// Borrow the error, if present
    #[inline]
    pub fn error(&self) -> Option<&E> {
        match self {
            Outcome::Success(_) => None,
            Outcome::Failure(error) => Some(error),
        }
    }

    /// Take the success value, discarding any error
    #[inline]
    pub fn into_value(self) -> Option<T> {
        match self {
            Outcome::Success(value) => Some(value),
            Outcome::Failure(_) => None,
        }
    }

    /// Take the error, discarding any success value
    #[inline]
    pub fn into_error(self) -> Option<E> {
        match self {
            Outcome::Success(_) => None,
            Outcome::Failure(error) => Some(error),
        }
    }

    /// Convert `&Outcome<T, E>` to `Outcome<&T, &E>`
    #[inline]
    pub fn as_ref(&self) -> Outcome<&T, &E> {
        match self {
            Outcome::Success(value) => Outcome::Success(value),
            Outcome::Failure(error) => Outcome::Failure(error),
        }
    }

    /// Convert `&mut Outcome<T, E>` to `Outcome<&mut T, &mut E>`
    #[inline]
    pub fn as_mut(&mut self) -> Outcome<&mut T, &mut E> {
        match self {
            Outcome::Success(value) => Outcome::Success(value),
            Outcome::Failure(error) => Outcome::Failure(error),
        }
    }

    // ========== Combinators ==========

    /// Transform the success value if present
    ///
    /// A failure passes through unchanged and `f` is never called.
    ///
    /// # Examples
    ///
    /// ```
    /// use verdict::Outcome;
    ///
    /// assert_eq!(Outcome::<_, String>::success(5).map(|x| x * 2), Outcome::Success(10));
    /// ```
    #[inline]
    pub fn map<U, F>(self, f: F) -> Outcome<U, E>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Outcome::Success(value) => Outcome::Success(f(value)),
            Outcome::Failure(error) => Outcome::Failure(error),
        }
    }

    /// Transform the error if present
    ///
    /// A success passes through unchanged and `f` is never called.
    ///
    /// # Examples
    ///
    /// ```
    /// use verdict::Outcome;
    ///
    /// let o = Outcome::<i32, _>::failure("disk full").map_err(|e| e.len());
    /// assert_eq!(o, Outcome::Failure(9));
    /// ```
    #[inline]
    pub fn map_err<E2, F>(self, f: F) -> Outcome<T, E2>
    where
        F: FnOnce(E) -> E2,
    {
        match self {
            Outcome::Success(value) => Outcome::Success(value),
            Outcome::Failure(error) => Outcome::Failure(f(error)),
        }
    }

    /// Chain a dependent fallible step
    ///
    /// On success the result of `f` is returned directly, without nesting.
    /// A failure short-circuits and `f` is never called.
    ///
    /// # Examples
    ///
    /// ```
    /// use verdict::Outcome;
    ///
    /// let checked = |x: i32| {
    ///     if x < 100 {
    ///         Outcome::success(x + 1)
    ///     } else {
    ///         Outcome::failure("too big")
    ///     }
    /// };
    ///
    /// assert_eq!(Outcome::success(1).flat_map(checked), Outcome::Success(2));
    /// assert_eq!(Outcome::success(100).flat_map(checked), Outcome::Failure("too big"));
    /// ```
    #[inline]
    pub fn flat_map<U, F>(self, f: F) -> Outcome<U, E>
    where
        F: FnOnce(T) -> Outcome<U, E>,
    {
        match self {
            Outcome::Success(value) => f(value),
            Outcome::Failure(error) => Outcome::Failure(error),
        }
    }

    /// Alias for [`flat_map`](Outcome::flat_map), matching `Result::and_then`
    #[inline]
    pub fn and_then<U, F>(self, f: F) -> Outcome<U, E>
    where
        F: FnOnce(T) -> Outcome<U, E>,
    {
        self.flat_map(f)
    }

    /// Fold both variants into a single value
    ///
    /// `on_ok` receives the value, `on_err` receives the error. Both arms
    /// return the same type.
    ///
    /// # Examples
    ///
    /// ```
    /// use verdict::Outcome;
    ///
    /// let n = Outcome::<i32, String>::success(5).fold(|v| v * 2, |_| 0);
    /// assert_eq!(n, 10);
    /// ```
    #[inline]
    pub fn fold<R, F, G>(self, on_ok: F, on_err: G) -> R
    where
        F: FnOnce(T) -> R,
        G: FnOnce(E) -> R,
    {
        match self {
            Outcome::Success(value) => on_ok(value),
            Outcome::Failure(error) => on_err(error),
        }
    }

    /// Return the success value, or `fallback` on failure
    ///
    /// The fallback is evaluated eagerly by the caller. Use
    /// [`or_else`](Outcome::or_else) when it is expensive to build.
    ///
    /// The fallback has the success type `T`. For a fallback of another type,
    /// [`map`](Outcome::map) the value into that type first.
    ///
    /// # Examples
    ///
    /// ```
    /// use verdict::Outcome;
    ///
    /// assert_eq!(Outcome::<_, ()>::success(1).or(0), 1);
    /// assert_eq!(Outcome::<i32, _>::failure(()).or(0), 0);
    ///
    /// let label = Outcome::<u16, ()>::success(8080).map(|port| port.to_string()).or("none".into());
    /// assert_eq!(label, "8080");
    /// let label = Outcome::<u16, _>::failure(()).map(|port| port.to_string()).or("none".into());
    /// assert_eq!(label, "none");
    /// ```
    #[inline]
    pub fn or(self, fallback: T) -> T {
        match self {
            Outcome::Success(value) => value,
            Outcome::Failure(_) => fallback,
        }
    }

    /// Return the success value, or compute one from the error
    ///
    /// # Examples
    ///
    /// ```
    /// use verdict::Outcome;
    ///
    /// let len = Outcome::<usize, &str>::failure("four").or_else(|e| e.len());
    /// assert_eq!(len, 4);
    /// ```
    #[inline]
    pub fn or_else<F>(self, f: F) -> T
    where
        F: FnOnce(E) -> T,
    {
        match self {
            Outcome::Success(value) => value,
            Outcome::Failure(error) => f(error),
        }
    }

    /// Call `f` with a reference to the success value, then return the outcome
    #[inline]
    pub fn inspect<F>(self, f: F) -> Self
    where
        F: FnOnce(&T),
    {
        if let Outcome::Success(value) = &self {
            f(value);
        }
        self
    }

    /// Call `f` with a reference to the error, then return the outcome
    #[inline]
    pub fn inspect_err<F>(self, f: F) -> Self
    where
        F: FnOnce(&E),
    {
        if let Outcome::Failure(error) = &self {
            f(error);
        }
        self
    }

    /// Return the success value, re-raising the error on failure
    ///
    /// The panic payload is the error itself, not a message built from it,
    /// so `std::panic::catch_unwind` (or [`attempt`](crate::adapter::attempt))
    /// can recover exactly the stored error by downcasting.
    ///
    /// # Panics
    ///
    /// Panics with the contained error if this outcome is a `Failure`.
    ///
    /// # Examples
    ///
    /// ```
    /// use verdict::Outcome;
    ///
    /// assert_eq!(Outcome::<_, &str>::success(7).unwrap(), 7);
    ///
    /// let payload = std::panic::catch_unwind(|| Outcome::<i32, _>::failure("boom").unwrap())
    ///     .unwrap_err();
    /// assert_eq!(payload.downcast_ref::<&str>(), Some(&"boom"));
    /// ```
    #[inline]
    #[track_caller]
    pub fn unwrap(self) -> T
    where
        E: Send + 'static,
    {
        match self {
            Outcome::Success(value) => value,
            Outcome::Failure(error) => std::panic::panic_any(error),
        }
    }

    // ========== Sequence view ==========

    /// Iterate over the success value: one element for `Success`, none for `Failure`
    ///
    /// # Examples
    ///
    /// ```
    /// use verdict::Outcome;
    ///
    /// assert_eq!(Outcome::<_, ()>::success(3).iter().collect::<Vec<_>>(), vec![&3]);
    /// assert_eq!(Outcome::<i32, _>::failure(()).iter().count(), 0);
    /// ```
    #[inline]
    pub fn iter(&self) -> std::option::IntoIter<&T> {
        self.value().into_iter()
    }

    /// Mutable iteration over the success value
    #[inline]
    pub fn iter_mut(&mut self) -> std::option::IntoIter<&mut T> {
        self.as_mut().into_value().into_iter()
    }
}

impl<T, E> Outcome<Outcome<T, E>, E> {
    /// Flatten a nested outcome
    ///
    /// # Examples
    ///
    /// ```
    /// use verdict::Outcome;
    ///
    /// let nested = Outcome::<Outcome<i32, &str>, &str>::success(Outcome::failure("inner"));
    /// assert_eq!(nested.flatten(), Outcome::Failure("inner"));
    /// ```
    #[inline]
    pub fn flatten(self) -> Outcome<T, E> {
        self.flat_map(|inner| inner)
    }
}

// ========== Trait Implementations ==========

impl<T, E> From<Result<T, E>> for Outcome<T, E> {
    fn from(result: Result<T, E>) -> Self {
        Outcome::from_result(result)
    }
}

impl<T, E> From<Outcome<T, E>> for Result<T, E> {
    fn from(outcome: Outcome<T, E>) -> Self {
        outcome.into_result()
    }
}

impl<T, E> IntoIterator for Outcome<T, E> {
    type Item = T;
    type IntoIter = std::option::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.into_value().into_iter()
    }
}

impl<'a, T, E> IntoIterator for &'a Outcome<T, E> {
    type Item = &'a T;
    type IntoIter = std::option::IntoIter<&'a T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T, E> IntoIterator for &'a mut Outcome<T, E> {
    type Item = &'a mut T;
    type IntoIter = std::option::IntoIter<&'a mut T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

/// Collect outcomes into a single outcome; the first failure wins
///
/// ```
/// use verdict::Outcome;
///
/// let all: Outcome<Vec<i32>, &str> = vec![Outcome::success(1), Outcome::success(2)]
///     .into_iter()
///     .collect();
/// assert_eq!(all, Outcome::Success(vec![1, 2]));
///
/// let first_bad: Outcome<Vec<i32>, &str> =
///     vec![Outcome::success(1), Outcome::failure("a"), Outcome::failure("b")]
///         .into_iter()
///         .collect();
/// assert_eq!(first_bad, Outcome::Failure("a"));
/// ```
impl<T, E, C> FromIterator<Outcome<T, E>> for Outcome<C, E>
where
    C: FromIterator<T>,
{
    fn from_iter<I: IntoIterator<Item = Outcome<T, E>>>(iter: I) -> Self {
        iter.into_iter()
            .map(Outcome::into_result)
            .collect::<Result<C, E>>()
            .into()
    }
}

#[cfg(feature = "try_trait")]
impl<T, E> std::ops::Try for Outcome<T, E> {
    type Output = T;
    type Residual = Outcome<std::convert::Infallible, E>;

    #[inline]
    fn from_output(output: Self::Output) -> Self {
        Outcome::Success(output)
    }

    #[inline]
    fn branch(self) -> std::ops::ControlFlow<Self::Residual, Self::Output> {
        match self {
            Outcome::Success(value) => std::ops::ControlFlow::Continue(value),
            Outcome::Failure(error) => std::ops::ControlFlow::Break(Outcome::Failure(error)),
        }
    }
}

#[cfg(feature = "try_trait")]
impl<T, E> std::ops::Residual<T> for Outcome<std::convert::Infallible, E> {
    type TryType = Outcome<T, E>;
}

#[cfg(feature = "try_trait")]
impl<T, E, F: From<E>> std::ops::FromResidual<Outcome<std::convert::Infallible, E>>
    for Outcome<T, F>
{
    #[inline]
    fn from_residual(residual: Outcome<std::convert::Infallible, E>) -> Self {
        match residual {
            Outcome::Failure(error) => Outcome::Failure(From::from(error)),
            Outcome::Success(never) => match never {},
        }
    }
}

#[cfg(feature = "try_trait")]
impl<T, E, F: From<E>> std::ops::FromResidual<Result<std::convert::Infallible, E>>
    for Outcome<T, F>
{
    #[inline]
    fn from_residual(residual: Result<std::convert::Infallible, E>) -> Self {
        match residual {
            Err(error) => Outcome::Failure(From::from(error)),
            Ok(never) => match never {},
        }
    }
}

// ========== Collection Utilities ==========

/// Extract the success values from an iterator of outcomes, in order
///
/// Concatenating the sequence view of many outcomes yields exactly their
/// success values.
///
/// # Example
///
/// ```
/// use verdict::outcome::{successes, Outcome};
///
/// let items = vec![Outcome::success(1), Outcome::failure("x"), Outcome::success(3)];
/// assert_eq!(successes(items).collect::<Vec<_>>(), vec![1, 3]);
/// ```
pub fn successes<T, E, I>(iter: I) -> impl Iterator<Item = T>
where
    I: IntoIterator<Item = Outcome<T, E>>,
{
    iter.into_iter().flatten()
}

/// Extract the errors from an iterator of outcomes, in order
pub fn failures<T, E, I>(iter: I) -> impl Iterator<Item = E>
where
    I: IntoIterator<Item = Outcome<T, E>>,
{
    iter.into_iter().filter_map(Outcome::into_error)
}

/// Split an iterator of outcomes into success values and errors
///
/// # Example
///
/// ```
/// use verdict::outcome::{partition, Outcome};
///
/// let (values, errors) = partition(vec![
///     Outcome::success(1),
///     Outcome::failure("a"),
///     Outcome::success(2),
/// ]);
/// assert_eq!(values, vec![1, 2]);
/// assert_eq!(errors, vec!["a"]);
/// ```
pub fn partition<T, E, I>(iter: I) -> (Vec<T>, Vec<E>)
where
    I: IntoIterator<Item = Outcome<T, E>>,
{
    let mut values = Vec::new();
    let mut errors = Vec::new();

    for item in iter {
        match item {
            Outcome::Success(value) => values.push(value),
            Outcome::Failure(error) => errors.push(error),
        }
    }

    (values, errors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_constructors() {
        assert!(Outcome::<i32, ()>::success(1).is_ok());
        assert!(!Outcome::<i32, ()>::failure(()).is_ok());
        assert!(Outcome::<i32, ()>::failure(()).is_failure());
    }

    #[test]
    fn test_flag_agrees_with_payload() {
        let s = Outcome::<i32, &str>::success(1);
        assert_eq!((s.is_ok(), s.value(), s.error()), (true, Some(&1), None));

        let f = Outcome::<i32, &str>::failure("e");
        assert_eq!((f.is_ok(), f.value(), f.error()), (false, None, Some(&"e")));
    }

    #[test]
    fn test_map_on_failure_never_calls_f() {
        let called = Cell::new(false);
        let o = Outcome::<i32, &str>::failure("e").map(|x| {
            called.set(true);
            x + 1
        });
        assert_eq!(o, Outcome::Failure("e"));
        assert!(!called.get());
    }

    #[test]
    fn test_map_err_on_success_never_calls_f() {
        let called = Cell::new(false);
        let o = Outcome::<i32, &str>::success(1).map_err(|e| {
            called.set(true);
            e.len()
        });
        assert_eq!(o, Outcome::Success(1));
        assert!(!called.get());
    }

    #[test]
    fn test_map_err_on_failure() {
        let o = Outcome::<i32, _>::failure("abc").map_err(|e| e.to_uppercase());
        assert_eq!(o, Outcome::Failure("ABC".to_string()));
    }

    #[test]
    fn test_flat_map_short_circuits() {
        let called = Cell::new(false);
        let o = Outcome::<i32, &str>::failure("e").flat_map(|x| {
            called.set(true);
            Outcome::success(x)
        });
        assert_eq!(o, Outcome::Failure("e"));
        assert!(!called.get());
    }

    #[test]
    fn test_flat_map_returns_inner_outcome_directly() {
        let o = Outcome::<i32, &str>::success(2).flat_map(|_| Outcome::<i32, _>::failure("inner"));
        assert_eq!(o, Outcome::Failure("inner"));
    }

    #[test]
    fn test_or() {
        assert_eq!(Outcome::<_, &str>::success("v").or("fb"), "v");
        assert_eq!(Outcome::<&str, _>::failure(7).or("fb"), "fb");
    }

    #[test]
    fn test_or_with_fallback_of_another_type() {
        let describe = |o: Outcome<u8, &str>| o.map(|n| format!("#{}", n)).or(String::from("none"));
        assert_eq!(describe(Outcome::success(3)), "#3");
        assert_eq!(describe(Outcome::failure("gone")), "none");
    }

    #[test]
    fn test_or_else_is_lazy() {
        let called = Cell::new(false);
        let v = Outcome::<i32, &str>::success(1).or_else(|_| {
            called.set(true);
            0
        });
        assert_eq!(v, 1);
        assert!(!called.get());
    }

    #[test]
    fn test_unwrap_success() {
        assert_eq!(Outcome::<_, String>::success(3).unwrap(), 3);
    }

    #[test]
    fn test_unwrap_failure_raises_the_error_itself() {
        #[derive(Debug, PartialEq)]
        struct NotFound {
            id: u32,
        }

        let payload = std::panic::catch_unwind(|| {
            Outcome::<i32, _>::failure(NotFound { id: 9 }).unwrap()
        })
        .unwrap_err();

        assert_eq!(payload.downcast_ref::<NotFound>(), Some(&NotFound { id: 9 }));
    }

    #[test]
    fn test_sequence_view() {
        let s = Outcome::<_, ()>::success(3);
        assert_eq!(s.into_iter().collect::<Vec<_>>(), vec![3]);

        let f = Outcome::<i32, _>::failure(());
        assert_eq!(f.into_iter().collect::<Vec<_>>(), Vec::<i32>::new());
    }

    #[test]
    fn test_sequence_concatenation_keeps_successes() {
        let items = vec![
            Outcome::success(1),
            Outcome::failure("a"),
            Outcome::success(2),
            Outcome::failure("b"),
        ];
        let values: Vec<i32> = items.into_iter().flatten().collect();
        assert_eq!(values, vec![1, 2]);
    }

    #[test]
    fn test_iter_mut() {
        let mut o = Outcome::<_, ()>::success(2);
        for v in &mut o {
            *v *= 10;
        }
        assert_eq!(o, Outcome::Success(20));
    }

    #[test]
    fn test_fold() {
        assert_eq!(Outcome::<i32, &str>::success(5).fold(|v| v * 2, |_| 0), 10);
        assert_eq!(
            Outcome::<i32, &str>::failure("Timeout").fold(|_| "ok", |e| e),
            "Timeout"
        );
    }

    #[test]
    fn test_inspect() {
        let seen = Cell::new(0);
        let o = Outcome::<i32, &str>::success(4)
            .inspect(|v| seen.set(*v))
            .inspect_err(|_| seen.set(-1));
        assert_eq!(o, Outcome::Success(4));
        assert_eq!(seen.get(), 4);
    }

    #[test]
    fn test_result_conversion() {
        let r: Result<i32, &str> = Outcome::success(1).into();
        assert_eq!(r, Ok(1));
        let o: Outcome<i32, &str> = Err("e").into();
        assert_eq!(o, Outcome::Failure("e"));
    }

    #[test]
    fn test_collect_first_failure_wins() {
        let o: Outcome<Vec<i32>, &str> = vec![
            Outcome::success(1),
            Outcome::failure("first"),
            Outcome::failure("second"),
        ]
        .into_iter()
        .collect();
        assert_eq!(o, Outcome::Failure("first"));
    }

    #[test]
    fn test_partition_and_failures() {
        let items = vec![Outcome::success(1), Outcome::failure("a"), Outcome::success(2)];
        assert_eq!(failures(items.clone()).collect::<Vec<_>>(), vec!["a"]);
        assert_eq!(partition(items), (vec![1, 2], vec!["a"]));
    }

    #[test]
    fn test_invalid_id_scenario_reaches_fallback() {
        let mapped = Cell::new(false);
        let chained = Cell::new(false);

        let greeting = Outcome::<u32, &str>::failure("InvalidId")
            .map(|id| {
                mapped.set(true);
                id + 1
            })
            .flat_map(|id| {
                chained.set(true);
                Outcome::success(format!("Hi user {}!", id))
            })
            .or("Hi stranger!".to_string());

        assert_eq!(greeting, "Hi stranger!");
        assert!(!mapped.get());
        assert!(!chained.get());
    }
}
