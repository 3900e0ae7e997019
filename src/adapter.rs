//! Turning foreign operations and plain records into outcomes
//!
//! Three operand shapes are accepted, each through its own entry point:
//!
//! 1. An already-outcome-shaped record: [`from_record`], [`from_value`],
//!    [`from_json`] rebuild a live [`Outcome`] (rehydration).
//! 2. A future: [`from_future`] returns a [`Pending`] handle that settles once
//!    into an [`Outcome`] when awaited.
//! 3. A zero-argument closure: [`capture`] runs a `Result`-returning closure,
//!    [`attempt`] runs any closure and captures an escaping panic as
//!    [`Panic`]. Both run immediately, in the calling context.
//!
//! Nothing here retries, times out, or cancels. Failures become data; they are
//! never rethrown.
//!
//! # Examples
//!
//! ```
//! use verdict::adapter::{attempt, capture};
//! use verdict::Outcome;
//!
//! assert_eq!(capture(|| "42".parse::<i32>()), Outcome::Success(42));
//! assert!(capture(|| "x".parse::<i32>()).is_failure());
//!
//! let caught = attempt(|| -> i32 { panic!("boom") });
//! assert_eq!(caught.error().and_then(|p| p.message()), Some("boom"));
//! ```

use std::any::Any;
use std::fmt;
use std::future::Future;
use std::panic::{self, AssertUnwindSafe};
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::future::FusedFuture;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::record::{RawRecord, RecordError};
use crate::Outcome;

// ========== Records ==========

/// Rehydrate a plain record into a live outcome
///
/// # Errors
///
/// Returns a [`RecordError`] when the `ok` flag disagrees with the populated
/// field, or when both or neither of `value`/`error` are present.
pub fn from_record<T, E>(record: RawRecord<T, E>) -> Result<Outcome<T, E>, RecordError> {
    Outcome::try_from(record).inspect_err(|_err| {
        #[cfg(feature = "tracing")]
        tracing::debug!("rejected outcome record: {}", _err);
    })
}

/// Rehydrate an outcome from an already-parsed JSON value
///
/// Like [`from_json`], nesting depth is unbounded.
///
/// # Errors
///
/// Returns [`RecordError::Decode`] when the value is not a record or its
/// payloads do not fit `T`/`E`, and the shape errors of [`from_record`].
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use verdict::adapter::from_value;
/// use verdict::Outcome;
///
/// let o = from_value::<i32, String>(json!({"ok": true, "value": 1})).unwrap();
/// assert_eq!(o, Outcome::Success(1));
/// ```
pub fn from_value<T, E>(value: Value) -> Result<Outcome<T, E>, RecordError>
where
    T: DeserializeOwned,
    E: DeserializeOwned,
{
    let record = RawRecord::<T, E>::deserialize(serde_stacker::Deserializer::new(value));
    from_record(record.inspect_err(log_decode_error)?)
}

/// Rehydrate an outcome from JSON text
///
/// Nesting depth is unbounded: a [`Fault`](crate::Fault) cause chain of any
/// length that serializes also rehydrates. Deep input grows the stack on the
/// heap instead of overflowing it.
///
/// # Errors
///
/// Same as [`from_value`].
///
/// # Examples
///
/// ```
/// use verdict::adapter::from_json;
/// use verdict::{Fault, Outcome};
///
/// let o = from_json::<u32, Fault>(r#"{"ok":false,"error":{"type":"InvalidId","id":-1}}"#).unwrap();
/// assert_eq!(o.error().map(Fault::kind), Some("InvalidId"));
/// ```
pub fn from_json<T, E>(json: &str) -> Result<Outcome<T, E>, RecordError>
where
    T: DeserializeOwned,
    E: DeserializeOwned,
{
    let mut deserializer = serde_json::Deserializer::from_str(json);
    deserializer.disable_recursion_limit();
    let record = RawRecord::<T, E>::deserialize(serde_stacker::Deserializer::new(&mut deserializer))
        .and_then(|record| deserializer.end().map(|()| record));
    from_record(record.inspect_err(log_decode_error)?)
}

fn log_decode_error(_err: &serde_json::Error) {
    #[cfg(feature = "tracing")]
    tracing::debug!("cannot decode outcome record: {}", _err);
}

// ========== Closures ==========

/// Run a `Result`-returning closure now and capture its result
///
/// `Ok` becomes `Success`, `Err` becomes `Failure` holding the error verbatim.
pub fn capture<T, E, F>(f: F) -> Outcome<T, E>
where
    F: FnOnce() -> Result<T, E>,
{
    Outcome::from_result(f())
}

/// Run a closure now, capturing an escaping panic as a failure
///
/// A normal return becomes `Success`. A panic is caught at this boundary and
/// becomes `Failure(Panic)` with the payload kept verbatim; it is never
/// resumed. The panic hook still runs as usual.
///
/// # Examples
///
/// ```
/// use verdict::adapter::attempt;
/// use verdict::Outcome;
///
/// assert_eq!(attempt(|| 1).into_value(), Some(1));
///
/// // `unwrap` re-raises the stored error itself, so it comes back intact.
/// let caught = attempt(|| Outcome::<i32, _>::failure(404u16).unwrap());
/// let panic = caught.into_error().unwrap();
/// assert_eq!(panic.downcast::<u16>().ok(), Some(404));
/// ```
pub fn attempt<T, F>(f: F) -> Outcome<T, Panic>
where
    F: FnOnce() -> T,
{
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(value) => Outcome::Success(value),
        Err(payload) => {
            let caught = Panic::new(payload);
            #[cfg(feature = "tracing")]
            tracing::debug!(
                "captured panic: {}",
                caught.message().unwrap_or("<non-string payload>")
            );
            Outcome::Failure(caught)
        }
    }
}

/// A panic payload captured by [`attempt`]
///
/// The payload is the exact value the panic was raised with: a `&'static str`
/// or `String` for `panic!` with a message, or any `Send + 'static` value for
/// `std::panic::panic_any` (including errors re-raised by
/// [`Outcome::unwrap`]).
pub struct Panic {
    payload: Box<dyn Any + Send + 'static>,
}

impl Panic {
    /// Wrap a raw panic payload
    pub fn new(payload: Box<dyn Any + Send + 'static>) -> Self {
        Panic { payload }
    }

    /// The panic message, when the payload is a string
    pub fn message(&self) -> Option<&str> {
        self.payload
            .downcast_ref::<&'static str>()
            .copied()
            .or_else(|| self.payload.downcast_ref::<String>().map(String::as_str))
    }

    /// Borrow the payload as a concrete type
    pub fn downcast_ref<P: Any>(&self) -> Option<&P> {
        self.payload.downcast_ref::<P>()
    }

    /// Recover the payload as a concrete type
    ///
    /// # Errors
    ///
    /// Returns the panic unchanged when the payload is not a `P`.
    pub fn downcast<P: Any>(self) -> Result<P, Panic> {
        self.payload
            .downcast::<P>()
            .map(|boxed| *boxed)
            .map_err(Panic::new)
    }

    /// Take the raw payload
    pub fn into_payload(self) -> Box<dyn Any + Send + 'static> {
        self.payload
    }

    /// Resume unwinding with the original payload
    pub fn resume(self) -> ! {
        panic::resume_unwind(self.payload)
    }
}

impl fmt::Debug for Panic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Panic")
            .field("message", &self.message())
            .finish()
    }
}

impl fmt::Display for Panic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.message() {
            Some(message) => write!(f, "panicked: {}", message),
            None => f.write_str("panicked with a non-string payload"),
        }
    }
}

impl std::error::Error for Panic {}

// ========== Futures ==========

/// Wrap a future so that awaiting it yields an [`Outcome`]
///
/// The returned handle is not yet settled; nothing runs until it is polled.
/// `Ok` becomes `Success`, `Err` becomes `Failure` with the error verbatim.
///
/// # Examples
///
/// ```
/// use verdict::adapter::from_future;
/// use verdict::Outcome;
///
/// # tokio_test::block_on(async {
/// let ok = from_future(async { Ok::<_, String>(1) }).await;
/// assert_eq!(ok, Outcome::Success(1));
///
/// let rejected = from_future(async { Err::<i32, _>("refused") }).await;
/// assert_eq!(rejected, Outcome::Failure("refused"));
/// # });
/// ```
pub fn from_future<F, T, E>(future: F) -> Pending<F>
where
    F: Future<Output = Result<T, E>>,
{
    Pending {
        inner: Some(Box::pin(future)),
    }
}

/// A handle that settles exactly once into an [`Outcome`]
///
/// Created by [`from_future`]. Polling after settlement panics; check
/// [`FusedFuture::is_terminated`] first when polling by hand.
#[must_use = "a pending outcome does nothing unless awaited"]
pub struct Pending<F> {
    inner: Option<Pin<Box<F>>>,
}

impl<F> fmt::Debug for Pending<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pending")
            .field("settled", &self.inner.is_none())
            .finish()
    }
}

impl<F, T, E> Future for Pending<F>
where
    F: Future<Output = Result<T, E>>,
{
    type Output = Outcome<T, E>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let Some(inner) = self.inner.as_mut() else {
            panic!("Pending polled after completion");
        };
        let settled = futures::ready!(inner.as_mut().poll(cx));
        self.inner = None;

        #[cfg(feature = "tracing")]
        if settled.is_err() {
            tracing::debug!("pending outcome settled as failure");
        }

        Poll::Ready(Outcome::from_result(settled))
    }
}

impl<F, T, E> FusedFuture for Pending<F>
where
    F: Future<Output = Result<T, E>>,
{
    fn is_terminated(&self) -> bool {
        self.inner.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Fault;
    use futures::channel::oneshot;
    use futures::FutureExt;
    use serde_json::json;

    #[test]
    fn test_capture_ok_and_err() {
        assert_eq!(capture(|| Ok::<_, String>(1)), Outcome::Success(1));
        assert_eq!(capture(|| Err::<i32, _>("x")), Outcome::Failure("x"));
    }

    #[test]
    fn test_attempt_returns_value() {
        assert_eq!(attempt(|| 1).into_value(), Some(1));
    }

    #[test]
    fn test_attempt_captures_panic_message() {
        let o = attempt(|| -> i32 { panic!("exploded {}", 7) });
        let caught = o.into_error().unwrap();
        assert_eq!(caught.message(), Some("exploded 7"));
        assert_eq!(caught.to_string(), "panicked: exploded 7");
    }

    #[test]
    fn test_attempt_keeps_payload_verbatim() {
        #[derive(Debug, PartialEq)]
        struct Timeout {
            ms: u64,
        }

        let o = attempt(|| -> u8 { std::panic::panic_any(Timeout { ms: 1000 }) });
        let caught = o.into_error().unwrap();
        assert_eq!(caught.message(), None);
        assert_eq!(caught.downcast_ref::<Timeout>(), Some(&Timeout { ms: 1000 }));
        assert_eq!(caught.downcast::<Timeout>().unwrap(), Timeout { ms: 1000 });
    }

    #[test]
    fn test_attempt_recovers_unwrapped_error() {
        let fault = Fault::new("NotFound").with("id", 3);
        let inner = Outcome::<i32, _>::failure(fault.clone());
        let caught = attempt(move || inner.unwrap()).into_error().unwrap();
        assert_eq!(caught.downcast::<Fault>().unwrap(), fault);
    }

    #[test]
    fn test_downcast_wrong_type_returns_panic() {
        let caught = attempt(|| -> u8 { panic!("text") }).into_error().unwrap();
        let back = caught.downcast::<u8>().unwrap_err();
        assert_eq!(back.message(), Some("text"));
    }

    #[test]
    fn test_panic_into_fault() {
        let caught = attempt(|| -> u8 { panic!("bad state") })
            .annotate("Startup");
        let fault = caught.into_error().unwrap();
        assert_eq!(fault.kind(), "Startup");
        assert_eq!(fault.cause().unwrap().kind(), "Panic");
        assert_eq!(fault.cause().unwrap().field("message").unwrap(), "bad state");
    }

    #[test]
    fn test_from_json_rehydrates_both_shapes() {
        let s = from_json::<i32, String>(r#"{"ok":true,"value":1}"#).unwrap();
        assert_eq!(s, Outcome::Success(1));

        let f = from_json::<i32, Fault>(r#"{"ok":false,"error":{"type":"A"}}"#).unwrap();
        assert_eq!(f, Outcome::Failure(Fault::new("A")));
    }

    #[test]
    fn test_from_json_reports_shape_errors() {
        let err = from_json::<i32, String>(r#"{"ok":true,"error":"x"}"#).unwrap_err();
        assert!(matches!(err, RecordError::FlagMismatch { ok: true }));

        let err = from_json::<i32, String>("not json").unwrap_err();
        assert!(matches!(err, RecordError::Decode(_)));
    }

    #[test]
    fn test_from_value_rehydrates() {
        let o = from_value::<Vec<u8>, String>(json!({"ok": true, "value": [1, 2]})).unwrap();
        assert_eq!(o, Outcome::Success(vec![1, 2]));
    }

    #[test]
    fn test_from_record() {
        let o = from_record(RawRecord::<i32, String>::failure("e".into())).unwrap();
        assert_eq!(o, Outcome::Failure("e".to_string()));
    }

    #[tokio::test]
    async fn test_from_future_fulfilled() {
        let o = from_future(async { Ok::<_, String>(1) }).await;
        assert_eq!(o, Outcome::Success(1));
    }

    #[tokio::test]
    async fn test_from_future_rejected() {
        let o = from_future(async { Err::<i32, _>(Fault::new("Refused")) }).await;
        assert_eq!(o, Outcome::Failure(Fault::new("Refused")));
    }

    #[test]
    fn test_pending_is_not_settled_until_polled() {
        let (tx, rx) = oneshot::channel::<i32>();
        let mut pending = from_future(rx);
        assert!(!pending.is_terminated());
        assert!((&mut pending).now_or_never().is_none());
        assert!(!pending.is_terminated());

        tx.send(5).unwrap();
        let settled = futures::executor::block_on(&mut pending);
        assert_eq!(settled, Outcome::Success(5));
        assert!(pending.is_terminated());
    }

    #[test]
    fn test_pending_rejected_by_dropped_sender() {
        let (tx, rx) = oneshot::channel::<i32>();
        drop(tx);
        let settled = futures::executor::block_on(from_future(rx));
        assert_eq!(settled, Outcome::Failure(oneshot::Canceled));
    }

    #[test]
    #[should_panic(expected = "Pending polled after completion")]
    fn test_pending_polled_twice_panics() {
        let mut pending = from_future(async { Ok::<_, ()>(1) });
        let _ = futures::executor::block_on(&mut pending);
        let _ = (&mut pending).now_or_never();
    }

    #[test]
    fn test_pending_debug() {
        let pending = from_future(async { Ok::<_, ()>(1) });
        assert_eq!(format!("{:?}", pending), "Pending { settled: false }");
    }
}
