//! Testing utilities for code that returns outcomes
//!
//! Assertion macros for the common checks, plus `proptest` strategies for
//! [`Outcome`] and [`Fault`] behind the `proptest` feature.
//!
//! # Examples
//!
//! ```rust
//! use verdict::{assert_failure, assert_fault_kind, assert_success, Fault, Outcome};
//!
//! assert_success!(Outcome::<_, String>::success(42));
//! assert_failure!(Outcome::<i32, _>::failure("error"));
//! assert_fault_kind!(Outcome::<i32, _>::failure(Fault::new("Timeout")), "Timeout");
//! ```

#[cfg(feature = "proptest")]
use crate::{Fault, Outcome};

/// Assert that an outcome is a success.
///
/// This macro will panic if the outcome is a `Failure`.
///
/// # Example
///
/// ```rust
/// use verdict::{assert_success, Outcome};
///
/// assert_success!(Outcome::<_, Vec<String>>::success(42));
/// ```
#[macro_export]
macro_rules! assert_success {
    ($outcome:expr) => {
        match $outcome {
            $crate::Outcome::Success(_) => {}
            $crate::Outcome::Failure(e) => {
                panic!("Expected Success, got Failure: {:?}", e);
            }
        }
    };
}

/// Assert that an outcome is a failure.
///
/// This macro will panic if the outcome is a `Success`.
///
/// # Example
///
/// ```rust
/// use verdict::{assert_failure, Outcome};
///
/// assert_failure!(Outcome::<i32, _>::failure("error"));
/// ```
#[macro_export]
macro_rules! assert_failure {
    ($outcome:expr) => {
        match $outcome {
            $crate::Outcome::Failure(_) => {}
            $crate::Outcome::Success(v) => {
                panic!("Expected Failure, got Success: {:?}", v);
            }
        }
    };
}

/// Assert that an outcome is a failure with the given discriminant.
///
/// Works for any error type implementing
/// [`Discriminant`](crate::matcher::Discriminant), including [`Fault`](crate::Fault).
///
/// # Example
///
/// ```rust
/// use verdict::{assert_fault_kind, Fault, Outcome};
///
/// let o = Outcome::<i32, _>::failure(Fault::new("A")).annotate("B");
/// assert_fault_kind!(o, "B");
/// ```
#[macro_export]
macro_rules! assert_fault_kind {
    ($outcome:expr, $kind:expr) => {
        match $outcome {
            $crate::Outcome::Failure(error) => {
                assert_eq!(
                    $crate::matcher::Discriminant::discriminant(&error),
                    $kind,
                    "unexpected failure discriminant"
                );
            }
            $crate::Outcome::Success(v) => {
                panic!(
                    "Expected Failure of kind {:?}, got Success: {:?}",
                    $kind, v
                );
            }
        }
    };
}

#[cfg(feature = "proptest")]
use proptest::prelude::*;

#[cfg(feature = "proptest")]
impl<T, E> Arbitrary for Outcome<T, E>
where
    T: Arbitrary + 'static,
    E: Arbitrary + 'static,
    T::Strategy: 'static,
    E::Strategy: 'static,
{
    type Parameters = (T::Parameters, E::Parameters);
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(args: Self::Parameters) -> Self::Strategy {
        let (t_params, e_params) = args;
        prop_oneof![
            any_with::<T>(t_params).prop_map(Outcome::success),
            any_with::<E>(e_params).prop_map(Outcome::failure),
        ]
        .boxed()
    }
}

#[cfg(feature = "proptest")]
impl Arbitrary for Fault {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_args: Self::Parameters) -> Self::Strategy {
        fault_layer()
            .prop_recursive(4, 8, 1, |inner| {
                (fault_layer(), inner).prop_map(|(outer, cause)| outer.caused_by(cause))
            })
            .boxed()
    }
}

// Floats are left out so JSON round trips compare exactly.
#[cfg(feature = "proptest")]
fn fault_layer() -> impl Strategy<Value = Fault> {
    let value = prop_oneof![
        any::<i64>().prop_map(serde_json::Value::from),
        any::<bool>().prop_map(serde_json::Value::from),
        "[a-z ]{0,12}".prop_map(serde_json::Value::from),
    ];
    (
        "[A-Z][A-Za-z]{0,10}",
        prop::collection::vec(("[a-z]{1,6}", value), 0..4),
    )
        .prop_map(|(kind, fields)| Fault::new(kind).with_fields(fields))
}
