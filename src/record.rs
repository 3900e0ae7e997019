//! Plain record shape and wire format for outcomes
//!
//! An [`Outcome`] crosses process and storage boundaries as a plain record:
//!
//! ```text
//! {"ok": true,  "value": V}
//! {"ok": false, "error": E}
//! ```
//!
//! [`RawRecord`] is that record as a bare Rust struct with all three fields
//! optional-or-present, exactly as it arrives from the outside. Converting a
//! record back into a live [`Outcome`] is *rehydration*: it checks that the
//! `ok` flag agrees with which field is populated.
//!
//! Self-describing formats such as JSON round-trip records as maps. Positional
//! formats see the same two fields in order: the flag, then the value or error
//! it selects.
//!
//! Deserializing straight through `serde_json` is subject to its default
//! nesting limit. [`adapter::from_json`](crate::adapter::from_json) lifts it for
//! deep [`Fault`](crate::Fault) cause chains.
//!
//! # Example
//!
//! ```
//! use verdict::Outcome;
//!
//! let original = Outcome::<u32, String>::failure("InvalidId".to_string());
//! let json = serde_json::to_string(&original).unwrap();
//! assert_eq!(json, r#"{"ok":false,"error":"InvalidId"}"#);
//!
//! let restored: Outcome<u32, String> = serde_json::from_str(&json).unwrap();
//! assert_eq!(restored, original);
//! ```

use std::fmt;
use std::marker::PhantomData;

use serde::de::{self, MapAccess, SeqAccess, Visitor};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::Outcome;

/// A behavior-less two-field record: the plain shape of an outcome
///
/// The fields are public so the record can be built and inspected by free
/// functions without going through [`Outcome`]. A well-formed record has
/// `ok == value.is_some()` and exactly one of `value`/`error` populated;
/// [`Outcome::try_from`] enforces that.
///
/// Field presence, not nullness, decides population: `{"ok":true,"value":null}`
/// deserializes to `value: Some(..)` when `T` accepts `null` (e.g. `()` or
/// `Option<_>`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RawRecord<T, E> {
    /// The discriminant flag
    pub ok: bool,
    /// The success value, when present
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<T>,
    /// The error, when present
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<E>,
}

impl<T, E> RawRecord<T, E> {
    /// A well-formed success record
    pub fn success(value: T) -> Self {
        RawRecord {
            ok: true,
            value: Some(value),
            error: None,
        }
    }

    /// A well-formed failure record
    pub fn failure(error: E) -> Self {
        RawRecord {
            ok: false,
            value: None,
            error: Some(error),
        }
    }
}

/// Error returned when a record cannot be rehydrated into an [`Outcome`]
#[derive(Debug)]
pub enum RecordError {
    /// The input could not be decoded as a record at all
    Decode(serde_json::Error),
    /// Both `value` and `error` were present
    BothPopulated {
        /// The flag carried by the record
        ok: bool,
    },
    /// Neither `value` nor `error` was present
    Unpopulated {
        /// The flag carried by the record
        ok: bool,
    },
    /// The flag disagrees with the populated field
    FlagMismatch {
        /// The flag carried by the record
        ok: bool,
    },
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordError::Decode(err) => write!(f, "cannot decode outcome record: {}", err),
            RecordError::BothPopulated { ok } => {
                write!(f, "outcome record (ok={}) has both `value` and `error`", ok)
            }
            RecordError::Unpopulated { ok } => {
                write!(f, "outcome record (ok={}) has neither `value` nor `error`", ok)
            }
            RecordError::FlagMismatch { ok } => {
                let populated = if *ok { "error" } else { "value" };
                write!(
                    f,
                    "outcome record flag ok={} disagrees with its `{}` field",
                    ok, populated
                )
            }
        }
    }
}

impl std::error::Error for RecordError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RecordError::Decode(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for RecordError {
    fn from(err: serde_json::Error) -> Self {
        RecordError::Decode(err)
    }
}

impl<T, E> TryFrom<RawRecord<T, E>> for Outcome<T, E> {
    type Error = RecordError;

    fn try_from(record: RawRecord<T, E>) -> Result<Self, Self::Error> {
        let RawRecord { ok, value, error } = record;
        match (ok, value, error) {
            (true, Some(value), None) => Ok(Outcome::Success(value)),
            (false, None, Some(error)) => Ok(Outcome::Failure(error)),
            (ok, Some(_), Some(_)) => Err(RecordError::BothPopulated { ok }),
            (ok, None, None) => Err(RecordError::Unpopulated { ok }),
            (ok, _, _) => Err(RecordError::FlagMismatch { ok }),
        }
    }
}

impl<T, E> From<Outcome<T, E>> for RawRecord<T, E> {
    fn from(outcome: Outcome<T, E>) -> Self {
        match outcome {
            Outcome::Success(value) => RawRecord::success(value),
            Outcome::Failure(error) => RawRecord::failure(error),
        }
    }
}

impl<T, E> Outcome<T, E> {
    /// Strip this outcome down to its plain record shape
    ///
    /// # Examples
    ///
    /// ```
    /// use verdict::{Outcome, RawRecord};
    ///
    /// let record = Outcome::<i32, String>::success(1).into_record();
    /// assert_eq!(record, RawRecord { ok: true, value: Some(1), error: None });
    /// ```
    pub fn into_record(self) -> RawRecord<T, E> {
        RawRecord::from(self)
    }
}

impl<T, E> Serialize for Outcome<T, E>
where
    T: Serialize,
    E: Serialize,
{
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Outcome", 2)?;
        match self {
            Outcome::Success(value) => {
                state.serialize_field("ok", &true)?;
                state.serialize_field("value", value)?;
            }
            Outcome::Failure(error) => {
                state.serialize_field("ok", &false)?;
                state.serialize_field("error", error)?;
            }
        }
        state.end()
    }
}

impl<'de, T, E> Deserialize<'de> for Outcome<T, E>
where
    T: Deserialize<'de>,
    E: Deserialize<'de>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let record = RawRecord::<T, E>::deserialize(deserializer)?;
        Outcome::try_from(record).map_err(de::Error::custom)
    }
}

const FIELDS: &[&str] = &["ok", "value", "error"];

#[derive(Deserialize)]
#[serde(field_identifier, rename_all = "lowercase")]
enum Field {
    Ok,
    Value,
    Error,
    #[serde(other)]
    Other,
}

struct RecordVisitor<T, E>(PhantomData<fn() -> (T, E)>);

impl<'de, T, E> Visitor<'de> for RecordVisitor<T, E>
where
    T: Deserialize<'de>,
    E: Deserialize<'de>,
{
    type Value = RawRecord<T, E>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an outcome record with an `ok` flag")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut ok = None;
        let mut value = None;
        let mut error = None;

        while let Some(key) = map.next_key::<Field>()? {
            match key {
                Field::Ok => {
                    if ok.is_some() {
                        return Err(de::Error::duplicate_field("ok"));
                    }
                    ok = Some(map.next_value::<bool>()?);
                }
                Field::Value => {
                    if value.is_some() {
                        return Err(de::Error::duplicate_field("value"));
                    }
                    value = Some(map.next_value::<T>()?);
                }
                Field::Error => {
                    if error.is_some() {
                        return Err(de::Error::duplicate_field("error"));
                    }
                    error = Some(map.next_value::<E>()?);
                }
                Field::Other => {
                    map.next_value::<de::IgnoredAny>()?;
                }
            }
        }

        let ok = ok.ok_or_else(|| de::Error::missing_field("ok"))?;
        Ok(RawRecord { ok, value, error })
    }

    // Positional formats carry the flag first, then the one payload it selects.
    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let ok = seq
            .next_element::<bool>()?
            .ok_or_else(|| de::Error::invalid_length(0, &self))?;
        if ok {
            let value = seq
                .next_element::<T>()?
                .ok_or_else(|| de::Error::invalid_length(1, &self))?;
            Ok(RawRecord::success(value))
        } else {
            let error = seq
                .next_element::<E>()?
                .ok_or_else(|| de::Error::invalid_length(1, &self))?;
            Ok(RawRecord::failure(error))
        }
    }
}

impl<'de, T, E> Deserialize<'de> for RawRecord<T, E>
where
    T: Deserialize<'de>,
    E: Deserialize<'de>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_struct("Outcome", FIELDS, RecordVisitor(PhantomData))
    }
}
