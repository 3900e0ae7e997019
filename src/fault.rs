//! Typed error payloads with cause chains
//!
//! [`Fault`] is the conventional error payload: a discriminant (`type`),
//! arbitrary context fields, and an optional `cause` holding the fault it
//! wraps. Annotating a failure as it crosses a logical boundary builds a
//! singly linked chain from the most specific context to the root cause.
//!
//! Chains are finite and acyclic: each annotation moves an already-built
//! fault into the new one.
//!
//! # Examples
//!
//! ```
//! use verdict::{Fault, Outcome};
//!
//! let low_level = Outcome::<String, _>::failure(Fault::new("NotFound").with("path", "/etc/app.toml"));
//!
//! let annotated = low_level
//!     .annotate("ConfigLoad")
//!     .annotate_with("Startup", [("attempt", 1)]);
//!
//! let fault = annotated.error().unwrap();
//! let kinds: Vec<&str> = fault.chain().map(|f| f.kind()).collect();
//! assert_eq!(kinds, ["Startup", "ConfigLoad", "NotFound"]);
//! assert_eq!(fault.root_cause().field("path").unwrap(), "/etc/app.toml");
//! ```
//!
//! On the wire a fault is a flat object:
//!
//! ```
//! use serde_json::json;
//! use verdict::Fault;
//!
//! let fault = Fault::new("B").with("extra", 1).caused_by(Fault::new("A").with("id", 2));
//! assert_eq!(
//!     serde_json::to_value(&fault).unwrap(),
//!     json!({"type": "B", "extra": 1, "cause": {"type": "A", "id": 2}})
//! );
//! ```

use std::error::Error as StdError;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::adapter::Panic;
use crate::Outcome;

const TYPE_KEY: &str = "type";
const CAUSE_KEY: &str = "cause";

/// A typed error payload: discriminant, context fields, optional cause
///
/// The keys `type` and `cause` are reserved; [`Fault::with`] ignores them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fault {
    #[serde(rename = "type")]
    kind: String,
    #[serde(flatten)]
    fields: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    cause: Option<Box<Fault>>,
}

impl Fault {
    /// Create a fault with the given discriminant and no fields
    pub fn new(kind: impl Into<String>) -> Self {
        Fault {
            kind: kind.into(),
            fields: Map::new(),
            cause: None,
        }
    }

    /// Add a context field
    ///
    /// Reserved keys (`type`, `cause`) are ignored.
    ///
    /// # Examples
    ///
    /// ```
    /// use verdict::Fault;
    ///
    /// let fault = Fault::new("Timeout").with("ms", 1000).with("type", "ignored");
    /// assert_eq!(fault.kind(), "Timeout");
    /// assert_eq!(fault.field("ms").unwrap(), 1000);
    /// assert_eq!(fault.fields().len(), 1);
    /// ```
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key.into(), value.into());
        self
    }

    /// Add several context fields at once
    pub fn with_fields<K, V, I>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        for (key, value) in fields {
            self.insert(key.into(), value.into());
        }
        self
    }

    /// Set the fault this one wraps, replacing any existing cause
    pub fn caused_by(mut self, cause: Fault) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }

    /// Wrap this fault in a new one with the given discriminant
    ///
    /// # Examples
    ///
    /// ```
    /// use verdict::Fault;
    ///
    /// let outer = Fault::new("A").with("id", 2).annotate("B", [("extra", 1)]);
    /// assert_eq!(outer.kind(), "B");
    /// assert_eq!(outer.cause().unwrap().kind(), "A");
    /// ```
    pub fn annotate<K, V, I>(self, kind: impl Into<String>, fields: I) -> Fault
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        Fault::new(kind).with_fields(fields).caused_by(self)
    }

    /// Build a fault from any `std::error::Error`, following its `source()` chain
    ///
    /// Each error in the chain becomes a fault of kind `"Error"` with a
    /// `message` field.
    ///
    /// # Examples
    ///
    /// ```
    /// use verdict::Fault;
    ///
    /// let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
    /// let fault = Fault::from_error(&io);
    /// assert_eq!(fault.kind(), "Error");
    /// assert_eq!(fault.field("message").unwrap(), "no such file");
    /// ```
    pub fn from_error(err: &(dyn StdError + 'static)) -> Fault {
        let mut messages = Vec::new();
        let mut current = Some(err);
        while let Some(e) = current {
            messages.push(e.to_string());
            current = e.source();
        }

        messages
            .into_iter()
            .rev()
            .fold(None, |cause: Option<Fault>, message| {
                let fault = Fault::new("Error").with("message", message);
                Some(match cause {
                    Some(cause) => fault.caused_by(cause),
                    None => fault,
                })
            })
            .unwrap_or_else(|| Fault::new("Error"))
    }

    /// The discriminant
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Look up a context field
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// All context fields, excluding the reserved keys
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// The fault this one wraps, if any
    pub fn cause(&self) -> Option<&Fault> {
        self.cause.as_deref()
    }

    /// Iterate over the chain, starting with this fault
    pub fn chain(&self) -> Chain<'_> {
        Chain { next: Some(self) }
    }

    /// The innermost fault of the chain
    pub fn root_cause(&self) -> &Fault {
        let mut current = self;
        while let Some(cause) = current.cause() {
            current = cause;
        }
        current
    }

    /// Number of faults in the chain, including this one
    pub fn depth(&self) -> usize {
        self.chain().count()
    }

    /// Find the first fault in the chain with the given discriminant
    pub fn find(&self, kind: &str) -> Option<&Fault> {
        self.chain().find(|f| f.kind == kind)
    }

    fn insert(&mut self, key: String, value: Value) {
        if key != TYPE_KEY && key != CAUSE_KEY {
            self.fields.insert(key, value);
        }
    }
}

/// Iterator over a fault and its causes, most specific first
///
/// Created by [`Fault::chain`].
#[derive(Debug, Clone)]
pub struct Chain<'a> {
    next: Option<&'a Fault>,
}

impl<'a> Iterator for Chain<'a> {
    type Item = &'a Fault;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.cause();
        Some(current)
    }
}

impl std::iter::FusedIterator for Chain<'_> {}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (depth, fault) in self.chain().enumerate() {
            if depth > 0 {
                write!(f, "\n  caused by: ")?;
            }
            write!(f, "{}", fault.kind)?;
            if !fault.fields.is_empty() {
                let fields = serde_json::to_string(&fault.fields).map_err(|_| fmt::Error)?;
                write!(f, " {}", fields)?;
            }
        }
        Ok(())
    }
}

impl StdError for Fault {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.cause().map(|cause| cause as &(dyn StdError + 'static))
    }
}

impl From<Panic> for Fault {
    fn from(panic: Panic) -> Self {
        let fault = Fault::new("Panic");
        match panic.message() {
            Some(message) => fault.with("message", message),
            None => fault,
        }
    }
}

impl From<String> for Fault {
    fn from(message: String) -> Self {
        Fault::new("Captured").with("message", message)
    }
}

impl From<&str> for Fault {
    fn from(message: &str) -> Self {
        Fault::new("Captured").with("message", message)
    }
}

impl<T, E> Outcome<T, E>
where
    E: Into<Fault>,
{
    /// Wrap a failure in a new fault with the given discriminant
    ///
    /// The prior error becomes the `cause` of the new fault. A success
    /// passes through unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use verdict::{Fault, Outcome};
    ///
    /// let o = Outcome::<(), _>::failure(Fault::new("A")).annotate("B");
    /// assert_eq!(o.error().unwrap().kind(), "B");
    /// assert_eq!(o.error().unwrap().cause().unwrap().kind(), "A");
    /// ```
    pub fn annotate(self, kind: impl Into<String>) -> Outcome<T, Fault> {
        self.annotate_with(kind, std::iter::empty::<(String, Value)>())
    }

    /// Wrap a failure in a new fault carrying extra context fields
    ///
    /// The new fault is `{ type: kind, ...fields, cause: previous }`.
    /// Reserved keys in `fields` are ignored.
    ///
    /// # Examples
    ///
    /// ```
    /// use serde_json::json;
    /// use verdict::{Fault, Outcome};
    ///
    /// let o = Outcome::<(), _>::failure(Fault::new("A").with("id", 2))
    ///     .annotate_with("B", [("extra", 1)]);
    ///
    /// assert_eq!(
    ///     serde_json::to_value(&o).unwrap(),
    ///     json!({"ok": false, "error": {"type": "B", "extra": 1, "cause": {"type": "A", "id": 2}}})
    /// );
    /// ```
    pub fn annotate_with<K, V, I>(self, kind: impl Into<String>, fields: I) -> Outcome<T, Fault>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        match self {
            Outcome::Success(value) => Outcome::Success(value),
            Outcome::Failure(error) => Outcome::Failure(error.into().annotate(kind, fields)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_fault() {
        let fault = Fault::new("Timeout");
        assert_eq!(fault.kind(), "Timeout");
        assert!(fault.fields().is_empty());
        assert!(fault.cause().is_none());
        assert_eq!(fault.depth(), 1);
    }

    #[test]
    fn test_annotation_example() {
        let o = Outcome::<(), _>::failure(Fault::new("A").with("id", 2))
            .annotate_with("B", [("extra", 1)]);

        let expected = Fault::new("B")
            .with("extra", 1)
            .caused_by(Fault::new("A").with("id", 2));
        assert_eq!(o, Outcome::Failure(expected));
        assert_eq!(o.error().and_then(Fault::cause).map(Fault::kind), Some("A"));
    }

    #[test]
    fn test_annotate_success_passes_through() {
        let o = Outcome::<i32, Fault>::success(1).annotate("Ignored");
        assert_eq!(o, Outcome::Success(1));
    }

    #[test]
    fn test_annotate_string_error() {
        let o = Outcome::<(), String>::failure("socket closed".to_string()).annotate("Fetch");
        let fault = o.into_error().unwrap();
        assert_eq!(fault.kind(), "Fetch");
        let cause = fault.cause().unwrap();
        assert_eq!(cause.kind(), "Captured");
        assert_eq!(cause.field("message").unwrap(), "socket closed");
    }

    #[test]
    fn test_reserved_keys_in_payload_are_ignored() {
        let fault = Fault::new("A").annotate("B", [("type", "X"), ("cause", "Y"), ("k", "v")]);
        assert_eq!(fault.kind(), "B");
        assert_eq!(fault.cause().unwrap().kind(), "A");
        assert_eq!(fault.fields().len(), 1);
    }

    #[test]
    fn test_chain_walk_terminates() {
        let mut fault = Fault::new("L0");
        for i in 1..50 {
            fault = fault.annotate(format!("L{}", i), std::iter::empty::<(String, Value)>());
        }
        assert_eq!(fault.depth(), 50);
        assert_eq!(fault.root_cause().kind(), "L0");
        assert_eq!(fault.chain().next().unwrap().kind(), "L49");
        assert!(fault.find("L25").is_some());
        assert!(fault.find("L99").is_none());
    }

    #[test]
    fn test_serialize_shape() {
        let fault = Fault::new("B").with("extra", 1).caused_by(Fault::new("A"));
        assert_eq!(
            serde_json::to_value(&fault).unwrap(),
            json!({"type": "B", "extra": 1, "cause": {"type": "A"}})
        );
    }

    #[test]
    fn test_deserialize_shape() {
        let fault: Fault =
            serde_json::from_value(json!({"type": "B", "extra": [1, 2], "cause": {"type": "A", "id": 2}}))
                .unwrap();
        assert_eq!(fault.kind(), "B");
        assert_eq!(fault.field("extra").unwrap(), &json!([1, 2]));
        assert_eq!(fault.cause().unwrap().field("id").unwrap(), 2);
        assert!(!fault.fields().contains_key("cause"));
    }

    #[test]
    fn test_display() {
        let fault = Fault::new("B")
            .with("extra", 1)
            .caused_by(Fault::new("A"));
        assert_eq!(fault.to_string(), "B {\"extra\":1}\n  caused by: A");
    }

    #[test]
    fn test_display_renders_nested_fields_on_every_layer() {
        let fault = Fault::new("Outer")
            .with("path", serde_json::json!(["a", "b"]))
            .caused_by(Fault::new("Inner").with("limits", serde_json::json!({"max": 3})));
        assert_eq!(
            fault.to_string(),
            "Outer {\"path\":[\"a\",\"b\"]}\n  caused by: Inner {\"limits\":{\"max\":3}}"
        );
        assert_eq!(fault.fields().len(), 1);
    }

    #[test]
    fn test_error_source_walks_cause() {
        let fault = Fault::new("B").caused_by(Fault::new("A"));
        let source = fault.source().unwrap();
        assert_eq!(source.to_string(), "A");
        assert!(source.source().is_none());
    }

    #[test]
    fn test_from_error_follows_sources() {
        #[derive(Debug)]
        struct Outer(std::io::Error);

        impl fmt::Display for Outer {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "loading failed")
            }
        }

        impl StdError for Outer {
            fn source(&self) -> Option<&(dyn StdError + 'static)> {
                Some(&self.0)
            }
        }

        let err = Outer(std::io::Error::new(std::io::ErrorKind::Other, "disk"));
        let fault = Fault::from_error(&err);
        assert_eq!(fault.depth(), 2);
        assert_eq!(fault.field("message").unwrap(), "loading failed");
        assert_eq!(fault.root_cause().field("message").unwrap(), "disk");
    }
}
