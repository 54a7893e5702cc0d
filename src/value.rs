//! Dynamic values compared and rendered by the failure-message pipeline.
//!
//! Rust has no runtime reflection, so everything an assertion wants to print
//! or compare field by field is lifted into a [`Value`] tree first. Scalars,
//! collections and maps are plain data; objects are shared [`ObjectRef`]
//! nodes so that graphs (including cyclic ones) can be described.
//!
//! # Equality
//!
//! `Value` equality is structural except for [`Value::Object`], which compares
//! by identity. This mirrors default reference equality: two distinct objects
//! with the same fields are *not* equal, which is exactly the case the
//! recursive comparison exists for.
//!
//! ```rust
//! use fluent_errors::value::{ObjectRef, Value};
//!
//! let luke = ObjectRef::new("Person").with_field("name", "Luke");
//! let twin = ObjectRef::new("Person").with_field("name", "Luke");
//!
//! assert_eq!(Value::from(luke.clone()), Value::from(luke.clone()));
//! assert_ne!(Value::from(luke), Value::from(twin));
//! ```

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::hash::{DefaultHasher, Hash, Hasher};
use std::sync::{Arc, RwLock};

use crate::representation::{Representation, StandardRepresentation};
use crate::sync::{read_recover, write_recover};

/// Whether a sequence preserves element order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SequenceKind {
    /// Lists, vectors, deques: element order is significant.
    Ordered,
    /// Sets and bags: element order carries no meaning.
    Unordered,
}

/// Coarse runtime category of a value, used to key custom formatters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ValueCategory {
    Null,
    Bool,
    Char,
    Integer,
    Float,
    Str,
    Array,
    Sequence,
    Map,
    Optional,
    Enum,
    Object,
}

/// A dynamically typed value.
#[derive(Debug, Clone)]
pub enum Value {
    Null,
    Bool(bool),
    Char(char),
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Str(String),
    /// Fixed-size array.
    Array(Vec<Value>),
    /// Growable collection with a concrete implementation name.
    Sequence {
        kind: SequenceKind,
        type_name: String,
        items: Vec<Value>,
    },
    /// Map with entries kept in insertion order.
    Map {
        type_name: String,
        sorted: bool,
        entries: Vec<(Value, Value)>,
    },
    Optional(Option<Box<Value>>),
    Enum {
        type_name: String,
        variant: String,
    },
    Object(ObjectRef),
}

impl Value {
    /// An ordered `Vec` sequence.
    #[must_use]
    pub fn list<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        Self::sequence(SequenceKind::Ordered, "Vec", items)
    }

    /// An unordered `HashSet` sequence.
    #[must_use]
    pub fn set<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        Self::sequence(SequenceKind::Unordered, "HashSet", items)
    }

    /// A sequence with an explicit kind and implementation name.
    #[must_use]
    pub fn sequence<I, T>(kind: SequenceKind, type_name: impl Into<String>, items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        Self::Sequence {
            kind,
            type_name: type_name.into(),
            items: items.into_iter().map(Into::into).collect(),
        }
    }

    /// A fixed-size array.
    #[must_use]
    pub fn array<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        Self::Array(items.into_iter().map(Into::into).collect())
    }

    /// An unordered `HashMap` keeping the given entry order.
    #[must_use]
    pub fn map<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<Value>,
        V: Into<Value>,
    {
        Self::Map {
            type_name: "HashMap".to_string(),
            sorted: false,
            entries: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// A sorted `BTreeMap`; entries are sorted by their rendered key.
    #[must_use]
    pub fn sorted_map<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<Value>,
        V: Into<Value>,
    {
        let mut entries: Vec<(Value, Value)> = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        entries.sort_by_cached_key(|(k, _)| k.sort_key());
        Self::Map {
            type_name: "BTreeMap".to_string(),
            sorted: true,
            entries,
        }
    }

    /// A present optional.
    #[must_use]
    pub fn some(value: impl Into<Value>) -> Self {
        Self::Optional(Some(Box::new(value.into())))
    }

    /// An empty optional.
    #[must_use]
    pub fn none() -> Self {
        Self::Optional(None)
    }

    /// An enum variant.
    #[must_use]
    pub fn variant(type_name: impl Into<String>, variant: impl Into<String>) -> Self {
        Self::Enum {
            type_name: type_name.into(),
            variant: variant.into(),
        }
    }

    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// The string slice of a [`Value::Str`].
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// The object node of a [`Value::Object`].
    #[must_use]
    pub fn as_object(&self) -> Option<&ObjectRef> {
        match self {
            Self::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Elements of an array or sequence.
    #[must_use]
    pub fn iterable_items(&self) -> Option<&[Value]> {
        match self {
            Self::Array(items) | Self::Sequence { items, .. } => Some(items),
            _ => None,
        }
    }

    /// True for arrays and sequences.
    #[must_use]
    pub fn is_iterable(&self) -> bool {
        self.iterable_items().is_some()
    }

    /// True for values whose children could lead back to an ancestor.
    #[must_use]
    pub fn is_container(&self) -> bool {
        matches!(
            self,
            Self::Array(_)
                | Self::Sequence { .. }
                | Self::Map { .. }
                | Self::Optional(_)
                | Self::Object(_)
        )
    }

    #[must_use]
    pub fn category(&self) -> ValueCategory {
        match self {
            Self::Null => ValueCategory::Null,
            Self::Bool(_) => ValueCategory::Bool,
            Self::Char(_) => ValueCategory::Char,
            Self::Byte(_) | Self::Short(_) | Self::Int(_) | Self::Long(_) => ValueCategory::Integer,
            Self::Float(_) | Self::Double(_) => ValueCategory::Float,
            Self::Str(_) => ValueCategory::Str,
            Self::Array(_) => ValueCategory::Array,
            Self::Sequence { .. } => ValueCategory::Sequence,
            Self::Map { .. } => ValueCategory::Map,
            Self::Optional(_) => ValueCategory::Optional,
            Self::Enum { .. } => ValueCategory::Enum,
            Self::Object(_) => ValueCategory::Object,
        }
    }

    /// Simple name of the concrete type, as shown in messages.
    #[must_use]
    pub fn type_name(&self) -> String {
        match self {
            Self::Null => "null".to_string(),
            Self::Bool(_) => "bool".to_string(),
            Self::Char(_) => "char".to_string(),
            Self::Byte(_) => "i8".to_string(),
            Self::Short(_) => "i16".to_string(),
            Self::Int(_) => "i32".to_string(),
            Self::Long(_) => "i64".to_string(),
            Self::Float(_) => "f32".to_string(),
            Self::Double(_) => "f64".to_string(),
            Self::Str(_) => "String".to_string(),
            Self::Array(_) => "array".to_string(),
            Self::Optional(_) => "Option".to_string(),
            Self::Sequence { type_name, .. }
            | Self::Map { type_name, .. }
            | Self::Enum { type_name, .. } => type_name.clone(),
            Self::Object(o) => o.type_name(),
        }
    }

    /// Hex identity used to tell apart values that render identically.
    ///
    /// Objects use their node address; every other value uses a content hash,
    /// so equal scalars share an identity.
    #[must_use]
    pub fn identity_hex(&self) -> String {
        match self {
            Self::Object(o) => format!("{:x}", o.id()),
            other => {
                let mut hasher = DefaultHasher::new();
                other.hash(&mut hasher);
                #[allow(clippy::cast_possible_truncation)]
                let short = hasher.finish() as u32;
                format!("{short:x}")
            }
        }
    }

    /// Deterministic key used to order map entries.
    pub(crate) fn sort_key(&self) -> String {
        StandardRepresentation::default().to_string_of(self)
    }

    fn discriminant_tag(&self) -> u8 {
        match self {
            Self::Null => 0,
            Self::Bool(_) => 1,
            Self::Char(_) => 2,
            Self::Byte(_) => 3,
            Self::Short(_) => 4,
            Self::Int(_) => 5,
            Self::Long(_) => 6,
            Self::Float(_) => 7,
            Self::Double(_) => 8,
            Self::Str(_) => 9,
            Self::Array(_) => 10,
            Self::Sequence { .. } => 11,
            Self::Map { .. } => 12,
            Self::Optional(_) => 13,
            Self::Enum { .. } => 14,
            Self::Object(_) => 15,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Char(a), Self::Char(b)) => a == b,
            (Self::Byte(a), Self::Byte(b)) => a == b,
            (Self::Short(a), Self::Short(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Long(a), Self::Long(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a.to_bits() == b.to_bits(),
            (Self::Double(a), Self::Double(b)) => a.to_bits() == b.to_bits(),
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::Array(a), Self::Array(b)) => a == b,
            (
                Self::Sequence {
                    kind: k1,
                    type_name: t1,
                    items: i1,
                },
                Self::Sequence {
                    kind: k2,
                    type_name: t2,
                    items: i2,
                },
            ) => k1 == k2 && t1 == t2 && i1 == i2,
            (
                Self::Map {
                    type_name: t1,
                    sorted: s1,
                    entries: e1,
                },
                Self::Map {
                    type_name: t2,
                    sorted: s2,
                    entries: e2,
                },
            ) => t1 == t2 && s1 == s2 && e1 == e2,
            (Self::Optional(a), Self::Optional(b)) => a == b,
            (
                Self::Enum {
                    type_name: t1,
                    variant: v1,
                },
                Self::Enum {
                    type_name: t2,
                    variant: v2,
                },
            ) => t1 == t2 && v1 == v2,
            (Self::Object(a), Self::Object(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.discriminant_tag().hash(state);
        match self {
            Self::Null => {}
            Self::Bool(b) => b.hash(state),
            Self::Char(c) => c.hash(state),
            Self::Byte(v) => v.hash(state),
            Self::Short(v) => v.hash(state),
            Self::Int(v) => v.hash(state),
            Self::Long(v) => v.hash(state),
            Self::Float(v) => v.to_bits().hash(state),
            Self::Double(v) => v.to_bits().hash(state),
            Self::Str(s) => s.hash(state),
            Self::Array(items) => items.hash(state),
            Self::Sequence {
                kind,
                type_name,
                items,
            } => {
                kind.hash(state);
                type_name.hash(state);
                items.hash(state);
            }
            Self::Map {
                type_name,
                sorted,
                entries,
            } => {
                type_name.hash(state);
                sorted.hash(state);
                entries.hash(state);
            }
            Self::Optional(v) => v.hash(state),
            Self::Enum { type_name, variant } => {
                type_name.hash(state);
                variant.hash(state);
            }
            Self::Object(o) => o.id().hash(state),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&StandardRepresentation::default().to_string_of(self))
    }
}

// ============================================================================
// Object nodes
// ============================================================================

/// Field table of an object node.
#[derive(Debug, Clone, Default)]
pub struct ObjectData {
    type_name: String,
    fields: Vec<(String, Value)>,
}

/// A shared, mutable object node.
///
/// Cloning an `ObjectRef` clones the handle, not the node: both handles see
/// the same fields and compare equal. Self-referencing graphs are built by
/// storing a handle inside one of its own fields with [`ObjectRef::set_field`].
/// Such cycles keep the nodes alive until a field in the cycle is replaced.
#[derive(Clone)]
pub struct ObjectRef(Arc<RwLock<ObjectData>>);

impl ObjectRef {
    /// Create an object node without fields.
    #[must_use]
    pub fn new(type_name: impl Into<String>) -> Self {
        Self(Arc::new(RwLock::new(ObjectData {
            type_name: type_name.into(),
            fields: Vec::new(),
        })))
    }

    /// Add or replace a field (builder-style).
    #[must_use]
    pub fn with_field(self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set_field(name, value);
        self
    }

    /// Add or replace a field; new fields keep declaration order.
    pub fn set_field(&self, name: impl Into<String>, value: impl Into<Value>) {
        let name = name.into();
        let value = value.into();
        let mut data = write_recover(&self.0);
        if let Some(slot) = data.fields.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = value;
        } else {
            data.fields.push((name, value));
        }
    }

    #[must_use]
    pub fn type_name(&self) -> String {
        read_recover(&self.0).type_name.clone()
    }

    /// Value of a field, if declared.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<Value> {
        read_recover(&self.0)
            .fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.clone())
    }

    /// Declared field names, in declaration order.
    #[must_use]
    pub fn field_names(&self) -> Vec<String> {
        read_recover(&self.0)
            .fields
            .iter()
            .map(|(n, _)| n.clone())
            .collect()
    }

    /// Snapshot of the field table.
    #[must_use]
    pub fn fields(&self) -> Vec<(String, Value)> {
        read_recover(&self.0).fields.clone()
    }

    /// Identity comparison.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Node address, stable for the lifetime of the node.
    #[must_use]
    pub fn id(&self) -> usize {
        Arc::as_ptr(&self.0).cast::<()>() as usize
    }
}

impl fmt::Debug for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Fields are not printed: the graph may be cyclic.
        f.debug_struct("ObjectRef")
            .field("type_name", &self.type_name())
            .field("id", &format_args!("{:x}", self.id()))
            .finish()
    }
}

// ============================================================================
// Conversions
// ============================================================================

macro_rules! impl_from_scalar {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Self::$variant(v)
                }
            }
        )*
    };
}

impl_from_scalar!(
    bool => Bool,
    char => Char,
    i8 => Byte,
    i16 => Short,
    i32 => Int,
    i64 => Long,
    f32 => Float,
    f64 => Double,
    String => Str,
);

impl From<usize> for Value {
    fn from(v: usize) -> Self {
        i32::try_from(v).map_or_else(
            |_| Self::Long(i64::try_from(v).unwrap_or(i64::MAX)),
            Self::Int,
        )
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<&String> for Value {
    fn from(v: &String) -> Self {
        Self::Str(v.clone())
    }
}

impl From<ObjectRef> for Value {
    fn from(v: ObjectRef) -> Self {
        Self::Object(v)
    }
}

impl From<&ObjectRef> for Value {
    fn from(v: &ObjectRef) -> Self {
        Self::Object(v.clone())
    }
}

/// `None` maps to [`Value::Null`]: optional Rust fields model nullable fields.
/// Use [`Value::some`] / [`Value::none`] for an explicit optional container.
impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Self::list(v)
    }
}

impl<K: Into<Value>, V: Into<Value>> From<BTreeMap<K, V>> for Value {
    fn from(v: BTreeMap<K, V>) -> Self {
        Self::sorted_map(v)
    }
}

/// Entries are ordered by rendered key so the result does not depend on the
/// hasher's iteration order.
impl<K: Into<Value>, V: Into<Value>, S> From<HashMap<K, V, S>> for Value {
    fn from(v: HashMap<K, V, S>) -> Self {
        let mut entries: Vec<(Value, Value)> =
            v.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        entries.sort_by_cached_key(|(k, _)| k.sort_key());
        Self::Map {
            type_name: "HashMap".to_string(),
            sorted: false,
            entries,
        }
    }
}

#[cfg(feature = "json")]
impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    i32::try_from(i).map_or(Self::Long(i), Self::Int)
                } else {
                    Self::Double(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_json::Value::String(s) => Self::Str(s),
            serde_json::Value::Array(items) => Self::list(items),
            serde_json::Value::Object(map) => {
                let object = ObjectRef::new("JsonObject");
                for (key, value) in map {
                    object.set_field(key, Value::from(value));
                }
                Self::Object(object)
            }
        }
    }
}
