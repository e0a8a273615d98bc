//! Dynamically typed values exchanged with a coroutine.
//!
//! Exercises are written against a loosely typed protocol: the same step may
//! receive an integer, a string or a tuple. [`Value`] models that protocol with
//! two notions of equality. [`Value::loosely_equals`] is numeric-aware
//! (`1 == 1.0 == True`), while the derived `PartialEq` is exact and also
//! distinguishes the variant.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_OBJECT_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of an opaque object. Two objects are equal only if they are the same object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectId(u64);

impl ObjectId {
    fn fresh() -> Self {
        ObjectId(NEXT_OBJECT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Tuple(Vec<Value>),
    List(Vec<Value>),
    /// Insertion-ordered key/value pairs
    Dict(Vec<(Value, Value)>),
    Object(ObjectId),
}

enum Numeric {
    Integral(i64),
    Real(f64),
}

impl Value {
    /// A new opaque object, distinct from every other object.
    pub fn object() -> Self {
        Value::Object(ObjectId::fresh())
    }

    pub fn tuple(items: impl IntoIterator<Item = Value>) -> Self {
        Value::Tuple(items.into_iter().collect())
    }

    pub fn list(items: impl IntoIterator<Item = Value>) -> Self {
        Value::List(items.into_iter().collect())
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            Value::Bool(b) => Some(*b as i64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Name of the runtime type, as shown in type mismatch diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::None => "NoneType",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "str",
            Value::Tuple(_) => "tuple",
            Value::List(_) => "list",
            Value::Dict(_) => "dict",
            Value::Object(_) => "object",
        }
    }

    /// True when both values have the same runtime type.
    pub fn same_type(&self, other: &Value) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }

    fn numeric(&self) -> Option<Numeric> {
        match self {
            Value::Bool(b) => Some(Numeric::Integral(*b as i64)),
            Value::Int(i) => Some(Numeric::Integral(*i)),
            Value::Float(f) => Some(Numeric::Real(*f)),
            _ => None,
        }
    }

    /// Equality across numeric types: `Int(1)`, `Float(1.0)` and `Bool(true)` are all equal.
    pub fn loosely_equals(&self, other: &Value) -> bool {
        if let (Some(a), Some(b)) = (self.numeric(), other.numeric()) {
            return match (a, b) {
                (Numeric::Integral(a), Numeric::Integral(b)) => a == b,
                (Numeric::Integral(a), Numeric::Real(b)) | (Numeric::Real(b), Numeric::Integral(a)) => {
                    int_equals_float(a, b)
                }
                (Numeric::Real(a), Numeric::Real(b)) => a == b,
            };
        }
        match (self, other) {
            (Value::None, Value::None) => true,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Tuple(a), Value::Tuple(b)) | (Value::List(a), Value::List(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.loosely_equals(y))
            }
            (Value::Dict(a), Value::Dict(b)) => {
                a.len() == b.len()
                    && a.iter().all(|(key, value)| {
                        b.iter()
                            .any(|(k, v)| k.loosely_equals(key) && v.loosely_equals(value))
                    })
            }
            (Value::Object(a), Value::Object(b)) => a == b,
            _ => false,
        }
    }

    /// Elements produced when iterating over the value, if it is iterable.
    ///
    /// Strings iterate over their characters and dicts over their keys.
    pub fn iter_items(&self) -> Option<Vec<Value>> {
        match self {
            Value::Tuple(items) | Value::List(items) => Some(items.clone()),
            Value::Str(s) => Some(s.chars().map(|c| Value::Str(c.to_string())).collect()),
            Value::Dict(pairs) => Some(pairs.iter().map(|(k, _)| k.clone()).collect()),
            _ => None,
        }
    }
}

/// Exact comparison without rounding the integer through `f64`.
fn int_equals_float(int: i64, float: f64) -> bool {
    const LIMIT: f64 = 9_223_372_036_854_775_808.0; // 2^63
    float.fract() == 0.0 && (-LIMIT..LIMIT).contains(&float) && float as i64 == int
}

fn write_str_repr(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    let quote = if s.contains('\'') && !s.contains('"') {
        '"'
    } else {
        '\''
    };
    write!(f, "{}", quote)?;
    for c in s.chars() {
        match c {
            '\\' => write!(f, "\\\\")?,
            '\n' => write!(f, "\\n")?,
            '\r' => write!(f, "\\r")?,
            '\t' => write!(f, "\\t")?,
            c if c == quote => write!(f, "\\{}", c)?,
            c => write!(f, "{}", c)?,
        }
    }
    write!(f, "{}", quote)
}

fn write_float_repr(f: &mut fmt::Formatter<'_>, x: f64) -> fmt::Result {
    if x.is_nan() {
        return write!(f, "nan");
    }
    if x.is_infinite() {
        return write!(f, "{}", if x > 0.0 { "inf" } else { "-inf" });
    }
    let magnitude = x.abs();
    if magnitude != 0.0 && !(1e-4..1e16).contains(&magnitude) {
        let formatted = format!("{:e}", x);
        if let Some((mantissa, exponent)) = formatted.split_once('e') {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            return write!(f, "{}e{}{:0>2}", mantissa, sign, digits);
        }
        return write!(f, "{}", formatted);
    }
    if x.fract() == 0.0 {
        write!(f, "{:.1}", x)
    } else {
        write!(f, "{}", x)
    }
}

fn write_sequence(f: &mut fmt::Formatter<'_>, items: &[Value]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

/// Renders the value the way a Python `repr` would, which is what exercise texts show.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::None => write!(f, "None"),
            Value::Bool(true) => write!(f, "True"),
            Value::Bool(false) => write!(f, "False"),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) => write_float_repr(f, *x),
            Value::Str(s) => write_str_repr(f, s),
            Value::Tuple(items) => {
                write!(f, "(")?;
                write_sequence(f, items)?;
                if items.len() == 1 {
                    write!(f, ",")?;
                }
                write!(f, ")")
            }
            Value::List(items) => {
                write!(f, "[")?;
                write_sequence(f, items)?;
                write!(f, "]")
            }
            Value::Dict(pairs) => {
                write!(f, "{{")?;
                for (i, (key, value)) in pairs.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", key, value)?;
                }
                write!(f, "}}")
            }
            Value::Object(id) => write!(f, "<object at {:#x}>", id.0),
        }
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::None
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i as i64)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}
