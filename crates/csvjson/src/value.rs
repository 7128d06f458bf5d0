use crate::number::format_f64;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    I64(i64),
    U64(u64),
    F64(f64),
}

impl Number {
    pub fn is_nan(&self) -> bool {
        matches!(self, Number::F64(f) if f.is_nan())
    }

    pub fn is_infinite(&self) -> bool {
        matches!(self, Number::F64(f) if f.is_infinite())
    }

    pub fn as_f64(&self) -> f64 {
        match *self {
            Number::I64(i) => i as f64,
            Number::U64(u) => u as f64,
            Number::F64(f) => f,
        }
    }
}

impl core::fmt::Display for Number {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Number::I64(i) => write!(f, "{}", i),
            Number::U64(u) => write!(f, "{}", u),
            Number::F64(num) => f.write_str(&format_f64(*num)),
        }
    }
}

/// A decoded cell value.
///
/// Objects keep insertion order; a repeated key overwrites the earlier value
/// in place (see [`insert_pair`]).
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Vec<Value>),
    Object(Vec<(String, Value)>),
}

impl Value {
    pub fn is_container(&self) -> bool {
        matches!(self, Value::Array(_) | Value::Object(_))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<Number> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Number(Number::I64(i))
    }
}

impl From<u64> for Value {
    fn from(u: u64) -> Self {
        Value::Number(Number::U64(u))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Number(Number::F64(f))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

/// Positional row: the cell values of one line, in order.
pub type Row = Vec<Value>;

/// Named record: field name to value pairs in header order.
pub type Record = Vec<(String, Value)>;

/// Insert preserving first-occurrence order; a repeated key overwrites in
/// place rather than appending.
pub(crate) fn insert_pair(pairs: &mut Vec<(String, Value)>, key: String, value: Value) {
    match pairs.iter_mut().find(|(k, _)| *k == key) {
        Some(slot) => slot.1 = value,
        None => pairs.push((key, value)),
    }
}

/// One element of a decoded document: a named record when a header is
/// present, a positional row otherwise.
#[derive(Debug, Clone, PartialEq)]
pub enum Entry {
    Record(Record),
    Row(Row),
}

impl Entry {
    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Entry::Record(record) => Some(record),
            Entry::Row(_) => None,
        }
    }

    pub fn as_row(&self) -> Option<&Row> {
        match self {
            Entry::Row(row) => Some(row),
            Entry::Record(_) => None,
        }
    }
}

#[cfg(feature = "json")]
impl From<Number> for serde_json::Value {
    fn from(n: Number) -> serde_json::Value {
        match n {
            Number::I64(i) => i.into(),
            Number::U64(u) => u.into(),
            // serde_json has no spelling for non-finite floats; fall back to
            // the literal text the scanner accepts.
            Number::F64(f) => serde_json::Number::from_f64(f)
                .map(serde_json::Value::Number)
                .unwrap_or_else(|| serde_json::Value::String(format_f64(f))),
        }
    }
}

#[cfg(feature = "json")]
impl From<Value> for serde_json::Value {
    fn from(v: Value) -> serde_json::Value {
        match v {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(b),
            Value::Number(n) => n.into(),
            Value::String(s) => serde_json::Value::String(s),
            Value::Array(a) => serde_json::Value::Array(a.into_iter().map(Into::into).collect()),
            Value::Object(pairs) => {
                let mut map = serde_json::Map::with_capacity(pairs.len());
                for (k, v) in pairs {
                    map.insert(k, v.into());
                }
                serde_json::Value::Object(map)
            }
        }
    }
}

#[cfg(feature = "json")]
impl From<Entry> for serde_json::Value {
    fn from(entry: Entry) -> serde_json::Value {
        match entry {
            Entry::Record(record) => {
                let mut map = serde_json::Map::with_capacity(record.len());
                for (k, v) in record {
                    map.insert(k, v.into());
                }
                serde_json::Value::Object(map)
            }
            Entry::Row(row) => serde_json::Value::Array(row.into_iter().map(Into::into).collect()),
        }
    }
}
