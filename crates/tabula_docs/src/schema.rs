//! Static record schemas.
//!
//! A [`Schema`] is the ordered list of `(name, kind, accessor)` entries a
//! renderer walks to turn records into cells or text. Record types declare
//! theirs once through the [`Record`] trait.

use std::fmt;

/// Semantic type of a record field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Integer,
    Text,
    Currency,
    Quantity,
}

/// A currency amount held in minor units (two decimal places).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money {
    minor: i64,
}

impl Money {
    pub const fn from_minor(minor: i64) -> Self {
        Self { minor }
    }

    pub const fn from_major(major: i64) -> Self {
        Self { minor: major * 100 }
    }

    pub const fn minor(&self) -> i64 {
        self.minor
    }

    /// Value in major units, for number cells.
    pub fn as_f64(&self) -> f64 {
        self.minor as f64 / 100.0
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.minor < 0 { "-" } else { "" };
        let abs = self.minor.unsigned_abs();
        let (major, cents) = (abs / 100, abs % 100);
        if cents == 0 {
            write!(f, "{sign}{major}")
        } else {
            write!(f, "{sign}{major}.{cents:02}")
        }
    }
}

/// A single field value read out of a record.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Integer(i64),
    Text(String),
    Currency(Money),
    Quantity(i64),
}

impl FieldValue {
    pub fn kind(&self) -> FieldKind {
        match self {
            Self::Integer(_) => FieldKind::Integer,
            Self::Text(_) => FieldKind::Text,
            Self::Currency(_) => FieldKind::Currency,
            Self::Quantity(_) => FieldKind::Quantity,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(v) | Self::Quantity(v) => write!(f, "{v}"),
            Self::Text(s) => f.write_str(s),
            Self::Currency(m) => write!(f, "{m}"),
        }
    }
}

/// One declared field: its column name, semantic type and accessor.
pub struct Field<R> {
    name: &'static str,
    kind: FieldKind,
    accessor: fn(&R) -> FieldValue,
}

// Manual impls: `fn(&R)` is Copy for every R, derive would demand `R: Copy`.
impl<R> Clone for Field<R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for Field<R> {}

impl<R> fmt::Debug for Field<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .finish()
    }
}

impl<R> Field<R> {
    pub const fn new(name: &'static str, kind: FieldKind, accessor: fn(&R) -> FieldValue) -> Self {
        Self {
            name,
            kind,
            accessor,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    pub fn value(&self, record: &R) -> FieldValue {
        (self.accessor)(record)
    }
}

/// Ordered field list for a record type.
pub struct Schema<R> {
    type_name: &'static str,
    fields: Vec<Field<R>>,
}

impl<R> Clone for Schema<R> {
    fn clone(&self) -> Self {
        Self {
            type_name: self.type_name,
            fields: self.fields.clone(),
        }
    }
}

impl<R> fmt::Debug for Schema<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schema")
            .field("type_name", &self.type_name)
            .field("fields", &self.fields)
            .finish()
    }
}

impl<R> Schema<R> {
    pub fn new(type_name: &'static str) -> Self {
        Self {
            type_name,
            fields: Vec::new(),
        }
    }

    /// Append a field. Declaration order is column order.
    pub fn field(mut self, name: &'static str, kind: FieldKind, accessor: fn(&R) -> FieldValue) -> Self {
        self.fields.push(Field::new(name, kind, accessor));
        self
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn fields(&self) -> &[Field<R>] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// `<TypeName>.<extension>`
    pub fn file_name(&self, extension: &str) -> String {
        format!("{}.{extension}", self.type_name)
    }

    /// Read every declared field of `record`, in order.
    pub fn values(&self, record: &R) -> Vec<FieldValue> {
        self.fields.iter().map(|f| f.value(record)).collect()
    }

    /// Multi-line `Name : value` text for one record.
    pub fn describe(&self, record: &R) -> String {
        self.fields
            .iter()
            .map(|f| format!("{} : {}", f.name, f.value(record)))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// A record type with a statically declared schema.
pub trait Record {
    fn schema() -> Schema<Self>
    where
        Self: Sized;

    /// Human-readable multi-line representation, one line per field.
    fn display_text(&self) -> String
    where
        Self: Sized,
    {
        Self::schema().describe(self)
    }
}
