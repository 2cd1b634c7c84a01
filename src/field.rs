use crate::coerce::parse_friendly_bool;
use crate::error::BindError;
use std::fmt;

/// Bit width of an integer field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum IntWidth {
    W8,
    W16,
    W32,
    W64,
    /// `isize` / `usize`
    Size,
}

/// Bit width of a floating point field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum FloatWidth {
    W32,
    W64,
}

/// The declared kind of a record field
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum FieldKind {
    Bool,
    Signed(IntWidth),
    Unsigned(IntWidth),
    Float(FloatWidth),
    Text,
    Optional(Box<FieldKind>),
    Sequence(Box<FieldKind>),
    Map,
    Record(&'static Shape),
}

impl FieldKind {
    /// Resolves one level of optionality
    pub fn unwrap_optional(&self) -> &FieldKind {
        match self {
            FieldKind::Optional(inner) => inner,
            other => other,
        }
    }

    pub fn is_record(&self) -> bool {
        matches!(self.unwrap_optional(), FieldKind::Record(_))
    }

    /// Whether a variable can be converted into this kind directly
    pub fn is_leaf(&self) -> bool {
        match self {
            FieldKind::Bool
            | FieldKind::Signed(_)
            | FieldKind::Unsigned(_)
            | FieldKind::Float(_)
            | FieldKind::Text => true,
            FieldKind::Sequence(inner) => **inner == FieldKind::Text,
            FieldKind::Optional(_) | FieldKind::Map | FieldKind::Record(_) => false,
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::Bool => write!(f, "bool"),
            FieldKind::Signed(width) => match width {
                IntWidth::W8 => write!(f, "i8"),
                IntWidth::W16 => write!(f, "i16"),
                IntWidth::W32 => write!(f, "i32"),
                IntWidth::W64 => write!(f, "i64"),
                IntWidth::Size => write!(f, "isize"),
            },
            FieldKind::Unsigned(width) => match width {
                IntWidth::W8 => write!(f, "u8"),
                IntWidth::W16 => write!(f, "u16"),
                IntWidth::W32 => write!(f, "u32"),
                IntWidth::W64 => write!(f, "u64"),
                IntWidth::Size => write!(f, "usize"),
            },
            FieldKind::Float(FloatWidth::W32) => write!(f, "f32"),
            FieldKind::Float(FloatWidth::W64) => write!(f, "f64"),
            FieldKind::Text => write!(f, "String"),
            FieldKind::Optional(inner) => write!(f, "Option<{}>", inner),
            FieldKind::Sequence(inner) => write!(f, "Vec<{}>", inner),
            FieldKind::Map => write!(f, "map"),
            FieldKind::Record(shape) => write!(f, "{}", shape.name),
        }
    }
}

/// Metadata about one annotated member of a record
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FieldDescriptor {
    /// Rust field name
    pub name: &'static str,
    /// Declared kind of the field
    pub kind: FieldKind,
    /// Source environment variable, if the field is bound to one
    pub env: Option<&'static str>,
    /// Raw `required` annotation text, validated when the field is bound
    pub required: Option<&'static str>,
    /// Human-readable description
    pub doc: Option<&'static str>,
}

impl FieldDescriptor {
    pub fn new(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            env: None,
            required: None,
            doc: None,
        }
    }

    pub fn env(mut self, key: &'static str) -> Self {
        self.env = Some(key);
        self
    }

    pub fn required(mut self, annotation: &'static str) -> Self {
        self.required = Some(annotation);
        self
    }

    pub fn doc(mut self, doc: &'static str) -> Self {
        self.doc = Some(doc);
        self
    }

    /// Resolves the `required` annotation, defaulting to false when absent
    pub fn is_required(&self) -> Result<bool, BindError> {
        match self.required {
            None => Ok(false),
            Some(text) => parse_friendly_bool(text).map_err(|_| BindError::InvalidAnnotation {
                field: self.name.to_string(),
                key: "required".to_string(),
                value: text.to_string(),
            }),
        }
    }
}

/// Descriptor table for one record type
///
/// Built once per type by the derive macro and shared for the lifetime of the process.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Shape {
    pub name: &'static str,
    pub fields: Vec<FieldDescriptor>,
}

impl Shape {
    pub fn new(name: &'static str, fields: Vec<FieldDescriptor>) -> Self {
        Self { name, fields }
    }

    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|field| field.name == name)
    }
}

/// Exclusive, typed write access to a leaf field
#[derive(Debug)]
pub enum LeafSlot<'a> {
    Bool(&'a mut bool),
    I8(&'a mut i8),
    I16(&'a mut i16),
    I32(&'a mut i32),
    I64(&'a mut i64),
    Isize(&'a mut isize),
    U8(&'a mut u8),
    U16(&'a mut u16),
    U32(&'a mut u32),
    U64(&'a mut u64),
    Usize(&'a mut usize),
    F32(&'a mut f32),
    F64(&'a mut f64),
    Text(&'a mut String),
    TextList(&'a mut Vec<String>),
}

/// Exclusive access to one field of a record being bound
pub enum Slot<'a> {
    Leaf(LeafSlot<'a>),
    Optional(&'a mut dyn OptionalSlot),
    Record(&'a mut dyn Record),
    Unsupported(FieldKind),
}

impl fmt::Debug for Slot<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::Leaf(leaf) => f.debug_tuple("Leaf").field(leaf).finish(),
            Slot::Optional(opt) => f
                .debug_struct("Optional")
                .field("occupied", &opt.is_occupied())
                .finish(),
            Slot::Record(record) => f.debug_tuple("Record").field(&record.shape().name).finish(),
            Slot::Unsupported(kind) => f.debug_tuple("Unsupported").field(kind).finish(),
        }
    }
}

/// Storage behind an `Option<T>` field
pub trait OptionalSlot {
    /// Whether storage has been allocated
    fn is_occupied(&self) -> bool;

    /// Access to the allocated storage, `None` when vacant
    fn get(&mut self) -> Option<Slot<'_>>;

    /// Allocates storage if vacant and the inner type has a vacant value
    fn allocate(&mut self) -> Option<Slot<'_>>;

    /// Releases the storage, leaving the option vacant
    fn clear(&mut self);
}

/// A struct whose annotated fields can be populated from the environment
///
/// Implemented by `#[derive(EnvRecord)]`.
pub trait Record {
    /// Descriptor table of this record's type
    fn shape(&self) -> &'static Shape;

    /// Typed access to the field at `index` in the shape's field table
    fn field_mut(&mut self, index: usize) -> Option<Slot<'_>>;

    /// Descriptor table without an instance
    fn describe() -> &'static Shape
    where
        Self: Sized;
}

/// Types a `#[field(nested)]` field may hold: records and optional records
#[doc(hidden)]
pub trait NestedRecord {}

impl<T: NestedRecord> NestedRecord for Option<T> {}

#[doc(hidden)]
pub fn assert_nested<T: NestedRecord>() {}
