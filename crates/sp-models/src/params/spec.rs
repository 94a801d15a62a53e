//! Parameter registry structures

use indexmap::IndexMap;

use super::{ParamError, Result};

/// Element type of an array- or matrix-valued parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementType {
    Int,
    Float,
    Text,
}

impl ElementType {
    pub fn name(&self) -> &'static str {
        match self {
            ElementType::Int => "int",
            ElementType::Float => "float",
            ElementType::Text => "text",
        }
    }
}

/// Declared type of a scalar numeric parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericType {
    Int,
    Float,
}

/// The domain of one parameter: what values it may take
#[derive(Debug, Clone, PartialEq)]
pub enum ParamDomain {
    /// Ordered list of allowed values; the first is the default
    Choice { values: Vec<&'static str> },
    /// Bounded numeric value with a default and a display precision
    NumericRange {
        ty: NumericType,
        lower: f64,
        lower_inclusive: bool,
        upper: f64,
        upper_inclusive: bool,
        default: f64,
        decimals: u8,
    },
    /// One-dimensional sequence of a fixed element type
    Array { element: ElementType },
    /// Two-dimensional rectangular sequence of a fixed element type
    Matrix { element: ElementType },
    /// Validity depends on other parameters or on the data; the owning
    /// family validates it ad hoc and the note is the only documentation
    Dependent { description: &'static str },
}

impl ParamDomain {
    /// Short domain kind name, used in error messages
    pub fn kind(&self) -> &'static str {
        match self {
            ParamDomain::Choice { .. } => "choice",
            ParamDomain::NumericRange { .. } => "numeric range",
            ParamDomain::Array { .. } => "array",
            ParamDomain::Matrix { .. } => "matrix",
            ParamDomain::Dependent { .. } => "dependent",
        }
    }
}

/// One named parameter: a documentation note plus its domain
#[derive(Debug, Clone, PartialEq)]
pub struct ParamSpec {
    /// Human-readable documentation for the parameter
    pub note: &'static str,
    /// Allowed values
    pub domain: ParamDomain,
}

impl ParamSpec {
    pub fn new(note: &'static str, domain: ParamDomain) -> Self {
        Self { note, domain }
    }

    /// Choice spec; the first value is the default
    pub fn choice(note: &'static str, values: &[&'static str]) -> Self {
        Self::new(
            note,
            ParamDomain::Choice {
                values: values.to_vec(),
            },
        )
    }

    /// Boolean choice spec, default `true`
    pub fn bool_choice(note: &'static str) -> Self {
        Self::choice(note, &["True", "False"])
    }

    /// Optional boolean choice spec, default unset
    pub fn opt_bool_choice(note: &'static str) -> Self {
        Self::choice(note, &["None", "True", "False"])
    }

    /// Bounded float spec with inclusive/exclusive bounds
    pub fn float_range(
        note: &'static str,
        (lower, lower_inclusive): (f64, bool),
        (upper, upper_inclusive): (f64, bool),
        default: f64,
        decimals: u8,
    ) -> Self {
        Self::new(
            note,
            ParamDomain::NumericRange {
                ty: NumericType::Float,
                lower,
                lower_inclusive,
                upper,
                upper_inclusive,
                default,
                decimals,
            },
        )
    }

    /// Bounded integer spec with inclusive bounds
    pub fn int_range(note: &'static str, lower: i64, upper: i64, default: i64) -> Self {
        Self::new(
            note,
            ParamDomain::NumericRange {
                ty: NumericType::Int,
                lower: lower as f64,
                lower_inclusive: true,
                upper: upper as f64,
                upper_inclusive: true,
                default: default as f64,
                decimals: 0,
            },
        )
    }

    /// Array spec
    pub fn array(note: &'static str, element: ElementType) -> Self {
        Self::new(note, ParamDomain::Array { element })
    }

    /// Matrix spec
    pub fn matrix(note: &'static str, element: ElementType) -> Self {
        Self::new(note, ParamDomain::Matrix { element })
    }
}

/// An immutable, ordered registry of parameter specs.
///
/// Declaration order is preserved (it is the display order of the UI layer
/// that owns the supplied values). Families compose registries explicitly
/// via [`ParameterSet::extend`]; a duplicate name is a construction-time
/// error, never a silent override.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterSet {
    entries: IndexMap<String, ParamSpec>,
}

impl ParameterSet {
    /// Build a registry from named specs, rejecting duplicate names
    pub fn build<I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'static str, ParamSpec)>,
    {
        let mut map = IndexMap::new();
        for (name, spec) in entries {
            if map.insert(name.to_string(), spec).is_some() {
                return Err(ParamError::DuplicateParameter(name.to_string()));
            }
        }
        Ok(Self { entries: map })
    }

    /// Compose a new registry from this one plus extension specs.
    ///
    /// A name already present in the base is a
    /// [`ParamError::DuplicateParameter`] error.
    pub fn extend<I>(&self, entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'static str, ParamSpec)>,
    {
        let mut map = self.entries.clone();
        for (name, spec) in entries {
            if map.insert(name.to_string(), spec).is_some() {
                return Err(ParamError::DuplicateParameter(name.to_string()));
            }
        }
        Ok(Self { entries: map })
    }

    /// Look up a spec by name
    pub fn spec(&self, name: &str) -> Result<&ParamSpec> {
        self.entries
            .get(name)
            .ok_or_else(|| ParamError::UnknownParameter(name.to_string()))
    }

    /// Parameter names, in declaration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of declared parameters
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
