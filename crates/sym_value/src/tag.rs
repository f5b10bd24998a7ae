//! Variant tags and vector subtypes, with the kernel's numeric codes.

use std::fmt;

/// The variant tag of a [`Value`](crate::Value).
///
/// `code()` returns the numeric type constant the kernel publishes for the
/// tag; `type_name()` the human-readable name.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Tag {
    Integer,
    Double,
    BigInteger,
    Real,
    Complex,
    Identifier,
    Vector,
    Symbolic,
    Fraction,
    String,
    Function,
    Map,
}

impl Tag {
    pub const ALL: [Tag; 12] = [
        Tag::Integer,
        Tag::Double,
        Tag::BigInteger,
        Tag::Real,
        Tag::Complex,
        Tag::Identifier,
        Tag::Vector,
        Tag::Symbolic,
        Tag::Fraction,
        Tag::String,
        Tag::Function,
        Tag::Map,
    ];

    pub const fn code(self) -> u8 {
        match self {
            Tag::Integer => 0,
            Tag::Double => 1,
            Tag::BigInteger => 2,
            Tag::Real => 3,
            Tag::Complex => 4,
            Tag::Identifier => 6,
            Tag::Vector => 7,
            Tag::Symbolic => 8,
            Tag::Fraction => 10,
            Tag::String => 12,
            Tag::Function => 13,
            Tag::Map => 17,
        }
    }

    pub fn from_code(code: u8) -> Option<Tag> {
        Tag::ALL.into_iter().find(|tag| tag.code() == code)
    }

    pub const fn type_name(self) -> &'static str {
        match self {
            Tag::Integer => "integer",
            Tag::Double => "double",
            Tag::BigInteger => "bigint",
            Tag::Real => "real",
            Tag::Complex => "complex",
            Tag::Identifier => "identifier",
            Tag::Vector => "vector",
            Tag::Symbolic => "symbolic",
            Tag::Fraction => "fraction",
            Tag::String => "string",
            Tag::Function => "function",
            Tag::Map => "map",
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

/// Classification of a vector, independent of its elements.
///
/// The same elements read as a list, an argument sequence, a set or a matrix
/// depending on this tag alone.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum VectorSubtype {
    #[default]
    List,
    /// Argument sequence; the n-ary calling convention for operators.
    Sequence,
    Set,
    Rpn,
    Group,
    Line,
    Vector,
    Point,
    /// Dense coefficient list of a univariate polynomial.
    Polynomial,
    Matrix,
    Assume,
    Spreadsheet,
    Coordinates,
}

impl VectorSubtype {
    pub const ALL: [VectorSubtype; 13] = [
        VectorSubtype::List,
        VectorSubtype::Sequence,
        VectorSubtype::Set,
        VectorSubtype::Rpn,
        VectorSubtype::Group,
        VectorSubtype::Line,
        VectorSubtype::Vector,
        VectorSubtype::Point,
        VectorSubtype::Polynomial,
        VectorSubtype::Matrix,
        VectorSubtype::Assume,
        VectorSubtype::Spreadsheet,
        VectorSubtype::Coordinates,
    ];

    pub const fn code(self) -> u8 {
        match self {
            VectorSubtype::List => 0,
            VectorSubtype::Sequence => 1,
            VectorSubtype::Set => 2,
            VectorSubtype::Rpn => 4,
            VectorSubtype::Group => 5,
            VectorSubtype::Line => 6,
            VectorSubtype::Vector => 7,
            VectorSubtype::Point => 8,
            VectorSubtype::Polynomial => 10,
            VectorSubtype::Matrix => 11,
            VectorSubtype::Assume => 13,
            VectorSubtype::Spreadsheet => 14,
            VectorSubtype::Coordinates => 20,
        }
    }

    pub fn from_code(code: u8) -> Option<VectorSubtype> {
        VectorSubtype::ALL.into_iter().find(|s| s.code() == code)
    }

    pub const fn name(self) -> &'static str {
        match self {
            VectorSubtype::List => "list",
            VectorSubtype::Sequence => "sequence",
            VectorSubtype::Set => "set",
            VectorSubtype::Rpn => "rpn",
            VectorSubtype::Group => "group",
            VectorSubtype::Line => "line",
            VectorSubtype::Vector => "vector",
            VectorSubtype::Point => "point",
            VectorSubtype::Polynomial => "polynomial",
            VectorSubtype::Matrix => "matrix",
            VectorSubtype::Assume => "assume",
            VectorSubtype::Spreadsheet => "spreadsheet",
            VectorSubtype::Coordinates => "coordinates",
        }
    }
}

impl fmt::Display for VectorSubtype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
