use std::fmt::Display;

/// The element types allowed inside vectors and matrices, and the only
/// types participating in arithmetic broadcasting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericType {
    Int,
    Float,
}

impl Display for NumericType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NumericType::Int => write!(f, "int"),
            NumericType::Float => write!(f, "float"),
        }
    }
}

/// A resolved MAVL type.
///
/// Aggregate types carry their static dimensions; two aggregate types are
/// equal only if element type and all dimensions match. Record types are
/// identified by name since MAVL has one flat record namespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    Int,
    Float,
    Bool,
    String,
    Void,
    Vector {
        element: NumericType,
        dimension: usize,
    },
    Matrix {
        element: NumericType,
        rows: usize,
        cols: usize,
    },
    Record(String),
}

impl Type {
    pub fn vector(element: NumericType, dimension: usize) -> Self {
        Type::Vector { element, dimension }
    }

    pub fn matrix(element: NumericType, rows: usize, cols: usize) -> Self {
        Type::Matrix {
            element,
            rows,
            cols,
        }
    }

    /// True for `int` and `float` scalars.
    pub fn is_numeric(&self) -> bool {
        matches!(self, Type::Int | Type::Float)
    }

    /// True for `int`, `float` and `bool`.
    pub fn is_primitive(&self) -> bool {
        matches!(self, Type::Int | Type::Float | Type::Bool)
    }

    /// True for vectors and matrices.
    pub fn is_structure(&self) -> bool {
        matches!(self, Type::Vector { .. } | Type::Matrix { .. })
    }

    /// Anything except `void`.
    pub fn is_value_type(&self) -> bool {
        !matches!(self, Type::Void)
    }

    /// Types usable as record elements: value types except records.
    pub fn is_member_type(&self) -> bool {
        self.is_value_type() && !matches!(self, Type::Record(_))
    }

    /// The numeric scalar variant of this type, if it is one.
    pub fn as_numeric(&self) -> Option<NumericType> {
        match self {
            Type::Int => Some(NumericType::Int),
            Type::Float => Some(NumericType::Float),
            _ => None,
        }
    }

    /// The element type of an aggregate, or the type itself for a numeric
    /// scalar. Used by the arithmetic broadcasting rules.
    pub fn element_type(&self) -> Option<NumericType> {
        match self {
            Type::Vector { element, .. } | Type::Matrix { element, .. } => Some(*element),
            other => other.as_numeric(),
        }
    }

    /// Storage footprint in words. Record sizes depend on the declared
    /// elements and are resolved through the module environment instead.
    pub fn word_size(&self) -> Option<usize> {
        match self {
            Type::Void => Some(0),
            Type::Int | Type::Float | Type::Bool | Type::String => Some(1),
            Type::Vector { dimension, .. } => Some(*dimension),
            Type::Matrix { rows, cols, .. } => Some(rows * cols),
            Type::Record(_) => None,
        }
    }
}

impl From<NumericType> for Type {
    fn from(numeric: NumericType) -> Self {
        match numeric {
            NumericType::Int => Type::Int,
            NumericType::Float => Type::Float,
        }
    }
}

impl Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Type::Int => write!(f, "int"),
            Type::Float => write!(f, "float"),
            Type::Bool => write!(f, "bool"),
            Type::String => write!(f, "string"),
            Type::Void => write!(f, "void"),
            Type::Vector { element, dimension } => {
                write!(f, "vector<{}>[{}]", element, dimension)
            }
            Type::Matrix {
                element,
                rows,
                cols,
            } => write!(f, "matrix<{}>[{}][{}]", element, rows, cols),
            Type::Record(name) => write!(f, "@{}", name),
        }
    }
}
