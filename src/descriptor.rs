//! Typebeschrijvingen: het gevraagde of gedeclareerde type van een waarde,
//! los van de werkelijke runtime-vorm.

use core::fmt;

use serde::{Deserialize, Serialize};

/// De scalaire typen die de engine kent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScalarType {
    Boolean,
    Integer,
    Number,
    Text,
    Point,
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Boolean => "Boolean",
            Self::Integer => "Integer",
            Self::Number => "Number",
            Self::Text => "Text",
            Self::Point => "Point",
        };
        f.write_str(name)
    }
}

/// Beschrijft een gevraagd of gedeclareerd type.
///
/// De beschrijving staat los van de runtime-waarde, zodat de werkelijke
/// vorm van een waarde en de gedeclareerde doelvorm expliciet vergeleken
/// kunnen worden. De varianten dekken scalars, nullable scalars,
/// rechthoekige arrays met vaste rang, concrete lijsten en jagged
/// structuren met expliciete nestingdiepte. `Iterable` beschrijft een
/// abstracte reeks zonder concrete container; die vorm is wel
/// classificeerbaar maar nooit opbouwbaar als doel.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeDescriptor {
    /// Een enkel scalair type.
    Scalar(ScalarType),
    /// Een scalair type dat ook afwezig mag zijn.
    Nullable(ScalarType),
    /// Een rechthoekige array met het opgegeven elementtype en rang.
    Array {
        element: Box<TypeDescriptor>,
        rank: usize,
    },
    /// Een concrete lijst met het opgegeven elementtype.
    Sequence(Box<TypeDescriptor>),
    /// Geneste lijsten met het opgegeven bladtype en nestingdiepte.
    Jagged {
        element: Box<TypeDescriptor>,
        depth: usize,
    },
    /// Een abstracte reeks zonder concrete containerrepresentatie.
    Iterable(Box<TypeDescriptor>),
}

impl TypeDescriptor {
    #[must_use]
    pub fn scalar(scalar: ScalarType) -> Self {
        Self::Scalar(scalar)
    }

    #[must_use]
    pub fn nullable(scalar: ScalarType) -> Self {
        Self::Nullable(scalar)
    }

    /// Rechthoekige array; `rank` moet minstens 1 zijn.
    #[must_use]
    pub fn array(element: TypeDescriptor, rank: usize) -> Self {
        Self::Array {
            element: Box::new(element),
            rank,
        }
    }

    #[must_use]
    pub fn sequence(element: TypeDescriptor) -> Self {
        Self::Sequence(Box::new(element))
    }

    /// Jagged structuur; `depth` telt het aantal nestinglagen.
    #[must_use]
    pub fn jagged(element: TypeDescriptor, depth: usize) -> Self {
        Self::Jagged {
            element: Box::new(element),
            depth,
        }
    }

    #[must_use]
    pub fn iterable(element: TypeDescriptor) -> Self {
        Self::Iterable(Box::new(element))
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(scalar) => write!(f, "{scalar}"),
            Self::Nullable(scalar) => write!(f, "{scalar}?"),
            Self::Array { element, rank } => {
                write!(f, "{element}[")?;
                for _ in 1..*rank {
                    f.write_str(",")?;
                }
                f.write_str("]")
            }
            Self::Sequence(element) => write!(f, "lijst<{element}>"),
            Self::Jagged { element, depth } => {
                write!(f, "{element}")?;
                for _ in 0..*depth {
                    f.write_str("[]")?;
                }
                Ok(())
            }
            Self::Iterable(element) => write!(f, "reeks<{element}>"),
        }
    }
}

/// Geordende lijst van dimensielengtes die een rechthoekige vorm
/// karakteriseert. Rang 0 beschrijft een losse scalar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShapeDescriptor {
    dims: Vec<usize>,
}

impl ShapeDescriptor {
    #[must_use]
    pub fn new(dims: Vec<usize>) -> Self {
        Self { dims }
    }

    /// De gedegenereerde vorm met rang 0.
    #[must_use]
    pub fn scalar() -> Self {
        Self { dims: Vec::new() }
    }

    /// Eéndimensionale vorm met de opgegeven lengte.
    #[must_use]
    pub fn linear(len: usize) -> Self {
        Self { dims: vec![len] }
    }

    #[must_use]
    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    #[must_use]
    pub fn rank(&self) -> usize {
        self.dims.len()
    }

    /// Product van de dimensielengtes; 1 voor rang 0.
    #[must_use]
    pub fn element_count(&self) -> usize {
        self.dims.iter().product()
    }

    #[must_use]
    pub fn is_scalar(&self) -> bool {
        self.dims.is_empty()
    }
}
