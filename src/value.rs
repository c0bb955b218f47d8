//! Basis Value-enum waarin bron- en doelwaarden van conversies worden
//! opgeslagen.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Beschikbare waardetypes binnen de conversie-engine.
///
/// Scalars staan op zichzelf; `List` en `Array` zijn de twee
/// containervormen. Geneste lijsten vormen samen een "jagged" structuur.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// Een afwezige waarde.
    Null,
    /// Een booleaanse waarde.
    Boolean(bool),
    /// Een geheel getal.
    Integer(i64),
    /// Een enkele numerieke waarde.
    Number(f64),
    /// Een tekstwaarde. Tekst telt altijd als scalair, nooit als reeks
    /// van tekens.
    Text(String),
    /// Een 3D-punt. Wordt door de engine als ondeelbaar object behandeld.
    Point([f64; 3]),
    /// Een lijst van waarden (één dimensie; nesting geeft jagged data).
    List(Vec<Value>),
    /// Een rechthoekige array met vaste rang.
    Array(ArrayValue),
}

impl Value {
    /// Geeft de variantnaam terug. Wordt gebruikt in foutmeldingen en logs.
    #[must_use]
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Null => ValueKind::Null,
            Self::Boolean(_) => ValueKind::Boolean,
            Self::Integer(_) => ValueKind::Integer,
            Self::Number(_) => ValueKind::Number,
            Self::Text(_) => ValueKind::Text,
            Self::Point(_) => ValueKind::Point,
            Self::List(_) => ValueKind::List,
            Self::Array(_) => ValueKind::Array,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Boolean(value) => write!(f, "{value}"),
            Self::Integer(value) => write!(f, "{value}"),
            Self::Number(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
            Self::Point([x, y, z]) => write!(f, "({x}, {y}, {z})"),
            Self::List(items) => write!(f, "lijst met {} elementen", items.len()),
            Self::Array(array) => {
                let dims = array
                    .dims()
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join("x");
                write!(f, "array {dims}")
            }
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<[f64; 3]> for Value {
    fn from(value: [f64; 3]) -> Self {
        Self::Point(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Self::List(items)
    }
}

/// Beschrijft het soort `Value`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Null,
    Boolean,
    Integer,
    Number,
    Text,
    Point,
    List,
    Array,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Null => "Null",
            Self::Boolean => "Boolean",
            Self::Integer => "Integer",
            Self::Number => "Number",
            Self::Text => "Text",
            Self::Point => "Point",
            Self::List => "List",
            Self::Array => "Array",
        };
        f.write_str(name)
    }
}

/// Een rechthoekige array met willekeurige rang.
///
/// De elementen liggen plat opgeslagen in rij-majeure volgorde: de laatste
/// coördinaat loopt het snelst. `dims` bevat per dimensie de lengte.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrayValue {
    dims: Vec<usize>,
    items: Vec<Value>,
}

impl ArrayValue {
    /// Maakt een array aan wanneer de afmetingen en elementen overeenkomen.
    /// De rang moet minstens 1 zijn en het product van `dims` moet gelijk
    /// zijn aan het aantal elementen.
    #[must_use]
    pub fn new(dims: Vec<usize>, items: Vec<Value>) -> Option<Self> {
        if dims.is_empty() || dims.iter().product::<usize>() != items.len() {
            return None;
        }
        Some(Self { dims, items })
    }

    /// Interne constructor voor paden waar de productinvariant al vaststaat.
    pub(crate) fn from_flat(dims: Vec<usize>, items: Vec<Value>) -> Self {
        debug_assert_eq!(dims.iter().product::<usize>(), items.len());
        debug_assert!(!dims.is_empty());
        Self { dims, items }
    }

    /// Lengtes per dimensie.
    #[must_use]
    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    /// Aantal dimensies.
    #[must_use]
    pub fn rank(&self) -> usize {
        self.dims.len()
    }

    /// Elementen in rij-majeure volgorde.
    #[must_use]
    pub fn items(&self) -> &[Value] {
        &self.items
    }

    /// Element op het opgegeven coördinaat, of `None` wanneer het
    /// coördinaat buiten de afmetingen valt.
    #[must_use]
    pub fn get(&self, coords: &[usize]) -> Option<&Value> {
        if coords.len() != self.dims.len() {
            return None;
        }
        let mut offset = 0;
        for (index, bound) in coords.iter().zip(&self.dims) {
            if index >= bound {
                return None;
            }
            offset = offset * bound + index;
        }
        self.items.get(offset)
    }

    /// Neemt de afmetingen en elementen over.
    #[must_use]
    pub fn into_parts(self) -> (Vec<usize>, Vec<Value>) {
        (self.dims, self.items)
    }
}
