//! Classificatie van typebeschrijvingen en runtime-waarden naar een van
//! de vijf vormsoorten.

use crate::descriptor::{ScalarType, TypeDescriptor};
use crate::value::Value;

/// De vormsoort van een waarde of typebeschrijving.
///
/// Rechthoekig met rang 1 gedraagt zich als een sequentie met vaste
/// lengte; jagged geldt pas vanaf twee nestinglagen. Een enkele lijst is
/// dus nooit jagged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    /// Een losse scalar.
    Scalar,
    /// Een scalar die afwezig mag zijn.
    NullableScalar,
    /// Een rechthoekige array met vaste rang.
    Rectangular { rank: usize },
    /// Een ééndimensionale sequentie.
    Sequence,
    /// Geneste sequenties met de opgegeven diepte (minstens 2).
    Jagged { depth: usize },
}

impl ShapeKind {
    /// Geeft aan of de vorm een container is.
    #[must_use]
    pub fn is_collection(self) -> bool {
        matches!(
            self,
            Self::Rectangular { .. } | Self::Sequence | Self::Jagged { .. }
        )
    }
}

/// Classificeert een typebeschrijving.
///
/// Volgorde van de regels: nullable eerst, dan scalar, dan rechthoekige
/// array, dan sequentie. Een sequentie waarvan het elementtype zelf een
/// sequentievorm is classificeert als jagged met de gecombineerde diepte.
#[must_use]
pub fn classify_descriptor(descriptor: &TypeDescriptor) -> ShapeKind {
    match descriptor {
        TypeDescriptor::Nullable(_) => ShapeKind::NullableScalar,
        TypeDescriptor::Scalar(_) => ShapeKind::Scalar,
        TypeDescriptor::Array { rank, .. } => ShapeKind::Rectangular { rank: *rank },
        TypeDescriptor::Sequence(_) | TypeDescriptor::Iterable(_) | TypeDescriptor::Jagged { .. } => {
            let depth = nesting_depth(descriptor);
            if depth >= 2 {
                ShapeKind::Jagged { depth }
            } else {
                ShapeKind::Sequence
            }
        }
    }
}

/// Classificeert de werkelijke vorm van een runtime-waarde.
///
/// Tekst is altijd scalair. Een lijst waarvan het eerste element zelf een
/// lijst is geldt als jagged; de diepte volgt de keten van eerste
/// elementen. Uniformiteit wordt hier niet gecontroleerd.
#[must_use]
pub fn classify_value(value: &Value) -> ShapeKind {
    match value {
        Value::Null => ShapeKind::NullableScalar,
        Value::Array(array) => ShapeKind::Rectangular { rank: array.rank() },
        Value::List(_) => {
            let depth = value_depth(value);
            if depth >= 2 {
                ShapeKind::Jagged { depth }
            } else {
                ShapeKind::Sequence
            }
        }
        _ => ShapeKind::Scalar,
    }
}

/// Leidt de typebeschrijving af die bij de runtime-waarde hoort. Deze
/// beschrijving dient als bronzijde van de plancache-sleutel.
///
/// Elementtypes van containers volgen het eerste element; een lege
/// container valt terug op `Number`. De orchestrator handelt `Null` af
/// vóór de classificatie.
#[must_use]
pub fn descriptor_of(value: &Value) -> TypeDescriptor {
    match value {
        Value::Null => TypeDescriptor::nullable(ScalarType::Number),
        Value::Boolean(_) => TypeDescriptor::scalar(ScalarType::Boolean),
        Value::Integer(_) => TypeDescriptor::scalar(ScalarType::Integer),
        Value::Number(_) => TypeDescriptor::scalar(ScalarType::Number),
        Value::Text(_) => TypeDescriptor::scalar(ScalarType::Text),
        Value::Point(_) => TypeDescriptor::scalar(ScalarType::Point),
        Value::List(items) => TypeDescriptor::sequence(
            items
                .first()
                .map_or(TypeDescriptor::scalar(ScalarType::Number), descriptor_of),
        ),
        Value::Array(array) => TypeDescriptor::array(
            array
                .items()
                .first()
                .map_or(TypeDescriptor::scalar(ScalarType::Number), descriptor_of),
            array.rank(),
        ),
    }
}

/// Aantal sequentielagen in een typebeschrijving; arrays en scalars
/// tellen niet mee.
fn nesting_depth(descriptor: &TypeDescriptor) -> usize {
    match descriptor {
        TypeDescriptor::Sequence(element) | TypeDescriptor::Iterable(element) => {
            1 + nesting_depth(element)
        }
        TypeDescriptor::Jagged { element, depth } => depth + nesting_depth(element),
        _ => 0,
    }
}

/// Ontdoet een beschrijving van al haar sequentielagen en geeft het
/// bladtype terug.
pub(crate) fn sequence_leaf(descriptor: &TypeDescriptor) -> &TypeDescriptor {
    match descriptor {
        TypeDescriptor::Sequence(element) | TypeDescriptor::Iterable(element) => {
            sequence_leaf(element)
        }
        TypeDescriptor::Jagged { element, .. } => sequence_leaf(element),
        other => other,
    }
}

fn value_depth(value: &Value) -> usize {
    match value {
        Value::List(items) => 1 + items.first().map_or(0, value_depth),
        _ => 0,
    }
}
