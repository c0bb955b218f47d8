//! Platmaken van containervormen naar een canonieke platte reeks.

use crate::descriptor::ShapeDescriptor;
use crate::value::Value;

use super::classify::ShapeKind;
use super::index::MultiIndex;
use super::infer::{InferenceOutcome, infer_shape};
use super::{ConvertError, ConvertResult};

/// Een platte reeks elementen plus de vorm waaruit die is platgemaakt.
///
/// Wordt binnen één conversieaanroep geproduceerd en geconsumeerd; de
/// buffer overleeft de aanroep niet. Voor jagged bronnen draagt de buffer
/// ook de afleidingsuitkomst mee, zodat de hervormer uniformiteit kan
/// beoordelen zonder de structuur opnieuw te bewandelen.
#[derive(Debug, Clone)]
pub struct FlatBuffer {
    items: Vec<Value>,
    shape: ShapeDescriptor,
    jagged: Option<InferenceOutcome>,
}

impl FlatBuffer {
    #[must_use]
    pub fn items(&self) -> &[Value] {
        &self.items
    }

    #[must_use]
    pub fn shape(&self) -> &ShapeDescriptor {
        &self.shape
    }

    /// De afleidingsuitkomst wanneer de bron jagged was.
    #[must_use]
    pub fn jagged_outcome(&self) -> Option<&InferenceOutcome> {
        self.jagged.as_ref()
    }

    /// Neemt de elementen en vorm over.
    #[must_use]
    pub fn into_parts(self) -> (Vec<Value>, ShapeDescriptor, Option<InferenceOutcome>) {
        (self.items, self.shape, self.jagged)
    }
}

/// Maakt een waarde plat volgens de opgegeven bronvorm.
///
/// - Scalar: buffer met één element en rang 0 (alleen intern gebruikt).
/// - Sequentie: elementen in iteratievolgorde, vorm `[len]`.
/// - Rechthoekige array: de opslag is al rij-majeur, dus de canonieke
///   wandeling valt samen met de opslagvolgorde.
/// - Jagged: eerst vormafleiding; een uniforme structuur krijgt de
///   afgeleide vorm, een niet-uniforme wordt toch platgemaakt (vorm
///   `[totaal]`) zodat doelen met rang 1 altijd slagen.
pub fn flatten(value: &Value, kind: ShapeKind) -> ConvertResult<FlatBuffer> {
    match kind {
        ShapeKind::Jagged { .. } => flatten_jagged(value),
        ShapeKind::Sequence => match value {
            Value::List(items) => Ok(FlatBuffer {
                items: items.clone(),
                shape: ShapeDescriptor::linear(items.len()),
                jagged: None,
            }),
            other => Ok(scalar_buffer(other)),
        },
        ShapeKind::Rectangular { .. } => match value {
            Value::Array(array) => Ok(FlatBuffer {
                items: array.items().to_vec(),
                shape: ShapeDescriptor::new(array.dims().to_vec()),
                jagged: None,
            }),
            other => Ok(scalar_buffer(other)),
        },
        ShapeKind::Scalar | ShapeKind::NullableScalar => Ok(scalar_buffer(value)),
    }
}

fn scalar_buffer(value: &Value) -> FlatBuffer {
    FlatBuffer {
        items: vec![value.clone()],
        shape: ShapeDescriptor::scalar(),
        jagged: None,
    }
}

fn flatten_jagged(value: &Value) -> ConvertResult<FlatBuffer> {
    match infer_shape(value) {
        InferenceOutcome::Uniform(shape) => {
            let mut items = Vec::with_capacity(shape.element_count());
            for coords in MultiIndex::new(shape.dims()) {
                let element = element_at(value, &coords).ok_or(
                    ConvertError::NonUniformShape { level: 0 },
                )?;
                items.push(element.clone());
            }
            Ok(FlatBuffer {
                items,
                shape: shape.clone(),
                jagged: Some(InferenceOutcome::Uniform(shape)),
            })
        }
        outcome @ InferenceOutcome::NonUniform { .. } => {
            let mut items = Vec::new();
            collect_leaves(value, &mut items);
            let shape = ShapeDescriptor::linear(items.len());
            Ok(FlatBuffer {
                items,
                shape,
                jagged: Some(outcome),
            })
        }
    }
}

/// Daalt af langs het coördinaat door de geneste lijsten.
fn element_at<'a>(value: &'a Value, coords: &[usize]) -> Option<&'a Value> {
    let mut cursor = value;
    for &index in coords {
        match cursor {
            Value::List(items) => cursor = items.get(index)?,
            _ => return None,
        }
    }
    Some(cursor)
}

/// Diepte-eerst alle bladwaarden verzamelen, in documentvolgorde.
fn collect_leaves(value: &Value, out: &mut Vec<Value>) {
    match value {
        Value::List(items) => {
            for item in items {
                collect_leaves(item, out);
            }
        }
        other => out.push(other.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::flatten;
    use crate::convert::classify::{ShapeKind, classify_value};
    use crate::convert::infer::InferenceOutcome;
    use crate::descriptor::ShapeDescriptor;
    use crate::value::{ArrayValue, Value};

    fn numbers(values: &[f64]) -> Value {
        Value::List(values.iter().copied().map(Value::Number).collect())
    }

    #[test]
    fn sequences_keep_iteration_order() {
        let list = numbers(&[1.0, 2.0, 3.0]);
        let buffer = flatten(&list, classify_value(&list)).unwrap();
        assert_eq!(buffer.shape(), &ShapeDescriptor::linear(3));
        assert_eq!(buffer.items().len(), 3);
        assert_eq!(buffer.items()[0], Value::Number(1.0));
        assert_eq!(buffer.items()[2], Value::Number(3.0));
    }

    #[test]
    fn rectangular_arrays_flatten_row_major() {
        let items: Vec<Value> = (1..=6).map(Value::Integer).collect();
        let array = Value::Array(ArrayValue::new(vec![2, 3], items.clone()).unwrap());
        let buffer = flatten(&array, classify_value(&array)).unwrap();

        assert_eq!(buffer.shape(), &ShapeDescriptor::new(vec![2, 3]));
        assert_eq!(buffer.items(), items.as_slice());
    }

    #[test]
    fn uniform_jagged_flattens_with_inferred_shape() {
        let nested = Value::List(vec![
            numbers(&[11.0, 12.0, 13.0]),
            numbers(&[21.0, 22.0, 23.0]),
        ]);
        let buffer = flatten(&nested, classify_value(&nested)).unwrap();

        assert_eq!(buffer.shape(), &ShapeDescriptor::new(vec![2, 3]));
        let flat: Vec<f64> = buffer
            .items()
            .iter()
            .map(|item| match item {
                Value::Number(n) => *n,
                other => panic!("verwacht Number, kreeg {other:?}"),
            })
            .collect();
        assert_eq!(flat, vec![11.0, 12.0, 13.0, 21.0, 22.0, 23.0]);
    }

    #[test]
    fn non_uniform_jagged_still_flattens_to_rank_one() {
        let nested = Value::List(vec![numbers(&[11.0, 12.0, 13.0]), numbers(&[21.0, 22.0])]);
        let buffer = flatten(&nested, classify_value(&nested)).unwrap();

        assert_eq!(buffer.shape(), &ShapeDescriptor::linear(5));
        assert!(matches!(
            buffer.jagged_outcome(),
            Some(InferenceOutcome::NonUniform { level: 1 })
        ));
        assert_eq!(buffer.items()[3], Value::Number(21.0));
    }

    #[test]
    fn scalars_become_degenerate_buffers() {
        let buffer = flatten(&Value::Number(4.0), ShapeKind::Scalar).unwrap();
        assert!(buffer.shape().is_scalar());
        assert_eq!(buffer.items(), &[Value::Number(4.0)]);
    }

    #[test]
    fn product_invariant_holds_for_flattened_buffers() {
        let nested = Value::List(vec![numbers(&[1.0, 2.0]), numbers(&[3.0, 4.0])]);
        let buffer = flatten(&nested, classify_value(&nested)).unwrap();
        assert_eq!(buffer.shape().element_count(), buffer.items().len());
    }
}
