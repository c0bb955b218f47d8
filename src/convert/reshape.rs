//! Opbouwen van de doelcontainer uit een platte reeks plus vorm.

use crate::descriptor::{ShapeDescriptor, TypeDescriptor};
use crate::value::{ArrayValue, Value};

use super::classify::{ShapeKind, classify_descriptor, sequence_leaf};
use super::flatten::FlatBuffer;
use super::index::{MultiIndex, linear_index};
use super::infer::InferenceOutcome;
use super::{ConvertError, ConvertResult};

/// Elementconversie die de orchestrator in de hervormer injecteert; de
/// elementconversie gebeurt hier en nergens eerder.
pub type ElementConvert<'a> = dyn Fn(&Value, &TypeDescriptor) -> ConvertResult<Value> + 'a;

/// Bouwt de doelcontainer op uit de platte buffer.
///
/// - Lijstdoelen nemen de buffer in volgorde over.
/// - Arraydoelen met rang 1 doen hetzelfde maar materialiseren een array.
/// - Arraydoelen met rang ≥ 2 eisen een passende bronvorm en plaatsen elk
///   element op het coördinaat uit de canonieke enumeratie.
/// - Jagged doelen herbouwen de nesting volgens de bronvorm zelf; de
///   doeldiepte moet gelijk zijn aan de rang van die vorm.
/// - Abstracte reeksen zonder concrete container zijn niet opbouwbaar.
///
/// Elke mislukte elementconversie wordt verpakt met de platte index
/// waarop die optrad; er wordt nooit een half gevulde container
/// teruggegeven.
pub fn reshape(
    buffer: FlatBuffer,
    target: &TypeDescriptor,
    convert_element: &ElementConvert,
) -> ConvertResult<Value> {
    if matches!(target, TypeDescriptor::Iterable(_)) {
        return Err(ConvertError::UnsupportedCollectionTarget {
            target: target.clone(),
        });
    }

    match classify_descriptor(target) {
        ShapeKind::Sequence => {
            let element = sequence_leaf(target);
            let (items, _, _) = buffer.into_parts();
            let converted = convert_items(items, element, convert_element)?;
            Ok(Value::List(converted))
        }
        ShapeKind::Rectangular { rank: 1 } => {
            let element = array_element(target);
            let (items, _, _) = buffer.into_parts();
            let len = items.len();
            let converted = convert_items(items, element, convert_element)?;
            Ok(Value::Array(ArrayValue::from_flat(vec![len], converted)))
        }
        ShapeKind::Rectangular { rank } => {
            let shape = matching_shape(&buffer, rank)?;
            let element = array_element(target);
            let (items, _, _) = buffer.into_parts();
            let mut converted = convert_items(items, element, convert_element)?;

            let mut placed = vec![Value::Null; shape.element_count()];
            for (flat, coords) in MultiIndex::new(shape.dims()).enumerate() {
                let slot = linear_index(&coords, shape.dims());
                placed[slot] = core::mem::replace(&mut converted[flat], Value::Null);
            }
            Ok(Value::Array(ArrayValue::from_flat(
                shape.dims().to_vec(),
                placed,
            )))
        }
        ShapeKind::Jagged { depth } => {
            let shape = matching_shape(&buffer, depth)?;
            let element = sequence_leaf(target);
            let (items, _, _) = buffer.into_parts();
            let converted = convert_items(items, element, convert_element)?;
            let mut flat = converted.into_iter();
            Ok(build_nested(shape.dims(), &mut flat))
        }
        ShapeKind::Scalar | ShapeKind::NullableScalar => {
            Err(ConvertError::UnsupportedCollectionTarget {
                target: target.clone(),
            })
        }
    }
}

/// Converteert alle platte elementen en verpakt fouten met hun index.
fn convert_items(
    items: Vec<Value>,
    element: &TypeDescriptor,
    convert_element: &ElementConvert,
) -> ConvertResult<Vec<Value>> {
    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            convert_element(item, element).map_err(|cause| {
                ConvertError::ElementConversionFailed {
                    index,
                    cause: Box::new(cause),
                }
            })
        })
        .collect()
}

/// Zoekt de bronvorm die bij de gevraagde rang past.
///
/// Een niet-uniforme jagged bron kan nooit een rang ≥ 2 leveren; dat
/// faalt met `NonUniformShape`. Elk ander ranggat is een `RankMismatch`.
fn matching_shape(buffer: &FlatBuffer, wanted_rank: usize) -> ConvertResult<ShapeDescriptor> {
    if buffer.shape().rank() == wanted_rank {
        return Ok(buffer.shape().clone());
    }
    if let Some(InferenceOutcome::NonUniform { level }) = buffer.jagged_outcome() {
        return Err(ConvertError::NonUniformShape { level: *level });
    }
    Err(ConvertError::RankMismatch {
        source_rank: buffer.shape().rank(),
        target_rank: wanted_rank,
    })
}

fn array_element(target: &TypeDescriptor) -> &TypeDescriptor {
    match target {
        TypeDescriptor::Array { element, .. } => element,
        other => other,
    }
}

/// Herbouwt geneste lijsten uit de platte reeks, van buiten naar binnen.
fn build_nested(dims: &[usize], flat: &mut std::vec::IntoIter<Value>) -> Value {
    match dims.split_first() {
        None => flat.next().unwrap_or(Value::Null),
        Some((&len, rest)) => {
            Value::List((0..len).map(|_| build_nested(rest, flat)).collect())
        }
    }
}
