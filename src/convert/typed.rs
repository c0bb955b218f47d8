//! Getypeerde toegang tot de conversie-engine.
//!
//! `FromValue` koppelt een Rust-type aan de typebeschrijving waarmee de
//! engine het opbouwt; `convert_typed` is de getypeerde variant van
//! [`convert`](super::convert).

use crate::descriptor::{ScalarType, TypeDescriptor};
use crate::value::Value;

use super::classify::descriptor_of;
use super::{ConvertError, ConvertResult};

/// Typen die uit een geconverteerde [`Value`] opgebouwd kunnen worden.
pub trait FromValue: Sized {
    /// De typebeschrijving die als conversiedoel dient.
    fn descriptor() -> TypeDescriptor;

    /// Bouwt het type op uit een waarde die al naar [`Self::descriptor`]
    /// geconverteerd is.
    fn from_value(value: Value) -> ConvertResult<Self>;
}

/// Converteert een waarde naar het gevraagde Rust-type.
pub fn convert_typed<T: FromValue>(value: &Value) -> ConvertResult<T> {
    let converted = super::convert(value, &T::descriptor())?;
    T::from_value(converted)
}

fn mismatch<T: FromValue>(value: &Value) -> ConvertError {
    ConvertError::UnsupportedConversion {
        source: descriptor_of(value),
        target: T::descriptor(),
    }
}

macro_rules! scalar_from_value {
    ($ty:ty, $scalar:expr, $variant:ident) => {
        impl FromValue for $ty {
            fn descriptor() -> TypeDescriptor {
                TypeDescriptor::scalar($scalar)
            }

            fn from_value(value: Value) -> ConvertResult<Self> {
                match value {
                    Value::$variant(inner) => Ok(inner),
                    other => Err(mismatch::<Self>(&other)),
                }
            }
        }

        impl FromValue for Option<$ty> {
            fn descriptor() -> TypeDescriptor {
                TypeDescriptor::nullable($scalar)
            }

            fn from_value(value: Value) -> ConvertResult<Self> {
                match value {
                    Value::Null => Ok(None),
                    Value::$variant(inner) => Ok(Some(inner)),
                    other => Err(mismatch::<Self>(&other)),
                }
            }
        }
    };
}

scalar_from_value!(bool, ScalarType::Boolean, Boolean);
scalar_from_value!(i64, ScalarType::Integer, Integer);
scalar_from_value!(f64, ScalarType::Number, Number);
scalar_from_value!(String, ScalarType::Text, Text);
scalar_from_value!([f64; 3], ScalarType::Point, Point);

/// Geneste vectoren leveren via de classificatie vanzelf een jagged
/// beschrijving op: `Vec<Vec<f64>>` beschrijft `lijst<lijst<Number>>`.
impl<T: FromValue> FromValue for Vec<T> {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::sequence(T::descriptor())
    }

    fn from_value(value: Value) -> ConvertResult<Self> {
        match value {
            Value::List(items) => items.into_iter().map(T::from_value).collect(),
            other => Err(mismatch::<Self>(&other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::convert_typed;
    use crate::convert::ConvertError;
    use crate::value::Value;

    #[test]
    fn scalars_convert_to_their_rust_types() {
        let int: i64 = convert_typed(&Value::Number(45.0)).unwrap();
        assert_eq!(int, 45);

        let text: String = convert_typed(&Value::Integer(45)).unwrap();
        assert_eq!(text, "45");
    }

    #[test]
    fn options_accept_absent_values() {
        let missing: Option<f64> = convert_typed(&Value::Null).unwrap();
        assert_eq!(missing, None);

        let present: Option<f64> = convert_typed(&Value::Integer(3)).unwrap();
        assert_eq!(present, Some(3.0));

        let err = convert_typed::<f64>(&Value::Null).unwrap_err();
        assert!(matches!(err, ConvertError::NullToNonNullable { .. }));
    }

    #[test]
    fn vectors_convert_per_element() {
        let list = Value::List(vec![Value::from("1.5"), Value::from("2.5")]);
        let values: Vec<f64> = convert_typed(&list).unwrap();
        assert_eq!(values, vec![1.5, 2.5]);
    }

    #[test]
    fn nested_vectors_rebuild_jagged_structure() {
        let nested = Value::List(vec![
            Value::List(vec![Value::Integer(1), Value::Integer(2)]),
            Value::List(vec![Value::Integer(3), Value::Integer(4)]),
        ]);
        let values: Vec<Vec<f64>> = convert_typed(&nested).unwrap();
        assert_eq!(values, vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
    }

    #[test]
    fn point_values_round_trip_as_arrays() {
        let point: [f64; 3] = convert_typed(&Value::Point([1.0, 2.0, 3.0])).unwrap();
        assert_eq!(point, [1.0, 2.0, 3.0]);
    }
}
