//! Conversie van losse scalaire waarden naar een scalair doeltype.
//!
//! Deze laag kent geen containers; de orchestrator stuurt collecties via
//! de platmaker en hervormer.

use crate::descriptor::{ScalarType, TypeDescriptor};
use crate::value::Value;

use super::classify::descriptor_of;
use super::{ConvertError, ConvertResult};

// 2^63, exact representeerbaar als f64. Waarden op de ondergrens zelf
// passen nog in een i64; de bovengrens niet.
const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

/// Converteert één scalaire waarde naar het gevraagde scalaire doeltype.
///
/// Regels, in volgorde:
/// - `Null` mag alleen naar een nullable doeltype.
/// - Een waarde die het doeltype al heeft gaat ongewijzigd terug.
/// - Binnen de natuurlijke familie (numeriek ↔ numeriek, numeriek ↔
///   tekst, boolean ↔ numeriek/tekst) wordt geconverteerd; getal naar
///   geheel getal rondt half-naar-even af.
/// - Al het overige faalt met `UnsupportedConversion`.
///
/// De functie is puur en heeft geen neveneffecten.
pub fn convert_scalar(value: &Value, target: &TypeDescriptor) -> ConvertResult<Value> {
    if matches!(value, Value::Null) {
        return if matches!(target, TypeDescriptor::Nullable(_)) {
            Ok(Value::Null)
        } else {
            Err(ConvertError::NullToNonNullable {
                target: target.clone(),
            })
        };
    }

    let scalar = match target {
        TypeDescriptor::Scalar(scalar) | TypeDescriptor::Nullable(scalar) => *scalar,
        other => {
            return Err(ConvertError::UnsupportedCollectionTarget {
                target: other.clone(),
            });
        }
    };

    if satisfies(value, scalar) {
        return Ok(value.clone());
    }

    match (value, scalar) {
        (Value::Integer(int), ScalarType::Number) => Ok(Value::Number(*int as f64)),
        (Value::Integer(int), ScalarType::Text) => Ok(Value::Text(int.to_string())),
        (Value::Integer(int), ScalarType::Boolean) => Ok(Value::Boolean(*int != 0)),
        (Value::Number(number), ScalarType::Integer) => number_to_integer(*number, target),
        (Value::Number(number), ScalarType::Text) => Ok(Value::Text(number.to_string())),
        (Value::Number(number), ScalarType::Boolean) => Ok(Value::Boolean(*number != 0.0)),
        (Value::Boolean(boolean), ScalarType::Integer) => {
            Ok(Value::Integer(i64::from(*boolean)))
        }
        (Value::Boolean(boolean), ScalarType::Number) => {
            Ok(Value::Number(if *boolean { 1.0 } else { 0.0 }))
        }
        (Value::Boolean(boolean), ScalarType::Text) => Ok(Value::Text(boolean.to_string())),
        (Value::Text(text), ScalarType::Integer) => parse_text(text, target, Value::Integer),
        (Value::Text(text), ScalarType::Number) => parse_text(text, target, Value::Number),
        (Value::Text(text), ScalarType::Boolean) => parse_boolean(text, target),
        _ => Err(ConvertError::UnsupportedConversion {
            source: descriptor_of(value),
            target: target.clone(),
        }),
    }
}

/// Geeft aan of de runtime-waarde het scalaire type al heeft.
fn satisfies(value: &Value, scalar: ScalarType) -> bool {
    matches!(
        (value, scalar),
        (Value::Boolean(_), ScalarType::Boolean)
            | (Value::Integer(_), ScalarType::Integer)
            | (Value::Number(_), ScalarType::Number)
            | (Value::Text(_), ScalarType::Text)
            | (Value::Point(_), ScalarType::Point)
    )
}

/// Getal naar geheel getal: half-naar-even afronding, daarna een
/// bereikcontrole tegen de i64-grenzen.
fn number_to_integer(number: f64, target: &TypeDescriptor) -> ConvertResult<Value> {
    if !number.is_finite() {
        return Err(ConvertError::Overflow {
            value: number,
            target: target.clone(),
        });
    }
    let rounded = number.round_ties_even();
    if rounded < -I64_BOUND || rounded >= I64_BOUND {
        return Err(ConvertError::Overflow {
            value: number,
            target: target.clone(),
        });
    }
    Ok(Value::Integer(rounded as i64))
}

/// Tekst parsen volgens de standaardgrammatica van het doeltype.
/// Groeperingstekens zoals `123_456` worden geweigerd.
fn parse_text<T: core::str::FromStr>(
    text: &str,
    target: &TypeDescriptor,
    wrap: impl FnOnce(T) -> Value,
) -> ConvertResult<Value> {
    text.parse::<T>()
        .map(wrap)
        .map_err(|_| ConvertError::InvalidFormat {
            input: text.to_owned(),
            target: target.clone(),
        })
}

fn parse_boolean(text: &str, target: &TypeDescriptor) -> ConvertResult<Value> {
    match text.trim().to_lowercase().as_str() {
        "true" => Ok(Value::Boolean(true)),
        "false" => Ok(Value::Boolean(false)),
        _ => Err(ConvertError::InvalidFormat {
            input: text.to_owned(),
            target: target.clone(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::convert_scalar;
    use crate::convert::ConvertError;
    use crate::descriptor::{ScalarType, TypeDescriptor};
    use crate::value::Value;

    fn integer() -> TypeDescriptor {
        TypeDescriptor::scalar(ScalarType::Integer)
    }

    fn number() -> TypeDescriptor {
        TypeDescriptor::scalar(ScalarType::Number)
    }

    #[test]
    fn identity_returns_value_unchanged() {
        let point = Value::Point([1.0, 2.0, 3.0]);
        let target = TypeDescriptor::scalar(ScalarType::Point);
        assert_eq!(convert_scalar(&point, &target).unwrap(), point);
    }

    #[test]
    fn null_requires_nullable_target() {
        let nullable = TypeDescriptor::nullable(ScalarType::Number);
        assert_eq!(convert_scalar(&Value::Null, &nullable).unwrap(), Value::Null);

        let err = convert_scalar(&Value::Null, &number()).unwrap_err();
        assert!(matches!(err, ConvertError::NullToNonNullable { .. }));
    }

    #[test]
    fn rounding_is_half_to_even() {
        assert_eq!(
            convert_scalar(&Value::Number(6.5), &integer()).unwrap(),
            Value::Integer(6)
        );
        assert_eq!(
            convert_scalar(&Value::Number(6.9), &integer()).unwrap(),
            Value::Integer(7)
        );
        assert_eq!(
            convert_scalar(&Value::Number(6.1), &integer()).unwrap(),
            Value::Integer(6)
        );
        assert_eq!(
            convert_scalar(&Value::Number(7.5), &integer()).unwrap(),
            Value::Integer(8)
        );
        assert_eq!(
            convert_scalar(&Value::Number(-6.5), &integer()).unwrap(),
            Value::Integer(-6)
        );
    }

    #[test]
    fn narrowing_outside_range_overflows() {
        let err = convert_scalar(&Value::Number(1.0e22), &integer()).unwrap_err();
        assert!(matches!(err, ConvertError::Overflow { .. }));

        let err = convert_scalar(&Value::Number(f64::NAN), &integer()).unwrap_err();
        assert!(matches!(err, ConvertError::Overflow { .. }));
    }

    #[test]
    fn grouping_separators_are_rejected() {
        let err = convert_scalar(&Value::from("123_456.55e-16"), &number()).unwrap_err();
        assert!(matches!(err, ConvertError::InvalidFormat { .. }));
    }

    #[test]
    fn text_parses_through_standard_grammar() {
        assert_eq!(
            convert_scalar(&Value::from("45"), &integer()).unwrap(),
            Value::Integer(45)
        );
        assert_eq!(
            convert_scalar(&Value::from("4.5e1"), &number()).unwrap(),
            Value::Number(45.0)
        );
        assert_eq!(
            convert_scalar(
                &Value::from("True"),
                &TypeDescriptor::scalar(ScalarType::Boolean)
            )
            .unwrap(),
            Value::Boolean(true)
        );
    }

    #[test]
    fn numbers_render_to_text() {
        let text = TypeDescriptor::scalar(ScalarType::Text);
        assert_eq!(
            convert_scalar(&Value::Number(4.5), &text).unwrap(),
            Value::from("4.5")
        );
        assert_eq!(
            convert_scalar(&Value::Integer(45), &text).unwrap(),
            Value::from("45")
        );
    }

    #[test]
    fn unrelated_types_are_unsupported() {
        let err = convert_scalar(&Value::Point([0.0; 3]), &number()).unwrap_err();
        assert!(matches!(err, ConvertError::UnsupportedConversion { .. }));
    }
}
