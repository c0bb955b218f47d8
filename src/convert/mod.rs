//! De conversie-engine: van een waarde met een werkelijke vorm naar een
//! gevraagde doelvorm.
//!
//! De orchestrator classificeert bron en doel, stuurt scalaire paren
//! rechtstreeks naar de elementconversie en laat containerparen via
//! platmaken, elementconversie en hervormen lopen. Elke stap slaagt
//! volledig of faalt atomair.

use crate::descriptor::TypeDescriptor;
use crate::value::Value;

pub mod classify;
pub mod element;
pub mod flatten;
pub mod index;
pub mod infer;
pub mod plan;
pub mod reshape;
pub mod typed;

pub use typed::{FromValue, convert_typed};

/// Result type voor conversies.
pub type ConvertResult<T> = Result<T, ConvertError>;

/// Beschrijft fouten tijdens een conversie.
///
/// Fouten worden synchroon aan de aanroeper gemeld met de betrokken
/// typebeschrijvingen; element-fouten binnen een collectie dragen de
/// platte index mee waarop ze optraden. Er wordt nooit een gedeeltelijk
/// geconverteerde container teruggegeven.
#[derive(Debug, Clone, PartialEq)]
pub enum ConvertError {
    /// Een afwezige waarde werd aangeboden waar het doel afwezigheid
    /// verbiedt.
    NullToNonNullable { target: TypeDescriptor },
    /// Tussen de twee scalaire typen bestaat geen conversiepad.
    UnsupportedConversion {
        source: TypeDescriptor,
        target: TypeDescriptor,
    },
    /// De waarde valt buiten het representeerbare bereik van het doel.
    Overflow { value: f64, target: TypeDescriptor },
    /// Tekst kon niet volgens de grammatica van het doeltype gelezen
    /// worden.
    InvalidFormat {
        input: String,
        target: TypeDescriptor,
    },
    /// Bron- en doelrang zijn structureel onverenigbaar.
    RankMismatch {
        source_rank: usize,
        target_rank: usize,
    },
    /// Een jagged bron kan geen rechthoekig doel vullen omdat
    /// sibling-lengtes uiteenlopen.
    NonUniformShape { level: usize },
    /// De gevraagde doelvorm heeft geen concrete containerrepresentatie,
    /// of bron en doel zijn asymmetrisch (scalar tegenover collectie).
    UnsupportedCollectionTarget { target: TypeDescriptor },
    /// Een elementconversie binnen een collectie is mislukt.
    ElementConversionFailed {
        index: usize,
        cause: Box<ConvertError>,
    },
}

impl std::fmt::Display for ConvertError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConvertError::NullToNonNullable { target } => write!(
                f,
                "null kan niet naar het niet-nullable doeltype `{target}` geconverteerd worden"
            ),
            ConvertError::UnsupportedConversion { source, target } => {
                write!(f, "geen conversiepad van `{source}` naar `{target}`")
            }
            ConvertError::Overflow { value, target } => {
                write!(f, "waarde {value} valt buiten het bereik van `{target}`")
            }
            ConvertError::InvalidFormat { input, target } => {
                write!(f, "kon tekst `{input}` niet parsen als `{target}`")
            }
            ConvertError::RankMismatch {
                source_rank,
                target_rank,
            } => write!(
                f,
                "bronrang {source_rank} komt niet overeen met doelrang {target_rank}"
            ),
            ConvertError::NonUniformShape { level } => write!(
                f,
                "geneste sequenties zijn niet uniform op nestingniveau {level}"
            ),
            ConvertError::UnsupportedCollectionTarget { target } => write!(
                f,
                "doelvorm `{target}` heeft geen opbouwbare containerrepresentatie"
            ),
            ConvertError::ElementConversionFailed { index, cause } => {
                write!(f, "conversie van element {index} is mislukt: {cause}")
            }
        }
    }
}

impl std::error::Error for ConvertError {}

/// Converteert een waarde naar de gevraagde doelbeschrijving.
///
/// Beslisboom:
/// 1. `Null` volgt de nullable-regel van de elementconversie.
/// 2. Bron en doel worden geclassificeerd (via de plancache).
/// 3. Scalar naar scalar gaat rechtstreeks naar de elementconversie.
/// 4. Collectie naar collectie: platmaken, per element recursief
///    converteren, hervormen. Geneste elementtypes (array-van-array,
///    jagged-van-jagged) lopen via dezelfde recursie.
/// 5. Scalar tegenover collectie wordt nooit gecoërceerd.
pub fn convert(value: &Value, target: &TypeDescriptor) -> ConvertResult<Value> {
    if matches!(value, Value::Null) {
        return element::convert_scalar(value, target);
    }

    let source = classify::descriptor_of(value);
    match plan::dispatch_for(&source, target) {
        plan::Dispatch::ScalarToScalar => element::convert_scalar(value, target),
        plan::Dispatch::CollectionToCollection => {
            let kind = classify::classify_value(value);
            log::trace!("collectieconversie: {} -> `{target}`", value.kind());
            let buffer = flatten::flatten(value, kind)?;
            reshape::reshape(buffer, target, &convert)
        }
        plan::Dispatch::ShapeMismatch => Err(ConvertError::UnsupportedCollectionTarget {
            target: target.clone(),
        }),
    }
}
