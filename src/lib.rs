//! Collectiebewuste conversie-engine.
//!
//! Converteert een waarde met een gedeclareerde of werkelijke vorm naar
//! een gevraagde doelvorm: scalars, nullable scalars, ééndimensionale
//! sequenties, rechthoekige arrays met vaste rang en willekeurig geneste
//! (jagged) sequenties. Elementen worden recursief meegeconverteerd en de
//! elementvolgorde en -aantallen blijven door een rondgang heen behouden.
//!
//! De engine is synchroon, doet geen I/O en houdt buiten de plancache
//! geen toestand vast; aanroepen vanuit meerdere threads tegelijk is
//! veilig.

#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod convert;
pub mod descriptor;
pub mod value;

pub use convert::classify::ShapeKind;
pub use convert::{ConvertError, ConvertResult, FromValue, convert, convert_typed};
pub use descriptor::{ScalarType, ShapeDescriptor, TypeDescriptor};
pub use value::{ArrayValue, Value, ValueKind};
