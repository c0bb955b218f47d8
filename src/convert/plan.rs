//! Cache van herbruikbare conversieplannen per typenpaar.

use std::collections::HashMap;
use std::sync::{OnceLock, RwLock};

use crate::descriptor::TypeDescriptor;

use super::classify::classify_descriptor;

/// De statisch bepaalbare dispatchbeslissing voor een typenpaar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// Beide zijden zijn scalair; rechtstreeks naar de elementconversie.
    ScalarToScalar,
    /// Beide zijden zijn containers; platmaken, converteren, hervormen.
    CollectionToCollection,
    /// Eén zijde is scalair en de andere een container; wordt nooit
    /// gecoërceerd.
    ShapeMismatch,
}

type PlanKey = (TypeDescriptor, TypeDescriptor);

/// Procesbrede, append-only planopslag. Typenparen zijn onveranderlijk
/// zolang het proces draait, dus invalidatie is niet nodig. Gelijktijdige
/// misses berekenen hetzelfde plan dubbel; dat is idempotent.
static PLAN_CACHE: OnceLock<RwLock<HashMap<PlanKey, Dispatch>>> = OnceLock::new();

/// Geeft de dispatchbeslissing voor het typenpaar, uit de cache of vers
/// berekend.
#[must_use]
pub fn dispatch_for(source: &TypeDescriptor, target: &TypeDescriptor) -> Dispatch {
    let cache = PLAN_CACHE.get_or_init(|| RwLock::new(HashMap::new()));

    if let Ok(map) = cache.read() {
        if let Some(dispatch) = map.get(&(source.clone(), target.clone())) {
            return *dispatch;
        }
    }

    let dispatch = compute_dispatch(source, target);
    log::trace!("conversieplan bepaald voor `{source}` -> `{target}`: {dispatch:?}");
    if let Ok(mut map) = cache.write() {
        map.entry((source.clone(), target.clone())).or_insert(dispatch);
    }
    dispatch
}

fn compute_dispatch(source: &TypeDescriptor, target: &TypeDescriptor) -> Dispatch {
    let source_kind = classify_descriptor(source);
    let target_kind = classify_descriptor(target);
    match (source_kind.is_collection(), target_kind.is_collection()) {
        (false, false) => Dispatch::ScalarToScalar,
        (true, true) => Dispatch::CollectionToCollection,
        _ => Dispatch::ShapeMismatch,
    }
}
