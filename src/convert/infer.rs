//! Vormafleiding voor geneste (jagged) structuren.

use crate::descriptor::ShapeDescriptor;
use crate::value::Value;

/// Uitkomst van de vormafleiding over een geneste structuur.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InferenceOutcome {
    /// De structuur is tot op de bladeren rechthoekig; de afgeleide vorm
    /// voldoet aan de productinvariant.
    Uniform(ShapeDescriptor),
    /// Sibling-sequenties lopen uiteen op het opgegeven nestingniveau
    /// (de buitenste sequentie is niveau 0).
    NonUniform { level: usize },
}

/// Leidt de rechthoekige vorm van een geneste structuur af.
///
/// Loopt niveau voor niveau van buiten naar binnen. Op elk niveau moet
/// elke sibling een sequentie zijn met dezelfde lengte; zodra een blad
/// bereikt is stopt de afdaling. Een mix van bladeren en sequenties op
/// hetzelfde niveau telt als niet-uniform.
#[must_use]
pub fn infer_shape(value: &Value) -> InferenceOutcome {
    let Value::List(outer) = value else {
        return InferenceOutcome::Uniform(ShapeDescriptor::scalar());
    };

    let mut dims = vec![outer.len()];
    let mut layer: Vec<&Value> = outer.iter().collect();
    let mut level = 1;

    loop {
        if layer.is_empty() {
            return InferenceOutcome::Uniform(ShapeDescriptor::new(dims));
        }

        let lists = layer
            .iter()
            .filter(|entry| matches!(entry, Value::List(_)))
            .count();
        if lists == 0 {
            // Bladniveau bereikt.
            return InferenceOutcome::Uniform(ShapeDescriptor::new(dims));
        }
        if lists != layer.len() {
            return InferenceOutcome::NonUniform { level };
        }

        let mut lengths = layer.iter().map(|entry| match entry {
            Value::List(items) => items.len(),
            _ => 0,
        });
        let first = lengths.next().unwrap_or(0);
        if lengths.any(|len| len != first) {
            return InferenceOutcome::NonUniform { level };
        }

        dims.push(first);
        layer = layer
            .iter()
            .flat_map(|entry| match entry {
                Value::List(items) => items.as_slice(),
                _ => &[],
            })
            .collect();
        level += 1;
    }
}
