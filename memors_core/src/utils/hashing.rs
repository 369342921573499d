//! Utility functions for getting hashes
use std::hash::{DefaultHasher, Hash, Hasher};

use crate::metabolic_model::annotation::Annotation;

pub(crate) fn calculate_hash<T: Hash>(t: &T) -> u64 {
    let mut s = DefaultHasher::new();
    t.hash(&mut s);
    s.finish()
}

/// Feed a float into a hasher, treating `-0.0` and `0.0` as the same value
pub(crate) fn hash_f64<H: Hasher>(value: f64, state: &mut H) {
    let normalized = if value == 0. { 0f64 } else { value };
    normalized.to_bits().hash(state);
}

/// Feed the entries of an annotation into a hasher, in map order
///
/// `"x"` and `["x"]` hash alike, as they compare alike in the quality checks.
pub(crate) fn hash_annotation<H: Hasher>(annotation: &Annotation, state: &mut H) {
    annotation.len().hash(state);
    for (key, value) in annotation {
        key.hash(state);
        for identifier in value.values() {
            identifier.hash(state);
        }
        // Separates the identifiers of one key from the next key
        0xffu8.hash(state);
    }
}
