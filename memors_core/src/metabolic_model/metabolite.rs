//! This module provides the metabolite struct representing a metabolite

use std::hash::Hash;

use derive_builder::Builder;

use crate::metabolic_model::annotation::Annotation;

/// Represents a metabolite
#[derive(Builder, Debug, Clone, PartialEq)]
pub struct Metabolite {
    /// Used to identify the metabolite (must be unique)
    pub id: String,
    /// Human Readable name of the metabolite
    #[builder(default = "None")]
    pub name: Option<String>,
    /// Which compartment the metabolite is in
    #[builder(default = "None")]
    pub compartment: Option<String>,
    /// Electrical charge of the Metabolite
    #[builder(default = "None")]
    pub charge: Option<i32>,
    /// Chemical Formula of the metabolite
    #[builder(default = "None")]
    pub formula: Option<String>,
    /// Notes about the metabolite
    #[builder(default = "None")]
    pub notes: Option<String>,
    /// Metabolite annotations
    #[builder(default = "Annotation::new()")]
    pub annotation: Annotation,
}

impl Metabolite {
    /// The metabolite id with its compartment suffix removed
    ///
    /// # Note:
    /// Only a trailing `_{compartment}` matching the metabolite's own compartment is removed,
    /// so `atp_c` in compartment `c` gives `atp`, while `atp_c` without a compartment is kept
    /// as is.
    pub fn base_id(&self) -> &str {
        match self.compartment {
            Some(ref compartment) => self
                .id
                .strip_suffix(compartment.as_str())
                .and_then(|rest| rest.strip_suffix('_'))
                .unwrap_or(&self.id),
            None => &self.id,
        }
    }
}

impl Hash for Metabolite {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state); // Hash by id
                             // If the metabolite has an associated compartment, also hash by that
        if let Some(ref compartment) = self.compartment {
            compartment.hash(state)
        };
    }
}
