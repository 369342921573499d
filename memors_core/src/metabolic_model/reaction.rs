//! This module provides a struct for representing reactions
use std::collections::BTreeSet;

use derive_builder::Builder;
use indexmap::IndexMap;

use super::model::Gpr;
use crate::io::gpr_parse::{parse_gpr, GprParseError};
use crate::metabolic_model::annotation::Annotation;

/// Represents a reaction in the metabolic model
#[derive(Builder, Debug, Clone, PartialEq)]
pub struct Reaction {
    /// Used to identify the reaction
    pub id: String,
    /// Metabolite stoichiometry of the reaction
    ///
    /// Negative coefficients mark reactants, positive coefficients mark products.
    #[builder(default = "IndexMap::new()")]
    pub metabolites: IndexMap<String, f64>,
    /// Human-readable reaction name
    #[builder(default = "None")]
    pub name: Option<String>,
    /// Gene Protein Reaction rule as written in the model, empty if there is none
    #[builder(default = "String::new()")]
    pub gene_reaction_rule: String,
    /// Lower flux bound
    #[builder(default = "crate::configuration::default_lower_bound()")]
    pub lower_bound: f64,
    /// Upper flux bound
    #[builder(default = "crate::configuration::default_upper_bound()")]
    pub upper_bound: f64,
    /// Reversibility declared by the model, see [`Reaction::reversibility`]
    #[builder(default = "None")]
    pub reversible: Option<bool>,
    /// Reaction subsystem
    #[builder(default = "None")]
    pub subsystem: Option<String>,
    /// Notes about the reaction
    #[builder(default = "None")]
    pub notes: Option<String>,
    /// Reaction Annotations
    #[builder(default = "Annotation::new()")]
    pub annotation: Annotation,
}

impl Reaction {
    /// Ids of the metabolites consumed by the reaction
    pub fn reactants(&self) -> BTreeSet<&str> {
        self.metabolites
            .iter()
            .filter(|(_, coef)| **coef < 0f64)
            .map(|(id, _)| id.as_str())
            .collect()
    }

    /// Ids of the metabolites produced by the reaction
    pub fn products(&self) -> BTreeSet<&str> {
        self.metabolites
            .iter()
            .filter(|(_, coef)| **coef > 0f64)
            .map(|(id, _)| id.as_str())
            .collect()
    }

    /// Whether the reaction is reversible
    ///
    /// # Note:
    /// A flag declared by the model takes precedence, otherwise the reaction is reversible
    /// when `lower_bound < 0 < upper_bound`.
    pub fn reversibility(&self) -> bool {
        match self.reversible {
            Some(flag) => flag,
            None => self.lower_bound < 0f64 && self.upper_bound > 0f64,
        }
    }

    /// Whether the reaction is an exchange, demand, or sink (a single metabolite)
    pub fn is_boundary(&self) -> bool {
        self.metabolites.len() == 1
    }

    /// Parse the gene reaction rule, `None` if the reaction has no rule
    pub fn gpr(&self) -> Result<Option<Gpr>, GprParseError> {
        if self.gene_reaction_rule.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(parse_gpr(&self.gene_reaction_rule)?))
    }

    /// Ids of the genes referenced by the gene reaction rule
    ///
    /// Fails when the rule can't be parsed, in which case the genes of the reaction are
    /// unknown rather than empty.
    pub fn genes(&self) -> Result<BTreeSet<String>, GprParseError> {
        Ok(self.gpr()?.map(|gpr| gpr.genes()).unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pfk() -> Reaction {
        let mut metabolites = IndexMap::new();
        metabolites.insert("atp_c".to_string(), -1.);
        metabolites.insert("f6p_c".to_string(), -1.);
        metabolites.insert("adp_c".to_string(), 1.);
        metabolites.insert("fdp_c".to_string(), 1.);
        metabolites.insert("h_c".to_string(), 1.);
        ReactionBuilder::default()
            .id("PFK".to_string())
            .metabolites(metabolites)
            .gene_reaction_rule("b3916 or b1723".to_string())
            .lower_bound(0.)
            .upper_bound(1000.)
            .build()
            .unwrap()
    }

    #[test]
    fn sides() {
        let rxn = pfk();
        assert_eq!(rxn.reactants(), BTreeSet::from(["atp_c", "f6p_c"]));
        assert_eq!(rxn.products(), BTreeSet::from(["adp_c", "fdp_c", "h_c"]));
        assert!(!rxn.is_boundary());
    }

    #[test]
    fn reversibility() {
        let mut rxn = pfk();
        assert!(!rxn.reversibility());
        rxn.lower_bound = -1000.;
        assert!(rxn.reversibility());
        // The declared flag wins over the bounds
        rxn.reversible = Some(false);
        assert!(!rxn.reversibility());
    }

    #[test]
    fn default_bounds() {
        let rxn = ReactionBuilder::default()
            .id("EX_glc__D_e".to_string())
            .build()
            .unwrap();
        assert_eq!(rxn.lower_bound, -1000.);
        assert_eq!(rxn.upper_bound, 1000.);
        assert!(rxn.gene_reaction_rule.is_empty());
    }

    #[test]
    fn genes() {
        let rxn = pfk();
        assert_eq!(
            rxn.genes().unwrap(),
            BTreeSet::from(["b1723".to_string(), "b3916".to_string()])
        );

        let mut no_rule = pfk();
        no_rule.gene_reaction_rule = "  ".to_string();
        assert!(no_rule.gpr().unwrap().is_none());
        assert!(no_rule.genes().unwrap().is_empty());

        let mut broken = pfk();
        broken.gene_reaction_rule = "(b3916 and".to_string();
        assert!(broken.genes().is_err());
    }
}
