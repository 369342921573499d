//! Helper functions shared by the quality checks
//!
//! Metabolites are identified across namespaces through MetaNetX chemical ids (e.g. `MNXM3`
//! for ATP). A metabolite matches a MetaNetX id when it is annotated with it, when one of its
//! BiGG, ModelSEED, or KEGG annotations lists a known synonym, or when its id (without the
//! compartment suffix) is a known synonym.
use std::collections::BTreeSet;

use phf::phf_map;

use crate::metabolic_model::metabolite::Metabolite;
use crate::metabolic_model::model::Model;
use crate::metabolic_model::reaction::Reaction;

/// MetaNetX id of ATP
pub const ATP: &str = "MNXM3";
/// MetaNetX id of ADP
pub const ADP: &str = "MNXM7";
/// MetaNetX id of water
pub const WATER: &str = "MNXM2";
/// MetaNetX id of phosphate
pub const PHOSPHATE: &str = "MNXM9";
/// MetaNetX id of a proton
pub const PROTON: &str = "MNXM1";
/// MetaNetX id of molecular oxygen
pub const OXYGEN: &str = "MNXM4";

/// Known identifiers of the MetaNetX metabolites in other namespaces (BiGG, ModelSEED, KEGG)
static METANETX_SYNONYMS: phf::Map<&'static str, &'static [&'static str]> = phf_map! {
    "MNXM3" => &["atp", "cpd00002", "C00002"],
    "MNXM7" => &["adp", "cpd00008", "C00008"],
    "MNXM2" => &["h2o", "cpd00001", "C00001", "C01328"],
    "MNXM9" => &["pi", "cpd00009", "C00009", "C13558"],
    "MNXM1" => &["h", "cpd00067", "C00080"],
    "MNXM4" => &["o2", "cpd00007", "C00007"],
};

/// Annotation keys which hold identifiers listed in [`METANETX_SYNONYMS`]
const SYNONYM_ANNOTATION_KEYS: [&str; 3] = ["bigg.metabolite", "seed.compound", "kegg.compound"];

/// SBO term of biomass production reactions
const BIOMASS_SBO: &str = "SBO:0000629";

/// Check whether `met` is the metabolite with MetaNetX id `mnx_id`
pub fn is_metanetx_metabolite(met: &Metabolite, mnx_id: &str) -> bool {
    if met
        .annotation
        .get("metanetx.chemical")
        .is_some_and(|value| value.contains(mnx_id))
    {
        return true;
    }
    let Some(synonyms) = METANETX_SYNONYMS.get(mnx_id) else {
        return false;
    };
    let base_id = met.base_id();
    if synonyms.iter().any(|synonym| *synonym == base_id) {
        return true;
    }
    SYNONYM_ANNOTATION_KEYS.iter().any(|key| {
        met.annotation
            .get(*key)
            .is_some_and(|value| value.values().any(|v| synonyms.iter().any(|s| *s == v)))
    })
}

/// Find the metabolites matching the MetaNetX id `mnx_id`, optionally only in `compartment_id`
///
/// # Returns
/// The matching metabolites in model order, empty if there are none
pub fn find_met_in_model<'m>(
    model: &'m Model,
    mnx_id: &str,
    compartment_id: Option<&str>,
) -> Vec<&'m Metabolite> {
    model
        .metabolites
        .values()
        .filter(|met| match compartment_id {
            Some(compartment) => met.compartment.as_deref() == Some(compartment),
            None => true,
        })
        .filter(|met| is_metanetx_metabolite(met, mnx_id))
        .collect()
}

/// Determine the id of a compartment of the model
///
/// If `compartment_id` is a compartment of the model it is returned as is, otherwise the
/// compartment with the most metabolites is taken (the first one when tied). Models without
/// any compartment give `None`.
pub fn find_compartment_id_in_model(model: &Model, compartment_id: &str) -> Option<String> {
    let compartments = model.compartment_ids();
    if compartments.contains(compartment_id) {
        return Some(compartment_id.to_string());
    }
    let mut largest: Option<(&str, usize)> = None;
    for compartment in compartments {
        let size = model
            .metabolites
            .values()
            .filter(|met| met.compartment.as_deref() == Some(compartment))
            .count();
        if largest.is_none_or(|(_, best)| size > best) {
            largest = Some((compartment, size));
        }
    }
    largest.map(|(compartment, _)| compartment.to_string())
}

/// Find the reactions which convert one metabolite of a pair into the other, in either direction
///
/// # Parameters
/// - model: Model to search
/// - pair: MetaNetX ids of the two metabolites
pub fn find_converting_reactions<'m>(model: &'m Model, pair: (&str, &str)) -> Vec<&'m Reaction> {
    let first: BTreeSet<&str> = find_met_in_model(model, pair.0, None)
        .into_iter()
        .map(|met| met.id.as_str())
        .collect();
    let second: BTreeSet<&str> = find_met_in_model(model, pair.1, None)
        .into_iter()
        .map(|met| met.id.as_str())
        .collect();
    model
        .reactions
        .values()
        .filter(|rxn| {
            let reactants = rxn.reactants();
            let products = rxn.products();
            let forward = !first.is_disjoint(&reactants) && !second.is_disjoint(&products);
            let backward = !first.is_disjoint(&products) && !second.is_disjoint(&reactants);
            forward || backward
        })
        .collect()
}

/// Check whether a reaction describes biomass production
pub fn is_biomass_reaction(rxn: &Reaction) -> bool {
    rxn.id.to_lowercase().contains("biomass")
        || rxn
            .name
            .as_deref()
            .is_some_and(|name| name.to_lowercase().contains("biomass"))
        || rxn
            .annotation
            .get("sbo")
            .is_some_and(|value| value.contains(BIOMASS_SBO))
}

/// Find the biomass production reactions of the model
pub fn find_biomass_reactions(model: &Model) -> Vec<&Reaction> {
    model
        .reactions
        .values()
        .filter(|rxn| is_biomass_reaction(rxn))
        .collect()
}

/// Find the exchange, demand, and sink reactions of the model
pub fn find_boundary_reactions(model: &Model) -> Vec<&Reaction> {
    model
        .reactions
        .values()
        .filter(|rxn| rxn.is_boundary())
        .collect()
}

/// Find the reactions which move a metabolite from one compartment to another
///
/// A reaction is a transport reaction if it is neither a boundary nor a biomass reaction, it
/// spans at least two compartments, and some chemical formula or some compartment-free
/// metabolite id occurs among both its reactants and its products. Bare protons are ignored
/// since they are moved along by many reactions which don't transport anything else.
pub fn find_transport_reactions(model: &Model) -> Vec<&Reaction> {
    model
        .reactions
        .values()
        .filter(|rxn| !rxn.is_boundary() && !is_biomass_reaction(rxn))
        .filter(|rxn| model.reaction_compartments(rxn).len() >= 2)
        .filter(|rxn| is_transported(model, rxn))
        .collect()
}

fn is_transported(model: &Model, rxn: &Reaction) -> bool {
    let side = |ids: BTreeSet<&str>| -> (BTreeSet<String>, BTreeSet<String>) {
        let mets: Vec<&Metabolite> = ids
            .into_iter()
            .filter_map(|id| model.metabolites.get(id))
            .collect();
        let formulas = mets
            .iter()
            .filter_map(|met| met.formula.clone())
            .filter(|formula| formula != "H")
            .collect();
        let bases = mets
            .iter()
            .filter(|met| !is_metanetx_metabolite(met, PROTON))
            .map(|met| met.base_id().to_string())
            .collect();
        (formulas, bases)
    };
    let (reactant_formulas, reactant_bases) = side(rxn.reactants());
    let (product_formulas, product_bases) = side(rxn.products());
    !reactant_formulas.is_disjoint(&product_formulas) || !reactant_bases.is_disjoint(&product_bases)
}

/// Find all the reactions that are not pure metabolic reactions
///
/// These are the boundary (exchange, demand, sink), biomass, and transport reactions.
pub fn find_interchange_biomass_reactions(model: &Model) -> BTreeSet<&str> {
    find_boundary_reactions(model)
        .into_iter()
        .chain(find_biomass_reactions(model))
        .chain(find_transport_reactions(model))
        .map(|rxn| rxn.id.as_str())
        .collect()
}
