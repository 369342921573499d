//! Detection of redundant metabolites and reactions
//!
//! Apart from the annotation based reaction check, entities are reduced to a signature
//! which is equal exactly when two entities are duplicates of each other, and grouped by it.
//! Groups with a single member are dropped. Groups are returned in the order of the first
//! member in the model.
use std::collections::{BTreeMap, BTreeSet};

use indexmap::IndexMap;
use itertools::Itertools;
use ordered_float::OrderedFloat;

use crate::metabolic_model::annotation::annotation_pairs;
use crate::metabolic_model::metabolite::Metabolite;
use crate::metabolic_model::model::Model;
use crate::metabolic_model::reaction::Reaction;

/// Annotation keys holding reaction identifiers of external databases
pub const REACTION_ANNOTATION_KEYS: [&str; 6] = [
    "metanetx.reaction",
    "kegg.reaction",
    "brenda",
    "rhea",
    "biocyc",
    "bigg.reaction",
];

/// Annotation key used to compare metabolite structures
const INCHIKEY: &str = "inchikey";

/// Reactions grouped by the annotation entries they have in common
pub type AnnotationGroup = (BTreeSet<(String, String)>, BTreeSet<String>);

/// Find pairs of metabolites in the same compartment with the same InChIKey
///
/// Only metabolites annotated with an InChIKey are compared. Pairs are not merged into larger
/// groups, three identical metabolites give three pairs.
pub fn find_duplicate_metabolites_in_compartments(model: &Model) -> Vec<(String, String)> {
    let mut duplicates = Vec::new();
    for compartment in model.compartment_ids() {
        let candidates: Vec<&Metabolite> = model
            .metabolites
            .values()
            .filter(|met| met.compartment.as_deref() == Some(compartment))
            .filter(|met| met.annotation.contains_key(INCHIKEY))
            .collect();
        for (met_a, met_b) in candidates.into_iter().tuple_combinations() {
            let (Some(key_a), Some(key_b)) = (
                met_a.annotation.get(INCHIKEY),
                met_b.annotation.get(INCHIKEY),
            ) else {
                continue;
            };
            if key_a.value_set() == key_b.value_set() {
                duplicates.push((met_a.id.clone(), met_b.id.clone()));
            }
        }
    }
    duplicates
}

/// Find reactions sharing at least one external database identifier
///
/// For every pair of reactions the common `(database, identifier)` entries among
/// [`REACTION_ANNOTATION_KEYS`] are computed. All pairs with exactly the same common entries
/// end up in one group, so pairs whose common entries only overlap give separate groups.
///
/// # Returns
/// Pairs of (common annotation entries, ids of the reactions sharing them)
pub fn find_reactions_with_partially_identical_annotations(model: &Model) -> Vec<AnnotationGroup> {
    let annotated: Vec<(&str, BTreeSet<(String, String)>)> = model
        .reactions
        .values()
        .map(|rxn| {
            (
                rxn.id.as_str(),
                annotation_pairs(&rxn.annotation, &REACTION_ANNOTATION_KEYS),
            )
        })
        .filter(|(_, pairs)| !pairs.is_empty())
        .collect();

    // Only pairs sharing an entry can have a non-empty intersection
    let mut sharing: BTreeMap<&(String, String), Vec<usize>> = BTreeMap::new();
    for (index, (_, pairs)) in annotated.iter().enumerate() {
        for pair in pairs {
            sharing.entry(pair).or_default().push(index);
        }
    }
    let candidates: BTreeSet<(usize, usize)> = sharing
        .values()
        .flat_map(|indices| indices.iter().copied().tuple_combinations())
        .collect();

    let mut groups: IndexMap<BTreeSet<(String, String)>, BTreeSet<String>> = IndexMap::new();
    for (a, b) in candidates {
        let (id_a, pairs_a) = &annotated[a];
        let (id_b, pairs_b) = &annotated[b];
        let common: BTreeSet<(String, String)> = pairs_a.intersection(pairs_b).cloned().collect();
        let group = groups.entry(common).or_default();
        group.insert(id_a.to_string());
        group.insert(id_b.to_string());
    }
    groups.into_iter().collect()
}

/// Find reactions converting the same metabolites
///
/// Metabolites reported by [`find_duplicate_metabolites_in_compartments`] count as the same
/// metabolite. Reactions are duplicates when they involve the same metabolites and agree on
/// reversibility. Two irreversible reactions must also have the same products (so the same
/// direction) and the same upper bound.
pub fn find_duplicate_reactions(model: &Model) -> Vec<BTreeSet<String>> {
    let canonical = duplicate_metabolite_representatives(model);
    let symbol = |met_id: &str| -> String {
        canonical
            .get(met_id)
            .cloned()
            .unwrap_or_else(|| met_id.to_string())
    };

    let mut groups: IndexMap<ReactionSignature, BTreeSet<String>> = IndexMap::new();
    for rxn in model.reactions.values() {
        let metabolites: BTreeSet<String> = rxn
            .metabolites
            .keys()
            .map(|id| symbol(id.as_str()))
            .collect();
        let reversible = rxn.reversibility();
        let direction = if reversible {
            None
        } else {
            let products: BTreeSet<String> = rxn.products().into_iter().map(&symbol).collect();
            Some((products, OrderedFloat(rxn.upper_bound)))
        };
        groups
            .entry(ReactionSignature {
                metabolites,
                reversible,
                direction,
            })
            .or_default()
            .insert(rxn.id.clone());
    }
    groups
        .into_values()
        .filter(|group| group.len() > 1)
        .collect()
}

/// What two reactions must agree on to be duplicates
#[derive(Debug, PartialEq, Eq, Hash)]
struct ReactionSignature {
    metabolites: BTreeSet<String>,
    reversible: bool,
    /// Products and upper bound, only compared for irreversible reactions
    direction: Option<(BTreeSet<String>, OrderedFloat<f64>)>,
}

/// Map every metabolite with a duplicate to the smallest id among its duplicates
fn duplicate_metabolite_representatives(model: &Model) -> BTreeMap<String, String> {
    let mut classes: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    for (met_a, met_b) in find_duplicate_metabolites_in_compartments(model) {
        classes.entry(met_a.clone()).or_default().insert(met_b.clone());
        classes.entry(met_b).or_default().insert(met_a);
    }
    classes
        .into_iter()
        .map(|(met_id, partners)| {
            let representative = partners
                .iter()
                .min()
                .filter(|partner| **partner < met_id)
                .cloned()
                .unwrap_or_else(|| met_id.clone());
            (met_id, representative)
        })
        .collect()
}

/// Find reactions catalyzed by exactly the same genes
///
/// Reactions without genes are not compared. Reactions whose rule can't be parsed have no
/// known gene set, they are logged and skipped.
pub fn find_reactions_with_identical_genes(model: &Model) -> Vec<BTreeSet<String>> {
    let mut groups: IndexMap<BTreeSet<String>, BTreeSet<String>> = IndexMap::new();
    for rxn in model.reactions.values() {
        let Some(genes) = comparable_genes(rxn) else {
            continue;
        };
        groups.entry(genes).or_default().insert(rxn.id.clone());
    }
    groups
        .into_values()
        .filter(|group| group.len() > 1)
        .collect()
}

fn comparable_genes(rxn: &Reaction) -> Option<BTreeSet<String>> {
    match rxn.genes() {
        Ok(genes) if genes.is_empty() => None,
        Ok(genes) => Some(genes),
        Err(err) => {
            log::warn!(
                "Skipping reaction {} in gene comparison, unable to parse rule `{}`: {}",
                rxn.id,
                rxn.gene_reaction_rule,
                err
            );
            None
        }
    }
}
