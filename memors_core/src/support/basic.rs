//! Basic quality checks: presence of model components, special reaction categories, and
//! metabolic coverage
use std::collections::BTreeSet;

use crate::configuration;
use crate::metabolic_model::model::Model;
use crate::support::cache::PureMetabolicCache;
use crate::support::gpr_helpers::find_top_level_complex;
use crate::support::helpers::{
    self, find_compartment_id_in_model, find_converting_reactions, find_met_in_model, ADP, ATP,
    OXYGEN, PHOSPHATE, PROTON, WATER,
};
use crate::support::SupportError;

/// Words found in the names of non-growth associated maintenance reactions
const NGAM_KEYWORDS: [&str; 6] = [
    "maintenance",
    "atpm",
    "requirement",
    "ngam",
    "non-growth",
    "associated",
];

// region Presence checks

/// Check whether the model has a non-empty id
pub fn check_model_id_presence(model: &Model) -> bool {
    model.id.as_deref().is_some_and(|id| !id.trim().is_empty())
}

/// Check whether the model has at least one metabolite
pub fn check_metabolites_presence(model: &Model) -> bool {
    !model.metabolites.is_empty()
}

/// Check whether the model has at least one reaction
pub fn check_reactions_presence(model: &Model) -> bool {
    !model.reactions.is_empty()
}

/// Find the metabolites without a chemical formula
pub fn check_metabolites_formula_presence(model: &Model) -> Vec<String> {
    model
        .metabolites
        .values()
        .filter(|met| met.formula.as_deref().is_none_or(|formula| formula.is_empty()))
        .map(|met| met.id.clone())
        .collect()
}

/// Find the metabolites without a charge
pub fn check_metabolites_charge_presence(model: &Model) -> Vec<String> {
    model
        .metabolites
        .values()
        .filter(|met| met.charge.is_none())
        .map(|met| met.id.clone())
        .collect()
}

/// Find the reactions without a gene reaction rule
pub fn check_gene_protein_reaction_rule_presence(model: &Model) -> Vec<String> {
    model
        .reactions
        .values()
        .filter(|rxn| rxn.gene_reaction_rule.trim().is_empty())
        .map(|rxn| rxn.id.clone())
        .collect()
}

// endregion Presence checks

/// Find the reactions which may represent the non-growth associated maintenance (NGAM)
///
/// Candidates are the irreversible reactions hydrolysing ATP in the main compartment, i.e.
/// with exactly ATP and water as reactants and ADP, phosphate, and a proton as products. The
/// main compartment is the configured one (`c` by default) or, if the model lacks it, the
/// compartment with the most metabolites. If any candidate is named like a maintenance
/// reaction (e.g. "ATP maintenance requirement") only those candidates are returned.
///
/// # Returns
/// Ids of the candidate reactions, empty if one of the species can't be found in the main
/// compartment
pub fn find_ngam(model: &Model) -> Vec<String> {
    let main_compartment = configuration::current().main_compartment;
    let Some(compartment) = find_compartment_id_in_model(model, &main_compartment) else {
        log::debug!("Model has no compartments, unable to look for NGAM reactions");
        return Vec::new();
    };
    let (Some(reactants), Some(products)) = (
        resolve_species(model, &compartment, &[ATP, WATER]),
        resolve_species(model, &compartment, &[ADP, PHOSPHATE, PROTON]),
    ) else {
        return Vec::new();
    };

    let candidates: Vec<_> = find_converting_reactions(model, (ATP, ADP))
        .into_iter()
        .filter(|rxn| !rxn.reversibility())
        .filter(|rxn| rxn.reactants() == reactants && rxn.products() == products)
        .collect();
    let named: Vec<_> = candidates
        .iter()
        .filter(|rxn| {
            let name = rxn.name.as_deref().unwrap_or_default().to_lowercase();
            NGAM_KEYWORDS.iter().any(|keyword| name.contains(keyword))
        })
        .collect();
    if named.is_empty() {
        candidates.iter().map(|rxn| rxn.id.clone()).collect()
    } else {
        named.iter().map(|rxn| rxn.id.clone()).collect()
    }
}

/// Ids of the first metabolite matching each tag in `compartment`, `None` if one is missing
fn resolve_species<'m>(
    model: &'m Model,
    compartment: &str,
    tags: &[&str],
) -> Option<BTreeSet<&'m str>> {
    tags.iter()
        .map(|tag| {
            let met = find_met_in_model(model, tag, Some(compartment))
                .into_iter()
                .next();
            if met.is_none() {
                log::debug!("Unable to find {tag} in compartment {compartment}");
            }
            met.map(|met| met.id.as_str())
        })
        .collect()
}

/// Calculate the ratio of reactions to genes
///
/// The coverage is a rough measure of how well the metabolism of an organism is covered
/// by the model, well curated models tend to have a coverage above 1.
///
/// # Errors
/// [`SupportError::InvalidModelState`] if the model has no reactions or no genes
pub fn calculate_metabolic_coverage(model: &Model) -> Result<f64, SupportError> {
    if model.reactions.is_empty() || model.genes.is_empty() {
        return Err(SupportError::InvalidModelState(format!(
            "metabolic coverage needs reactions and genes, the model has {} reactions and {} genes",
            model.reactions.len(),
            model.genes.len()
        )));
    }
    Ok(model.reactions.len() as f64 / model.genes.len() as f64)
}

/// Find the reactions catalyzed by a complex of at least two gene products
///
/// Reactions whose rule can't be parsed are logged and skipped.
pub fn find_protein_complexes(model: &Model) -> Vec<String> {
    model
        .reactions
        .values()
        .filter(|rxn| !rxn.gene_reaction_rule.trim().is_empty())
        .filter(|rxn| match find_top_level_complex(&rxn.gene_reaction_rule) {
            Ok(size) => size >= 2,
            Err(err) => {
                log::warn!(
                    "Unable to parse rule `{}` of reaction {}: {}",
                    rxn.gene_reaction_rule,
                    rxn.id,
                    err
                );
                false
            }
        })
        .map(|rxn| rxn.id.clone())
        .collect()
}

/// Find the reactions which are neither boundary, biomass, nor transport reactions
pub fn pure_metabolic_reactions(model: &Model) -> BTreeSet<String> {
    let interchange = helpers::find_interchange_biomass_reactions(model);
    model
        .reactions
        .keys()
        .filter(|id| !interchange.contains(id.as_str()))
        .cloned()
        .collect()
}

/// Same as [`pure_metabolic_reactions`], remembering the result in `cache`
///
/// Models are recognized by [`Model::fingerprint`], so a changed model is recomputed.
pub fn find_pure_metabolic_reactions(
    model: &Model,
    cache: &mut PureMetabolicCache,
) -> BTreeSet<String> {
    cache.get_or_insert_with(model.fingerprint(), || pure_metabolic_reactions(model))
}

/// Find the reactions consuming or producing oxygen in any compartment
///
/// A metabolite is oxygen if its formula is `O2` or it is identified as MetaNetX `MNXM4`.
pub fn find_oxygen_reactions(model: &Model) -> BTreeSet<String> {
    let oxygen: BTreeSet<&str> = find_met_in_model(model, OXYGEN, None)
        .into_iter()
        .map(|met| met.id.as_str())
        .collect();
    model
        .metabolites
        .values()
        .filter(|met| met.formula.as_deref() == Some("O2") || oxygen.contains(met.id.as_str()))
        .flat_map(|met| model.metabolite_reactions(&met.id))
        .map(|rxn| rxn.id.clone())
        .collect()
}

/// Find the metabolite ids with the compartment suffix removed
///
/// Ids are cut at the first underscore (`atp_c` gives `atp`). Ids using underscores for
/// anything else are merged as well, `glc__D_e` and `glc__L_e` both give `glc`.
pub fn find_unique_metabolites(model: &Model) -> BTreeSet<String> {
    model
        .metabolites
        .keys()
        .map(|id| match id.split_once('_') {
            Some((base, _)) => base.to_string(),
            None => id.clone(),
        })
        .collect()
}

/// Find the transport reactions without a gene reaction rule
pub fn check_transport_reaction_gpr_presence(model: &Model) -> Vec<String> {
    helpers::find_transport_reactions(model)
        .into_iter()
        .filter(|rxn| rxn.gene_reaction_rule.trim().is_empty())
        .map(|rxn| rxn.id.clone())
        .collect()
}

/// Find the metabolites exchanged through the reactions of the medium
///
/// A metabolite taking part in several medium reactions is listed once per reaction.
///
/// # Errors
/// [`SupportError::UnknownReaction`] if the medium names a reaction missing from the model
pub fn find_medium_metabolites(model: &Model) -> Result<Vec<String>, SupportError> {
    let mut metabolites = Vec::new();
    for rxn_id in model.medium.keys() {
        let rxn = model
            .reactions
            .get(rxn_id)
            .ok_or_else(|| SupportError::UnknownReaction(rxn_id.clone()))?;
        metabolites.extend(rxn.metabolites.keys().cloned());
    }
    Ok(metabolites)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metabolic_model::gene::Gene;
    use crate::metabolic_model::metabolite::Metabolite;
    use crate::metabolic_model::reaction::Reaction;
    use crate::support::helpers::test_utils::*;

    const ATP_HYDROLYSIS: [(&str, f64); 5] = [
        ("atp_c", -1.),
        ("h2o_c", -1.),
        ("adp_c", 1.),
        ("pi_c", 1.),
        ("h_c", 1.),
    ];

    fn energy_model() -> Model {
        let mut model = Model::new_empty();
        model.compartments.insert("c".to_string(), "cytosol".to_string());
        for id in ["atp_c", "adp_c", "h2o_c", "pi_c", "h_c"] {
            model.add_metabolite(metabolite(id, "c"));
        }
        model
    }

    fn named(mut rxn: Reaction, name: &str) -> Reaction {
        rxn.name = Some(name.to_string());
        rxn
    }

    #[test]
    fn presence_checks() {
        let mut model = Model::new_empty();
        assert!(!check_model_id_presence(&model));
        assert!(!check_metabolites_presence(&model));
        assert!(!check_reactions_presence(&model));

        model.id = Some("e_coli_core".to_string());
        let mut atp: Metabolite = metabolite("atp_c", "c");
        atp.formula = Some("C10H12N5O13P3".to_string());
        atp.charge = Some(-4);
        model.add_metabolite(atp);
        let mut adp = metabolite("adp_c", "c");
        adp.formula = Some(String::new());
        model.add_metabolite(adp);
        let mut rxn = reaction("ADK", &[("atp_c", -1.), ("adp_c", 2.)], (-1000., 1000.));
        rxn.gene_reaction_rule = "b0474".to_string();
        model.add_reaction(rxn);
        model.add_reaction(reaction("DM_atp_c", &[("atp_c", -1.)], (0., 1000.)));

        assert!(check_model_id_presence(&model));
        assert!(check_metabolites_presence(&model));
        assert!(check_reactions_presence(&model));
        assert_eq!(check_metabolites_formula_presence(&model), vec!["adp_c"]);
        assert_eq!(check_metabolites_charge_presence(&model), vec!["adp_c"]);
        assert_eq!(
            check_gene_protein_reaction_rule_presence(&model),
            vec!["DM_atp_c"]
        );
    }

    #[test]
    fn ngam_keyword_precedence() {
        let mut model = energy_model();
        model.add_reaction(named(
            reaction("ATPM", &ATP_HYDROLYSIS, (3.15, 1000.)),
            "ATP maintenance",
        ));
        model.add_reaction(named(
            reaction("ATPase", &ATP_HYDROLYSIS, (0., 1000.)),
            "ATP hydrolysis",
        ));
        assert_eq!(find_ngam(&model), vec!["ATPM"]);
    }

    #[test]
    fn ngam_without_keywords() {
        let mut model = energy_model();
        model.add_reaction(reaction("R1", &ATP_HYDROLYSIS, (0., 1000.)));
        model.add_reaction(named(
            reaction("R2", &ATP_HYDROLYSIS, (0., 1000.)),
            "ATP hydrolysis",
        ));
        // Reversible and incomplete hydrolysis reactions are not candidates
        model.add_reaction(named(
            reaction("R3", &ATP_HYDROLYSIS, (-1000., 1000.)),
            "ATP maintenance",
        ));
        model.add_reaction(named(
            reaction("R4", &ATP_HYDROLYSIS[..4], (0., 1000.)),
            "ATP maintenance",
        ));
        assert_eq!(find_ngam(&model), vec!["R1", "R2"]);
    }

    #[test]
    fn ngam_missing_species() {
        let mut model = Model::new_empty();
        model.add_metabolite(metabolite("atp_c", "c"));
        model.add_metabolite(metabolite("adp_c", "c"));
        model.add_reaction(reaction("R1", &[("atp_c", -1.), ("adp_c", 1.)], (0., 1000.)));
        assert!(find_ngam(&model).is_empty());
        assert!(find_ngam(&Model::new_empty()).is_empty());
    }

    #[test]
    fn metabolic_coverage() {
        let mut model = Model::new_empty();
        assert!(matches!(
            calculate_metabolic_coverage(&model),
            Err(SupportError::InvalidModelState(_))
        ));
        for i in 0..10 {
            model.add_reaction(reaction(&format!("R{i}"), &[("a_c", -1.)], (0., 1000.)));
        }
        assert!(matches!(
            calculate_metabolic_coverage(&model),
            Err(SupportError::InvalidModelState(_))
        ));
        for i in 0..5 {
            model.add_gene(Gene::new_id_only(&format!("g{i}")));
        }
        assert_eq!(calculate_metabolic_coverage(&model).unwrap(), 2.0);
    }

    #[test]
    fn protein_complexes() {
        let mut model = Model::new_empty();
        for (id, rule) in [
            ("R1", "b0001 and b0002"),
            ("R2", "b0001 or b0002"),
            ("R3", ""),
            ("R4", "(b0001 and b0002) or b0003"),
            ("R5", "b0001 and ("),
        ] {
            let mut rxn = reaction(id, &[("a_c", -1.), ("b_c", 1.)], (0., 1000.));
            rxn.gene_reaction_rule = rule.to_string();
            model.add_reaction(rxn);
        }
        assert_eq!(find_protein_complexes(&model), vec!["R1", "R4"]);
    }

    fn transport_model() -> Model {
        let mut model = Model::new_empty();
        let mut o2_e = metabolite("o2_e", "e");
        o2_e.formula = Some("O2".to_string());
        let mut o2_c = metabolite("o2_c", "c");
        o2_c.formula = Some("O2".to_string());
        model.add_metabolite(o2_e);
        model.add_metabolite(o2_c);
        model.add_metabolite(annotated_metabolite(
            "oxygen_p",
            "p",
            &[("metanetx.chemical", "MNXM4")],
        ));
        model.add_metabolite(metabolite("a_c", "c"));
        model.add_metabolite(metabolite("b_c", "c"));
        model.add_reaction(reaction("EX_o2_e", &[("o2_e", -1.)], (-1000., 1000.)));
        model.add_reaction(reaction(
            "O2t",
            &[("o2_e", -1.), ("o2_c", 1.)],
            (-1000., 1000.),
        ));
        model.add_reaction(reaction(
            "O2tpp",
            &[("oxygen_p", -1.), ("o2_c", 1.)],
            (-1000., 1000.),
        ));
        model.add_reaction(reaction("AB", &[("a_c", -1.), ("b_c", 1.)], (0., 1000.)));
        model
    }

    #[test]
    fn oxygen_reactions() {
        assert_eq!(
            find_oxygen_reactions(&transport_model()),
            BTreeSet::from(["EX_o2_e".to_string(), "O2t".to_string(), "O2tpp".to_string()])
        );
    }

    #[test]
    fn pure_metabolic() {
        let model = transport_model();
        assert_eq!(
            pure_metabolic_reactions(&model),
            BTreeSet::from(["AB".to_string(), "O2tpp".to_string()])
        );
        let mut cache = PureMetabolicCache::default();
        let first = find_pure_metabolic_reactions(&model, &mut cache);
        assert_eq!(cache.len(), 1);
        assert_eq!(find_pure_metabolic_reactions(&model, &mut cache), first);
        assert_eq!(cache.len(), 1);

        let mut changed = model.clone();
        changed.reactions.shift_remove("AB");
        assert_eq!(
            find_pure_metabolic_reactions(&changed, &mut cache),
            BTreeSet::from(["O2tpp".to_string()])
        );
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn cached_result_follows_annotations() {
        let model = transport_model();
        let mut cache = PureMetabolicCache::default();
        assert!(find_pure_metabolic_reactions(&model, &mut cache).contains("AB"));

        let mut biomass = model.clone();
        if let Some(rxn) = biomass.reactions.get_mut("AB") {
            rxn.annotation = annotation(&[("sbo", "SBO:0000629")]);
        }
        assert_eq!(
            find_pure_metabolic_reactions(&biomass, &mut cache),
            BTreeSet::from(["O2tpp".to_string()])
        );
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn transport_without_gpr() {
        let mut model = transport_model();
        assert_eq!(check_transport_reaction_gpr_presence(&model), vec!["O2t"]);
        if let Some(rxn) = model.reactions.get_mut("O2t") {
            rxn.gene_reaction_rule = "s0001".to_string();
        }
        assert!(check_transport_reaction_gpr_presence(&model).is_empty());
    }

    #[test]
    fn unique_metabolites() {
        let mut model = Model::new_empty();
        for (id, compartment) in [
            ("atp_c", "c"),
            ("atp_m", "m"),
            ("glc__D_e", "e"),
            ("glc__L_e", "e"),
            ("h2o", "c"),
        ] {
            model.add_metabolite(metabolite(id, compartment));
        }
        assert_eq!(
            find_unique_metabolites(&model),
            BTreeSet::from(["atp".to_string(), "glc".to_string(), "h2o".to_string()])
        );
    }

    #[test]
    fn medium_metabolites() {
        let mut model = Model::new_empty();
        model.add_reaction(reaction("EX_a", &[("a_e", -1.)], (-10., 1000.)));
        model.add_reaction(reaction("EX_ab", &[("a_e", -1.), ("b_e", -1.)], (-10., 1000.)));
        model.medium.insert("EX_a".to_string(), 10.);
        model.medium.insert("EX_ab".to_string(), 10.);
        assert_eq!(
            find_medium_metabolites(&model).unwrap(),
            vec!["a_e", "a_e", "b_e"]
        );

        model.medium.insert("EX_missing".to_string(), 10.);
        assert_eq!(
            find_medium_metabolites(&model),
            Err(SupportError::UnknownReaction("EX_missing".to_string()))
        );
    }
}
