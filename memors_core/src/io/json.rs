//! Module providing JSON IO for memors Models
//!
//! Reads models in the COBRA JSON format, the format written by cobrapy and used by BiGG.
use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::metabolic_model::annotation::annotation_from_value;
use crate::metabolic_model::gene::Gene;
use crate::metabolic_model::metabolite::Metabolite;
use crate::metabolic_model::model::Model;
use crate::metabolic_model::reaction::{ReactionBuilder, ReactionBuilderError};

// region JSON Model
/// Represents a JSON serialized model, used for reading models in json format
#[derive(Deserialize)]
struct JsonModel {
    metabolites: Vec<JsonMetabolite>,
    reactions: Vec<JsonReaction>,
    #[serde(default)]
    genes: Vec<JsonGene>,
    id: Option<String>,
    compartments: Option<IndexMap<String, String>>,
    medium: Option<IndexMap<String, f64>>,
}

#[derive(Deserialize)]
struct JsonMetabolite {
    id: String,
    name: Option<String>,
    compartment: Option<String>,
    charge: Option<i32>,
    formula: Option<String>,
    notes: Option<Value>,
    annotation: Option<Value>,
}

#[derive(Deserialize)]
struct JsonReaction {
    id: String,
    name: Option<String>,
    metabolites: IndexMap<String, f64>,
    lower_bound: f64,
    upper_bound: f64,
    #[serde(default)]
    gene_reaction_rule: String,
    reversibility: Option<bool>,
    subsystem: Option<String>,
    notes: Option<Value>,
    annotation: Option<Value>,
}

#[derive(Deserialize)]
struct JsonGene {
    id: String,
    name: Option<String>,
    notes: Option<Value>,
    annotation: Option<Value>,
}
// endregion JSON Model

// region Conversions
impl From<JsonGene> for Gene {
    fn from(g: JsonGene) -> Self {
        Self {
            id: g.id,
            name: g.name,
            notes: g.notes.map(|v| v.to_string()),
            annotation: g.annotation.map(annotation_from_value).unwrap_or_default(),
        }
    }
}

impl From<JsonMetabolite> for Metabolite {
    fn from(m: JsonMetabolite) -> Self {
        Self {
            id: m.id,
            name: m.name,
            compartment: m.compartment,
            charge: m.charge,
            formula: m.formula.filter(|formula| !formula.is_empty()),
            notes: m.notes.map(|v| v.to_string()),
            annotation: m.annotation.map(annotation_from_value).unwrap_or_default(),
        }
    }
}

impl Model {
    /// Read a model from a COBRA JSON file
    pub fn read_json<P: AsRef<Path>>(path: P) -> Result<Model, JsonError> {
        let model_str = match fs::read_to_string(path) {
            Ok(data) => data,
            Err(err) => return Err(JsonError::UnableToRead(format!("{:?}", err))),
        };
        Model::from_json_str(&model_str)
    }

    /// Read a model from a string holding a COBRA JSON document
    pub fn from_json_str(model_str: &str) -> Result<Model, JsonError> {
        let json_model = match serde_json::from_str::<JsonModel>(model_str) {
            Ok(model) => model,
            Err(err) => return Err(JsonError::UnableToParse(format!("{:?}", err))),
        };
        Model::from_json(json_model)
    }

    fn from_json(json_model: JsonModel) -> Result<Self, JsonError> {
        let mut model = Model::new_empty();
        model.id = json_model.id;
        model.compartments = json_model.compartments.unwrap_or_default();
        json_model.genes.into_iter().for_each(|g| {
            model.add_gene(Gene::from(g));
        });
        json_model.metabolites.into_iter().for_each(|m| {
            model.add_metabolite(Metabolite::from(m));
        });
        // Genes only named in rules are registered as bare genes
        for rxn in json_model.reactions {
            let new_reaction = ReactionBuilder::default()
                .id(rxn.id)
                .metabolites(rxn.metabolites)
                .name(rxn.name)
                .gene_reaction_rule(rxn.gene_reaction_rule)
                .lower_bound(rxn.lower_bound)
                .upper_bound(rxn.upper_bound)
                .reversible(rxn.reversibility)
                .subsystem(rxn.subsystem)
                .notes(rxn.notes.map(|v| v.to_string()))
                .annotation(rxn.annotation.map(annotation_from_value).unwrap_or_default())
                .build()?;
            match new_reaction.genes() {
                Ok(genes) => {
                    for gene_id in genes {
                        if !model.genes.contains_key(&gene_id) {
                            model.add_gene(Gene::new_id_only(&gene_id));
                        }
                    }
                }
                Err(err) => log::warn!(
                    "Unable to parse the gene reaction rule of {}: {}",
                    new_reaction.id,
                    err
                ),
            }
            model.add_reaction(new_reaction);
        }
        model.medium = match json_model.medium {
            Some(medium) => medium,
            None => default_medium(&model),
        };
        Ok(model)
    }
}

/// Boundary reactions allowing uptake, mapped to their maximum uptake
fn default_medium(model: &Model) -> IndexMap<String, f64> {
    model
        .reactions
        .values()
        .filter(|rxn| rxn.is_boundary() && rxn.lower_bound < 0f64)
        .map(|rxn| (rxn.id.clone(), -rxn.lower_bound))
        .collect()
}

#[derive(Error, Debug)]
pub enum JsonError {
    #[error("Unable to read file due to {0}")]
    UnableToRead(String),
    #[error("Unable to parse json due to {0}")]
    UnableToParse(String),
    #[error("Unable to build reaction")]
    UnableToBuildReaction(#[from] ReactionBuilderError),
}

// endregion Conversions
