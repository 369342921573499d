//! This module provides the Model struct for representing an entire metabolic model
use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};

use crate::metabolic_model::gene::Gene;
use crate::metabolic_model::metabolite::Metabolite;
use crate::metabolic_model::reaction::Reaction;
use crate::utils::hashing::{calculate_hash, hash_annotation, hash_f64};

use indexmap::{IndexMap, IndexSet};
use thiserror::Error;

/// Represents a Genome Scale Metabolic Model
#[derive(Clone, Debug)]
pub struct Model {
    /// Map of reaction ids to Reaction Objects
    pub reactions: IndexMap<String, Reaction>,
    /// Map of gene ids to Gene Objects
    pub genes: IndexMap<String, Gene>,
    /// Map of metabolite ids to Metabolite Objects
    pub metabolites: IndexMap<String, Metabolite>,
    /// Id associated with the Model
    pub id: Option<String>,
    /// Compartments in the model
    ///
    /// An IndexMap<String, String> of {short name: long name}
    pub compartments: IndexMap<String, String>,
    /// Exchange reactions open for uptake, as {reaction id: maximum uptake}
    pub medium: IndexMap<String, f64>,
}

impl Model {
    pub fn new_empty() -> Self {
        Model {
            reactions: IndexMap::new(),
            genes: IndexMap::new(),
            metabolites: IndexMap::new(),
            id: None,
            compartments: IndexMap::new(),
            medium: IndexMap::new(),
        }
    }

    /// Add a reaction to the model
    ///
    /// # Parameters
    /// - reaction: Reaction to add
    ///
    /// # Examples
    /// ```rust
    /// use memors_core::metabolic_model::model::Model;
    /// use memors_core::metabolic_model::reaction::{Reaction, ReactionBuilder};
    /// let mut model = Model::new_empty();
    /// let new_reaction = ReactionBuilder::default().id("new_reaction".to_string()).build().unwrap();
    /// model.add_reaction(new_reaction);
    /// ```
    pub fn add_reaction(&mut self, reaction: Reaction) {
        let id = reaction.id.clone();
        self.reactions.insert(id, reaction);
    }

    /// Add a gene to the model
    ///
    /// # Parameters
    /// - gene: Gene to add
    ///
    /// # Examples
    /// ```rust
    /// use memors_core::metabolic_model::gene::GeneBuilder;
    /// use memors_core::metabolic_model::model::Model;
    /// let mut model=Model::new_empty();
    /// let new_gene = GeneBuilder::default().id("new_gene".to_string()).build().unwrap();
    /// model.add_gene(new_gene);
    /// ```
    pub fn add_gene(&mut self, gene: Gene) {
        let id = gene.id.clone();
        self.genes.insert(id, gene);
    }

    /// Add a metabolite to the model
    ///
    /// # Parameters
    /// - metabolite: Metabolite to add
    ///
    /// # Examples
    /// ```rust
    /// use memors_core::metabolic_model::metabolite::MetaboliteBuilder;
    /// use memors_core::metabolic_model::model::Model;
    /// let mut model = Model::new_empty();
    /// let atp = MetaboliteBuilder::default()
    ///     .id("atp_c".to_string())
    ///     .compartment(Some("c".to_string()))
    ///     .build()
    ///     .unwrap();
    /// model.add_metabolite(atp);
    /// ```
    pub fn add_metabolite(&mut self, metabolite: Metabolite) {
        let id = metabolite.id.clone();
        self.metabolites.insert(id, metabolite);
    }

    /// All compartment ids of the model
    ///
    /// Declared compartments come first, followed by compartments that are only referenced by
    /// metabolites, in the order they are first seen.
    pub fn compartment_ids(&self) -> IndexSet<&str> {
        let mut ids: IndexSet<&str> = self.compartments.keys().map(String::as_str).collect();
        ids.extend(
            self.metabolites
                .values()
                .filter_map(|met| met.compartment.as_deref()),
        );
        ids
    }

    /// Reactions which reference the metabolite with id `met_id`
    pub fn metabolite_reactions(&self, met_id: &str) -> Vec<&Reaction> {
        self.reactions
            .values()
            .filter(|rxn| rxn.metabolites.contains_key(met_id))
            .collect()
    }

    /// Compartments of the metabolites participating in `reaction`
    ///
    /// Metabolites that are missing from the model or have no compartment are ignored.
    pub fn reaction_compartments(&self, reaction: &Reaction) -> BTreeSet<&str> {
        reaction
            .metabolites
            .keys()
            .filter_map(|met_id| self.metabolites.get(met_id))
            .filter_map(|met| met.compartment.as_deref())
            .collect()
    }

    /// Stable hash of the model content relevant to the quality checks
    ///
    /// Covers ids, formulas, charges, compartments, stoichiometry, bounds, rules, names,
    /// annotations, and the medium.
    ///
    /// Two models with the same fingerprint are treated as the same model by caches.
    pub fn fingerprint(&self) -> u64 {
        calculate_hash(self)
    }
}

impl Hash for Model {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
        for met in self.metabolites.values() {
            met.hash(state);
            met.formula.hash(state);
            met.charge.hash(state);
            hash_annotation(&met.annotation, state);
        }
        for rxn in self.reactions.values() {
            rxn.id.hash(state);
            for (met_id, coef) in &rxn.metabolites {
                met_id.hash(state);
                hash_f64(*coef, state);
            }
            hash_f64(rxn.lower_bound, state);
            hash_f64(rxn.upper_bound, state);
            rxn.reversible.hash(state);
            rxn.gene_reaction_rule.hash(state);
            rxn.name.hash(state);
            hash_annotation(&rxn.annotation, state);
        }
        for gene in self.genes.values() {
            gene.hash(state);
        }
        for (compartment, name) in &self.compartments {
            compartment.hash(state);
            name.hash(state);
        }
        for (rxn_id, uptake) in &self.medium {
            rxn_id.hash(state);
            hash_f64(*uptake, state);
        }
    }
}

// region GPR Functionality
/// Representation of a Gene Protein Reaction Rule as an AST
#[derive(Clone, Debug, PartialEq)]
pub enum Gpr {
    /// Operation on two genes (see [`GprOperation`])
    Operation(GprOperation),
    /// A terminal gene Node, holding the gene id
    GeneNode(String),
}

impl Display for Gpr {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_string_id())
    }
}

impl Gpr {
    /// Create a new binary operation node
    pub fn new_binary_operation(
        left: Gpr,
        operator: GprOperatorType,
        right: Gpr,
    ) -> Result<Gpr, GprError> {
        let op = match operator {
            GprOperatorType::Or => GprOperation::Or {
                left: Box::new(left),
                right: Box::new(right),
            },
            GprOperatorType::And => GprOperation::And {
                left: Box::new(left),
                right: Box::new(right),
            },
            GprOperatorType::Not => return Err(GprError::InvalidBinaryOp),
        };
        Ok(Gpr::Operation(op))
    }

    /// Create a new unary operation node
    pub fn new_unary_operation(operator: GprOperatorType, operand: Gpr) -> Result<Gpr, GprError> {
        let op = match operator {
            GprOperatorType::Not => GprOperation::Not {
                val: Box::new(operand),
            },
            _ => return Err(GprError::InvalidUnaryOp),
        };
        Ok(Gpr::Operation(op))
    }

    /// Create a new gene node
    pub fn new_gene_node(gene: &str) -> Gpr {
        Gpr::GeneNode(gene.to_string())
    }

    /// Generate a GPR string with gene ids from the GPR AST
    pub fn to_string_id(&self) -> String {
        match self {
            Gpr::Operation(op) => match op {
                GprOperation::Or { left, right } => {
                    format!("({} or {})", left.to_string_id(), right.to_string_id())
                }
                GprOperation::And { left, right } => {
                    format!("({} and {})", left.to_string_id(), right.to_string_id())
                }
                GprOperation::Not { val } => {
                    format!("(not {})", val)
                }
            },
            Gpr::GeneNode(gene_ref) => gene_ref.to_string(),
        }
    }

    /// Ids of all the genes in the GPR
    pub fn genes(&self) -> BTreeSet<String> {
        let mut genes = BTreeSet::new();
        self.collect_genes(&mut genes);
        genes
    }

    fn collect_genes(&self, genes: &mut BTreeSet<String>) {
        match self {
            Gpr::Operation(GprOperation::Or { left, right })
            | Gpr::Operation(GprOperation::And { left, right }) => {
                left.collect_genes(genes);
                right.collect_genes(genes);
            }
            Gpr::Operation(GprOperation::Not { val }) => val.collect_genes(genes),
            Gpr::GeneNode(gene) => {
                genes.insert(gene.clone());
            }
        }
    }

    /// Size of the largest protein complex described by the GPR
    ///
    /// A chain of `and` operations describes one complex whose size is the number of distinct
    /// operands in the chain (an operand being a gene or a parenthesised sub-rule, such as
    /// alternative isoforms of one subunit). An `or` describes alternatives, so its size is
    /// the largest of its branches. `not` does not change the size.
    ///
    /// # Examples
    /// ```rust
    /// use memors_core::io::gpr_parse::parse_gpr;
    /// assert_eq!(parse_gpr("b0001 or b0002").unwrap().complex_size(), 1);
    /// assert_eq!(parse_gpr("b0001 and (b0002 or b0003)").unwrap().complex_size(), 2);
    /// assert_eq!(parse_gpr("(b0001 and b0002 and b0003) or b0004").unwrap().complex_size(), 3);
    /// ```
    pub fn complex_size(&self) -> usize {
        match self {
            Gpr::GeneNode(_) => 1,
            Gpr::Operation(GprOperation::Or { left, right }) => {
                left.complex_size().max(right.complex_size())
            }
            Gpr::Operation(GprOperation::Not { val }) => val.complex_size(),
            Gpr::Operation(GprOperation::And { .. }) => {
                let mut operands = Vec::new();
                self.collect_and_operands(&mut operands);
                let distinct: BTreeSet<String> =
                    operands.iter().map(|operand| operand.to_string_id()).collect();
                // A nested alternative may itself hold a larger complex
                let nested = operands
                    .iter()
                    .map(|operand| operand.complex_size())
                    .max()
                    .unwrap_or(0);
                distinct.len().max(nested)
            }
        }
    }

    /// Flatten a chain of `and` operations into its operands
    fn collect_and_operands<'a>(&'a self, operands: &mut Vec<&'a Gpr>) {
        match self {
            Gpr::Operation(GprOperation::And { left, right }) => {
                left.collect_and_operands(operands);
                right.collect_and_operands(operands);
            }
            other => operands.push(other),
        }
    }
}

/// Possible operations on genes
#[derive(Clone, Debug, PartialEq)]
pub enum GprOperation {
    Or { left: Box<Gpr>, right: Box<Gpr> },
    And { left: Box<Gpr>, right: Box<Gpr> },
    Not { val: Box<Gpr> },
}

/// Types of Allowed GPR Operations
pub enum GprOperatorType {
    /// Or, either the left or the right gene product catalyzes the reaction
    Or,
    /// And, the left and the right gene products are both required
    And,
    /// Not, the gene product must be absent
    Not,
}

#[derive(Clone, Debug, Error)]
pub enum GprError {
    #[error("Invalid Binary Operation")]
    InvalidBinaryOp,
    #[error("Invalid Unary Operation")]
    InvalidUnaryOp,
}

// endregion GPR Functionality

#[cfg(test)]
mod model_tests {
    use super::*;
    use crate::metabolic_model::metabolite::MetaboliteBuilder;
    use crate::metabolic_model::reaction::ReactionBuilder;

    fn setup_model() -> Model {
        let mut model = Model::new_empty();
        model
            .compartments
            .insert("c".to_string(), "cytosol".to_string());
        for (id, compartment) in [("glc__D_e", "e"), ("glc__D_c", "c"), ("g6p_c", "c")] {
            model.add_metabolite(
                MetaboliteBuilder::default()
                    .id(id.to_string())
                    .compartment(Some(compartment.to_string()))
                    .build()
                    .unwrap(),
            );
        }
        let mut transport = IndexMap::new();
        transport.insert("glc__D_e".to_string(), -1.);
        transport.insert("glc__D_c".to_string(), 1.);
        model.add_reaction(
            ReactionBuilder::default()
                .id("GLCt".to_string())
                .metabolites(transport)
                .build()
                .unwrap(),
        );
        let mut hexokinase = IndexMap::new();
        hexokinase.insert("glc__D_c".to_string(), -1.);
        hexokinase.insert("g6p_c".to_string(), 1.);
        model.add_reaction(
            ReactionBuilder::default()
                .id("HEX1".to_string())
                .metabolites(hexokinase)
                .build()
                .unwrap(),
        );
        model
    }

    #[test]
    fn compartment_ids() {
        let model = setup_model();
        let ids: Vec<&str> = model.compartment_ids().into_iter().collect();
        assert_eq!(ids, vec!["c", "e"]);
    }

    #[test]
    fn metabolite_reactions() {
        let model = setup_model();
        let ids: Vec<&str> = model
            .metabolite_reactions("glc__D_c")
            .iter()
            .map(|rxn| rxn.id.as_str())
            .collect();
        assert_eq!(ids, vec!["GLCt", "HEX1"]);
        assert!(model.metabolite_reactions("missing").is_empty());
    }

    #[test]
    fn reaction_compartments() {
        let model = setup_model();
        let transport = model.reactions.get("GLCt").unwrap();
        assert_eq!(
            model.reaction_compartments(transport),
            BTreeSet::from(["c", "e"])
        );
    }

    #[test]
    fn fingerprint() {
        let model = setup_model();
        assert_eq!(model.fingerprint(), setup_model().fingerprint());
        let mut changed = setup_model();
        changed.reactions.get_mut("HEX1").unwrap().upper_bound = 10.;
        assert_ne!(model.fingerprint(), changed.fingerprint());
    }

    #[test]
    fn fingerprint_follows_annotations() {
        use crate::metabolic_model::annotation::AnnotationValue;

        let model = setup_model();
        let mut sbo = setup_model();
        sbo.reactions.get_mut("HEX1").unwrap().annotation.insert(
            "sbo".to_string(),
            AnnotationValue::Single("SBO:0000629".to_string()),
        );
        assert_ne!(model.fingerprint(), sbo.fingerprint());

        let mut xref = setup_model();
        xref.metabolites.get_mut("g6p_c").unwrap().annotation.insert(
            "metanetx.chemical".to_string(),
            AnnotationValue::Single("MNXM160".to_string()),
        );
        assert_ne!(model.fingerprint(), xref.fingerprint());
        assert_ne!(sbo.fingerprint(), xref.fingerprint());
    }
}

#[cfg(test)]
mod gpr_tests {
    use super::*;
    use crate::io::gpr_parse::parse_gpr;

    #[test]
    fn display() {
        // Test single gene display
        let gene_node = Gpr::GeneNode("Gene1".to_string());
        assert_eq!(format!("{}", gene_node), "Gene1");

        // Test or gene display
        let gpr_or = Gpr::Operation(GprOperation::Or {
            left: Box::new(Gpr::new_gene_node("Gene1")),
            right: Box::new(Gpr::new_gene_node("Gene2")),
        });
        assert_eq!(format!("{}", gpr_or), "(Gene1 or Gene2)");

        // Note, because of how the display works, it will be very explicit with parenthesis
        // so an extra pair will be wrapped around the entire expression
        let gpr = parse_gpr("Rv0001 and Rv0002 or Rv0003").unwrap();
        assert_eq!(format!("{}", gpr), "((Rv0001 and Rv0002) or Rv0003)");

        let gpr = parse_gpr("(Rv0001 and not Rv0002) or not Rv0003").unwrap();
        assert_eq!(
            format!("{}", gpr),
            "((Rv0001 and (not Rv0002)) or (not Rv0003))"
        );
    }

    #[test]
    fn genes() {
        let gpr = parse_gpr("(Rv0001 and not Rv0002) or (Rv0003 and Rv0001)").unwrap();
        let expected: BTreeSet<String> = ["Rv0001", "Rv0002", "Rv0003"]
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(gpr.genes(), expected);
    }

    #[test]
    fn complex_size() {
        assert_eq!(parse_gpr("Rv0001").unwrap().complex_size(), 1);
        assert_eq!(parse_gpr("Rv0001 or Rv0002").unwrap().complex_size(), 1);
        assert_eq!(parse_gpr("Rv0001 and Rv0002").unwrap().complex_size(), 2);
        // A repeated gene is the same subunit
        assert_eq!(parse_gpr("Rv0001 and Rv0001").unwrap().complex_size(), 1);
        assert_eq!(
            parse_gpr("(Rv0001 and Rv0002) or (Rv0003 and Rv0004 and Rv0005)")
                .unwrap()
                .complex_size(),
            3
        );
        assert_eq!(
            parse_gpr("Rv0001 and (Rv0002 or (Rv0003 and Rv0004 and Rv0005))")
                .unwrap()
                .complex_size(),
            3
        );
    }

    #[test]
    fn invalid_operator_type() {
        let gene = Gpr::new_gene_node("Rv0001");
        assert!(Gpr::new_binary_operation(gene.clone(), GprOperatorType::Not, gene.clone()).is_err());
        assert!(Gpr::new_unary_operation(GprOperatorType::And, gene).is_err());
    }
}
