//! Classify reactions by their flux bounds relative to the bounds most common in the model
use itertools::Itertools;
use ordered_float::OrderedFloat;

use crate::configuration;
use crate::metabolic_model::model::Model;
use crate::metabolic_model::reaction::Reaction;

/// Position of a reaction's bounds relative to the global bounds of a model
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BoundClass {
    /// At least as open as the global bounds on both sides
    Unconstrained,
    /// Both bounds are zero, the reaction is blocked
    ZeroConstrained,
    /// One bound lies strictly between zero and the global bound on its side
    NonZeroConstrained,
    /// Anything else, e.g. bounds forcing a minimum flux
    Custom,
}

/// Find the most common lower and upper bound of the model's reactions
///
/// The mode of each side is taken independently. When several values are equally common the
/// most open one wins (the smallest lower bound, the largest upper bound). A model without
/// reactions gives the configured default bounds.
///
/// # Returns
/// `(global_lower, global_upper)`
pub fn find_bounds(model: &Model) -> (f64, f64) {
    if model.reactions.is_empty() {
        let config = configuration::current();
        return (config.lower_bound, config.upper_bound);
    }
    let lower_counts = model
        .reactions
        .values()
        .map(|rxn| OrderedFloat(rxn.lower_bound))
        .counts();
    let upper_counts = model
        .reactions
        .values()
        .map(|rxn| OrderedFloat(rxn.upper_bound))
        .counts();
    // Ties go to the smaller lower bound, and the larger upper bound
    let global_lower = lower_counts
        .into_iter()
        .max_by_key(|(value, count)| (*count, -*value))
        .map(|(value, _)| value.into_inner());
    let global_upper = upper_counts
        .into_iter()
        .max_by_key(|(value, count)| (*count, *value))
        .map(|(value, _)| value.into_inner());
    match (global_lower, global_upper) {
        (Some(lower), Some(upper)) => (lower, upper),
        _ => {
            let config = configuration::current();
            (config.lower_bound, config.upper_bound)
        }
    }
}

/// Classify the bounds of `rxn` against the global bounds `(global_lower, global_upper)`
///
/// Every reaction falls in exactly one class, the classes are checked in declaration order.
pub fn classify_bounds(rxn: &Reaction, (global_lower, global_upper): (f64, f64)) -> BoundClass {
    if is_unconstrained(rxn, global_lower, global_upper) {
        BoundClass::Unconstrained
    } else if is_zero_constrained(rxn) {
        BoundClass::ZeroConstrained
    } else if is_nonzero_constrained(rxn, global_lower, global_upper) {
        BoundClass::NonZeroConstrained
    } else {
        BoundClass::Custom
    }
}

fn is_unconstrained(rxn: &Reaction, global_lower: f64, global_upper: f64) -> bool {
    rxn.lower_bound <= global_lower && rxn.upper_bound >= global_upper
}

fn is_zero_constrained(rxn: &Reaction) -> bool {
    rxn.lower_bound == 0. && rxn.upper_bound == 0.
}

fn is_nonzero_constrained(rxn: &Reaction, global_lower: f64, global_upper: f64) -> bool {
    (0. > rxn.lower_bound && rxn.lower_bound > global_lower)
        || (0. < rxn.upper_bound && rxn.upper_bound < global_upper)
}

/// Find the reactions whose bounds are at least as open as the global bounds
pub fn find_unconstrained_reactions(model: &Model) -> Vec<String> {
    let (global_lower, global_upper) = find_bounds(model);
    model
        .reactions
        .values()
        .filter(|rxn| is_unconstrained(rxn, global_lower, global_upper))
        .map(|rxn| rxn.id.clone())
        .collect()
}

/// Find the reactions with both bounds set to zero
pub fn find_zero_constrained_reactions(model: &Model) -> Vec<String> {
    model
        .reactions
        .values()
        .filter(|rxn| is_zero_constrained(rxn))
        .map(|rxn| rxn.id.clone())
        .collect()
}

/// Find the reactions with a bound strictly between zero and the global bound of its side
pub fn find_nonzero_constrained_reactions(model: &Model) -> Vec<String> {
    let (global_lower, global_upper) = find_bounds(model);
    model
        .reactions
        .values()
        .filter(|rxn| is_nonzero_constrained(rxn, global_lower, global_upper))
        .map(|rxn| rxn.id.clone())
        .collect()
}

/// Check whether the flux range of `rxn` is narrower than the global bounds allow
///
/// Reversible reactions are compared against both global bounds. Irreversible reactions have
/// a lower bound of zero by convention, so only a positive lower bound or an upper bound below
/// the global one counts.
pub fn is_constrained_reaction(model: &Model, rxn: &Reaction) -> bool {
    is_constrained_within(rxn, find_bounds(model))
}

/// Same as [`is_constrained_reaction`] with precomputed global bounds
pub fn is_constrained_within(rxn: &Reaction, (global_lower, global_upper): (f64, f64)) -> bool {
    if rxn.reversibility() {
        rxn.lower_bound > global_lower || rxn.upper_bound < global_upper
    } else {
        rxn.lower_bound > 0. || rxn.upper_bound < global_upper
    }
}

/// Find the reactions which are not reversible
pub fn find_irreversible_reactions(model: &Model) -> Vec<String> {
    model
        .reactions
        .values()
        .filter(|rxn| !rxn.reversibility())
        .map(|rxn| rxn.id.clone())
        .collect()
}
