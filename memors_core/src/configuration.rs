use std::sync::{LazyLock, RwLock};

pub static CONFIGURATION: LazyLock<RwLock<Configuration>> =
    LazyLock::new(|| RwLock::new(Configuration::default()));

/// Defaults used when a model does not provide the information itself
#[derive(Clone, Debug)]
pub struct Configuration {
    /// Lower bound given to reactions built without one, and the fallback global lower bound
    pub lower_bound: f64,
    /// Upper bound given to reactions built without one, and the fallback global upper bound
    pub upper_bound: f64,
    /// Conventional id of the main (cytosolic) compartment
    pub main_compartment: String,
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration {
            lower_bound: -1000.,
            upper_bound: 1000.,
            main_compartment: "c".to_string(),
        }
    }
}

/// Get a snapshot of the current configuration
pub fn current() -> Configuration {
    match CONFIGURATION.read() {
        Ok(config) => config.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    }
}

pub(crate) fn default_lower_bound() -> f64 {
    current().lower_bound
}

pub(crate) fn default_upper_bound() -> f64 {
    current().upper_bound
}
