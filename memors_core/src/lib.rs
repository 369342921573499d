//! Core rust implementation of memo.rs, a crate for assessing the quality of genome scale
//! metabolic models.

pub mod configuration;
pub mod io;
pub mod metabolic_model;
pub mod support;
mod utils;
