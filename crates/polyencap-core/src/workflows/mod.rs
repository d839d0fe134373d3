//! # Workflows Module
//!
//! Top-level entry points that run a complete analysis from parsed point clouds to an
//! aggregated report.
//!
//! - **Encapsulation Workflow** ([`encapsulation`]) - Builds the polymer's alpha shape,
//!   classifies every drug against it and sweeps the inclusion threshold.

pub mod encapsulation;
