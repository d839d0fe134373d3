//! # Engine Module
//!
//! Turns geometric classifications into the encapsulation analysis.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Analysis parameters and their validation
//! - **Aggregation** ([`aggregate`]) - The inclusion-threshold sweep producing the
//!   encapsulation efficiency curve
//! - **Rendering** ([`render`]) - A pure description of what a plot of one threshold shows
//! - **Progress Monitoring** ([`progress`]) - Progress events for front ends
//! - **Error Handling** ([`error`]) - Engine-specific error types
//!
//! Nothing in the engine touches raw polymer geometry: it only consumes the
//! [`BoundarySurface`](crate::core::models::surface::BoundarySurface) and
//! [`ContainmentResult`](crate::core::models::containment::ContainmentResult) values
//! produced by [`crate::core::geometry`].

pub mod aggregate;
pub mod config;
pub mod error;
pub mod progress;
pub mod render;
