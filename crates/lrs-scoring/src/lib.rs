//! Scoring engine for the Life Resonance Schema (LRS) questionnaire.
//!
//! Answers are folded into per-schema totals by [`scoring::aggregate`], then
//! [`profile::assemble`] joins those totals with the schema catalog and any
//! external metadata to produce a ranked profile.

pub mod catalog;
pub mod config;
pub mod error;
pub mod profile;
pub mod scoring;
pub mod tables;
pub mod telemetry;
