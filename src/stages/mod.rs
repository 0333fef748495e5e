//! The five pipeline stage contracts.
//!
//! Oracle-backed stages are generic over [`crate::io::oracle::Oracle`] so
//! tests drive them with scripted responses instead of a live backend.

pub mod critic;
pub mod executor;
pub mod generator;
pub mod summarizer;
