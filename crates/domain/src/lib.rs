//! # gradebook-domain
//!
//! Pure domain model for the gradebook service.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers and error conventions
//! - Define **Grades** (a student name paired with a grade, identified by a
//!   store-allocated integer id)
//! - Define **Drafts** (unvalidated client input for create and update)
//! - Contain all invariant enforcement
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;

pub mod grade;
