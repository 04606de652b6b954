//! Implements type resolution for IEC 61131-3 declarations.
//!
//! Two cooperating components operate over the declaration tree that the
//! `ferroplc-dsl` crate defines:
//!
//! * the type classifier and widening engine decides, for a type or a
//!   pair of operand types, family membership and the result type of
//!   time arithmetic (see `type_classifier` and `type_widening`),
//! * the parameter resolver enumerates the formal parameters of a
//!   callable declaration in canonical order, including the implicit
//!   `EN` and `ENO` parameters every callable has even when not written
//!   in source (see `param_iterator`).
//!
//! Absence (a type not in a family, no more parameters) is a normal
//! control value. Contract violations surface as `Diagnostic` values
//! with source provenance so that an embedding context can contain the
//! failure to one compilation unit.
#![allow(clippy::result_large_err)]

pub mod candidate_datatypes;
pub mod param_iterator;
pub mod result;
pub mod type_classifier;
pub mod type_widening;
