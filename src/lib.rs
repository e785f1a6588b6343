//! Meshdof
//!
//! Degree-of-freedom index maps for finite element assembly: a mapping
//! from `(mesh item, component)` pairs to unique global indices, with
//! component-major or location-major numbering, subset derivation and
//! the grouped index queries needed by matrix assemblers.
#![cfg_attr(feature = "strict", deny(warnings))]
#![warn(missing_docs)]

pub mod dofmap;
pub mod mesh_subset;
pub mod types;
