//! Record-keeping workflows for the clinic.
//!
//! Everything here drives the `petclinic-core` aggregate through its public
//! API: owner lookup and editing, pet registration, visit booking and the vet
//! list, plus an in-memory store and the sample data set.

pub mod config;
pub mod memory;
pub mod owners;
pub mod sample;
pub mod vets;
