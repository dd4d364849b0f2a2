//! Veterinary clinic domain: owners, pets, visits, pet types and vets.
//!
//! Pure in-memory rules with no I/O. Storage and reference-data lookups are
//! reached through the traits in [`ports`].

pub mod error;
pub mod owner;
pub mod pet;
pub mod pet_type;
pub mod ports;
pub mod types;
pub mod validation;
pub mod vet;
pub mod visit;
