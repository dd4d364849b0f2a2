//! In-memory store implementing the domain's collaborator traits.
//!
//! Hands out ids from per-entity sequences starting at 1, the way a
//! `BIGSERIAL` column would, and returns aggregates by value.

use std::collections::BTreeMap;

use petclinic_core::error::CoreError;
use petclinic_core::owner::{EntityKind, Owner};
use petclinic_core::pet_type::PetType;
use petclinic_core::ports::{OwnerRepository, PetTypeLookup, VetRepository};
use petclinic_core::types::{DbId, Entity};
use petclinic_core::vet::Vet;

/// Next id per entity table.
#[derive(Debug, Clone)]
struct Sequences {
    owner: DbId,
    pet: DbId,
    visit: DbId,
    pet_type: DbId,
    vet: DbId,
}

impl Default for Sequences {
    fn default() -> Self {
        Self {
            owner: 1,
            pet: 1,
            visit: 1,
            pet_type: 1,
            vet: 1,
        }
    }
}

impl Sequences {
    fn slot(&mut self, kind: EntityKind) -> &mut DbId {
        match kind {
            EntityKind::Owner => &mut self.owner,
            EntityKind::Pet => &mut self.pet,
            EntityKind::Visit => &mut self.visit,
        }
    }

    fn next(&mut self, kind: EntityKind) -> Result<DbId, CoreError> {
        take_next(self.slot(kind))
    }

    /// Keep the sequence ahead of ids that arrived already assigned.
    fn observe(&mut self, kind: EntityKind, id: Option<DbId>) -> Result<(), CoreError> {
        if let Some(id) = id {
            let slot = self.slot(kind);
            *slot = (*slot).max(successor(id)?);
        }
        Ok(())
    }
}

fn successor(id: DbId) -> Result<DbId, CoreError> {
    id.checked_add(1).ok_or_else(|| {
        CoreError::Conflict(format!("Identifier sequence exhausted after {id}"))
    })
}

/// Hand out the slot's current value and advance it.
fn take_next(slot: &mut DbId) -> Result<DbId, CoreError> {
    let id = *slot;
    *slot = successor(id)?;
    Ok(id)
}

/// Row counts, for start-up summaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StoreCounts {
    pub owners: usize,
    pub pets: usize,
    pub visits: usize,
    pub pet_types: usize,
    pub vets: usize,
}

#[derive(Debug, Default)]
pub struct InMemoryStore {
    owners: BTreeMap<DbId, Owner>,
    pet_types: Vec<PetType>,
    vets: Vec<Vet>,
    sequences: Sequences,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a pet type, assigning it the next id.
    pub fn add_pet_type(&mut self, mut pet_type: PetType) -> Result<PetType, CoreError> {
        if pet_type.is_new() {
            pet_type.assign_id(take_next(&mut self.sequences.pet_type)?)?;
        }
        self.pet_types.push(pet_type.clone());
        Ok(pet_type)
    }

    /// Register a vet, assigning it the next id.
    pub fn add_vet(&mut self, mut vet: Vet) -> Result<Vet, CoreError> {
        if vet.is_new() {
            vet.assign_id(take_next(&mut self.sequences.vet)?)?;
        }
        self.vets.push(vet.clone());
        Ok(vet)
    }

    pub fn counts(&self) -> StoreCounts {
        let pets = self.owners.values().map(|owner| owner.pets().len()).sum();
        let visits = self
            .owners
            .values()
            .flat_map(|owner| owner.pets())
            .map(|pet| pet.visits().len())
            .sum();
        StoreCounts {
            owners: self.owners.len(),
            pets,
            visits,
            pet_types: self.pet_types.len(),
            vets: self.vets.len(),
        }
    }
}

impl OwnerRepository for InMemoryStore {
    fn find_by_id(&self, id: DbId) -> Result<Option<Owner>, CoreError> {
        Ok(self.owners.get(&id).cloned())
    }

    fn find_by_last_name_prefix(&self, prefix: &str) -> Result<Vec<Owner>, CoreError> {
        Ok(self
            .owners
            .values()
            .filter(|owner| owner.last_name().starts_with(prefix))
            .cloned()
            .collect())
    }

    fn save(&mut self, owner: &mut Owner) -> Result<(), CoreError> {
        let sequences = &mut self.sequences;
        sequences.observe(EntityKind::Owner, owner.id())?;
        for pet in owner.pets() {
            sequences.observe(EntityKind::Pet, pet.id())?;
            for visit in pet.visits() {
                sequences.observe(EntityKind::Visit, visit.id())?;
            }
        }
        owner.assign_ids(|kind| sequences.next(kind))?;

        let id = owner.id().ok_or_else(|| {
            CoreError::InvalidArgument("Owner has no identifier after save".to_string())
        })?;
        tracing::debug!(owner_id = id, pets = owner.pets().len(), "Owner saved");
        self.owners.insert(id, owner.clone());
        Ok(())
    }
}

impl PetTypeLookup for InMemoryStore {
    fn find_pet_types(&self) -> Vec<PetType> {
        self.pet_types.clone()
    }
}

impl VetRepository for InMemoryStore {
    fn find_all(&self) -> Result<Vec<Vet>, CoreError> {
        Ok(self.vets.clone())
    }
}
