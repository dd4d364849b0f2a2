//! The clinic's sample data set.

use chrono::NaiveDate;
use petclinic_core::error::CoreError;
use petclinic_core::owner::Owner;
use petclinic_core::pet::Pet;
use petclinic_core::pet_type::{PetType, PetTypeFormatter};
use petclinic_core::ports::OwnerRepository;
use petclinic_core::types::{DbId, Entity};
use petclinic_core::vet::{Specialty, Vet};
use petclinic_core::visit::Visit;

use crate::memory::InMemoryStore;
use crate::owners::OwnerDirectory;

const PET_TYPES: &[&str] = &["cat", "dog", "lizard", "snake", "bird", "hamster"];

const VETS: &[(&str, &str, &[&str])] = &[
    ("James", "Carter", &[]),
    ("Helen", "Leary", &["radiology"]),
    ("Linda", "Douglas", &["surgery", "dentistry"]),
    ("Rafael", "Ortega", &["surgery"]),
    ("Henry", "Stevens", &["radiology"]),
    ("Sharon", "Jenkins", &[]),
];

const SPECIALTIES: &[&str] = &["radiology", "surgery", "dentistry"];

struct SampleOwner {
    first_name: &'static str,
    last_name: &'static str,
    address: &'static str,
    city: &'static str,
    telephone: &'static str,
    /// (name, type, birth date as y/m/d)
    pets: &'static [(&'static str, &'static str, (i32, u32, u32))],
}

const OWNERS: &[SampleOwner] = &[
    SampleOwner {
        first_name: "George",
        last_name: "Franklin",
        address: "110 W. Liberty St.",
        city: "Madison",
        telephone: "6085551023",
        pets: &[("Leo", "cat", (2010, 9, 7))],
    },
    SampleOwner {
        first_name: "Betty",
        last_name: "Davis",
        address: "638 Cardinal Ave.",
        city: "Sun Prairie",
        telephone: "6085551749",
        pets: &[("Basil", "hamster", (2012, 8, 6))],
    },
    SampleOwner {
        first_name: "Eduardo",
        last_name: "Rodriquez",
        address: "2693 Commerce St.",
        city: "McFarland",
        telephone: "6085558763",
        pets: &[("Rosy", "dog", (2011, 4, 17)), ("Jewel", "dog", (2010, 3, 7))],
    },
    SampleOwner {
        first_name: "Harold",
        last_name: "Davis",
        address: "563 Friendly St.",
        city: "Windsor",
        telephone: "6085553198",
        pets: &[("Iggy", "lizard", (2010, 11, 30))],
    },
    SampleOwner {
        first_name: "Peter",
        last_name: "McTavish",
        address: "2387 S. Fair Way",
        city: "Madison",
        telephone: "6085552765",
        pets: &[("George", "snake", (2010, 1, 20))],
    },
    SampleOwner {
        first_name: "Jean",
        last_name: "Coleman",
        address: "105 N. Lake St.",
        city: "Monona",
        telephone: "6085552654",
        pets: &[("Samantha", "cat", (2012, 9, 4)), ("Max", "cat", (2012, 9, 4))],
    },
    SampleOwner {
        first_name: "Jeff",
        last_name: "Black",
        address: "1450 Oak Blvd.",
        city: "Monona",
        telephone: "6085555387",
        pets: &[("Lucky", "bird", (2011, 8, 6))],
    },
    SampleOwner {
        first_name: "Maria",
        last_name: "Escobito",
        address: "345 Maple St.",
        city: "Madison",
        telephone: "6085557683",
        pets: &[("Mulligan", "dog", (2007, 2, 24))],
    },
    SampleOwner {
        first_name: "David",
        last_name: "Schroeder",
        address: "2749 Blackhawk Trail",
        city: "Madison",
        telephone: "6085559435",
        pets: &[("Freddy", "bird", (2010, 3, 9))],
    },
    SampleOwner {
        first_name: "Carlos",
        last_name: "Estaban",
        address: "2335 Independence La.",
        city: "Waunakee",
        telephone: "6085555487",
        pets: &[("Lucky", "dog", (2010, 6, 24)), ("Sly", "cat", (2012, 6, 8))],
    },
];

/// (owner last name, pet name, date y/m/d, description)
const VISITS: &[(&str, &str, (i32, u32, u32), &str)] = &[
    ("Coleman", "Samantha", (2013, 1, 1), "rabies shot"),
    ("Coleman", "Max", (2013, 1, 2), "rabies shot"),
    ("Coleman", "Max", (2013, 1, 3), "neutered"),
    ("Coleman", "Samantha", (2013, 1, 4), "spayed"),
];

fn date((y, m, d): (i32, u32, u32)) -> Result<NaiveDate, CoreError> {
    NaiveDate::from_ymd_opt(y, m, d)
        .ok_or_else(|| CoreError::Validation(format!("invalid sample date {y}-{m}-{d}")))
}

/// Load pet types, vets, owners with their pets, and visits into `store`.
pub fn seed(store: &mut InMemoryStore) -> Result<(), CoreError> {
    for name in PET_TYPES {
        store.add_pet_type(PetType::new(*name))?;
    }

    let specialties = SPECIALTIES
        .iter()
        .enumerate()
        .map(|(i, name)| Specialty::new(*name).with_id(i as DbId + 1))
        .collect::<Result<Vec<_>, _>>()?;
    for (first_name, last_name, skills) in VETS {
        let mut vet = Vet::new(*first_name, *last_name);
        for skill in skills.iter() {
            vet.add_specialty(specialty_named(&specialties, skill)?.clone());
        }
        store.add_vet(vet)?;
    }

    for sample in OWNERS {
        let mut owner = Owner::new();
        owner.set_first_name(sample.first_name);
        owner.set_last_name(sample.last_name);
        owner.set_address(sample.address);
        owner.set_city(sample.city);
        owner.set_telephone(sample.telephone);

        let formatter = PetTypeFormatter::new(&*store);
        for (name, type_name, born) in sample.pets {
            let mut pet = Pet::new(*name);
            pet.set_pet_type(Some(formatter.parse(type_name)?));
            pet.set_birth_date(Some(date(*born)?));
            owner.add_pet(pet);
        }
        OwnerDirectory::create_owner(&mut *store, owner)?;
    }

    for (last_name, pet_name, on, description) in VISITS {
        let owner = owner_by_last_name(store, last_name)?;
        let owner_id = owner.id().ok_or_else(|| {
            CoreError::InvalidArgument(format!("sample owner {last_name} was not saved"))
        })?;
        let pet_id = owner.pet_named_with(pet_name, true).and_then(|pet| pet.id());
        OwnerDirectory::book_visit(&mut *store, owner_id, pet_id, Some(Visit::on(date(*on)?, *description)))?;
    }

    let counts = store.counts();
    tracing::info!(
        owners = counts.owners,
        pets = counts.pets,
        visits = counts.visits,
        vets = counts.vets,
        pet_types = counts.pet_types,
        "Sample data loaded"
    );
    Ok(())
}

fn specialty_named<'a>(specialties: &'a [Specialty], name: &str) -> Result<&'a Specialty, CoreError> {
    specialties
        .iter()
        .find(|specialty| specialty.name() == name)
        .ok_or_else(|| CoreError::InvalidArgument(format!("unknown sample specialty {name}")))
}

fn owner_by_last_name(store: &InMemoryStore, last_name: &str) -> Result<Owner, CoreError> {
    store
        .find_by_last_name_prefix(last_name)?
        .into_iter()
        .find(|owner| owner.last_name() == last_name)
        .ok_or_else(|| CoreError::InvalidArgument(format!("no sample owner named {last_name}")))
}
