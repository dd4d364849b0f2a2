//! `petclinic` -- loads the clinic records and reports what is on file.
//!
//! # Environment variables
//!
//! | Variable                     | Required | Default | Description                       |
//! |------------------------------|----------|---------|-----------------------------------|
//! | `PETCLINIC_SEED_SAMPLE_DATA` | no       | `true`  | Load the sample clinic on start   |
//! | `LOG_FORMAT`                 | no       | `plain` | `plain` or `json`                 |
//! | `RUST_LOG`                   | no       | `petclinic_records=info` | Log filter       |

use petclinic_core::ports::PetTypeLookup;
use petclinic_records::config::{ClinicConfig, LogFormat};
use petclinic_records::memory::InMemoryStore;
use petclinic_records::owners::{OwnerDirectory, OwnerSearch};
use petclinic_records::sample;
use petclinic_records::vets::VetDirectory;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = ClinicConfig::from_env()?;
    let json = config.log_format == LogFormat::Json;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "petclinic_records=info,petclinic=info".into()),
        )
        .with(json.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!json).then(|| tracing_subscriber::fmt::layer()))
        .init();

    let mut store = InMemoryStore::new();
    if config.seed_sample_data {
        sample::seed(&mut store)?;
    } else {
        tracing::info!("Sample data disabled; starting with an empty clinic");
    }

    let owners = match OwnerDirectory::search_by_last_name(&store, None)? {
        OwnerSearch::NoMatch => 0,
        OwnerSearch::Single(_) => 1,
        OwnerSearch::Multiple(owners) => owners.len(),
    };
    let vets = VetDirectory::list_vets(&store)?;
    let pet_types = store.find_pet_types();

    tracing::info!(
        owners,
        vets = vets.len(),
        pet_types = pet_types.len(),
        "Clinic records ready"
    );
    for vet in &vets {
        let specialties: Vec<&str> = vet.specialties().iter().map(|s| s.name()).collect();
        tracing::info!(
            vet = %format!("{} {}", vet.first_name(), vet.last_name()),
            specialties = %specialties.join(", "),
            "Vet on staff"
        );
    }

    Ok(())
}
