use petclinic_core::error::CoreError;
use petclinic_core::ports::VetRepository;
use petclinic_core::vet::Vet;

pub struct VetDirectory;

impl VetDirectory {
    /// All vets, ordered by last name then first name.
    pub fn list_vets<R>(repo: &R) -> Result<Vec<Vet>, CoreError>
    where
        R: VetRepository + ?Sized,
    {
        let mut vets = repo.find_all()?;
        vets.sort_by(|a, b| {
            a.last_name()
                .cmp(b.last_name())
                .then_with(|| a.first_name().cmp(b.first_name()))
        });
        tracing::debug!(count = vets.len(), "Listed vets");
        Ok(vets)
    }
}
