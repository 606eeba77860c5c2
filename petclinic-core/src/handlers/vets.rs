//! Veterinarian listing
//!
//! One producer; the server presents it through
//! [`Representation::vets`](crate::view::Representation::vets).

use super::Clinic;
use crate::model::Vets;
use crate::Result;

pub async fn vet_list(clinic: &Clinic) -> Result<Vets> {
    let vet_list = clinic.vets.find_all().await?;
    Ok(Vets { vet_list })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_lists_every_vet() {
        let vets = vet_list(&Clinic::in_memory(false)).await.unwrap();
        assert_eq!(vets.vet_list.len(), 6);
    }
}
