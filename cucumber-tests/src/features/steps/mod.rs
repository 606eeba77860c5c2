pub mod owner_steps;
pub mod pet_steps;
pub mod vet_steps;
