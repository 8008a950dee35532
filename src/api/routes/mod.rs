pub mod analysis;
pub mod champions;
pub mod health;
pub mod regions;
