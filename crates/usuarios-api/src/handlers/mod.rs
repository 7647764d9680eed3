pub mod health;
pub mod usuarios;
