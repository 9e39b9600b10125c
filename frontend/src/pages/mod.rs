pub mod missions;
pub mod not_found;
