pub mod constants;
pub mod shared_roulette;
pub mod roulette_session;
