pub mod analysis;
pub mod export;
pub mod rounds;
pub mod schedule;
pub mod snapshot;
pub mod standings;
pub mod state;
pub mod store;
pub mod views;
