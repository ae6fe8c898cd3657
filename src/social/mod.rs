//! Tune-in social graph: directed follow relationships and crew counts

pub mod error;
pub mod manager;

pub use error::TuneInError;
pub use manager::TuneInManager;
