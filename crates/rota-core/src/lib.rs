pub mod assign;
pub mod audit;
pub mod availability;
pub mod config;
pub mod counts;
pub mod error;
pub mod group;
pub mod io;
pub mod paths;
pub mod position;
pub mod strategy;

pub use assign::{assign, get_counts, reset_counts, Assignment, GroupCounts};
pub use config::Settings;
pub use error::{Result, RotaError};
