pub mod calendar;
pub mod holidays;
pub mod pool;
pub mod settings;

pub use pool::{create_pool, run_migrations};
