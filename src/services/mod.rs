// Service module exports
// Layout engines, their orchestration, and the stateful pieces around them

pub mod grid;
pub mod indicator;
pub mod layout;
pub mod router;
pub mod scheduler;
pub mod settings;
pub mod timezone;
