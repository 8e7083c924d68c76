// Rust Scheduler Library
// Temporal layout engine for calendar and resource scheduler views

pub mod models;
pub mod services;
pub mod utils;

pub use models::event::Event;
pub use models::key::Key;
pub use models::layout::ScheduleLayout;
pub use models::resource::{Resource, ResourceFields};
pub use models::settings::SchedulerSettings;
pub use models::ui::ViewConfig;
pub use services::router::{build_schedule_layout, LayoutRequest};
pub use services::scheduler::Scheduler;
