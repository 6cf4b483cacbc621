//! Operations exposed to the presentation layer.

pub mod progress;
pub mod stats;
pub mod storage;
pub mod study;

pub use progress::{
    complete_day, current_day, export_progress, mark_slides_seen, reset_progress,
    slide_progress, slides_seen, unlocked_day,
};
pub use stats::compute_stats;
pub use storage::{get_from_storage, remove_from_storage, set_to_storage, storage_info};
pub use study::{mistakes_for_day, record_mistake, submit_answer, validate_input};
