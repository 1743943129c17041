//! Pipeline entry points for notifier runs.
//!
//! - `run_calendar`: Classify the academic calendar and send a digest
//! - `run_board`: Announce new notice board posts

pub mod board;
pub mod calendar;
pub mod diff;

pub use board::{BoardOutcome, process_board, run_board};
pub use calendar::{CalendarOutcome, process_calendar, run_calendar};
pub use diff::{DiffOutcome, PostDiffEngine, calculate_diff};
