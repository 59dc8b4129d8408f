pub mod answers;
mod assign;
pub mod constants;
pub mod layout;
mod metrics;
mod options;
pub mod pool;
mod session;
mod stats;
mod types;

pub use answers::{AnswerBook, AnswerEntry, AnswerSheet, answer_key};
pub use assign::{PageAssignment, assign_pages, layout_kind_for};
pub use layout::{LayoutKind, Page, PageMap, PlacementSlot, Rect, resolve};
pub use metrics::*;
pub use options::*;
pub use pool::{
    PoolSummary, QuestionFile, SelectionRequest, UsedPool, scan_pool, select_questions,
};
pub use session::{PlanningSession, SessionState, plan_pages};
pub use stats::{PlanStatistics, calculate_statistics};
pub use types::*;
