//! Round lifecycle: questions, picks, verdicts, timed advance

pub mod engine;
pub mod picker;
pub mod selection;
pub mod timer;

pub use engine::{PickOutcome, Round, RoundEngine, Verdict};
pub use picker::{RandomPicker, RecipePicker, ScriptedPicker};
pub use selection::{Selection, SLOTS};
pub use timer::{AdvanceAction, PendingAdvance};
