pub mod controller;
pub mod export;
pub mod format;
pub mod number;
pub mod stats;

pub use controller::{
    InteractionController, KeyInput, KeyOutcome, Modifiers, PointerOutcome, COPY_FEEDBACK_DURATION,
};
pub use export::to_tsv;
pub use format::{format_number, NumberLocale};
pub use number::{parse_number, ParseMode};
pub use stats::{aggregate, classify, SelectionStats, StatsDisplay, StatsResult};
