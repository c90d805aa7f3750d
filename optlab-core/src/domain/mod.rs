//! Domain types for OptLab

pub mod candidate;
pub mod family;
pub mod ladder;
pub mod leg;
pub mod market;

pub use candidate::{format_strike, Bound, Candidate, EntryKind, ScenarioOutcome};
pub use family::{FamilyParseError, StrategyFamily};
pub use ladder::{StrikeLadder, StrikeQuote};
pub use leg::{Leg, OptionType, Side};
pub use market::{InputError, MarketInputs};
