//! Strategy enumeration.
//!
//! - `combinations`: which index tuples are structurally valid per family
//! - `metrics`: payoff metric rules shared by the families
//! - `builder`: legs, entry cash flow and scenario pricing per family

pub mod builder;
pub mod combinations;
pub mod metrics;

pub use builder::StrategyBuilder;
pub use combinations::{butterfly_triples, has_equal_wings, pairs, quadruples, triples, WING_TOLERANCE};
pub use metrics::{GainScenario, Metrics};
