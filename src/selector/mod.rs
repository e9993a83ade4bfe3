//! Strategies selecting destroy/repair method indices for the LNS driver
//! (C6), plus the segment-based adaptive variant (C7).

mod alns;
mod types;
mod uniform;
mod weighted;

pub use alns::{ALNSMethodSelector, ALNSParameters, ScoreData};
pub use types::{MethodSelector, UpdateCase};
pub use uniform::UniformRandomMethodSelector;
pub use weighted::WeightedRandomMethodSelector;
