//! Method-scheduling engine for metaheuristic optimization.
//!
//! Provides a generic [`scheduler::Scheduler`] that applies problem-supplied
//! operators to a candidate [`solution::Solution`], tracking statistics,
//! an incumbent, and termination — plus two derived driver strategies atop
//! it:
//!
//! - **GVNS** ([`gvns::GVNSDriver`]): variable neighborhood descent composed
//!   with a shaking loop.
//! - **LNS/ALNS** ([`lns::LNSDriver`]): destroy+repair with a Metropolis
//!   acceptance rule, geometric cooling, and a pluggable
//!   [`selector::MethodSelector`] (uniform, fixed-weight, or adaptive).
//!
//! # Usage
//!
//! Implement [`solution::Solution`] (and whichever of [`solution::VectorSolution`],
//! [`solution::BoolVectorSolution`], [`solution::PermutationSolution`], or
//! [`solution::SubsetVectorSolution`] fits your encoding), wrap your
//! operators as [`method::MHMethod`] records, and hand them to a driver.

pub mod error;
pub mod gvns;
pub mod lns;
pub mod method;
pub mod random;
pub mod scheduler;
pub mod selector;
pub mod solution;
