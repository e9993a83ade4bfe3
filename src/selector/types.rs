//! Method-selector contract (C6) and the outcome classification LNS feeds
//! back to it after every destroy+repair application.

use rand::RngCore;

/// Classification of one destroy+repair outcome, fed to
/// [`MethodSelector::update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateCase {
    /// Strict improvement over the best-seen incumbent.
    BetterThanIncumbent,
    /// Strict improvement over the current working solution, but not over
    /// the incumbent.
    BetterThanCurrent,
    /// Strictly worse, accepted by the Metropolis test.
    AcceptedAlthoughWorse,
    /// Neither an improvement nor accepted; the candidate is discarded.
    Rejected,
}

/// Strategy selecting which destroy or repair method the LNS driver applies
/// next (C6). `candidates` holds absolute method indices (into the
/// driver's destroy or repair list, per `is_destroy`); implementors return
/// one of them.
pub trait MethodSelector {
    /// Called once before the LNS loop starts.
    fn init_method_selector(&mut self, iteration: u64);

    fn select_method(&mut self, candidates: &[usize], is_destroy: bool, rng: &mut dyn RngCore) -> usize;

    /// Called after every destroy+repair iteration.
    fn update_method_selector(&mut self, destroy_idx: usize, repair_idx: usize, case: UpdateCase, iteration: u64);
}
