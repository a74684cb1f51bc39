//! Results artifact access port trait.

use crate::domain::epoch::EpochEntry;
use crate::domain::error::HypermanagerError;

pub trait ResultsPort {
    /// Load the epoch entries produced by the most recent optimizer run.
    fn load_epochs(&self) -> Result<Vec<EpochEntry>, HypermanagerError>;
}
