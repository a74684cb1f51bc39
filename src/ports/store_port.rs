//! Results store port trait.

use crate::domain::epoch::RunBatch;
use crate::domain::error::HypermanagerError;
use crate::domain::schema::TableSchema;

pub trait StorePort {
    /// Destroy any existing store and create a fresh one laid out as
    /// `schema`. Destructive; callers gate this behind an explicit opt-in.
    fn initialize(&self, schema: &TableSchema) -> Result<(), HypermanagerError>;

    /// Append every record of `batch` within a single transaction: either
    /// the whole batch lands or none of it does.
    fn write_batch(
        &self,
        schema: &TableSchema,
        batch: &RunBatch,
    ) -> Result<(), HypermanagerError>;
}
