pub mod amount;
pub mod engine;
pub mod model;
pub mod source;

pub use amount::{Amount, Rate};
pub use engine::{Engine, FeeSchedule, PipelineError};
pub use model::{HolderCategory, HolderId, Kind, Record};

use tracing::debug;

/// Run the whole pipeline for one input document: fetch, validate,
/// materialize, price.
///
/// This is effectively the binary's main, separated into the library so
/// the pipeline can be exercised by tests without spawning a process.
pub async fn run(path: &str, schedule: FeeSchedule) -> Result<Vec<String>, PipelineError> {
    let payload = source::fetch(path).await?;
    let values = source::validate(&payload)?;
    let records = source::materialize(values)?;
    debug!(records = records.len(), "record set materialized");

    let fees = Engine::new(schedule).process(&records);
    if fees.is_empty() {
        return Err(PipelineError::EmptyResult);
    }
    Ok(fees)
}
