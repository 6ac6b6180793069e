use slt_core::{
    models::{CatalogSummary, Urgency},
    ports::{Application, Repository},
};
use tracing::{Level, event};

/// Classify the catalog against the application's current date and log the
/// result: one WARN event per warning message, then the bucket counts.
pub async fn sweep<T: Application + Sync>(
    app: &T,
) -> Result<CatalogSummary, <T::Repository as Repository>::Error> {
    let today = app.today();
    let (_, summary) = app.report(today).await?.into_parts();

    for warning in &summary.warnings {
        event!(Level::WARN, reference_date = %today, "{warning}");
    }
    event!(
        Level::INFO,
        reference_date = %today,
        expired_or_critical = summary.counts.get(Urgency::ExpiredOrCritical),
        warning = summary.counts.get(Urgency::Warning),
        ok = summary.counts.get(Urgency::Ok),
        "swept catalog"
    );

    Ok(summary)
}
