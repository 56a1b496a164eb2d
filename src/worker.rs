use chrono::{Local, NaiveDateTime};
use log::{error, info};
use crate::decision::decide;
use crate::errors::JobError;
use crate::initialization::Mgr;
use crate::manager_bmkg::ForecastSource;
use crate::manager_storage::Store;
use crate::models::decision::Decision;

/// Reason recorded when no forecast could be retrieved
pub const FETCH_FAILED_REASON: &str = "failed to fetch data from API";

/// How a completed job run ended
#[derive(Debug, PartialEq)]
pub enum JobOutcome {
    Decided {
        decision: Decision,
        reason: String,
        forecasts_saved: usize,
    },
    FetchFailed {
        reason: String,
    },
}

/// Runs one job with the current local time as reference
///
/// # Arguments
///
/// * 'mgr' - the components to run the job with
pub fn run(mgr: &Mgr) -> Result<JobOutcome, JobError> {
    run_job(&mgr.bmkg, &mgr.store, Local::now().naive_local())
}

/// Runs one job: fetch forecast, save it, decide and save the decision.
///
/// A forecast that can't be retrieved is not an error, an Error decision is saved instead
/// and no forecast is. A forecast with broken times or numbers, missing values within the
/// decision window or a failing schema setup or write aborts the run.
///
/// # Arguments
///
/// * 'source' - where to get forecast points from
/// * 'store' - where to save forecasts and decisions
/// * 'now' - local time used as fetch time, decision window reference and decision time
pub fn run_job<S: ForecastSource>(source: &S, store: &Store, now: NaiveDateTime) -> Result<JobOutcome, JobError> {
    print_msg("Starting job");

    store.init_schema()?;

    let outcome = match source.get_forecast() {
        Ok(points) => {
            let forecasts_saved = store.save_forecast_batch(&points, now)?;
            let (decision, reason) = decide(&points, now)?;
            store.save_decision(decision, &reason, now)?;

            JobOutcome::Decided { decision, reason, forecasts_saved }
        },

        Err(e) if e.is_recoverable() => {
            error!("Failed to fetch forecast, job stopped: {}", e);
            store.save_decision(Decision::Error, FETCH_FAILED_REASON, now)?;

            JobOutcome::FetchFailed { reason: e.to_string() }
        },

        Err(e) => return Err(e.into()),
    };

    print_msg("Job done");
    Ok(outcome)
}

/// Logs a caption line stamped with the current time
///
/// # Arguments
///
/// * 'caption' - the caption to log
fn print_msg(caption: &str) {
    let report_time = format!("{}", Local::now().format("%Y-%m-%d %H:%M:%S"));
    let caption = format!("{} {} ", report_time, caption);

    info!("{:=<60}", caption);
}
