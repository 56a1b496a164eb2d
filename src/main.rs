use anyhow::{Context, Result};
use log::{error, info};
use aquaprediksi::initialization::init;
use aquaprediksi::worker::{run, JobOutcome};

fn main() -> Result<()> {
    let mgr = init().context("initialization failed")?;

    match run(&mgr) {
        Ok(JobOutcome::Decided { decision, reason, forecasts_saved }) => {
            info!("Irrigation decision: {} ({}), {} forecast points saved", decision, reason, forecasts_saved);
        },
        Ok(JobOutcome::FetchFailed { reason }) => {
            info!("No forecast available, error decision recorded: {}", reason);
        },
        Err(e) => {
            error!("Job aborted: {}", e);
            return Err(e).context("job aborted");
        },
    }

    Ok(())
}
