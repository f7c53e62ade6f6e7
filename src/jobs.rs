use std::str::FromStr;
use std::sync::Arc;

use chrono::{Local, Utc};
use tokio::task::JoinHandle;

use crate::error::{self, Context};
use crate::sec::authn::session;
use crate::state::ArcShared;

pub fn background(state: &ArcShared) -> error::Result<Vec<JoinHandle<()>>> {
    Ok(vec![
        session_sweep(Arc::clone(state))?,
    ])
}

// sec  min  hour  day of month  month  day of week
fn session_sweep(state: ArcShared) -> error::Result<JoinHandle<()>> {
    let schedule = cron::Schedule::from_str("0 0 * * * *")
        .context("failed to parse session sweep schedule")?;

    Ok(tokio::spawn(async move {
        let mut upcoming = schedule.upcoming_owned(Local);

        while let Some(next) = upcoming.next() {
            let wait = match (next - Local::now()).to_std() {
                Ok(wait) => wait,
                // the tick is already in the past
                Err(_err) => continue
            };

            tokio::time::sleep(wait).await;

            if let Err(err) = run_session_sweep(&state).await {
                tracing::error!("session sweep failed: {err}");
            }
        }
    }))
}

async fn run_session_sweep(state: &ArcShared) -> error::Result<()> {
    let conn = state.pool().get().await?;
    let now = Utc::now();

    let dropped = session::delete_expired(&conn, &now).await?;

    if dropped > 0 {
        tracing::info!("removed {dropped} expired sessions");
    }

    Ok(())
}
