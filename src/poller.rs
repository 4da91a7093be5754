use std::{sync::Arc, time::Duration};

use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::mygate_client::MygateClient;

/// Periodic account-status observer.
///
/// Purely observational: failures are retried by the client's own schedule
/// and otherwise swallowed, and nothing here touches session state.
pub struct StatusPoller {
    client: Arc<MygateClient>,
    interval: Duration,
    session_count: usize,
}

impl StatusPoller {
    pub fn new(client: Arc<MygateClient>, interval: Duration, session_count: usize) -> Self {
        Self {
            client,
            interval,
            session_count,
        }
    }

    /// Spawn the poller as a detached task.
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(async move { self.run().await })
    }

    async fn run(self) {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        // The first tick completes immediately; the orchestrator already
        // logged startup status, so skip it.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            report_status(&self.client, self.session_count).await;
        }
    }
}

/// Fetch and log the account's status alongside its attributed session count.
pub(crate) async fn report_status(client: &MygateClient, session_count: usize) {
    match client.user_info().await {
        Ok(user) => info!(
            account = %client.token(),
            name = %user.name,
            status = %user.status,
            points = ?user.current_point,
            sessions = session_count,
            "account status"
        ),
        Err(err) => warn!(account = %client.token(), %err, "status poll failed"),
    }
}
