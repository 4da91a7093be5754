use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::{
    config::KeeperConfig,
    mygate_client::{MygateClient, RetryPolicy},
    poller::{report_status, StatusPoller},
    types::{ProxyAddr, Token},
    ws_client::{NodeSession, SessionConfig, SessionHandle},
};

/// Brings every account's sessions live, then steps aside.
///
/// Each account is processed once, in input order: proxy assignment,
/// node lookup with registration fallback, onboarding confirmation, one
/// status poller, one session per node. A terminal failure on one account
/// never aborts the loop over the rest.
pub struct Orchestrator {
    config: KeeperConfig,
    tokens: Vec<Token>,
    proxies: Vec<ProxyAddr>,
}

/// Everything the orchestrator left running.
pub struct RunningKeeper {
    pub tasks: Vec<JoinHandle<()>>,
    pub sessions: Vec<SessionHandle>,
}

impl Orchestrator {
    pub fn new(config: KeeperConfig, tokens: Vec<Token>, proxies: Vec<ProxyAddr>) -> Self {
        Self {
            config,
            tokens,
            proxies,
        }
    }

    /// Round-robin proxy for the `index`-th account; `None` when no proxies
    /// were supplied.
    fn proxy_for(proxies: &[ProxyAddr], index: usize) -> Option<&ProxyAddr> {
        if proxies.is_empty() {
            None
        } else {
            Some(&proxies[index % proxies.len()])
        }
    }

    pub async fn run(self) -> RunningKeeper {
        let mut tasks = Vec::new();
        let mut sessions: Vec<SessionHandle> = Vec::new();

        let retry = RetryPolicy {
            max_retries: self.config.max_retries,
            delay: self.config.retry_delay(),
        };
        let session_config = SessionConfig {
            settle_delay: self.config.settle_delay(),
            reconnect_delay: self.config.reconnect_delay(),
            refresh_interval: self.config.refresh_interval(),
        };

        for (index, token) in self.tokens.iter().enumerate() {
            let proxy = Self::proxy_for(&self.proxies, index);
            info!(
                account = %token,
                proxy = %proxy.map(ProxyAddr::as_str).unwrap_or("none"),
                "processing account"
            );

            let client = match MygateClient::new(
                &self.config.api_base,
                token.clone(),
                proxy,
                self.config.referral_code.clone(),
                self.config.request_timeout(),
                retry.clone(),
            ) {
                Ok(client) => Arc::new(client),
                Err(err) => {
                    error!(account = %token, %err, "failed to build client, skipping account");
                    continue;
                }
            };

            let node_ids = match client.list_nodes().await {
                Ok(ids) => ids,
                Err(err) => {
                    warn!(account = %token, %err, "node lookup failed");
                    Vec::new()
                }
            };
            let node_ids = if node_ids.is_empty() {
                info!(account = %token, "no registered nodes, registering one");
                match client.register_node().await {
                    Ok(id) => vec![id],
                    Err(err) => {
                        error!(
                            account = %token,
                            %err,
                            "registration failed, skipping account for this run"
                        );
                        continue;
                    }
                }
            } else {
                info!(account = %token, nodes = node_ids.len(), "found existing nodes");
                node_ids
            };

            // Fire-and-forget: the confirmation outcome is only ever
            // observed in the logs.
            {
                let client = Arc::clone(&client);
                tasks.push(tokio::spawn(async move {
                    if let Err(err) = client.confirm_referral().await {
                        warn!(account = %client.token(), %err, "referral confirmation failed");
                    }
                }));
            }

            tasks.push(
                StatusPoller::new(
                    Arc::clone(&client),
                    self.config.poll_interval(),
                    node_ids.len(),
                )
                .spawn(),
            );

            for node_id in &node_ids {
                info!(account = %token, node = %node_id, "starting session");
                match NodeSession::new(
                    token.clone(),
                    proxy.cloned(),
                    node_id.clone(),
                    &self.config.api_base,
                    session_config.clone(),
                ) {
                    Ok(session) => {
                        sessions.push(session.handle());
                        tasks.push(session.spawn());
                    }
                    Err(err) => {
                        error!(account = %token, node = %node_id, %err, "failed to create session")
                    }
                }
            }

            report_status(&client, node_ids.len()).await;
        }

        info!(
            accounts = self.tokens.len(),
            sessions = sessions.len(),
            "all accounts processed, leaving sessions running"
        );
        RunningKeeper { tasks, sessions }
    }
}
