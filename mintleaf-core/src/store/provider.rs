//! Store provider subprocesses.
//!
//! A provider is any executable named `mintleaf-store-<name>` on `PATH` that
//! speaks the JSON protocol in [`super::protocol`]. Providers own their
//! credentials; mintleaf only forwards the unit's `[remote]` keys.

use std::process::Stdio;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::io::AsyncWriteExt;
use tokio::process::Command as TokioCommand;
use tokio::time::timeout;

use crate::error::{MintleafError, MintleafResult};
use crate::store::protocol::{Command, ProviderCommand, Request, Response};

const PROVIDER_TIMEOUT: Duration = Duration::from_secs(10);
const BINARY_PREFIX: &str = "mintleaf-store-";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provider(String);

impl Provider {
    pub fn from_name(name: &str) -> Self {
        Provider(name.to_string())
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    pub fn binary_name(&self) -> String {
        format!("{BINARY_PREFIX}{}", self.0)
    }

    fn binary_path(&self) -> MintleafResult<std::path::PathBuf> {
        let binary_name = self.binary_name();
        which::which(&binary_name).map_err(|_| MintleafError::ProviderNotInstalled(binary_name))
    }

    /// Call a typed provider command, bounded by the provider timeout.
    pub async fn call<C: ProviderCommand>(&self, cmd: C) -> MintleafResult<C::Response> {
        timeout(PROVIDER_TIMEOUT, self.call_raw(C::command(), cmd))
            .await
            .map_err(|_| MintleafError::ProviderTimeout(PROVIDER_TIMEOUT.as_secs()))?
    }

    async fn call_raw<P: Serialize, R: serde::de::DeserializeOwned>(
        &self,
        command: Command,
        params: P,
    ) -> MintleafResult<R> {
        let params = serde_json::to_value(params)
            .map_err(|e| MintleafError::Serialization(e.to_string()))?;
        let request_json = serde_json::to_string(&Request { command, params })
            .map_err(|e| MintleafError::Serialization(e.to_string()))?;

        let binary_path = self.binary_path()?;
        tracing::debug!(provider = %self.0, ?command, "calling store provider");

        let mut child = TokioCommand::new(&binary_path)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                MintleafError::Provider(format!("Failed to spawn {}: {e}", binary_path.display()))
            })?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| MintleafError::Provider("Provider stdin unavailable".into()))?;
        stdin.write_all(format!("{request_json}\n").as_bytes()).await?;
        drop(stdin);

        let output = child.wait_with_output().await?;

        if !output.status.success() {
            return Err(MintleafError::Provider(format!(
                "Provider exited with status: {}",
                output.status.code().unwrap_or(-1)
            )));
        }

        parse_response(&String::from_utf8_lossy(&output.stdout))
    }
}

fn parse_response<R: serde::de::DeserializeOwned>(raw: &str) -> MintleafResult<R> {
    if raw.trim().is_empty() {
        return Err(MintleafError::Provider("Provider returned no response".into()));
    }

    let response: Response<R> = serde_json::from_str(raw)
        .map_err(|e| MintleafError::Provider(format!("Failed to parse response: {e}")))?;

    match response {
        Response::Success { data } => Ok(data),
        Response::Error { error } => Err(MintleafError::Provider(error)),
    }
}
