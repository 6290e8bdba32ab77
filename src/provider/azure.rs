//! Azure client
//!
//! Wraps the `az` CLI for VM listing and storage account provisioning.
//! Login state lives in a cloudctl-private `AZURE_CONFIG_DIR`, separate from
//! the user's own `az` profile.

use crate::config::{AzureConfig, Config};
use crate::domain::{AzureVm, Provider, StorageAccountSpec};
use crate::error::ProviderError;
use crate::provider::{api_error, decode_json, extract_between, run_checked};
use crate::provider::{CommandOutput, CommandRunner, Invocation};

use serde::Deserialize;
use std::path::{Path, PathBuf};

const PROGRAM: &str = "az";
const UNKNOWN_POWER_STATE: &str = "unknown";

/// Default location of the CLI state directory
pub fn default_config_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("cloudctl")
        .join("azure")
}

/// Client for one Azure subscription
pub struct AzureClient<'a, R: CommandRunner + ?Sized> {
    runner: &'a R,
    envs: Vec<(String, String)>,
    subscription_id: String,
}

impl<'a, R: CommandRunner + ?Sized> AzureClient<'a, R> {
    /// Create a client; every loaded variable is forwarded to the CLI
    pub fn new(runner: &'a R, config: &Config, subscription_id: &str, config_dir: &Path) -> Self {
        let mut envs: Vec<(String, String)> = config
            .vars()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        envs.push((
            "AZURE_CONFIG_DIR".to_string(),
            config_dir.display().to_string(),
        ));
        envs.push(("AZURE_CORE_NO_COLOR".to_string(), "true".to_string()));

        Self {
            runner,
            envs,
            subscription_id: subscription_id.to_string(),
        }
    }

    pub fn subscription_id(&self) -> &str {
        &self.subscription_id
    }

    fn invocation(&self) -> Invocation {
        Invocation::new(PROGRAM).envs(self.envs.iter().cloned())
    }

    fn run(&self, invocation: Invocation) -> Result<CommandOutput, ProviderError> {
        run_checked(self.runner, &invocation, classify_failure)
    }

    /// Sign in with the service principal from the configuration
    pub fn login(&self, azure: &AzureConfig) -> Result<(), ProviderError> {
        log::debug!("Signing in as service principal {}", azure.client_id);
        self.run(
            self.invocation()
                .args(["login", "--service-principal"])
                .args(["--username", azure.client_id.as_str()])
                .arg("--password")
                .secret_arg(azure.client_secret.as_str())
                .args(["--tenant", azure.tenant_id.as_str()])
                .args(["--output", "none"]),
        )?;
        Ok(())
    }

    /// List VMs with their power state
    ///
    /// The status filter compares case-insensitively against the power state.
    pub fn list_vms(
        &self,
        resource_group: Option<&str>,
        status: Option<&str>,
    ) -> Result<Vec<AzureVm>, ProviderError> {
        let mut invocation = self
            .invocation()
            .args(["vm", "list", "--show-details"])
            .args(["--subscription", self.subscription_id.as_str()])
            .args(["--output", "json"]);
        if let Some(group) = resource_group {
            invocation = invocation.args(["--resource-group", group]);
        }

        let output = self.run(invocation)?;
        let vms: Vec<VmWire> = decode_json(PROGRAM, &output.stdout)?;

        Ok(vms
            .into_iter()
            .map(AzureVm::from)
            .filter(|vm| match status {
                Some(wanted) => vm.power_state.to_lowercase() == wanted.to_lowercase(),
                None => true,
            })
            .collect())
    }

    /// Create a StorageV2 account; returns the created account's name
    pub fn create_storage_account(&self, spec: &StorageAccountSpec) -> Result<String, ProviderError> {
        let mut invocation = self
            .invocation()
            .args(["storage", "account", "create"])
            .args(["--name", spec.name.as_str()])
            .args(["--resource-group", spec.resource_group.as_str()])
            .args(["--location", spec.location.as_str()])
            .args(["--sku", spec.sku.as_str()])
            .args(["--kind", "StorageV2"])
            .args(["--https-only", "true"])
            .args(["--min-tls-version", "TLS1_2"])
            .args(["--allow-blob-public-access", "false"])
            .args(["--subscription", spec.subscription_id.as_str()])
            .args(["--output", "json"]);
        if !spec.tags.is_empty() {
            invocation = invocation.arg("--tags").args(spec.tags.to_pairs());
        }

        let output = self.run(invocation)?;
        if output.stdout.trim().is_empty() {
            return Ok(spec.name.to_string());
        }
        let account: StorageAccountWire = decode_json(PROGRAM, &output.stdout)?;
        Ok(account.name.unwrap_or_else(|| spec.name.to_string()))
    }
}

/// Map `az` stderr to an error, extracting the `Code:` line or `(CODE)`
pub fn classify_failure(stderr: &str) -> ProviderError {
    let code = stderr
        .lines()
        .find_map(|line| line.trim().strip_prefix("Code:"))
        .map(|code| code.trim().to_string())
        .filter(|code| !code.is_empty())
        .or_else(|| extract_between(stderr, "ERROR: (", ")"));
    api_error(Provider::Azure, code, stderr)
}

/// Resource group segment of an ARM resource id
pub fn resource_group_from_id(id: &str) -> Option<&str> {
    id.split('/').nth(4).filter(|s| !s.is_empty())
}

fn normalize_power_state(raw: &str) -> String {
    let state = raw.trim();
    let state = state
        .strip_prefix("PowerState/")
        .or_else(|| state.strip_prefix("VM "))
        .unwrap_or(state);
    state.to_string()
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VmWire {
    name: String,
    #[serde(default)]
    id: String,
    resource_group: Option<String>,
    #[serde(default)]
    location: String,
    hardware_profile: Option<HardwareProfile>,
    power_state: Option<String>,
    storage_profile: Option<StorageProfile>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HardwareProfile {
    vm_size: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StorageProfile {
    os_disk: Option<OsDisk>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OsDisk {
    os_type: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StorageAccountWire {
    name: Option<String>,
}

impl From<VmWire> for AzureVm {
    fn from(wire: VmWire) -> Self {
        let resource_group = resource_group_from_id(&wire.id)
            .map(str::to_string)
            .or(wire.resource_group)
            .unwrap_or_default();
        let power_state = wire
            .power_state
            .as_deref()
            .map(normalize_power_state)
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| UNKNOWN_POWER_STATE.to_string());

        Self {
            name: wire.name,
            resource_group,
            location: wire.location,
            vm_size: wire
                .hardware_profile
                .and_then(|h| h.vm_size)
                .unwrap_or_default(),
            power_state,
            os_type: wire
                .storage_profile
                .and_then(|s| s.os_disk)
                .and_then(|d| d.os_type),
        }
    }
}
