//! GCP client
//!
//! Wraps the `gcloud` CLI for Compute Engine listing and Cloud Storage
//! bucket provisioning.

use crate::config::{Config, GcpConfig};
use crate::domain::{GcpInstance, GcsBucketSpec, Provider};
use crate::error::ProviderError;
use crate::provider::{api_error, decode_json, extract_between, last_segment, run_checked};
use crate::provider::{CommandOutput, CommandRunner, Invocation};

use serde::Deserialize;

const PROGRAM: &str = "gcloud";

/// Client for one GCP project
pub struct GcpClient<'a, R: CommandRunner + ?Sized> {
    runner: &'a R,
    envs: Vec<(String, String)>,
    project_id: String,
}

impl<'a, R: CommandRunner + ?Sized> GcpClient<'a, R> {
    /// Create a client authenticated with the configured service account key
    ///
    /// # Errors
    /// Returns `ProviderError::MissingCredentials` if the key file does not exist
    pub fn new(
        runner: &'a R,
        config: &Config,
        gcp: &GcpConfig,
        project_id: &str,
    ) -> Result<Self, ProviderError> {
        if !gcp.credentials_path.is_file() {
            return Err(ProviderError::MissingCredentials(format!(
                "GCP credentials not found at {}. Please check GOOGLE_APPLICATION_CREDENTIALS in .env file.",
                gcp.credentials_path.display()
            )));
        }

        let credentials = gcp.credentials_path.display().to_string();
        let mut envs: Vec<(String, String)> = config
            .vars()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        envs.push((
            "GOOGLE_APPLICATION_CREDENTIALS".to_string(),
            credentials.clone(),
        ));
        envs.push((
            "CLOUDSDK_AUTH_CREDENTIAL_FILE_OVERRIDE".to_string(),
            credentials,
        ));
        envs.push(("CLOUDSDK_CORE_PROJECT".to_string(), project_id.to_string()));
        envs.push(("CLOUDSDK_CORE_DISABLE_PROMPTS".to_string(), "1".to_string()));

        Ok(Self {
            runner,
            envs,
            project_id: project_id.to_string(),
        })
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    fn invocation<'s>(&self, args: impl IntoIterator<Item = &'s str>) -> Invocation {
        Invocation::new(PROGRAM)
            .args(args)
            .args(["--project", self.project_id.as_str()])
            .envs(self.envs.iter().cloned())
    }

    fn run(&self, invocation: Invocation) -> Result<CommandOutput, ProviderError> {
        run_checked(self.runner, &invocation, classify_failure)
    }

    /// List instances in one zone, or across all zones when `zone` is None
    ///
    /// The status filter is an exact match against the instance status.
    pub fn list_instances(
        &self,
        zone: Option<&str>,
        status: Option<&str>,
    ) -> Result<Vec<GcpInstance>, ProviderError> {
        let mut invocation = self
            .invocation(["compute", "instances", "list"])
            .args(["--format", "json"]);
        if let Some(zone) = zone {
            invocation = invocation.args(["--zones", zone]);
        }

        let output = self.run(invocation)?;
        let instances: Vec<InstanceWire> = decode_json(PROGRAM, &output.stdout)?;

        Ok(instances
            .into_iter()
            .map(|wire| wire.into_instance(zone))
            .filter(|i| status.map_or(true, |s| i.status == s))
            .collect())
    }

    /// Create a bucket with uniform bucket-level access; returns its name
    pub fn create_bucket(&self, spec: &GcsBucketSpec) -> Result<String, ProviderError> {
        let url = spec.url();

        self.run(
            self.invocation(["storage", "buckets", "create", url.as_str()])
                .args(["--location", spec.location.as_str()])
                .args(["--default-storage-class", spec.storage_class.as_str()])
                .arg("--uniform-bucket-level-access"),
        )?;
        log::debug!("Created bucket {}", url);

        if spec.versioning || !spec.labels.is_empty() {
            let mut update = self.invocation(["storage", "buckets", "update", url.as_str()]);
            if spec.versioning {
                update = update.arg("--versioning");
            }
            if !spec.labels.is_empty() {
                update = update.arg(format!("--update-labels={}", spec.labels.to_pairs().join(",")));
            }
            self.run(update)?;
        }

        Ok(spec.name.clone())
    }
}

/// Map `gcloud` stderr to an error, extracting the HTTP status as the code
pub fn classify_failure(stderr: &str) -> ProviderError {
    if stderr.contains("You do not currently have an active account selected") {
        return ProviderError::MissingCredentials(
            "GCP credentials not found. Please check GOOGLE_APPLICATION_CREDENTIALS in .env file."
                .to_string(),
        );
    }
    let code = extract_between(stderr, "HTTPError ", ":");
    api_error(Provider::Gcp, code, stderr)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InstanceWire {
    name: String,
    #[serde(default)]
    zone: String,
    #[serde(default)]
    machine_type: String,
    #[serde(default)]
    status: String,
    #[serde(default)]
    network_interfaces: Vec<NetworkInterface>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NetworkInterface {
    #[serde(rename = "networkIP")]
    network_ip: Option<String>,
    #[serde(default)]
    access_configs: Vec<AccessConfig>,
}

#[derive(Debug, Deserialize)]
struct AccessConfig {
    #[serde(rename = "natIP")]
    nat_ip: Option<String>,
}

impl InstanceWire {
    fn into_instance(self, requested_zone: Option<&str>) -> GcpInstance {
        let zone = match last_segment(&self.zone) {
            "" => requested_zone.unwrap_or_default().to_string(),
            z => z.to_string(),
        };
        let primary = self.network_interfaces.into_iter().next();
        let internal_ip = primary.as_ref().and_then(|n| n.network_ip.clone());
        let external_ip = primary
            .and_then(|n| n.access_configs.into_iter().next())
            .and_then(|a| a.nat_ip)
            .filter(|ip| !ip.is_empty());

        GcpInstance {
            zone,
            machine_type: last_segment(&self.machine_type).to_string(),
            name: self.name,
            status: self.status,
            internal_ip,
            external_ip,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{GcsStorageClass, Tags};
    use crate::mock::MockRunner;
    use std::path::PathBuf;

    const INSTANCES: &str = r#"[
        {
            "name": "api-1",
            "zone": "https://www.googleapis.com/compute/v1/projects/demo/zones/us-central1-a",
            "machineType": "https://www.googleapis.com/compute/v1/projects/demo/zones/us-central1-a/machineTypes/e2-medium",
            "status": "RUNNING",
            "networkInterfaces": [
                {"networkIP": "10.128.0.2", "accessConfigs": [{"name": "External NAT", "natIP": "34.1.2.3"}]}
            ]
        },
        {
            "name": "worker-1",
            "zone": "https://www.googleapis.com/compute/v1/projects/demo/zones/europe-west1-b",
            "machineType": "https://www.googleapis.com/compute/v1/projects/demo/zones/europe-west1-b/machineTypes/n2-standard-4",
            "status": "TERMINATED",
            "networkInterfaces": [{"networkIP": "10.132.0.7", "accessConfigs": [{"name": "External NAT"}]}]
        }
    ]"#;

    struct Fixture {
        _dir: tempfile::TempDir,
        config: Config,
        gcp: GcpConfig,
    }

    fn fixture() -> Fixture {
        let dir = tempfile::tempdir().unwrap();
        let key = dir.path().join("sa.json");
        std::fs::write(&key, "{}").unwrap();
        let config = Config::from_pairs([
            ("GOOGLE_APPLICATION_CREDENTIALS", key.display().to_string()),
            ("GCP_PROJECT_ID", "demo".to_string()),
        ]);
        let gcp = GcpConfig::from_config(&config).unwrap();
        Fixture {
            _dir: dir,
            config,
            gcp,
        }
    }

    #[test]
    fn test_missing_credentials_file() {
        let config = Config::default();
        let gcp = GcpConfig {
            credentials_path: PathBuf::from("/nonexistent/sa.json"),
            project_id: "demo".to_string(),
            region: "us-central1".to_string(),
            zone: "us-central1-a".to_string(),
        };
        let runner = MockRunner::new();
        let result = GcpClient::new(&runner, &config, &gcp, "demo");
        assert!(matches!(result, Err(ProviderError::MissingCredentials(_))));
        assert!(runner.calls().is_empty());
    }

    #[test]
    fn test_list_instances_maps_fields() {
        let f = fixture();
        let runner = MockRunner::new().with_success(INSTANCES);
        let client = GcpClient::new(&runner, &f.config, &f.gcp, "demo").unwrap();
        assert_eq!(client.project_id(), "demo");

        let instances = client.list_instances(None, None).unwrap();
        assert_eq!(instances.len(), 2);
        assert_eq!(instances[0].zone, "us-central1-a");
        assert_eq!(instances[0].machine_type, "e2-medium");
        assert_eq!(instances[0].external_ip.as_deref(), Some("34.1.2.3"));
        assert_eq!(instances[1].internal_ip.as_deref(), Some("10.132.0.7"));
        assert_eq!(instances[1].external_ip, None);

        let call = &runner.calls()[0];
        assert_eq!(call.arg_after("--project"), Some("demo"));
        assert!(!call.has_arg("--zones"));
        assert_eq!(call.env_value("CLOUDSDK_CORE_PROJECT"), Some("demo"));
        assert_eq!(
            call.env_value("CLOUDSDK_AUTH_CREDENTIAL_FILE_OVERRIDE"),
            Some(f.gcp.credentials_path.display().to_string().as_str())
        );
    }

    #[test]
    fn test_list_instances_filters() {
        let f = fixture();
        let runner = MockRunner::new().with_success(INSTANCES);
        let client = GcpClient::new(&runner, &f.config, &f.gcp, "demo").unwrap();

        let instances = client
            .list_instances(Some("us-central1-a"), Some("RUNNING"))
            .unwrap();
        assert_eq!(instances.len(), 1);
        assert_eq!(instances[0].name, "api-1");
        assert_eq!(runner.calls()[0].arg_after("--zones"), Some("us-central1-a"));
    }

    #[test]
    fn test_status_filter_is_exact() {
        let f = fixture();
        let runner = MockRunner::new().with_success(INSTANCES);
        let client = GcpClient::new(&runner, &f.config, &f.gcp, "demo").unwrap();

        assert!(client.list_instances(None, Some("running")).unwrap().is_empty());
    }

    #[test]
    fn test_create_bucket_with_versioning_and_labels() {
        let f = fixture();
        let runner = MockRunner::new();
        let client = GcpClient::new(&runner, &f.config, &f.gcp, "demo").unwrap();
        let spec = GcsBucketSpec {
            name: "assets".to_string(),
            project_id: "demo".to_string(),
            location: "EU".to_string(),
            storage_class: GcsStorageClass::Nearline,
            versioning: true,
            labels: [("team", "web"), ("env", "prod")].into_iter().collect::<Tags>(),
        };

        assert_eq!(client.create_bucket(&spec).unwrap(), "assets");

        let calls = runner.calls();
        assert_eq!(calls.len(), 2);
        assert!(calls[0].has_arg("gs://assets"));
        assert!(calls[0].has_arg("--uniform-bucket-level-access"));
        assert_eq!(calls[0].arg_after("--default-storage-class"), Some("NEARLINE"));
        assert_eq!(calls[0].arg_after("--location"), Some("EU"));
        assert!(calls[1].has_arg("update"));
        assert!(calls[1].has_arg("--versioning"));
        assert!(calls[1].has_arg("--update-labels=env=prod,team=web"));
    }

    #[test]
    fn test_create_bucket_without_extras_skips_update() {
        let f = fixture();
        let runner = MockRunner::new();
        let client = GcpClient::new(&runner, &f.config, &f.gcp, "demo").unwrap();
        let spec = GcsBucketSpec {
            name: "plain".to_string(),
            project_id: "demo".to_string(),
            location: "US".to_string(),
            storage_class: GcsStorageClass::Standard,
            versioning: false,
            labels: Tags::default(),
        };

        client.create_bucket(&spec).unwrap();
        assert_eq!(runner.calls().len(), 1);
    }

    #[test]
    fn test_classify_conflict() {
        let err = classify_failure(
            "ERROR: (gcloud.storage.buckets.create) HTTPError 409: Your previous request to create the named bucket succeeded and you already own it.",
        );
        assert_eq!(err.code(), Some("409"));
    }
}
