//! AWS client
//!
//! Wraps the `aws` CLI for EC2 listing and S3 bucket provisioning.

use crate::config::{AwsConfig, Config};
use crate::domain::{Ec2Instance, Provider, S3BucketSpec, NOT_AVAILABLE};
use crate::error::ProviderError;
use crate::provider::{api_error, decode_json, extract_between, run_checked};
use crate::provider::{CommandOutput, CommandRunner, Invocation};

use serde::Deserialize;
use serde_json::json;

const PROGRAM: &str = "aws";

/// Client for one AWS region
pub struct AwsClient<'a, R: CommandRunner + ?Sized> {
    runner: &'a R,
    envs: Vec<(String, String)>,
    region: String,
}

impl<'a, R: CommandRunner + ?Sized> AwsClient<'a, R> {
    /// Create a client; every loaded variable is forwarded to the CLI
    pub fn new(runner: &'a R, config: &Config, aws: &AwsConfig, region: &str) -> Self {
        let mut envs: Vec<(String, String)> = config
            .vars()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        envs.push(("AWS_ACCESS_KEY_ID".to_string(), aws.access_key_id.clone()));
        envs.push((
            "AWS_SECRET_ACCESS_KEY".to_string(),
            aws.secret_access_key.clone(),
        ));
        if let Some(token) = &aws.session_token {
            envs.push(("AWS_SESSION_TOKEN".to_string(), token.clone()));
        }
        envs.push(("AWS_DEFAULT_REGION".to_string(), region.to_string()));
        envs.push(("AWS_PAGER".to_string(), String::new()));

        Self {
            runner,
            envs,
            region: region.to_string(),
        }
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    fn invocation(&self, service: &str, operation: &str) -> Invocation {
        Invocation::new(PROGRAM)
            .args([service, operation])
            .args(["--region", self.region.as_str(), "--output", "json"])
            .envs(self.envs.iter().cloned())
    }

    fn run(&self, invocation: Invocation) -> Result<CommandOutput, ProviderError> {
        run_checked(self.runner, &invocation, classify_failure)
    }

    /// List instances, optionally filtered by state name
    pub fn list_instances(&self, state: Option<&str>) -> Result<Vec<Ec2Instance>, ProviderError> {
        let mut invocation = self.invocation("ec2", "describe-instances");
        if let Some(state) = state {
            invocation = invocation.args([
                "--filters".to_string(),
                format!("Name=instance-state-name,Values={}", state),
            ]);
        }

        let output = self.run(invocation)?;
        let response: DescribeInstancesOutput = decode_json(PROGRAM, &output.stdout)?;

        Ok(response
            .reservations
            .into_iter()
            .flat_map(|r| r.instances)
            .map(Ec2Instance::from)
            .collect())
    }

    /// Create a bucket with public access blocked and default encryption
    pub fn create_bucket(&self, spec: &S3BucketSpec) -> Result<(), ProviderError> {
        let mut create = self
            .invocation("s3api", "create-bucket")
            .args(["--bucket", spec.name.as_str()]);
        if let Some(constraint) = spec.location_constraint() {
            create = create.args([
                "--create-bucket-configuration".to_string(),
                format!("LocationConstraint={}", constraint),
            ]);
        }
        self.run(create)?;
        log::debug!("Created bucket {}", spec.name);

        self.run(
            self.invocation("s3api", "put-public-access-block")
                .args(["--bucket", spec.name.as_str()])
                .args([
                    "--public-access-block-configuration",
                    "BlockPublicAcls=true,IgnorePublicAcls=true,BlockPublicPolicy=true,RestrictPublicBuckets=true",
                ]),
        )?;

        if spec.versioning {
            self.run(
                self.invocation("s3api", "put-bucket-versioning")
                    .args(["--bucket", spec.name.as_str()])
                    .args(["--versioning-configuration", "Status=Enabled"]),
            )?;
        }

        let encryption = json!({
            "Rules": [{
                "ApplyServerSideEncryptionByDefault": {
                    "SSEAlgorithm": spec.encryption.as_str()
                }
            }]
        });
        self.run(
            self.invocation("s3api", "put-bucket-encryption")
                .args(["--bucket", spec.name.as_str()])
                .args([
                    "--server-side-encryption-configuration".to_string(),
                    encryption.to_string(),
                ]),
        )?;

        if !spec.tags.is_empty() {
            let tag_set: Vec<_> = spec
                .tags
                .iter()
                .map(|(k, v)| json!({ "Key": k, "Value": v }))
                .collect();
            self.run(
                self.invocation("s3api", "put-bucket-tagging")
                    .args(["--bucket", spec.name.as_str()])
                    .args([
                        "--tagging".to_string(),
                        json!({ "TagSet": tag_set }).to_string(),
                    ]),
            )?;
        }

        Ok(())
    }
}

/// Map `aws` stderr to an error, extracting `An error occurred (CODE)`
pub fn classify_failure(stderr: &str) -> ProviderError {
    if stderr.contains("Unable to locate credentials") {
        return ProviderError::MissingCredentials(
            "AWS credentials not found. Please check your .env file.".to_string(),
        );
    }
    let code = extract_between(stderr, "An error occurred (", ")");
    api_error(Provider::Aws, code, stderr)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct DescribeInstancesOutput {
    #[serde(default)]
    reservations: Vec<Reservation>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct Reservation {
    #[serde(default)]
    instances: Vec<InstanceWire>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct InstanceWire {
    instance_id: String,
    #[serde(default)]
    instance_type: String,
    state: InstanceState,
    private_ip_address: Option<String>,
    public_ip_address: Option<String>,
    #[serde(default)]
    launch_time: String,
    #[serde(default)]
    tags: Vec<TagWire>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct InstanceState {
    name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct TagWire {
    key: String,
    value: String,
}

impl From<InstanceWire> for Ec2Instance {
    fn from(wire: InstanceWire) -> Self {
        let name = wire
            .tags
            .into_iter()
            .find(|t| t.key == "Name")
            .map(|t| t.value)
            .unwrap_or_else(|| NOT_AVAILABLE.to_string());

        Self {
            instance_id: wire.instance_id,
            name,
            instance_type: wire.instance_type,
            state: wire.state.name,
            private_ip: wire.private_ip_address,
            public_ip: wire.public_ip_address,
            launch_time: wire.launch_time,
        }
    }
}
