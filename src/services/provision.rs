//! Provisioning service
//!
//! Shows what will be created, honors dry-run, asks for confirmation and
//! only then calls the provider.

use crate::cli::Confirm;
use crate::domain::{GcsBucketSpec, S3BucketSpec, StorageAccountSpec, Tags};
use crate::error::AppError;

const RULE_WIDTH: usize = 60;

/// A resource that can be summarized before it is created
pub trait ProvisionPlan {
    /// Banner heading, e.g. `S3 Bucket Configuration`
    fn title(&self) -> &'static str;

    /// Resource kind used in the confirmation prompt
    fn kind(&self) -> &'static str;

    /// Name of the resource to create
    fn resource_name(&self) -> String;

    /// Labeled settings, in display order
    fn summary(&self) -> Vec<(&'static str, String)>;
}

/// What a provisioning run ended with
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    DryRun,
    Cancelled,
    Created(T),
}

/// Service for guarded resource creation
pub struct ProvisionService {
    dry_run: bool,
}

impl ProvisionService {
    /// Create a new provisioning service
    pub fn new(dry_run: bool) -> Self {
        Self { dry_run }
    }

    /// Check if in dry-run mode
    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Summarize, then create unless this is a dry run or the user declines
    pub fn run<P, C, F, T>(&self, plan: &P, confirm: &mut C, create: F) -> Result<Outcome<T>, AppError>
    where
        P: ProvisionPlan + ?Sized,
        C: Confirm + ?Sized,
        F: FnOnce() -> Result<T, AppError>,
    {
        for line in summary_lines(plan) {
            log::info!("{}", line);
        }

        if self.is_dry_run() {
            log::info!("DRY RUN MODE: No resources will be created");
            return Ok(Outcome::DryRun);
        }

        let question = format!(
            "Create {} '{}' with the above configuration?",
            plan.kind(),
            plan.resource_name()
        );
        if !confirm.confirm(&question, false)? {
            log::info!("Operation cancelled by user");
            return Ok(Outcome::Cancelled);
        }

        log::info!("Creating {} '{}'...", plan.kind(), plan.resource_name());
        create().map(Outcome::Created)
    }
}

/// Banner lines for a plan with values aligned in one column
pub fn summary_lines<P: ProvisionPlan + ?Sized>(plan: &P) -> Vec<String> {
    let rule = "=".repeat(RULE_WIDTH);
    let fields = plan.summary();
    let width = fields.iter().map(|(label, _)| label.len()).max().unwrap_or(0) + 3;

    let mut lines = vec![rule.clone(), plan.title().to_string(), rule.clone()];
    lines.extend(
        fields
            .iter()
            .map(|(label, value)| format!("{:<width$}{}", format!("{}:", label), value)),
    );
    lines.push(rule);
    lines
}

fn enabled(flag: bool) -> String {
    let state = if flag { "Enabled" } else { "Disabled" };
    state.to_string()
}

fn push_tags(fields: &mut Vec<(&'static str, String)>, label: &'static str, tags: &Tags) {
    if !tags.is_empty() {
        fields.push((label, tags.to_string()));
    }
}

impl ProvisionPlan for S3BucketSpec {
    fn title(&self) -> &'static str {
        "S3 Bucket Configuration"
    }

    fn kind(&self) -> &'static str {
        "S3 bucket"
    }

    fn resource_name(&self) -> String {
        self.name.clone()
    }

    fn summary(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("Bucket Name", self.name.clone()),
            ("Region", self.region.clone()),
            ("Versioning", enabled(self.versioning)),
            ("Encryption", self.encryption.to_string()),
            ("Public Access", "Blocked".to_string()),
        ];
        push_tags(&mut fields, "Tags", &self.tags);
        fields
    }
}

impl ProvisionPlan for StorageAccountSpec {
    fn title(&self) -> &'static str {
        "Azure Storage Account Configuration"
    }

    fn kind(&self) -> &'static str {
        "storage account"
    }

    fn resource_name(&self) -> String {
        self.name.to_string()
    }

    fn summary(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("Account Name", self.name.to_string()),
            ("Resource Group", self.resource_group.clone()),
            ("Subscription", self.subscription_id.clone()),
            ("Location", self.location.clone()),
            ("SKU", self.sku.to_string()),
            ("HTTPS Only", "Enabled".to_string()),
            ("Minimum TLS", "1.2".to_string()),
            ("Public Blob Access", "Disabled".to_string()),
        ];
        push_tags(&mut fields, "Tags", &self.tags);
        fields
    }
}

impl ProvisionPlan for GcsBucketSpec {
    fn title(&self) -> &'static str {
        "Cloud Storage Bucket Configuration"
    }

    fn kind(&self) -> &'static str {
        "Cloud Storage bucket"
    }

    fn resource_name(&self) -> String {
        self.name.clone()
    }

    fn summary(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("Bucket Name", self.name.clone()),
            ("Project", self.project_id.clone()),
            ("Location", self.location.clone()),
            ("Storage Class", self.storage_class.to_string()),
            ("Versioning", enabled(self.versioning)),
            ("Uniform Access", "Enabled".to_string()),
        ];
        push_tags(&mut fields, "Labels", &self.labels);
        fields
    }
}
