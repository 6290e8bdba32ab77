//! Compute instance domain types
//!
//! One struct per provider, each describing a single listing row.

use super::{Record, NOT_AVAILABLE};
use std::fmt;

/// An EC2 instance as shown by `aws list-ec2`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ec2Instance {
    pub instance_id: String,
    pub name: String,
    pub instance_type: String,
    pub state: String,
    pub private_ip: Option<String>,
    pub public_ip: Option<String>,
    /// ISO-8601 launch timestamp as reported by the provider
    pub launch_time: String,
}

impl From<&Ec2Instance> for Record {
    fn from(i: &Ec2Instance) -> Self {
        Record::new()
            .with("InstanceId", i.instance_id.as_str())
            .with("Name", i.name.as_str())
            .with("Type", i.instance_type.as_str())
            .with("State", i.state.as_str())
            .with("PrivateIP", or_na(&i.private_ip))
            .with("PublicIP", or_na(&i.public_ip))
            .with("LaunchTime", i.launch_time.as_str())
    }
}

impl fmt::Display for Ec2Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, {})", self.instance_id, self.name, self.state)
    }
}

/// An Azure virtual machine as shown by `azure list-vms`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AzureVm {
    pub name: String,
    pub resource_group: String,
    pub location: String,
    pub vm_size: String,
    /// Power state without the `PowerState/` or `VM ` prefix, e.g. `running`
    pub power_state: String,
    pub os_type: Option<String>,
}

impl From<&AzureVm> for Record {
    fn from(vm: &AzureVm) -> Self {
        Record::new()
            .with("Name", vm.name.as_str())
            .with("ResourceGroup", vm.resource_group.as_str())
            .with("Location", vm.location.as_str())
            .with("VMSize", vm.vm_size.as_str())
            .with("PowerState", vm.power_state.as_str())
            .with("OSType", or_na(&vm.os_type))
    }
}

/// A Compute Engine instance as shown by `gcp list-compute`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GcpInstance {
    pub name: String,
    pub zone: String,
    pub machine_type: String,
    pub status: String,
    pub internal_ip: Option<String>,
    pub external_ip: Option<String>,
}

impl From<&GcpInstance> for Record {
    fn from(i: &GcpInstance) -> Self {
        Record::new()
            .with("Name", i.name.as_str())
            .with("Zone", i.zone.as_str())
            .with("MachineType", i.machine_type.as_str())
            .with("Status", i.status.as_str())
            .with("InternalIP", or_na(&i.internal_ip))
            .with("ExternalIP", or_na(&i.external_ip))
    }
}

fn or_na(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or(NOT_AVAILABLE)
}

/// Convert a slice of domain rows into display records
pub fn to_records<'a, T>(items: &'a [T]) -> Vec<Record>
where
    Record: From<&'a T>,
{
    items.iter().map(Record::from).collect()
}
