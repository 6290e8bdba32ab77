//! Service layer for provider operations
//!
//! Services encapsulate the guarded create flow shared by every
//! provisioning command.

pub mod provision;

pub use provision::{summary_lines, Outcome, ProvisionPlan, ProvisionService};
