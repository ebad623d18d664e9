//! Audit command - list installed pack folders and flag missing manifests.

use addonkeeper::manager::{audit_layout, RoleAudit};

use super::common::Session;
use super::output;
use crate::error::CliError;

/// Run the audit command.
pub fn run(session: &Session) -> Result<Vec<RoleAudit>, CliError> {
    let audits = audit_layout(&session.layout);
    output::print_audit(&audits);
    Ok(audits)
}
