//! Scan command - rebuild the pack indexes from the installed folders.

use addonkeeper::manager::{ManifestScanner, ScanReport};
use addonkeeper::pack::PackRole;

use super::common::Session;
use super::output;
use crate::error::CliError;

/// Run the scan command for one role, or both when `role` is `None`.
pub fn run(session: &Session, role: Option<PackRole>) -> Result<Vec<ScanReport>, CliError> {
    let roles: Vec<PackRole> = match role {
        Some(role) => vec![role],
        None => PackRole::ALL.to_vec(),
    };

    let scanner = ManifestScanner::new();
    let mut reports = Vec::with_capacity(roles.len());
    for (i, role) in roles.into_iter().enumerate() {
        if i > 0 {
            println!();
        }
        let report = scanner.scan(session.layout.role_dir(role), session.layout.index_path(role))?;
        output::print_scan(role, &report);
        reports.push(report);
    }
    Ok(reports)
}
