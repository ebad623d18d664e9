//! Run command - the full workflow: extract, index, audit.

use super::common::Session;
use crate::error::CliError;

/// Run extraction, then scan both roles, then audit.
///
/// Extraction problems are reported but do not stop the scan.
pub fn run(session: &Session) -> Result<(), CliError> {
    super::extract::run(session)?;
    println!();
    super::scan::run(session, None)?;
    println!();
    super::audit::run(session)?;
    Ok(())
}
