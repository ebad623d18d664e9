//! Extract command - install every archive in the intake folder.

use console::style;

use addonkeeper::manager::{AddonIntake, IntakeReport, IntakeStage, Relocator, ZipExtractor};

use super::common::Session;
use super::output;
use crate::error::CliError;

/// Run the extract command.
pub fn run(session: &Session) -> Result<IntakeReport, CliError> {
    output::heading("Extracting add-ons");

    let mut relocator = Relocator::new(&session.layout, session.classifier(), session.decisions());
    let intake = AddonIntake::new(ZipExtractor::new(), session.layout.clone());
    let report = intake.run(
        &mut relocator,
        Some(Box::new(|stage: IntakeStage, message: &str| {
            if stage == IntakeStage::Extracting {
                println!("{} {}", style("Processing").cyan(), message);
            }
        })),
    );

    println!();
    output::print_intake(&report);
    Ok(report)
}
