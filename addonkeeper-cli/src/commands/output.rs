//! Console rendering of manager reports.

use console::style;

use addonkeeper::manager::{
    ArchiveStatus, IntakeReport, RelocationOutcome, RoleAudit, ScanOutcome, ScanReport,
};
use addonkeeper::pack::PackRole;

/// Section heading.
pub fn heading(text: &str) {
    println!("{}", style(text).bold().underlined());
}

fn tag_ok() -> console::StyledObject<&'static str> {
    style("[OK]").green().bold()
}

fn tag_skip() -> console::StyledObject<&'static str> {
    style("[SKIP]").yellow().bold()
}

fn tag_error() -> console::StyledObject<&'static str> {
    style("[ERROR]").red().bold()
}

/// Per-archive results followed by the extraction summary.
pub fn print_intake(report: &IntakeReport) {
    if report.intake_missing {
        println!("{} intake folder not found, nothing to extract", tag_skip());
        return;
    }
    if report.archives.is_empty() {
        println!("No .mcaddon or .mcpack files to process.");
        return;
    }

    for archive in &report.archives {
        println!("{}", style(archive.file_name()).cyan());
        match archive.status {
            ArchiveStatus::NoFolders => {
                println!("  {} no pack folders found in archive", tag_error())
            }
            ArchiveStatus::Failed => println!("  {} could not extract archive", tag_error()),
            ArchiveStatus::Extracted => {}
        }
        for pack in &archive.packs {
            match &pack.outcome {
                RelocationOutcome::Moved {
                    role, final_name, ..
                } => {
                    if *final_name == pack.folder {
                        println!("  {} {} -> {}", tag_ok(), pack.folder, role_label(*role));
                    } else {
                        println!(
                            "  {} {} -> {} as {}",
                            tag_ok(),
                            pack.folder,
                            role_label(*role),
                            final_name
                        );
                    }
                }
                RelocationOutcome::Skipped(reason) => {
                    println!("  {} {} ({})", tag_skip(), pack.folder, reason)
                }
                RelocationOutcome::Failed(error) => {
                    println!("  {} {}: {}", tag_error(), pack.folder, error)
                }
            }
        }
    }

    if let Some(error) = &report.cleanup_error {
        println!("{} could not remove temp folder: {}", tag_error(), error);
    }

    let stats = &report.stats;
    println!();
    heading("Extraction summary");
    println!("  .mcaddon files processed: {}", report.addons_processed);
    println!("  .mcpack files processed:  {}", report.packs_processed);
    println!("  Behavior packs moved:     {}", stats.behavior_moved);
    println!("  Resource packs moved:     {}", stats.resource_moved);
    println!("  Skipped:                  {}", stats.skipped);
    println!("  Errors:                   {}", count_style(stats.errors));
}

/// Per-folder scan results, removed identities, and the summary.
pub fn print_scan(role: PackRole, report: &ScanReport) {
    heading(&format!("{} index", role_label(role)));
    if report.missing_dir {
        println!(
            "  {} {} not found, index left unchanged",
            tag_skip(),
            report.role_dir.display()
        );
        return;
    }
    if let Some(error) = &report.dir_unreadable {
        println!(
            "  {} could not list {}, index left unchanged: {}",
            tag_error(),
            report.role_dir.display(),
            error
        );
        return;
    }
    if let Some(error) = &report.previous_unreadable {
        println!(
            "  {} previous index unreadable, treated as empty: {}",
            tag_error(),
            error
        );
    }

    for entry in &report.entries {
        match &entry.outcome {
            ScanOutcome::Accepted { pack_id, version } => println!(
                "  {} {} {} v{}",
                tag_ok(),
                entry.folder,
                style(pack_id).dim(),
                version
            ),
            ScanOutcome::Duplicate { pack_id } => println!(
                "  {} {} {}",
                style("[DUPLICATE]").magenta().bold(),
                entry.folder,
                style(pack_id).dim()
            ),
            ScanOutcome::Skipped { reason } => {
                println!("  {} {}: {}", tag_skip(), entry.folder, reason)
            }
        }
    }
    for pack_id in &report.removed {
        println!("  {} {}", style("[REMOVED]").red(), pack_id);
    }

    let stats = &report.stats;
    let action = if report.created { "Created" } else { "Updated" };
    println!(
        "  {} {}: processed {}, duplicates {}, skipped {}, removed {}, total {}",
        action,
        report.index_path.display(),
        stats.processed,
        stats.duplicates,
        stats.skipped,
        stats.removed,
        style(stats.total).bold()
    );
}

/// Installed folders per role and those missing a manifest.
pub fn print_audit(audits: &[RoleAudit]) {
    heading("Installed packs");
    for audit in audits {
        if audit.missing_dir {
            println!("  {}: folder not found", role_label(audit.role));
            continue;
        }
        println!("  {} ({}):", role_label(audit.role), audit.folders.len());
        for folder in &audit.folders {
            if audit.without_manifest.contains(folder) {
                println!("    {} {} (no manifest.json)", tag_error(), folder);
            } else {
                println!("    {}", folder);
            }
        }
    }

    let missing: usize = audits.iter().map(|a| a.without_manifest.len()).sum();
    if missing == 0 {
        println!("  All pack folders have a manifest.json.");
    } else {
        println!(
            "  {} folder(s) without manifest.json will not be indexed.",
            style(missing).yellow().bold()
        );
    }
}

fn role_label(role: PackRole) -> &'static str {
    match role {
        PackRole::Behavior => "Behavior packs",
        PackRole::Resource => "Resource packs",
    }
}

fn count_style(count: usize) -> console::StyledObject<usize> {
    if count == 0 {
        style(count)
    } else {
        style(count).red().bold()
    }
}
