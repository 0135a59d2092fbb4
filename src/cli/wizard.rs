use anyhow::{bail, Result};
use chrono::Utc;
use inquire::{Select, Text};
use owo_colors::OwoColorize;

use crate::model::{CorrectionStatus, Finding, Report, RiskLevel};
use crate::store::ReportStore;

/// Print a horizontal separator.
fn separator() {
    println!("{}", "━".repeat(60));
}

/// Interactive root-report creation: prompts for the parties and the
/// property, then inserts an empty draft report and saves.
pub fn run_new_report(store: &mut ReportStore) -> Result<()> {
    println!();
    separator();
    println!("  {} {}", "📋".bold(), "New inspection report".bold());
    separator();
    println!();

    let client_name = Text::new("Client name:").prompt()?;
    let engineer_name = Text::new("Engineer name:").prompt()?;
    let engineer_registry = Text::new("Engineer registry (e.g. CREA-12345):")
        .with_default("")
        .prompt()?;
    let property_address = Text::new("Property address:").prompt()?;

    let report = Report::new_inspection(
        client_name,
        engineer_name,
        engineer_registry,
        property_address,
        Utc::now(),
    );
    let report_id = report.id.clone();

    store.insert(report);
    store.save()?;

    println!();
    println!("  {} Created report {}", "✅".bold(), report_id.green());
    println!("     Run `laudo add-item {}` to record findings.", report_id);
    println!();

    Ok(())
}

/// Interactive finding entry: prompts for location, risk level, and
/// descriptions, then appends the finding to the report and saves.
pub fn run_add_item(store: &mut ReportStore, report_id: &str) -> Result<()> {
    let Some(report) = store.get(report_id) else {
        bail!("report {} not found in store", report_id);
    };

    println!();
    separator();
    println!(
        "  {} New finding for {} — {}",
        "📋".bold(),
        report.client_name.bold(),
        report.id.dimmed()
    );
    separator();
    println!();

    let location = Text::new("Location (room/area):")
        .with_help_message("Leave empty to file under \"Other\"")
        .prompt()?;

    let risk_choice = Select::new(
        "Risk level:",
        vec![RiskLevel::Critical, RiskLevel::Regular, RiskLevel::Minimal],
    )
    .with_starting_cursor(1)
    .prompt()?;

    let technical_description = Text::new("Technical description:").prompt()?;

    let correction_notes = Text::new("Correction notes (optional):")
        .with_default("")
        .prompt()?;

    let now = Utc::now();
    let finding = Finding {
        id: Finding::generate_id(&location, &technical_description, now),
        location,
        risk_level: risk_choice,
        technical_description,
        correction_notes,
        photos: vec![],
        correction_photos: vec![],
        correction_status: CorrectionStatus::Pending,
    };
    let finding_id = finding.id.clone();

    let mut updated = report.clone();
    updated.add_item(finding);
    let item_count = updated.items.len();
    store.update(updated)?;
    store.save()?;

    println!();
    println!(
        "  {} Added finding {} ({} item(s) on report)",
        "✅".bold(),
        finding_id.green(),
        item_count
    );
    println!();

    Ok(())
}

/// Interactive correction entry: prompts for the verified outcome of one
/// finding and replaces it on the report. This is how a re-inspection's
/// pending findings get closed out.
pub fn run_edit_item(store: &mut ReportStore, report_id: &str, finding_id: &str) -> Result<()> {
    let Some(report) = store.get(report_id) else {
        bail!("report {} not found in store", report_id);
    };
    let Some(finding) = report.items.iter().find(|i| i.id == finding_id) else {
        bail!("finding {} not found on report {}", finding_id, report_id);
    };

    println!();
    separator();
    println!(
        "  {} Correction outcome for {} — {}",
        "📋".bold(),
        finding_id.bold(),
        finding.location.dimmed()
    );
    println!("     {}", finding.technical_description.dimmed());
    separator();
    println!();

    let statuses = vec![
        CorrectionStatus::Corrected,
        CorrectionStatus::PartiallyCorrected,
        CorrectionStatus::NotCorrected,
        CorrectionStatus::Pending,
    ];
    let cursor = statuses
        .iter()
        .position(|s| *s == finding.correction_status)
        .unwrap_or(0);
    let correction_status = Select::new("Correction status:", statuses)
        .with_starting_cursor(cursor)
        .prompt()?;

    let correction_notes = Text::new("Correction notes:")
        .with_default(&finding.correction_notes)
        .prompt()?;

    let photos = Text::new("Correction photo references (comma-separated):")
        .with_default(&finding.correction_photos.join(", "))
        .prompt()?;
    let correction_photos: Vec<String> = photos
        .split(',')
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
        .collect();

    let mut updated_finding = finding.clone();
    updated_finding.correction_status = correction_status;
    updated_finding.correction_notes = correction_notes;
    updated_finding.correction_photos = correction_photos;

    let mut updated = report.clone();
    updated.update_item(finding_id, updated_finding);
    let pending = updated.has_pending_items();
    store.update(updated)?;
    store.save()?;

    println!();
    println!(
        "  {} Recorded {} for finding {}",
        "✅".bold(),
        correction_status.to_string().green(),
        finding_id.green()
    );
    if !pending {
        println!("     Every finding on {} is now corrected.", report_id);
    }
    println!();

    Ok(())
}
