use comfy_table::{presets::UTF8_FULL_CONDENSED, Cell, Table};
use owo_colors::OwoColorize;

use crate::model::{CorrectionStatus, RiskLevel};
use crate::render::document::{PrintDocument, ReportSection};

/// Render a print document to the terminal with colors
pub fn render(document: &PrintDocument) {
    println!();
    println!(
        "{}  Technical Inspection Report — {}",
        "📋".bold(),
        document.client_name.bold()
    );
    println!("   {}", document.property_address.dimmed());
    println!(
        "   Engineer: {} ({})",
        document.engineer_name,
        document.engineer_registry.dimmed()
    );
    println!();

    render_summary(document);
    render_revisions(document);

    for section in &document.reports {
        render_report_section(section);
    }
}

fn render_summary(document: &PrintDocument) {
    println!("  {}", "CONTENTS".bold());
    for heading in &document.summary {
        println!("   {:>2}. {}", heading.number, heading.title);
    }
    println!();
}

fn render_revisions(document: &PrintDocument) {
    if document.revisions.len() < 2 {
        return;
    }

    println!("  {}", "REVISION HISTORY".bold());
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec!["Rev", "Report", "Created", "Type"]);
    for rev in &document.revisions {
        table.add_row(vec![
            Cell::new(rev.number),
            Cell::new(&rev.report_id),
            Cell::new(rev.created_date.format("%Y-%m-%d")),
            Cell::new(if rev.is_reinspection {
                "Re-inspection"
            } else {
                "Original"
            }),
        ]);
    }
    println!("{}", table);
    println!();
}

fn render_report_section(section: &ReportSection) {
    println!("{}", "━".repeat(60));
    let kind = if section.is_reinspection {
        "RE-INSPECTION"
    } else {
        "INSPECTION"
    };
    println!(
        "  {} {} — {}",
        kind.bold(),
        format!("(rev {})", section.revision_number).dimmed(),
        section.report_id.dimmed()
    );
    if let Some(ref date) = section.inspection_date {
        println!("  Visited: {}", date.dimmed());
    }
    println!();

    if section.groups.is_empty() {
        println!("  {}  No findings recorded", "✅".bold());
        println!();
        return;
    }

    for group in &section.groups {
        println!("  📍 {}", group.location.bold());
        for finding in &group.findings {
            let badge = risk_badge(finding.risk_level);
            print!("     {}  {}", badge, finding.technical_description);
            if section.is_reinspection {
                print!("  {}", correction_badge(finding.correction_status));
            }
            println!();

            if !finding.correction_notes.is_empty() {
                println!("         {} {}", "⮕".green(), finding.correction_notes.green());
            }
            if !finding.photos.is_empty() || !finding.correction_photos.is_empty() {
                println!(
                    "         {} {} photo(s), {} correction photo(s)",
                    "📷".dimmed(),
                    finding.photos.len(),
                    finding.correction_photos.len()
                );
            }
        }
        println!();
    }

    // Summary bar
    let risk = &section.risk_stats;
    let mut parts = Vec::new();
    if risk.critical > 0 {
        parts.push(format!("{} critical", risk.critical).red().bold().to_string());
    }
    if risk.regular > 0 {
        parts.push(format!("{} regular", risk.regular).yellow().to_string());
    }
    if risk.minimal > 0 {
        parts.push(format!("{} minimal", risk.minimal).green().to_string());
    }
    println!(
        "  {} findings: {}",
        risk.total.to_string().bold(),
        parts.join(", ")
    );

    if section.is_reinspection {
        let correction = &section.correction_stats;
        println!(
            "  Corrections: {} done, {} partial, {} pending",
            correction.corrected.to_string().green(),
            correction.partial.to_string().yellow(),
            correction.pending.to_string().red()
        );
    }
    println!();
}

fn risk_badge(risk: RiskLevel) -> String {
    let label = format!(" {} ", risk);
    match risk {
        RiskLevel::Critical => label.on_red().white().bold().to_string(),
        RiskLevel::Regular => label.on_yellow().black().bold().to_string(),
        RiskLevel::Minimal => label.on_green().white().to_string(),
    }
}

fn correction_badge(status: CorrectionStatus) -> String {
    match status {
        CorrectionStatus::Corrected => status.to_string().green().bold().to_string(),
        CorrectionStatus::PartiallyCorrected => status.to_string().yellow().to_string(),
        CorrectionStatus::NotCorrected => status.to_string().red().bold().to_string(),
        CorrectionStatus::Pending => status.to_string().dimmed().to_string(),
    }
}
