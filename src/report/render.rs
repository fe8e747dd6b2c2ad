//! Plain-text rendering of batch reports

use super::{CrossReference, FileReport, SummaryRow};
use crate::model::{FindingSource, ValidationFinding};

const HEADERS: [&str; 6] = [
    "File",
    "Objects",
    "Valid",
    "Invalid",
    "Keywords OK",
    "Invalid keywords",
];
/// Invalid keywords listed in a summary cell before eliding the rest
const SHOWN_KEYWORDS: usize = 3;
const SEPARATOR: &str = "==========================================================";

fn keyword_cell(keywords: &[String]) -> String {
    if keywords.is_empty() {
        return "0".to_string();
    }
    let shown: Vec<&str> = keywords
        .iter()
        .take(SHOWN_KEYWORDS)
        .map(String::as_str)
        .collect();
    let ellipsis = if keywords.len() > SHOWN_KEYWORDS { ", ..." } else { "" };
    format!("{} ({}{})", keywords.len(), shown.join(", "), ellipsis)
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}

fn push_row(out: &mut String, cells: &[String], widths: &[usize]) {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = width))
        .collect();
    out.push_str(padded.join("  ").trim_end());
    out.push('\n');
}

pub(super) fn summary_table(rows: &[SummaryRow]) -> String {
    let mut table: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            vec![
                row.file.clone(),
                row.objects.to_string(),
                row.valid.to_string(),
                row.invalid.to_string(),
                yes_no(row.keywords_ok).to_string(),
                keyword_cell(&row.invalid_keywords),
            ]
        })
        .collect();

    let total = vec![
        "TOTAL".to_string(),
        rows.iter().map(|r| r.objects).sum::<usize>().to_string(),
        rows.iter().map(|r| r.valid).sum::<usize>().to_string(),
        rows.iter().map(|r| r.invalid).sum::<usize>().to_string(),
        format!(
            "{}/{}",
            rows.iter().filter(|r| r.keywords_ok).count(),
            rows.len()
        ),
        rows.iter()
            .map(|r| r.invalid_keywords.len())
            .sum::<usize>()
            .to_string(),
    ];
    table.push(total);

    let mut widths: Vec<usize> = HEADERS.iter().map(|h| h.len()).collect();
    for row in &table {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.len());
        }
    }
    let rule = "-".repeat(widths.iter().sum::<usize>() + 2 * (widths.len() - 1));

    let mut out = String::new();
    let headers: Vec<String> = HEADERS.iter().map(|h| h.to_string()).collect();
    push_row(&mut out, &headers, &widths);
    out.push_str(&rule);
    out.push('\n');
    let (body, totals) = table.split_at(table.len() - 1);
    for row in body {
        push_row(&mut out, row, &widths);
    }
    out.push_str(&rule);
    out.push('\n');
    for row in totals {
        push_row(&mut out, row, &widths);
    }
    out
}

fn push_finding(out: &mut String, indent: &str, finding: &ValidationFinding) {
    out.push_str(indent);
    out.push_str(&format!("{:<8}", finding.severity.to_string()));
    if let Some(subject) = &finding.subject {
        out.push_str(&format!("[{}] ", subject));
    }
    out.push_str(&finding.annotated_message());
    out.push('\n');
}

fn push_section<'a>(
    out: &mut String,
    title: &str,
    findings: impl Iterator<Item = &'a ValidationFinding>,
) {
    out.push_str(&format!("[{}]\n", title));
    let mut empty = true;
    for finding in findings {
        push_finding(out, "  ", finding);
        empty = false;
    }
    if empty {
        out.push_str("  no issues detected\n");
    }
}

pub(super) fn cross_reference_line(file: &str, status: &CrossReference) -> Option<String> {
    match status {
        CrossReference::NotRequested => None,
        CrossReference::Matches => Some(format!("{}: ids match table", file)),
        CrossReference::Mismatch {
            missing_from_table,
            missing_from_mesh,
        } => Some(format!(
            "{}: ids mismatch ({} missing from table, {} missing from mesh)",
            file, missing_from_table, missing_from_mesh
        )),
        CrossReference::CannotVerify { reason } => Some(format!(
            "{}: cannot verify ids against table ({})",
            file, reason
        )),
    }
}

fn push_file(out: &mut String, report: &FileReport) {
    out.push_str(SEPARATOR);
    out.push('\n');
    out.push_str(&format!(
        "FILE: {} [{}]\n",
        report.file,
        if report.is_valid() { "VALID" } else { "INVALID" }
    ));
    out.push_str(&format!(
        "  objects: {} ({} valid, {} invalid), errors: {}, warnings: {}\n",
        report.objects.len(),
        report.valid_objects(),
        report.invalid_objects(),
        report.total_errors(),
        report.total_warnings()
    ));

    let input: Vec<&ValidationFinding> = report
        .findings_from(FindingSource::File)
        .chain(report.findings_from(FindingSource::Parser))
        .collect();
    if !input.is_empty() {
        push_section(out, "INPUT", input.into_iter());
    }

    push_section(out, "KEYWORDS", report.findings_from(FindingSource::Keywords));

    out.push_str("[GEOMETRY]\n");
    if report.objects.is_empty() {
        out.push_str("  no objects parsed\n");
    }
    for object in &report.objects {
        out.push_str(&format!(
            "  {}: {} ({} vertices, {} triangles, {} tetrahedra)\n",
            object.name,
            if object.valid { "valid" } else { "INVALID" },
            object.vertex_count,
            object.triangle_count,
            object.tetrahedron_count
        ));
        for issue in &object.issues {
            push_finding(out, "    ", issue);
        }
    }

    push_section(
        out,
        "IDENTIFIERS",
        report.findings_from(FindingSource::Identifiers),
    );
    if let Some(line) = cross_reference_line(&report.file, &report.cross_reference) {
        out.push_str("  ");
        out.push_str(&line);
        out.push('\n');
    }
}

pub(super) fn detail_report(files: &[FileReport]) -> String {
    let mut out = String::new();
    for report in files {
        push_file(&mut out, report);
    }
    out.push_str(SEPARATOR);
    out.push('\n');
    out.push_str("END OF REPORT\n");
    out
}
