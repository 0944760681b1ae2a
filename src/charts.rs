//! PNG chart rendering for analysis reports.
//!
//! Charts mirror the report's summary tables: disclosure counts per
//! kind, message length vs. disclosure count, per-turn sentiment, and
//! persuasive phrase frequency. Charts with no data points are skipped.

use crate::analysis::{aggregate_findings, count_kinds, disclosure_scatter};
use crate::models::{Report, Role};
use anyhow::{Context, Result};
use plotters::prelude::*;
use std::path::{Path, PathBuf};
use tracing::debug;

const CHART_SIZE: (u32, u32) = (800, 500);

/// Render all charts for a report into `out_dir`.
///
/// Returns the paths of the charts actually written.
pub fn render_charts(report: &Report, out_dir: &Path) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create charts directory {}", out_dir.display()))?;

    let mut written = Vec::new();

    if let Some(path) = disclosure_bar_chart(report, out_dir)? {
        written.push(path);
    }
    if let Some(path) = words_vs_disclosures_chart(report, out_dir)? {
        written.push(path);
    }
    if let Some(path) = sentiment_chart(report, out_dir, Role::Victim)? {
        written.push(path);
    }
    if let Some(path) = sentiment_chart(report, out_dir, Role::Scammer)? {
        written.push(path);
    }
    if let Some(path) = phrase_bar_chart(report, out_dir)? {
        written.push(path);
    }

    Ok(written)
}

/// Bar chart of disclosure counts per kind.
fn disclosure_bar_chart(report: &Report, out_dir: &Path) -> Result<Option<PathBuf>> {
    let findings = aggregate_findings(&report.transcripts);
    let counts = count_kinds(&findings);
    if counts.is_empty() {
        debug!("no disclosures, skipping disclosure chart");
        return Ok(None);
    }

    let labels: Vec<String> = counts.iter().map(|(kind, _)| kind.slug().to_string()).collect();
    let values: Vec<usize> = counts.iter().map(|(_, count)| *count).collect();
    let path = out_dir.join("disclosure_counts.png");

    draw_bar_chart(
        &path,
        "Sensitive Information Given Up",
        "Disclosure Kind",
        &labels,
        &values,
    )?;

    Ok(Some(path))
}

/// Bar chart of persuasive phrase frequencies.
fn phrase_bar_chart(report: &Report, out_dir: &Path) -> Result<Option<PathBuf>> {
    let mut counts: std::collections::HashMap<String, usize> = std::collections::HashMap::new();
    for transcript in &report.transcripts {
        for (phrase, count) in &transcript.phrase_counts {
            *counts.entry(phrase.clone()).or_default() += count;
        }
    }
    if counts.is_empty() {
        debug!("no persuasive phrases, skipping phrase chart");
        return Ok(None);
    }

    let mut sorted: Vec<_> = counts.into_iter().collect();
    sorted.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

    let labels: Vec<String> = sorted.iter().map(|(phrase, _)| phrase.clone()).collect();
    let values: Vec<usize> = sorted.iter().map(|(_, count)| *count).collect();
    let path = out_dir.join("phrase_frequency.png");

    draw_bar_chart(
        &path,
        "Persuasive Phrase Frequency",
        "Phrase",
        &labels,
        &values,
    )?;

    Ok(Some(path))
}

/// Scatter of per-victim-turn word count vs. disclosure count.
fn words_vs_disclosures_chart(report: &Report, out_dir: &Path) -> Result<Option<PathBuf>> {
    let points: Vec<(usize, usize)> = report
        .transcripts
        .iter()
        .flat_map(|t| disclosure_scatter(&t.turns))
        .collect();
    if points.is_empty() {
        debug!("no victim turns, skipping scatter chart");
        return Ok(None);
    }

    let path = out_dir.join("words_vs_disclosures.png");
    let x_max = points.iter().map(|(x, _)| *x).max().unwrap_or(1) as f64;
    let y_max = points.iter().map(|(_, y)| *y).max().unwrap_or(1) as f64;

    let root = BitMapBackend::new(&path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Message Length vs. Disclosure Count", ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(50)
        .y_label_area_size(50)
        .build_cartesian_2d(0f64..x_max * 1.1 + 1.0, -0.5f64..y_max + 1.0)?;

    chart
        .configure_mesh()
        .x_desc("Word Count per Message")
        .y_desc("Disclosure Kinds")
        .draw()?;

    chart.draw_series(
        points
            .iter()
            .map(|(x, y)| Circle::new((*x as f64, *y as f64), 6, GREEN.mix(0.7).filled())),
    )?;

    root.present()?;
    drop(chart);
    drop(root);
    Ok(Some(path))
}

/// Scatter of polarity and subjectivity per turn index for one role.
fn sentiment_chart(report: &Report, out_dir: &Path, role: Role) -> Result<Option<PathBuf>> {
    let points: Vec<(usize, f64, f64)> = report
        .transcripts
        .iter()
        .flat_map(|t| t.turns.iter())
        .filter(|t| t.role == role)
        .enumerate()
        .map(|(i, t)| (i, t.sentiment.polarity, t.sentiment.subjectivity))
        .collect();
    if points.is_empty() {
        debug!("no {} turns, skipping sentiment chart", role);
        return Ok(None);
    }

    let path = out_dir.join(format!("{}_sentiment.png", role));
    let x_max = points.len() as f64;

    let root = BitMapBackend::new(&path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!("Sentiment of {} Messages", capitalize(&role.to_string())),
            ("sans-serif", 24),
        )
        .margin(10)
        .x_label_area_size(50)
        .y_label_area_size(50)
        .build_cartesian_2d(-0.5f64..x_max, -1.1f64..1.1f64)?;

    chart
        .configure_mesh()
        .x_desc("Message Index")
        .y_desc("Sentiment Score")
        .draw()?;

    chart
        .draw_series(
            points
                .iter()
                .map(|(i, polarity, _)| Circle::new((*i as f64, *polarity), 6, GREEN.filled())),
        )?
        .label("Polarity")
        .legend(|(x, y)| Circle::new((x, y), 4, GREEN.filled()));

    chart
        .draw_series(points.iter().map(|(i, _, subjectivity)| {
            Circle::new((*i as f64, *subjectivity), 6, RED.mix(0.8).filled())
        }))?
        .label("Subjectivity")
        .legend(|(x, y)| Circle::new((x, y), 4, RED.mix(0.8).filled()));

    chart
        .configure_series_labels()
        .border_style(BLACK)
        .background_style(WHITE.mix(0.8))
        .draw()?;

    root.present()?;
    drop(chart);
    drop(root);
    Ok(Some(path))
}

/// Shared vertical bar chart drawing.
fn draw_bar_chart(
    path: &Path,
    title: &str,
    x_desc: &str,
    labels: &[String],
    values: &[usize],
) -> Result<()> {
    let y_max = values.iter().copied().max().unwrap_or(1) as f64;
    let n = labels.len();

    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(90)
        .y_label_area_size(50)
        .build_cartesian_2d(-0.5f64..n as f64 - 0.5, 0f64..y_max * 1.2 + 0.5)?;

    let labels = labels.to_vec();
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(n)
        .x_label_formatter(&move |x| {
            let i = x.round() as usize;
            labels.get(i).cloned().unwrap_or_default()
        })
        .x_label_style(("sans-serif", 11))
        .x_desc(x_desc)
        .y_desc("Count")
        .draw()?;

    chart.draw_series(values.iter().enumerate().map(|(i, value)| {
        Rectangle::new(
            [(i as f64 - 0.35, 0.0), (i as f64 + 0.35, *value as f64)],
            RED.mix(0.5).filled(),
        )
    }))?;

    // Count labels above each bar
    chart.draw_series(values.iter().enumerate().map(|(i, value)| {
        Text::new(
            value.to_string(),
            (i as f64, *value as f64 + y_max * 0.05),
            ("sans-serif", 14),
        )
    }))?;

    root.present()?;
    Ok(())
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::Analyzer;
    use crate::config::AnalysisConfig;
    use crate::models::{FindingSummary, ReportMetadata};
    use crate::transcript;
    use chrono::Utc;

    fn sample_report() -> Report {
        let analysis = Analyzer::from_config(&AnalysisConfig::default())
            .unwrap()
            .analyze(&transcript::sample());
        let summary = FindingSummary::from_findings(&analysis.findings);

        Report {
            metadata: ReportMetadata {
                source: "sample".to_string(),
                analysis_date: Utc::now(),
                transcripts_analyzed: 1,
                total_turns: analysis.turn_count,
                total_findings: analysis.findings.len(),
                duration_seconds: 0.1,
            },
            transcripts: vec![analysis],
            summary,
            recommendations: Vec::new(),
        }
    }

    #[test]
    #[ignore = "needs system fonts for chart captions"]
    fn test_render_charts_writes_all_five() {
        let report = sample_report();
        let dir = tempfile::tempdir().unwrap();

        let written = render_charts(&report, dir.path()).unwrap();

        assert_eq!(written.len(), 5);
        for path in &written {
            assert!(path.exists(), "missing chart {}", path.display());
            assert!(std::fs::metadata(path).unwrap().len() > 0);
        }
    }

    #[test]
    fn test_empty_report_renders_no_disclosure_chart() {
        let mut report = sample_report();
        report.transcripts.clear();
        let dir = tempfile::tempdir().unwrap();

        let written = render_charts(&report, dir.path()).unwrap();
        assert!(written.is_empty());
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("victim"), "Victim");
        assert_eq!(capitalize(""), "");
    }
}
