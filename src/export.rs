use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rust_xlsxwriter::{Workbook, Worksheet};

use crate::state::SeasonId;
use crate::views::{FormResult, SeasonViews, TableRow, VERSUS_PLACEHOLDER};

pub struct ExportReport {
    pub path: PathBuf,
    pub table_rows: usize,
    pub fixture_rows: usize,
    pub scorer_rows: usize,
}

/// Writes one season to a workbook: Table, Fixtures, and Scorers
/// sheets built from the same view models the screen draws.
pub fn export_season(path: &Path, season: SeasonId, views: &SeasonViews) -> Result<ExportReport> {
    let mut table_rows = vec![vec![
        "#".to_string(),
        "Team".to_string(),
        "P".to_string(),
        "W".to_string(),
        "D".to_string(),
        "L".to_string(),
        "GF".to_string(),
        "GA".to_string(),
        "GD".to_string(),
        "Pts".to_string(),
        "Form".to_string(),
    ]];
    for row in &views.table {
        table_rows.push(vec![
            row.rank.to_string(),
            row.name.clone(),
            row.played.to_string(),
            row.won.to_string(),
            row.drawn.to_string(),
            row.lost.to_string(),
            row.goals_for.to_string(),
            row.goals_against.to_string(),
            row.goal_diff_label.clone(),
            row.points.to_string(),
            form_string(row),
        ]);
    }

    let mut fixture_rows = vec![vec![
        "Round".to_string(),
        "Date".to_string(),
        "Home".to_string(),
        "Result".to_string(),
        "Away".to_string(),
        "Venue".to_string(),
    ]];
    for group in &views.fixtures {
        for card in &group.matches {
            fixture_rows.push(vec![
                group.header.clone(),
                card.date.clone(),
                card.home.clone(),
                card.score
                    .clone()
                    .unwrap_or_else(|| VERSUS_PLACEHOLDER.to_string()),
                card.away.clone(),
                card.venue_line.clone(),
            ]);
        }
    }

    let mut scorer_rows = vec![vec![
        "#".to_string(),
        "Team".to_string(),
        "Goals".to_string(),
    ]];
    for row in &views.scorers {
        scorer_rows.push(vec![
            row.rank.to_string(),
            row.name.clone(),
            row.goals.to_string(),
        ]);
    }

    let mut workbook = Workbook::new();
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Table")?;
        write_rows(sheet, &table_rows)?;
    }
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Fixtures")?;
        write_rows(sheet, &fixture_rows)?;
    }
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Scorers")?;
        write_rows(sheet, &scorer_rows)?;
    }

    workbook
        .save(path)
        .with_context(|| format!("failed writing {} workbook to {}", season.key(), path.display()))?;

    Ok(ExportReport {
        path: path.to_path_buf(),
        table_rows: table_rows.len().saturating_sub(1),
        fixture_rows: fixture_rows.len().saturating_sub(1),
        scorer_rows: scorer_rows.len().saturating_sub(1),
    })
}

fn form_string(row: &TableRow) -> String {
    row.form
        .iter()
        .map(|cell| match cell {
            FormResult::Win => 'W',
            FormResult::Draw => 'D',
            FormResult::Loss => 'L',
        })
        .collect()
}

fn write_rows(worksheet: &mut Worksheet, rows: &[Vec<String>]) -> Result<()> {
    for (row_idx, row) in rows.iter().enumerate() {
        for (col_idx, value) in row.iter().enumerate() {
            worksheet
                .write_string(row_idx as u32, col_idx as u16, value)
                .with_context(|| format!("write cell ({row_idx},{col_idx})"))?;
        }
    }
    worksheet.autofit();
    Ok(())
}
