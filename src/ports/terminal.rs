// src/ports/terminal.rs
use crate::constants::NO_RESULTS_MESSAGE;
use crate::domain::catalog::RESULT_COLUMNS;
use crate::domain::{CatalogRecord, Category, MissionInfo, MissionStats, QuizSession, SearchResultPage};
use crate::util::text::plain_text;
use std::collections::BTreeMap;
use std::fmt::Write;

const PROGRESS_WIDTH: usize = 30;

/// Plain-text rendering for the interactive commands.
#[derive(Debug, Default)]
pub struct TerminalPresenter;

impl TerminalPresenter {
    pub fn new() -> Self {
        Self
    }

    pub fn render_question(&self, session: &QuizSession) -> String {
        let Some(question) = session.current_question() else {
            return self.render_final_result(session);
        };

        let mut out = format!(
            "{}\n{} / {}\n\n{}\n\n",
            progress_bar(session.progress_percent()),
            session.current_index() + 1,
            session.total(),
            plain_text(&question.question),
        );
        for (i, option) in question.answer_options.iter().enumerate() {
            let _ = writeln!(out, "  [{}] {}", i + 1, option.text);
        }
        out
    }

    pub fn render_final_result(&self, session: &QuizSession) -> String {
        format!(
            "Final Result\nYou got {} out of {} questions!\n",
            session.score(),
            session.total()
        )
    }

    /// Column-aligned table with a pager line, or the empty-result message.
    pub fn render_results(&self, page: &SearchResultPage) -> String {
        if page.items.is_empty() {
            return format!("{NO_RESULTS_MESSAGE}\n");
        }

        let rows: Vec<Vec<String>> = page
            .items
            .iter()
            .map(|record| RESULT_COLUMNS.iter().map(|c| record.cell(c)).collect())
            .collect();
        let widths: Vec<usize> = RESULT_COLUMNS
            .iter()
            .enumerate()
            .map(|(i, column)| {
                rows.iter()
                    .map(|row| row[i].chars().count())
                    .chain(std::iter::once(column.len()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let mut out = String::new();
        push_row(&mut out, RESULT_COLUMNS.iter().map(|c| c.to_string()), &widths);
        for row in rows {
            push_row(&mut out, row.into_iter(), &widths);
        }

        let pager = page.pager();
        let _ = writeln!(
            out,
            "\n{}Page {} of {}{}",
            if pager.has_prev() { "< prev  " } else { "" },
            page.page,
            pager.total_pages(),
            if pager.has_next() { "  next >" } else { "" },
        );
        out
    }

    /// One line per mission: label and the three category values.
    pub fn render_stats(&self, stats: &[MissionStats], shown: &BTreeMap<String, u64>) -> String {
        let mut out = String::new();
        for entry in stats {
            let _ = write!(out, "{:<8}", entry.mission.label());
            for category in Category::ALL {
                let id = category.value_element_id(entry.mission);
                let value = shown.get(&id).copied().unwrap_or(0);
                let _ = write!(out, "  {}: {:>3} %", category.label(), value);
            }
            out.push('\n');
        }
        out
    }

    pub fn render_missions(&self, missions: &BTreeMap<String, MissionInfo>) -> String {
        let mut out = String::new();
        for (key, info) in missions {
            let _ = writeln!(out, "{} ({key})", info.title);
            if !info.subtitle.is_empty() {
                let _ = writeln!(out, "  {}", info.subtitle);
            }
            if !info.summary.is_empty() {
                let _ = writeln!(out, "  {}", plain_text(&info.summary));
            }
        }
        out
    }

    /// All fields of a record, fixed columns first.
    pub fn render_record(&self, record: &CatalogRecord) -> String {
        let width = record
            .0
            .keys()
            .map(String::len)
            .chain(RESULT_COLUMNS.iter().map(|c| c.len()))
            .max()
            .unwrap_or(0);

        let mut out = String::new();
        for column in RESULT_COLUMNS {
            let _ = writeln!(out, "{column:<width$}  {}", record.cell(column));
        }
        for key in record.0.keys().filter(|k| !RESULT_COLUMNS.contains(&k.as_str())) {
            let _ = writeln!(out, "{key:<width$}  {}", record.cell(key));
        }
        out
    }
}

fn progress_bar(percent: f64) -> String {
    let filled = ((percent / 100.0) * PROGRESS_WIDTH as f64).round() as usize;
    let filled = filled.min(PROGRESS_WIDTH);
    format!("[{}{}]", "#".repeat(filled), ".".repeat(PROGRESS_WIDTH - filled))
}

fn push_row(out: &mut String, cells: impl Iterator<Item = String>, widths: &[usize]) {
    let line = cells
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ");
    out.push_str(line.trim_end());
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::mission::mock_mission_stats;
    use crate::domain::Question;
    use crate::util::testing::result_page;

    #[test]
    fn given_first_question_when_rendering_then_shows_counter_and_numbered_options() {
        // Arrange
        let session = QuizSession::new(vec![Question::new(
            "What does <strong>TESS</strong> stand for?",
            &[("Transiting Exoplanet Survey Satellite", true), ("Other", false)],
        )]);

        // Act
        let out = TerminalPresenter::new().render_question(&session);

        // Assert
        assert!(out.starts_with(&format!("[{}]", ".".repeat(PROGRESS_WIDTH))));
        assert!(out.contains("1 / 1"));
        assert!(out.contains("What does TESS stand for?"));
        assert!(out.contains("  [1] Transiting Exoplanet Survey Satellite"));
        assert!(out.contains("  [2] Other"));
    }

    #[test]
    fn given_finished_session_when_rendering_then_shows_score() {
        let mut session = QuizSession::new(vec![Question::new("Q", &[("A", true)])]);
        session.select(0).unwrap();

        let out = TerminalPresenter::new().render_question(&session);

        assert_eq!(out, "Final Result\nYou got 1 out of 1 questions!\n");
    }

    #[test]
    fn given_empty_page_when_rendering_results_then_shows_no_results() {
        let out = TerminalPresenter::new().render_results(&SearchResultPage::default());

        assert_eq!(out, "No results found.\n");
    }

    #[test]
    fn given_middle_page_when_rendering_results_then_shows_all_columns_and_both_pager_controls() {
        // Arrange
        let page = result_page(2, 2, 2, 6);

        // Act
        let out = TerminalPresenter::new().render_results(&page);

        // Assert
        let header = out.lines().next().unwrap();
        assert!(RESULT_COLUMNS.iter().all(|c| header.contains(c)));
        assert!(out.contains("KOI-3"));
        assert!(out.contains("< prev  Page 2 of 3  next >"));
    }

    #[test]
    fn given_stats_and_shown_values_when_rendering_then_unstarted_counters_read_zero() {
        let stats = mock_mission_stats();
        let mut shown = BTreeMap::new();
        shown.insert("confirmedKepler".to_string(), 29);

        let out = TerminalPresenter::new().render_stats(&stats, &shown);

        let kepler = out.lines().next().unwrap();
        assert!(kepler.starts_with("Kepler"));
        assert!(kepler.contains(" 29 %"));
        assert!(kepler.contains("  0 %"));
    }
}
