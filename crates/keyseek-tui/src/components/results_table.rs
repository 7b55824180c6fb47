//! Results table — shows generated keywords with copy, trend-link,
//! and CSV export actions.
//!
//! The table has four display states: loading (spinner while the request
//! is in flight), error (request failed, offer retry), empty (request
//! succeeded with zero keywords), and populated.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};
use ratatui::Frame;
use tracing::warn;

use crate::action::Action;
use crate::clipboard;
use crate::components::Component;
use crate::theme::Theme;

use keyseek_core::export::write_csv;
use keyseek_core::trends::trend_url;
use keyseek_core::{KeywordResult, SearchCriteria};

/// Braille spinner frames.
const SPINNER: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// How long the "copied" marker stays on a row.
const COPIED_MARKER_TTL: Duration = Duration::from_secs(2);

pub struct ResultsTableComponent {
    /// The criteria that produced the current results.
    pub criteria: Option<SearchCriteria>,
    /// Generated keywords.
    pub results: Vec<KeywordResult>,
    /// Whether a request is in flight.
    pub loading: bool,
    /// Error message from a failed request.
    pub error: Option<String>,
    /// Currently selected row.
    pub selected: usize,
    /// Row index with a visible "copied" marker and when it was set.
    copied: Option<(usize, Instant)>,
    /// Animation counter for the spinner.
    spinner_tick: usize,
    /// Directory CSV exports are written into.
    export_dir: PathBuf,
}

impl ResultsTableComponent {
    pub fn new(export_dir: PathBuf) -> Self {
        Self {
            criteria: None,
            results: Vec::new(),
            loading: false,
            error: None,
            selected: 0,
            copied: None,
            spinner_tick: 0,
            export_dir,
        }
    }

    /// A new request started for the given criteria.
    pub fn begin(&mut self, criteria: SearchCriteria) {
        self.criteria = Some(criteria);
        self.results.clear();
        self.loading = true;
        self.error = None;
        self.selected = 0;
        self.copied = None;
    }

    fn selected_keyword(&self) -> Option<&KeywordResult> {
        self.results.get(self.selected)
    }

    /// Put the "copied" marker on `row`, restarting its timer. There is only
    /// one marker; copying another row moves it.
    fn mark_copied(&mut self, row: usize) {
        self.copied = Some((row, Instant::now()));
    }

    /// Copy the selected keyword text to the clipboard and mark the row.
    fn copy_selected_keyword(&mut self) -> Option<Action> {
        let result = self.selected_keyword()?;
        let keyword = result.keyword.clone();
        match clipboard::copy(&keyword) {
            Ok(()) => {
                self.mark_copied(self.selected);
                Some(Action::SetStatus(format!("Copied \"{keyword}\"")))
            }
            Err(e) => {
                warn!(error = %e, "clipboard copy failed");
                Some(Action::SetStatus(format!("Copy failed: {e}")))
            }
        }
    }

    /// Copy the selected keyword's Google Trends URL to the clipboard.
    fn copy_selected_trend_link(&mut self) -> Option<Action> {
        let criteria = self.criteria.as_ref()?;
        let result = self.selected_keyword()?;
        let url = trend_url(&result.keyword, criteria.audience);
        match clipboard::copy(&url) {
            Ok(()) => Some(Action::SetStatus("Copied trend link".to_string())),
            Err(e) => {
                warn!(error = %e, "clipboard copy failed");
                Some(Action::SetStatus(format!("Copy failed: {e}")))
            }
        }
    }

    /// Export the current results to a CSV file in the export directory.
    fn export_csv(&self) -> Option<Action> {
        let Some(criteria) = self.criteria.as_ref() else {
            return Some(Action::SetStatus("Nothing to export".to_string()));
        };
        if self.results.is_empty() {
            return Some(Action::SetStatus("Nothing to export".to_string()));
        }
        match write_csv(&self.export_dir, criteria, &self.results) {
            Ok(path) => Some(Action::SetStatus(format!(
                "Exported to {}",
                path.display()
            ))),
            Err(e) => {
                warn!(error = %e, "csv export failed");
                Some(Action::SetStatus(format!("Export failed: {e}")))
            }
        }
    }

    fn render_loading(&self, frame: &mut Frame, area: Rect) {
        let spinner = SPINNER[self.spinner_tick % SPINNER.len()];
        let topic = self
            .criteria
            .as_ref()
            .map(|c| c.topic.as_str())
            .unwrap_or("");
        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                format!("  {spinner} Generating keywords for \"{topic}\"..."),
                Style::default().fg(Theme::warning()),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "  This usually takes a few seconds.",
                Theme::dim(),
            )),
        ];
        frame.render_widget(Paragraph::new(lines), area);
    }

    fn render_error(&self, error: &str, frame: &mut Frame, area: Rect) {
        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                "  Generation failed",
                Style::default().fg(Theme::error()),
            )),
            Line::from(""),
            Line::from(Span::styled(format!("  {error}"), Theme::normal())),
            Line::from(""),
            Line::from(vec![
                Span::styled("  r", Theme::key_hint()),
                Span::styled(" back to form to retry", Theme::dim()),
            ]),
        ];
        frame.render_widget(Paragraph::new(lines), area);
    }

    fn render_empty(&self, frame: &mut Frame, area: Rect) {
        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                "  The model returned no keywords.",
                Theme::muted(),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("  r", Theme::key_hint()),
                Span::styled(" back to form to adjust the criteria", Theme::dim()),
            ]),
        ];
        frame.render_widget(Paragraph::new(lines), area);
    }

    fn render_table(&self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::vertical([
            Constraint::Length(1), // Summary line
            Constraint::Min(4),    // Table
            Constraint::Length(1), // Key hints
        ])
        .split(area);

        let criteria = self.criteria.as_ref();
        let summary = criteria
            .map(|c| {
                format!(
                    "  {} keywords for \"{}\" · {} · {}",
                    self.results.len(),
                    c.topic,
                    c.language,
                    c.audience.label(),
                )
            })
            .unwrap_or_default();
        frame.render_widget(
            Paragraph::new(Span::styled(summary, Theme::muted())),
            chunks[0],
        );

        let has_translations = self.results.iter().any(|r| r.vietnamese_translation.is_some());
        let audience = criteria.map(|c| c.audience).unwrap_or_default();

        let header = Row::new(vec![
            Cell::from(" # "),
            Cell::from("Keyword"),
            Cell::from("Trend Link"),
        ])
        .style(Theme::header());

        let url_max = (area.width as usize).saturating_sub(40).max(20);
        let rows: Vec<Row> = self
            .results
            .iter()
            .enumerate()
            .map(|(i, result)| {
                let style = if i == self.selected {
                    Theme::selected()
                } else {
                    Theme::normal()
                };

                let mut keyword = result.keyword.clone();
                if has_translations {
                    if let Some(ref translation) = result.vietnamese_translation {
                        keyword.push_str(&format!(" ({translation})"));
                    }
                }
                if self.copied.is_some_and(|(row, _)| row == i) {
                    keyword.push_str("  ✓ copied");
                }

                Row::new(vec![
                    Cell::from(format!("{:>3}", i + 1)),
                    Cell::from(keyword),
                    Cell::from(Span::styled(
                        truncate(&trend_url(&result.keyword, audience), url_max),
                        if i == self.selected {
                            Theme::selected()
                        } else {
                            Theme::dim()
                        },
                    )),
                ])
                .style(style)
            })
            .collect();

        let table = Table::new(
            rows,
            [
                Constraint::Length(4),
                Constraint::Min(20),
                Constraint::Percentage(45),
            ],
        )
        .header(header)
        .block(
            Block::default()
                .title(" Generated Keywords ")
                .title_style(Theme::title())
                .borders(Borders::ALL)
                .border_style(Theme::border()),
        );
        frame.render_widget(table, chunks[1]);

        let hints = Line::from(vec![
            Span::styled("  ↑↓", Theme::key_hint()),
            Span::styled(" select  ", Theme::dim()),
            Span::styled("c/enter", Theme::key_hint()),
            Span::styled(" copy keyword  ", Theme::dim()),
            Span::styled("t", Theme::key_hint()),
            Span::styled(" copy trend link  ", Theme::dim()),
            Span::styled("e", Theme::key_hint()),
            Span::styled(" export csv  ", Theme::dim()),
            Span::styled("r", Theme::key_hint()),
            Span::styled(" new search", Theme::dim()),
        ]);
        frame.render_widget(Paragraph::new(hints), chunks[2]);
    }
}

impl Component for ResultsTableComponent {
    fn handle_action(&mut self, action: &Action) -> Option<Action> {
        match action {
            Action::Tick => {
                if self.loading {
                    self.spinner_tick = self.spinner_tick.wrapping_add(1);
                }
                // The "copied" marker reverts on its own after a moment.
                if let Some((_, since)) = self.copied {
                    if since.elapsed() >= COPIED_MARKER_TTL {
                        self.copied = None;
                    }
                }
                None
            }
            Action::KeywordsGenerated { results, .. } => {
                self.loading = false;
                self.error = None;
                self.results = results.clone();
                self.selected = 0;
                None
            }
            Action::GenerationFailed { error, .. } => {
                self.loading = false;
                self.error = Some(error.clone());
                None
            }
            Action::SelectNext => {
                if !self.results.is_empty() && self.selected + 1 < self.results.len() {
                    self.selected += 1;
                }
                None
            }
            Action::SelectPrev => {
                self.selected = self.selected.saturating_sub(1);
                None
            }
            Action::CloseOverlay => {
                // Esc on a failed request backs out to the form.
                if self.error.is_some() {
                    Some(Action::Reset)
                } else {
                    None
                }
            }
            Action::Confirm | Action::CopyKeyword => self.copy_selected_keyword(),
            Action::CopyTrendLink => self.copy_selected_trend_link(),
            Action::ExportCsv => self.export_csv(),
            Action::Reset => {
                self.criteria = None;
                self.results.clear();
                self.loading = false;
                self.error = None;
                self.selected = 0;
                self.copied = None;
                None
            }
            _ => None,
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        if self.loading {
            self.render_loading(frame, area);
        } else if let Some(ref error) = self.error {
            self.render_error(error, frame, area);
        } else if self.results.is_empty() {
            self.render_empty(frame, area);
        } else {
            self.render_table(frame, area);
        }
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use keyseek_core::Audience;

    fn criteria() -> SearchCriteria {
        SearchCriteria::new("English", "survival", None, Audience::Foreign, None, 5).unwrap()
    }

    fn results() -> Vec<KeywordResult> {
        vec![
            KeywordResult {
                keyword: "jungle survival".to_string(),
                vietnamese_translation: Some("sinh tồn rừng".to_string()),
            },
            KeywordResult {
                keyword: "desert survival".to_string(),
                vietnamese_translation: None,
            },
        ]
    }

    #[test]
    fn begin_clears_previous_state() {
        let mut table = ResultsTableComponent::new(PathBuf::from("."));
        table.results = results();
        table.error = Some("old".to_string());
        table.selected = 1;

        table.begin(criteria());
        assert!(table.loading);
        assert!(table.results.is_empty());
        assert!(table.error.is_none());
        assert_eq!(table.selected, 0);
    }

    #[test]
    fn generated_results_replace_loading_state() {
        let mut table = ResultsTableComponent::new(PathBuf::from("."));
        table.begin(criteria());
        table.handle_action(&Action::KeywordsGenerated {
            seq: 1,
            results: results(),
        });
        assert!(!table.loading);
        assert_eq!(table.results.len(), 2);
    }

    #[test]
    fn failure_keeps_error_message() {
        let mut table = ResultsTableComponent::new(PathBuf::from("."));
        table.begin(criteria());
        table.handle_action(&Action::GenerationFailed {
            seq: 1,
            error: "network unreachable".to_string(),
        });
        assert!(!table.loading);
        assert_eq!(table.error.as_deref(), Some("network unreachable"));
    }

    #[test]
    fn esc_on_error_state_backs_out_to_the_form() {
        let mut table = ResultsTableComponent::new(PathBuf::from("."));
        table.begin(criteria());
        table.handle_action(&Action::GenerationFailed {
            seq: 1,
            error: "boom".to_string(),
        });
        let action = table.handle_action(&Action::CloseOverlay);
        assert!(matches!(action, Some(Action::Reset)));

        // Esc on a populated table does nothing.
        table.handle_action(&Action::KeywordsGenerated {
            seq: 1,
            results: results(),
        });
        table.error = None;
        assert!(table.handle_action(&Action::CloseOverlay).is_none());
    }

    #[test]
    fn selection_stays_in_bounds() {
        let mut table = ResultsTableComponent::new(PathBuf::from("."));
        table.begin(criteria());
        table.handle_action(&Action::KeywordsGenerated {
            seq: 1,
            results: results(),
        });

        table.handle_action(&Action::SelectPrev);
        assert_eq!(table.selected, 0);
        table.handle_action(&Action::SelectNext);
        table.handle_action(&Action::SelectNext);
        table.handle_action(&Action::SelectNext);
        assert_eq!(table.selected, 1);
    }

    #[test]
    fn export_with_no_results_reports_nothing() {
        let mut table = ResultsTableComponent::new(PathBuf::from("."));
        table.begin(criteria());
        table.handle_action(&Action::KeywordsGenerated {
            seq: 1,
            results: vec![],
        });
        let action = table.handle_action(&Action::ExportCsv);
        assert!(matches!(
            action,
            Some(Action::SetStatus(msg)) if msg == "Nothing to export"
        ));
    }

    #[test]
    fn export_writes_file_into_export_dir() {
        let dir = tempfile::tempdir().unwrap();
        let mut table = ResultsTableComponent::new(dir.path().to_path_buf());
        table.begin(criteria());
        table.handle_action(&Action::KeywordsGenerated {
            seq: 1,
            results: results(),
        });
        let action = table.handle_action(&Action::ExportCsv);
        assert!(matches!(action, Some(Action::SetStatus(msg)) if msg.starts_with("Exported")));
        assert!(dir.path().join("survival.csv").exists());
    }

    #[test]
    fn second_copy_moves_the_marker_to_the_new_row() {
        let mut table = ResultsTableComponent::new(PathBuf::from("."));
        table.begin(criteria());
        table.handle_action(&Action::KeywordsGenerated {
            seq: 1,
            results: results(),
        });
        table.mark_copied(0);
        table.mark_copied(1);
        assert!(matches!(table.copied, Some((1, _))));

        // The marker survives ticks until its own timer elapses.
        table.handle_action(&Action::Tick);
        assert!(matches!(table.copied, Some((1, _))));
    }

    #[test]
    fn copied_marker_expires_on_tick() {
        let mut table = ResultsTableComponent::new(PathBuf::from("."));
        table.begin(criteria());
        table.handle_action(&Action::KeywordsGenerated {
            seq: 1,
            results: results(),
        });
        table.copied = Some((0, Instant::now() - Duration::from_secs(3)));
        table.handle_action(&Action::Tick);
        assert!(table.copied.is_none());
    }
}
