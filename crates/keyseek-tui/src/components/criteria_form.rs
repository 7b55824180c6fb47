//! Criteria form — the user enters topic, language, audience, and the
//! optional narrowing fields, then submits one generation request.
//!
//! Features:
//! - Text fields with cursor editing (insert, backspace, Ctrl+W, paste)
//! - Selector fields cycled with Left/Right (language, audience)
//! - Numeric count field with digit entry and Left/Right stepping
//! - Enter advances fields and submits from the last one; Ctrl+S submits
//!   from anywhere; Ctrl+T opens the topic suggestion picker

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::action::Action;
use crate::clipboard;
use crate::components::Component;
use crate::theme::Theme;

use keyseek_core::criteria::LANGUAGE_OPTIONS;
use keyseek_core::{Audience, SearchCriteria};

/// Which form field is currently focused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Topic,
    MainKeyword,
    CompetitorUrl,
    Language,
    Audience,
    Count,
}

const FIELD_ORDER: &[Field] = &[
    Field::Topic,
    Field::MainKeyword,
    Field::CompetitorUrl,
    Field::Language,
    Field::Audience,
    Field::Count,
];

pub struct CriteriaFormComponent {
    /// Search topic — the only required field.
    pub topic: String,
    /// Optional main keyword to narrow generation focus.
    pub main_keyword: String,
    /// Optional competitor video URL.
    pub competitor_url: String,
    /// Requested keyword count, kept as a digit string while editing.
    pub count_input: String,
    /// Index into LANGUAGE_OPTIONS.
    language_idx: usize,
    /// Target audience.
    audience: Audience,
    /// Which field is focused.
    focused: Field,
    /// Cursor position (byte offset) within the focused text field.
    cursor: usize,
    /// Whether a request is outstanding (submit disabled while true).
    pub submitting: bool,
    /// Inline topic-required marker after a rejected submission.
    topic_error: bool,
}

impl CriteriaFormComponent {
    pub fn new(default_count: u8) -> Self {
        Self {
            topic: String::new(),
            main_keyword: String::new(),
            competitor_url: String::new(),
            count_input: default_count.to_string(),
            language_idx: 0,
            audience: Audience::Viet,
            focused: Field::Topic,
            cursor: 0,
            submitting: false,
            topic_error: false,
        }
    }

    /// Whether this component wants to capture raw key input.
    pub fn wants_input(&self) -> bool {
        !self.submitting
    }

    /// Overwrite the topic field (picker selection or CLI prefill).
    pub fn set_topic(&mut self, topic: String) {
        self.cursor = topic.len();
        self.topic = topic;
        self.topic_error = false;
        self.focused = Field::Topic;
    }

    /// Pre-select a language by name, if it is in the option list.
    pub fn set_language(&mut self, language: &str) {
        if let Some(idx) = LANGUAGE_OPTIONS
            .iter()
            .position(|l| l.eq_ignore_ascii_case(language))
        {
            self.language_idx = idx;
        }
    }

    pub fn set_count(&mut self, count: u8) {
        self.count_input = count.clamp(1, 50).to_string();
    }

    fn language(&self) -> &'static str {
        LANGUAGE_OPTIONS[self.language_idx]
    }

    fn focused_text(&self) -> Option<&String> {
        match self.focused {
            Field::Topic => Some(&self.topic),
            Field::MainKeyword => Some(&self.main_keyword),
            Field::CompetitorUrl => Some(&self.competitor_url),
            Field::Count => Some(&self.count_input),
            Field::Language | Field::Audience => None,
        }
    }

    fn focused_text_mut(&mut self) -> Option<&mut String> {
        match self.focused {
            Field::Topic => Some(&mut self.topic),
            Field::MainKeyword => Some(&mut self.main_keyword),
            Field::CompetitorUrl => Some(&mut self.competitor_url),
            Field::Count => Some(&mut self.count_input),
            Field::Language | Field::Audience => None,
        }
    }

    fn clamp_cursor(&mut self) {
        let len = self.focused_text().map(|t| t.len()).unwrap_or(0);
        if self.cursor > len {
            self.cursor = len;
        }
    }

    /// Insert a character at the cursor position. The count field only
    /// accepts digits and is capped at two of them.
    fn insert_char(&mut self, c: char) {
        if self.focused == Field::Count && (!c.is_ascii_digit() || self.count_input.len() >= 2) {
            return;
        }
        self.clamp_cursor();
        let cursor = self.cursor;
        if let Some(input) = self.focused_text_mut() {
            input.insert(cursor, c);
            self.cursor += c.len_utf8();
            if self.focused == Field::Topic {
                self.topic_error = false;
            }
        }
    }

    /// Delete the character before the cursor.
    fn delete_char(&mut self) {
        self.clamp_cursor();
        if self.cursor == 0 {
            return;
        }
        let cursor = self.cursor;
        if let Some(input) = self.focused_text_mut() {
            let prev = input[..cursor]
                .char_indices()
                .next_back()
                .map(|(i, _)| i)
                .unwrap_or(0);
            input.remove(prev);
            self.cursor = prev;
        }
    }

    /// Delete the word before the cursor (Ctrl+W).
    fn delete_word(&mut self) {
        self.clamp_cursor();
        if self.cursor == 0 {
            return;
        }
        let cursor = self.cursor;
        if let Some(input) = self.focused_text_mut() {
            let mut end = cursor;
            while end > 0 && input.as_bytes().get(end - 1) == Some(&b' ') {
                end -= 1;
            }
            let mut start = end;
            while start > 0 && input.as_bytes().get(start - 1) != Some(&b' ') {
                start -= 1;
            }
            input.drain(start..cursor);
            self.cursor = start;
        }
    }

    /// Insert a string at the cursor position (for paste). Text fields are
    /// single-line, so only the first line of the pasted text is used.
    fn insert_str(&mut self, s: &str) {
        let line = s.lines().next().unwrap_or("");
        if line.is_empty() {
            return;
        }
        if self.focused == Field::Count {
            for c in line.chars() {
                self.insert_char(c);
            }
            return;
        }
        self.clamp_cursor();
        let cursor = self.cursor;
        if let Some(input) = self.focused_text_mut() {
            input.insert_str(cursor, line);
            self.cursor += line.len();
        }
    }

    fn cursor_left(&mut self) {
        self.clamp_cursor();
        if let Some(text) = self.focused_text() {
            self.cursor = text[..self.cursor]
                .char_indices()
                .next_back()
                .map(|(i, _)| i)
                .unwrap_or(0);
        }
    }

    fn cursor_right(&mut self) {
        self.clamp_cursor();
        if let Some(text) = self.focused_text() {
            if let Some(c) = text[self.cursor..].chars().next() {
                self.cursor += c.len_utf8();
            }
        }
    }

    fn focus(&mut self, field: Field) {
        self.focused = field;
        self.cursor = self.focused_text().map(|t| t.len()).unwrap_or(0);
    }

    fn next_field(&mut self) {
        let idx = FIELD_ORDER.iter().position(|f| *f == self.focused).unwrap_or(0);
        self.focus(FIELD_ORDER[(idx + 1) % FIELD_ORDER.len()]);
    }

    fn prev_field(&mut self) {
        let idx = FIELD_ORDER.iter().position(|f| *f == self.focused).unwrap_or(0);
        self.focus(FIELD_ORDER[(idx + FIELD_ORDER.len() - 1) % FIELD_ORDER.len()]);
    }

    /// Step a selector or the count field (Left/Right on non-text fields).
    fn step(&mut self, delta: i32) {
        match self.focused {
            Field::Language => {
                let n = LANGUAGE_OPTIONS.len() as i32;
                let idx = (self.language_idx as i32 + delta).rem_euclid(n);
                self.language_idx = idx as usize;
            }
            Field::Audience => {
                self.audience = self.audience.toggle();
            }
            Field::Count => {
                let current: i32 = self.count_input.parse().unwrap_or(10);
                let next = (current + delta).clamp(1, 50);
                self.count_input = next.to_string();
                self.cursor = self.count_input.len();
            }
            _ => {}
        }
    }

    /// Parsed keyword count, clamped to the widget bounds.
    fn count(&self) -> u8 {
        self.count_input.parse::<u8>().unwrap_or(10).clamp(1, 50)
    }

    /// Try to submit the form. An empty topic blocks submission and surfaces
    /// the inline requirement; valid input emits one immutable criteria value.
    fn try_submit(&mut self) -> Option<Action> {
        if self.submitting {
            return None;
        }
        let main_keyword = (!self.main_keyword.trim().is_empty())
            .then(|| self.main_keyword.trim().to_string());
        let competitor_url = (!self.competitor_url.trim().is_empty())
            .then(|| self.competitor_url.trim().to_string());

        match SearchCriteria::new(
            self.language(),
            self.topic.clone(),
            main_keyword,
            self.audience,
            competitor_url,
            self.count(),
        ) {
            Ok(criteria) => {
                self.submitting = true;
                self.topic_error = false;
                Some(Action::SubmitCriteria(Box::new(criteria)))
            }
            Err(_) => {
                self.topic_error = true;
                self.focus(Field::Topic);
                Some(Action::SetStatus("Enter a topic first".to_string()))
            }
        }
    }

    /// Render a bordered single-line text field with cursor.
    #[allow(clippy::too_many_arguments)]
    fn render_text_field(
        text: &str,
        cursor: usize,
        is_focused: bool,
        is_error: bool,
        placeholder: &str,
        title: &str,
        frame: &mut Frame,
        area: Rect,
    ) {
        let border_style = if is_error {
            Style::default().fg(Theme::error())
        } else if is_focused {
            Style::default().fg(Theme::accent())
        } else {
            Theme::border()
        };
        let block = Block::default()
            .title(title)
            .title_style(if is_focused {
                Theme::key_hint()
            } else {
                Theme::muted()
            })
            .borders(Borders::ALL)
            .border_style(border_style);

        let display = if text.is_empty() && !is_focused {
            Paragraph::new(Span::styled(placeholder, Theme::dim()))
        } else if is_focused {
            let pos = cursor.min(text.len());
            let (before, after) = text.split_at(pos);
            let cursor_char = if after.is_empty() {
                " ".to_string()
            } else {
                after.chars().next().unwrap().to_string()
            };
            let rest = if after.len() > cursor_char.len() {
                &after[cursor_char.len()..]
            } else {
                ""
            };
            Paragraph::new(Line::from(vec![
                Span::styled(before, Theme::normal()),
                Span::styled(
                    cursor_char,
                    Style::default().fg(Theme::bg()).bg(Theme::accent()),
                ),
                Span::styled(rest, Theme::normal()),
            ]))
        } else {
            Paragraph::new(Span::styled(text, Theme::normal()))
        };

        frame.render_widget(display.block(block), area);
    }

    /// Render a bordered selector field cycled with Left/Right.
    fn render_selector_field(
        value: &str,
        is_focused: bool,
        title: &str,
        frame: &mut Frame,
        area: Rect,
    ) {
        let border_style = if is_focused {
            Style::default().fg(Theme::accent())
        } else {
            Theme::border()
        };
        let block = Block::default()
            .title(title)
            .title_style(if is_focused {
                Theme::key_hint()
            } else {
                Theme::muted()
            })
            .borders(Borders::ALL)
            .border_style(border_style);

        let line = if is_focused {
            Line::from(vec![
                Span::styled("◂ ", Theme::key_hint()),
                Span::styled(value, Theme::selected()),
                Span::styled(" ▸", Theme::key_hint()),
            ])
        } else {
            Line::from(Span::styled(value, Theme::normal()))
        };

        frame.render_widget(Paragraph::new(line).block(block), area);
    }
}

impl Component for CriteriaFormComponent {
    fn handle_action(&mut self, action: &Action) -> Option<Action> {
        match action {
            // ── Text input ──────────────────────────────────────
            Action::CharInput(c) => {
                self.insert_char(*c);
                None
            }
            Action::BackspaceInput => {
                self.delete_char();
                None
            }
            Action::DeleteWord => {
                self.delete_word();
                None
            }
            Action::PasteInput => {
                if let Some(text) = clipboard::paste() {
                    self.insert_str(&text);
                }
                None
            }
            Action::PasteBulk(text) => {
                self.insert_str(text);
                None
            }
            Action::CursorLeft => {
                if self.focused_text().is_some() && self.focused != Field::Count {
                    self.cursor_left();
                } else {
                    self.step(-1);
                }
                None
            }
            Action::CursorRight => {
                if self.focused_text().is_some() && self.focused != Field::Count {
                    self.cursor_right();
                } else {
                    self.step(1);
                }
                None
            }

            // ── Focus movement ──────────────────────────────────
            Action::SwitchInputField => {
                self.next_field();
                None
            }
            Action::FocusNext => {
                // Enter on the last field submits; elsewhere it advances.
                if self.focused == Field::Count {
                    self.try_submit()
                } else {
                    self.next_field();
                    None
                }
            }
            Action::FocusPrev => {
                self.prev_field();
                None
            }

            // ── Submission ──────────────────────────────────────
            Action::SubmitForm => self.try_submit(),

            // ── Picker result ───────────────────────────────────
            Action::TopicChosen(topic) => {
                self.set_topic(topic.clone());
                Some(Action::SetStatus(format!("Topic set to \"{topic}\"")))
            }

            // ── Request settled ─────────────────────────────────
            Action::KeywordsGenerated { .. }
            | Action::GenerationFailed { .. }
            | Action::Reset => {
                self.submitting = false;
                None
            }

            _ => None,
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(" New Keyword Search ")
            .title_style(Theme::title())
            .borders(Borders::ALL)
            .border_style(Theme::dim());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::vertical([
            Constraint::Length(3), // Topic
            Constraint::Length(3), // Main keyword
            Constraint::Length(3), // Competitor URL
            Constraint::Length(3), // Language / audience / count row
            Constraint::Length(2), // Instructions
            Constraint::Min(0),
        ])
        .split(inner);

        let editable = self.wants_input();

        let topic_title = if self.topic_error {
            " Topic (required!) "
        } else {
            " Topic (required) "
        };
        Self::render_text_field(
            &self.topic,
            self.cursor,
            editable && self.focused == Field::Topic,
            self.topic_error,
            "e.g. Sinh tồn hoang dã, Mukbang AI  (Ctrl+T for ideas)",
            topic_title,
            frame,
            chunks[0],
        );

        Self::render_text_field(
            &self.main_keyword,
            self.cursor,
            editable && self.focused == Field::MainKeyword,
            false,
            "e.g. xây nhà trú ẩn, ăn đồ siêu cay",
            " Main Keyword (optional) ",
            frame,
            chunks[1],
        );

        Self::render_text_field(
            &self.competitor_url,
            self.cursor,
            editable && self.focused == Field::CompetitorUrl,
            false,
            "https://www.youtube.com/watch?v=...",
            " Competitor Video URL (optional) ",
            frame,
            chunks[2],
        );

        let row = Layout::horizontal([
            Constraint::Percentage(40),
            Constraint::Percentage(35),
            Constraint::Percentage(25),
        ])
        .split(chunks[3]);

        Self::render_selector_field(
            self.language(),
            editable && self.focused == Field::Language,
            " Language ",
            frame,
            row[0],
        );
        Self::render_selector_field(
            self.audience.label(),
            editable && self.focused == Field::Audience,
            " Audience ",
            frame,
            row[1],
        );
        Self::render_text_field(
            &self.count_input,
            self.cursor,
            editable && self.focused == Field::Count,
            false,
            "10",
            " Keywords (1-50) ",
            frame,
            row[2],
        );

        let hints = if self.submitting {
            Paragraph::new(Line::from(Span::styled(
                "  Generating keywords...",
                Style::default().fg(Theme::warning()),
            )))
        } else {
            Paragraph::new(Line::from(vec![
                Span::styled("  ctrl+s", Theme::key_hint()),
                Span::styled(" search  ", Theme::dim()),
                Span::styled("enter/tab", Theme::key_hint()),
                Span::styled(" next field  ", Theme::dim()),
                Span::styled("←→", Theme::key_hint()),
                Span::styled(" cycle option  ", Theme::dim()),
                Span::styled("ctrl+t", Theme::key_hint()),
                Span::styled(" topic ideas", Theme::dim()),
            ]))
        };
        frame.render_widget(hints, chunks[4]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_str(form: &mut CriteriaFormComponent, s: &str) {
        for c in s.chars() {
            form.handle_action(&Action::CharInput(c));
        }
    }

    #[test]
    fn empty_topic_blocks_submission() {
        let mut form = CriteriaFormComponent::new(10);
        let action = form.handle_action(&Action::SubmitForm);
        assert!(matches!(action, Some(Action::SetStatus(_))));
        assert!(form.topic_error);
        assert!(!form.submitting);
    }

    #[test]
    fn valid_submission_emits_criteria_and_locks_the_form() {
        let mut form = CriteriaFormComponent::new(10);
        type_str(&mut form, "Sinh tồn hoang dã");
        let action = form.handle_action(&Action::SubmitForm);

        let Some(Action::SubmitCriteria(criteria)) = action else {
            panic!("expected SubmitCriteria, got {action:?}");
        };
        assert_eq!(criteria.topic, "Sinh tồn hoang dã");
        assert_eq!(criteria.language, "Vietnamese");
        assert_eq!(criteria.keyword_count, 10);
        assert_eq!(criteria.main_keyword, None);
        assert!(form.submitting);

        // A second submit is ignored while the request is in flight.
        assert!(form.handle_action(&Action::SubmitForm).is_none());
    }

    #[test]
    fn settled_request_unlocks_the_form() {
        let mut form = CriteriaFormComponent::new(10);
        type_str(&mut form, "topic");
        form.handle_action(&Action::SubmitForm);
        assert!(form.submitting);
        form.handle_action(&Action::GenerationFailed {
            seq: 1,
            error: "boom".to_string(),
        });
        assert!(!form.submitting);
    }

    #[test]
    fn typing_clears_the_topic_error() {
        let mut form = CriteriaFormComponent::new(10);
        form.handle_action(&Action::SubmitForm);
        assert!(form.topic_error);
        form.handle_action(&Action::CharInput('a'));
        assert!(!form.topic_error);
    }

    #[test]
    fn tab_cycles_and_enter_submits_from_the_last_field() {
        let mut form = CriteriaFormComponent::new(10);
        type_str(&mut form, "topic");
        for _ in 0..FIELD_ORDER.len() - 1 {
            assert!(form.handle_action(&Action::FocusNext).is_none());
        }
        // Focus is now on the count field; Enter submits.
        let action = form.handle_action(&Action::FocusNext);
        assert!(matches!(action, Some(Action::SubmitCriteria(_))));
    }

    #[test]
    fn count_field_accepts_digits_only_and_steps_within_bounds() {
        let mut form = CriteriaFormComponent::new(10);
        form.focus(Field::Count);
        form.count_input.clear();
        form.handle_action(&Action::CharInput('4'));
        form.handle_action(&Action::CharInput('x'));
        form.handle_action(&Action::CharInput('9'));
        assert_eq!(form.count_input, "49");
        form.handle_action(&Action::CursorRight);
        assert_eq!(form.count_input, "50");
        form.handle_action(&Action::CursorRight);
        assert_eq!(form.count_input, "50");
    }

    #[test]
    fn selectors_cycle_with_left_and_right() {
        let mut form = CriteriaFormComponent::new(10);
        form.focus(Field::Language);
        form.handle_action(&Action::CursorRight);
        assert_eq!(form.language(), "English");
        form.handle_action(&Action::CursorLeft);
        assert_eq!(form.language(), "Vietnamese");
        form.handle_action(&Action::CursorLeft);
        assert_eq!(form.language(), LANGUAGE_OPTIONS[LANGUAGE_OPTIONS.len() - 1]);

        form.focus(Field::Audience);
        form.handle_action(&Action::CursorRight);
        assert_eq!(form.audience, Audience::Foreign);
    }

    #[test]
    fn word_editing_respects_multibyte_boundaries() {
        let mut form = CriteriaFormComponent::new(10);
        type_str(&mut form, "sinh tồn");
        form.handle_action(&Action::BackspaceInput);
        assert_eq!(form.topic, "sinh tồ");
        form.handle_action(&Action::DeleteWord);
        assert_eq!(form.topic, "sinh ");
    }

    #[test]
    fn chosen_topic_overwrites_the_field() {
        let mut form = CriteriaFormComponent::new(10);
        type_str(&mut form, "old");
        let action = form.handle_action(&Action::TopicChosen("Mukbang AI".to_string()));
        assert_eq!(form.topic, "Mukbang AI");
        assert!(matches!(action, Some(Action::SetStatus(_))));
    }
}
