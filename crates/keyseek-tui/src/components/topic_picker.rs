//! Topic picker overlay — a list of suggested topics for quick entry.

use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::action::Action;
use crate::components::Component;
use crate::theme::Theme;

use keyseek_core::criteria::TOPIC_SUGGESTIONS;

pub struct TopicPickerComponent {
    pub visible: bool,
    selected: usize,
}

impl TopicPickerComponent {
    pub fn new() -> Self {
        Self {
            visible: false,
            selected: 0,
        }
    }

    fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
        let vertical = Layout::vertical([
            Constraint::Min(0),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .flex(Flex::Center)
        .split(area);

        let horizontal = Layout::horizontal([
            Constraint::Min(0),
            Constraint::Length(width),
            Constraint::Min(0),
        ])
        .flex(Flex::Center)
        .split(vertical[1]);

        horizontal[1]
    }
}

impl Component for TopicPickerComponent {
    fn handle_action(&mut self, action: &Action) -> Option<Action> {
        match action {
            Action::ToggleTopicPicker => {
                self.visible = !self.visible;
                None
            }
            _ if !self.visible => None,
            Action::SelectNext | Action::FocusNext => {
                if self.selected + 1 < TOPIC_SUGGESTIONS.len() {
                    self.selected += 1;
                }
                None
            }
            Action::SelectPrev | Action::FocusPrev => {
                self.selected = self.selected.saturating_sub(1);
                None
            }
            Action::Confirm | Action::SubmitForm => {
                self.visible = false;
                Some(Action::TopicChosen(
                    TOPIC_SUGGESTIONS[self.selected].to_string(),
                ))
            }
            Action::CloseOverlay => {
                self.visible = false;
                None
            }
            _ => None,
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        if !self.visible {
            return;
        }

        let height = TOPIC_SUGGESTIONS.len() as u16 + 4;
        let dialog = Self::centered_rect(area, 46, height.min(area.height));
        frame.render_widget(Clear, dialog);

        let block = Block::default()
            .title(" Topic Ideas ")
            .title_style(Theme::title())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Theme::accent()));

        let mut lines = vec![Line::from("")];
        for (i, topic) in TOPIC_SUGGESTIONS.iter().enumerate() {
            let (marker, style) = if i == self.selected {
                ("▸ ", Theme::selected())
            } else {
                ("  ", Theme::normal())
            };
            lines.push(Line::from(vec![
                Span::styled(format!("  {marker}"), Theme::key_hint()),
                Span::styled(*topic, style),
            ]));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("  ↑↓", Theme::key_hint()),
            Span::styled(" move  ", Theme::dim()),
            Span::styled("enter", Theme::key_hint()),
            Span::styled(" pick  ", Theme::dim()),
            Span::styled("esc", Theme::key_hint()),
            Span::styled(" close", Theme::dim()),
        ]));

        frame.render_widget(Paragraph::new(lines).block(block), dialog);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_shows_and_hides() {
        let mut picker = TopicPickerComponent::new();
        assert!(!picker.visible);
        picker.handle_action(&Action::ToggleTopicPicker);
        assert!(picker.visible);
        picker.handle_action(&Action::CloseOverlay);
        assert!(!picker.visible);
    }

    #[test]
    fn confirm_emits_selected_topic_and_closes() {
        let mut picker = TopicPickerComponent::new();
        picker.handle_action(&Action::ToggleTopicPicker);
        picker.handle_action(&Action::SelectNext);
        let action = picker.handle_action(&Action::Confirm);
        assert!(!picker.visible);
        assert!(matches!(
            action,
            Some(Action::TopicChosen(topic)) if topic == TOPIC_SUGGESTIONS[1]
        ));
    }

    #[test]
    fn ignores_input_while_hidden() {
        let mut picker = TopicPickerComponent::new();
        assert!(picker.handle_action(&Action::Confirm).is_none());
        assert_eq!(picker.selected, 0);
    }
}
