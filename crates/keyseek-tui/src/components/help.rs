//! Help overlay — keybinding reference.

use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::action::Action;
use crate::components::Component;
use crate::theme::Theme;

pub struct HelpComponent {
    pub visible: bool,
}

impl HelpComponent {
    pub fn new() -> Self {
        Self { visible: false }
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

impl Component for HelpComponent {
    fn handle_action(&mut self, action: &Action) -> Option<Action> {
        match action {
            Action::ToggleHelp => {
                self.visible = !self.visible;
                None
            }
            // Status updates from background tasks are not key presses and
            // must not dismiss an open overlay.
            Action::SetStatus(_) | Action::ClearStatus | Action::Tick => None,
            _ if self.visible => {
                // Any key closes help.
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

        let dialog = Self::centered_rect(area, 55, 20);
        frame.render_widget(Clear, dialog);

        let block = Block::default()
            .title(" Help — Keybindings ")
            .title_style(Theme::title())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Theme::accent()));

        let help_text = vec![
            Line::from(""),
            Line::from(Span::styled("── Form ──", Theme::header())),
            Line::from(""),
            key_line("Tab / Enter", "Next field (Enter submits on last)"),
            key_line("Shift+Tab / Up", "Previous field"),
            key_line("Left / Right", "Move cursor / cycle option"),
            key_line("Ctrl+S", "Generate keywords"),
            key_line("Ctrl+T", "Topic suggestions"),
            key_line("Ctrl+V", "Paste from clipboard"),
            key_line("Ctrl+W", "Delete word"),
            Line::from(""),
            Line::from(Span::styled("── Results ──", Theme::header())),
            Line::from(""),
            key_line("Up / Down / j / k", "Select row"),
            key_line("c / Enter", "Copy keyword"),
            key_line("t", "Copy Google Trends link"),
            key_line("e", "Export results to CSV"),
            key_line("r", "Back to the form"),
            key_line("q / Ctrl+C", "Quit"),
        ];

        let paragraph = Paragraph::new(help_text).block(block);
        frame.render_widget(paragraph, dialog);
    }
}

fn key_line<'a>(key: &'a str, desc: &'a str) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("  {:<22}", key), Theme::selected()),
        Span::styled(desc, Theme::normal()),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_updates_do_not_dismiss_open_help() {
        let mut help = HelpComponent::new();
        help.handle_action(&Action::ToggleHelp);
        assert!(help.visible);

        help.handle_action(&Action::SetStatus("Generated 10 keywords".to_string()));
        assert!(help.visible);
        help.handle_action(&Action::ClearStatus);
        assert!(help.visible);
        help.handle_action(&Action::Tick);
        assert!(help.visible);
    }

    #[test]
    fn any_key_action_closes_open_help() {
        let mut help = HelpComponent::new();
        help.handle_action(&Action::ToggleHelp);
        help.handle_action(&Action::SelectNext);
        assert!(!help.visible);
    }
}
