//! Status bar at the bottom of the TUI.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::action::{Action, View};
use crate::components::Component;
use crate::theme::Theme;

pub struct StatusBarComponent {
    /// Current status message.
    pub message: String,
    /// Which view is active, shown as the left badge. The app keeps this
    /// in sync after every action.
    pub view: View,
}

impl StatusBarComponent {
    pub fn new() -> Self {
        Self {
            message: "Fill in a topic and press Ctrl+S to generate keywords.".to_string(),
            view: View::Criteria,
        }
    }

    fn badge(&self) -> &'static str {
        match self.view {
            View::Criteria => "Form",
            View::Results => "Results",
        }
    }
}

impl Component for StatusBarComponent {
    fn handle_action(&mut self, action: &Action) -> Option<Action> {
        match action {
            Action::SetStatus(msg) => {
                self.message = msg.clone();
                None
            }
            Action::ClearStatus => {
                self.message.clear();
                None
            }
            _ => None,
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let width = area.width as usize;

        // Right side: compact key hints
        let hints = "?·ctrl+c";
        let hints_len = hints.chars().count() + 1; // +1 for trailing space

        let badge = self.badge();
        let badge_len = badge.len() + 2; // spaces around badge

        // Truncate message to remaining space. Messages can contain
        // Vietnamese, so truncate on char boundaries.
        let msg_budget = width
            .saturating_sub(badge_len)
            .saturating_sub(hints_len)
            .saturating_sub(4); // separators and spacing

        let msg_chars = self.message.chars().count();
        let msg = if msg_chars > msg_budget {
            if msg_budget > 3 {
                let cut: String = self.message.chars().take(msg_budget - 3).collect();
                format!("{cut}...")
            } else {
                String::new()
            }
        } else {
            self.message.clone()
        };

        // Pad to push hints to the right edge
        let used = badge_len + 2 + msg.chars().count();
        let pad = width.saturating_sub(used + hints_len);

        let line = Line::from(vec![
            Span::styled(format!(" {} ", badge), Theme::muted()),
            Span::styled("  ", Theme::dim()),
            Span::styled(msg, Theme::dim()),
            Span::raw(" ".repeat(pad)),
            Span::styled(hints, Theme::key_hint()),
            Span::raw(" "),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }
}
