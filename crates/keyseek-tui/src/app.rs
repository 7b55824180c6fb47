//! Main application state and render loop.

use crossterm::{
    event::{DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Terminal;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, error, info};

use keyseek_core::SearchCriteria;
use keyseek_gemini::GeminiClient;

use crate::action::{Action, InputMode, View};
use crate::components::criteria_form::CriteriaFormComponent;
use crate::components::help::HelpComponent;
use crate::components::results_table::ResultsTableComponent;
use crate::components::status_bar::StatusBarComponent;
use crate::components::topic_picker::TopicPickerComponent;
use crate::components::Component;
use crate::event::{self, EventHandler, InputModeFlag};
use crate::theme::Theme;

/// Main application state.
pub struct App {
    /// Which view is active.
    view: View,
    /// Whether the app should exit.
    should_quit: bool,
    /// Shared flag to tell the EventHandler which key-mapping to use.
    input_mode_flag: InputModeFlag,
    /// Gemini API client (shared with spawned request tasks).
    client: Arc<GeminiClient>,
    /// Monotonic request counter. Completion actions carry the sequence
    /// number of the request that produced them; results from a superseded
    /// request are dropped instead of overwriting newer state.
    request_seq: u64,

    // Components
    criteria_form: CriteriaFormComponent,
    results_table: ResultsTableComponent,
    topic_picker: TopicPickerComponent,
    status_bar: StatusBarComponent,
    help: HelpComponent,
}

impl App {
    pub fn new(client: GeminiClient, default_count: u8, export_dir: PathBuf) -> Self {
        Self {
            view: View::Criteria,
            should_quit: false,
            input_mode_flag: event::new_input_mode_flag(),
            client: Arc::new(client),
            request_seq: 0,
            criteria_form: CriteriaFormComponent::new(default_count),
            results_table: ResultsTableComponent::new(export_dir),
            topic_picker: TopicPickerComponent::new(),
            status_bar: StatusBarComponent::new(),
            help: HelpComponent::new(),
        }
    }

    /// Pre-fill the topic from CLI args.
    pub fn set_initial_topic(&mut self, topic: String) {
        self.criteria_form.set_topic(topic);
    }

    /// Pre-select the language from CLI args.
    pub fn set_initial_language(&mut self, language: &str) {
        self.criteria_form.set_language(language);
    }

    /// Pre-set the keyword count from CLI args.
    pub fn set_initial_count(&mut self, count: u8) {
        self.criteria_form.set_count(count);
    }

    /// Run the TUI application.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        // Set up terminal.
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(
            stdout,
            EnterAlternateScreen,
            EnableMouseCapture,
            EnableBracketedPaste
        )?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        // Create the action channel.
        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();

        // Start the event handler with the shared input mode flag.
        let event_tx = tx.clone();
        let mode_flag = self.input_mode_flag.clone();
        let event_handler = EventHandler::new(event_tx, Duration::from_millis(100), mode_flag);
        tokio::spawn(async move {
            event_handler.run().await;
        });

        // The form starts focused, so begin in editing mode.
        self.sync_input_mode();

        // Main loop.
        loop {
            terminal.draw(|frame| {
                self.render(frame);
            })?;

            if let Some(action) = rx.recv().await {
                self.handle_action(&action, &tx);

                if self.should_quit {
                    break;
                }
            }
        }

        // Restore terminal.
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture,
            DisableBracketedPaste
        )?;
        terminal.show_cursor()?;

        Ok(())
    }

    /// Determine and set the correct input mode based on the current view
    /// and component state. Called after every action.
    fn sync_input_mode(&self) {
        let mode = self.current_input_mode();
        event::set_input_mode(&self.input_mode_flag, mode);
    }

    /// What input mode should be active right now?
    fn current_input_mode(&self) -> InputMode {
        // Overlays use normal-mode keys (Esc, arrows, Enter).
        if self.help.visible || self.topic_picker.visible {
            return InputMode::Normal;
        }

        match self.view {
            View::Criteria => {
                if self.criteria_form.wants_input() {
                    InputMode::Editing
                } else {
                    InputMode::Normal
                }
            }
            View::Results => InputMode::Normal,
        }
    }

    /// Dispatch an action to all relevant components.
    fn handle_action(&mut self, action: &Action, tx: &mpsc::UnboundedSender<Action>) {
        // Global actions first.
        match action {
            Action::Quit => {
                self.should_quit = true;
                return;
            }
            Action::SubmitCriteria(criteria) => {
                self.begin_generation(criteria, tx);
            }
            Action::KeywordsGenerated { seq, .. } | Action::GenerationFailed { seq, .. } => {
                // A newer request supersedes this one; drop the result.
                if *seq != self.request_seq {
                    debug!(seq, current = self.request_seq, "dropping stale response");
                    self.sync_input_mode();
                    return;
                }
            }
            Action::Reset => {
                self.view = View::Criteria;
            }
            _ => {}
        }

        match action {
            // Lifecycle actions reach both main components regardless of
            // which view is active.
            Action::Tick => {
                self.results_table.handle_action(action);
            }
            Action::KeywordsGenerated { .. } | Action::GenerationFailed { .. } | Action::Reset => {
                self.criteria_form.handle_action(action);
                self.results_table.handle_action(action);
            }
            _ => {
                // Input actions go to exactly one target, overlays first.
                let chained = if self.help.visible || matches!(action, Action::ToggleHelp) {
                    self.help.handle_action(action)
                } else if self.topic_picker.visible
                    || matches!(action, Action::ToggleTopicPicker)
                {
                    self.topic_picker.handle_action(action)
                } else {
                    match self.view {
                        View::Criteria => self.criteria_form.handle_action(action),
                        View::Results => self.results_table.handle_action(action),
                    }
                };

                if let Some(chained) = chained {
                    self.handle_action(&chained, tx);
                }
            }
        }

        self.status_bar.handle_action(action);
        self.status_bar.view = self.view;

        // Sync input mode after every action (view or component state
        // may have changed).
        self.sync_input_mode();
    }

    /// Start a generation request: switch to the results view in its loading
    /// state and spawn the API call.
    fn begin_generation(&mut self, criteria: &SearchCriteria, tx: &mpsc::UnboundedSender<Action>) {
        self.request_seq += 1;
        let seq = self.request_seq;
        self.view = View::Results;
        self.results_table.begin(criteria.clone());

        let _ = tx.send(Action::SetStatus(format!(
            "Generating {} keywords for \"{}\"...",
            criteria.keyword_count, criteria.topic
        )));

        let client = self.client.clone();
        let criteria = criteria.clone();
        let tx = tx.clone();
        tokio::spawn(async move {
            match client.generate_keywords(&criteria).await {
                Ok(results) => {
                    info!(count = results.len(), "keywords generated");
                    let _ = tx.send(Action::SetStatus(format!(
                        "Generated {} keywords",
                        results.len()
                    )));
                    let _ = tx.send(Action::KeywordsGenerated { seq, results });
                }
                Err(e) => {
                    error!(error = %e, "keyword generation failed");
                    let _ = tx.send(Action::SetStatus("Generation failed".to_string()));
                    let _ = tx.send(Action::GenerationFailed {
                        seq,
                        error: e.to_string(),
                    });
                }
            }
        });
    }

    /// Render the full UI.
    fn render(&self, frame: &mut ratatui::Frame) {
        let area = frame.area();

        let chunks = Layout::vertical([
            Constraint::Length(1), // Title bar
            Constraint::Min(10),   // Main content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

        self.render_title(frame, chunks[0]);

        match self.view {
            View::Criteria => self.criteria_form.render(frame, chunks[1]),
            View::Results => self.results_table.render(frame, chunks[1]),
        }

        self.status_bar.render(frame, chunks[2]);

        // Overlays (rendered on top)
        self.topic_picker.render(frame, area);
        self.help.render(frame, area);
    }

    fn render_title(&self, frame: &mut ratatui::Frame, area: Rect) {
        let line = Line::from(vec![
            Span::styled(" keyseek ", Theme::title()),
            Span::styled("· YouTube keyword research", Theme::muted()),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }
}
