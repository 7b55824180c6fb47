//! Action enum — the central message bus for the TUI.
//! All user interactions and async results flow through here.

use keyseek_core::{KeywordResult, SearchCriteria};

/// Every possible action that can occur in the application.
#[derive(Debug, Clone)]
pub enum Action {
    // ── Global ──────────────────────────────────────────────
    /// Quit the application.
    Quit,
    /// Toggle help overlay.
    ToggleHelp,
    /// Display a status message in the status bar.
    SetStatus(String),
    /// Clear the status message.
    ClearStatus,
    /// A tick event for animations and timers.
    Tick,
    /// Close whatever overlay is open.
    CloseOverlay,

    // ── Text input (editing mode) ───────────────────────────
    /// A character was typed.
    CharInput(char),
    /// Backspace pressed.
    BackspaceInput,
    /// Delete word (Ctrl+W).
    DeleteWord,
    /// Paste text from clipboard (Ctrl+V).
    PasteInput,
    /// Bulk paste from bracketed paste mode.
    PasteBulk(String),
    /// Move the cursor left, or cycle a selector field backwards.
    CursorLeft,
    /// Move the cursor right, or cycle a selector field forwards.
    CursorRight,
    /// Move focus to the next form field (Enter / Down).
    FocusNext,
    /// Move focus to the previous form field (Shift+Tab / Up).
    FocusPrev,
    /// Switch focus between form fields (Tab).
    SwitchInputField,
    /// Submit the form (Ctrl+S).
    SubmitForm,

    // ── Topic picker ────────────────────────────────────────
    /// Open/close the topic suggestion picker (Ctrl+T).
    ToggleTopicPicker,
    /// A suggestion was chosen; overwrite the topic field.
    TopicChosen(String),

    // ── Request lifecycle ───────────────────────────────────
    /// The form produced a validated criteria value.
    SubmitCriteria(Box<SearchCriteria>),
    /// The generation call settled successfully.
    KeywordsGenerated {
        seq: u64,
        results: Vec<KeywordResult>,
    },
    /// The generation call failed.
    GenerationFailed { seq: u64, error: String },
    /// Clear results and go back to the criteria form.
    Reset,

    // ── Results view ────────────────────────────────────────
    /// Select the next table row.
    SelectNext,
    /// Select the previous table row.
    SelectPrev,
    /// Copy the selected keyword to the clipboard.
    CopyKeyword,
    /// Copy the selected row's trend-lookup URL to the clipboard.
    CopyTrendLink,
    /// Export the full result set plus criteria to a CSV file.
    ExportCsv,
    /// Enter in normal mode — context-dependent confirm.
    Confirm,
}

/// Whether the app is in a text-input mode where raw keys should
/// be forwarded to the criteria form instead of interpreted as
/// global shortcuts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Normal mode — keys are global shortcuts.
    Normal,
    /// Text input mode — keys go to the focused form field.
    Editing,
}

/// The two presentational views the shell switches between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// The criteria input form.
    Criteria,
    /// Loading / error / empty / populated results.
    Results,
}
