use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppAction {
    Quit,
    NextTab,
    MoveUp,
    MoveDown,
    Summarize,
    SaveItem,
    ToggleMark,
    DeleteSaved,
    RefreshNow,
    ToggleAutoRefresh,
    IncreaseInterval,
    DecreaseInterval,
    EditKeywords,
    ResetHistory,
    ExportSaved,
    OpenInBrowser,
    DismissMessage,
    ShowHelp,
    HideHelp,
    // Keyword input actions
    KeywordInputChar(char),
    KeywordInputBackspace,
    KeywordInputConfirm,
    KeywordInputCancel,
}

pub fn handle_key_event(
    key: KeyEvent,
    keyword_input_active: bool,
    show_help: bool,
) -> Option<AppAction> {
    // If help is showing, any key closes it
    if show_help {
        return Some(AppAction::HideHelp);
    }

    // Keyword input mode
    if keyword_input_active {
        return match key.code {
            KeyCode::Enter => Some(AppAction::KeywordInputConfirm),
            KeyCode::Esc => Some(AppAction::KeywordInputCancel),
            KeyCode::Backspace => Some(AppAction::KeywordInputBackspace),
            KeyCode::Char(c) => Some(AppAction::KeywordInputChar(c)),
            _ => None,
        };
    }

    // Normal mode
    match (key.code, key.modifiers) {
        (KeyCode::Char('q'), _) => Some(AppAction::Quit),
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Some(AppAction::Quit),

        (KeyCode::Tab, _) => Some(AppAction::NextTab),
        (KeyCode::Char('j'), _) | (KeyCode::Down, _) => Some(AppAction::MoveDown),
        (KeyCode::Char('k'), _) | (KeyCode::Up, _) => Some(AppAction::MoveUp),

        (KeyCode::Enter, _) => Some(AppAction::Summarize),
        (KeyCode::Char('s'), _) => Some(AppAction::SaveItem),
        (KeyCode::Char(' '), _) => Some(AppAction::ToggleMark),
        (KeyCode::Char('d'), _) => Some(AppAction::DeleteSaved),

        (KeyCode::Char('r'), _) => Some(AppAction::RefreshNow),
        (KeyCode::Char('R'), _) => Some(AppAction::ResetHistory),
        (KeyCode::Char('a'), _) => Some(AppAction::ToggleAutoRefresh),
        (KeyCode::Char('+'), _) | (KeyCode::Char('='), _) => Some(AppAction::IncreaseInterval),
        (KeyCode::Char('-'), _) => Some(AppAction::DecreaseInterval),

        (KeyCode::Char('e'), _) => Some(AppAction::EditKeywords),
        (KeyCode::Char('x'), _) => Some(AppAction::ExportSaved),
        (KeyCode::Char('o'), _) => Some(AppAction::OpenInBrowser),
        (KeyCode::Esc, _) => Some(AppAction::DismissMessage),

        (KeyCode::Char('?'), _) => Some(AppAction::ShowHelp),

        _ => None,
    }
}
