//! Domain-level keyboard actions independent of key bindings.

/// Actions the host binds to keys while the input line is not focused.
///
/// These represent user intent, not specific keys. The mapping from
/// `crossterm::event::KeyEvent` to `KeyAction` is handled by `KeyBindings`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    /// Leave the application. Default: q/Ctrl+C
    Quit,
    /// Slide the chat overlay up or down. Default: t/F2
    ToggleChat,
    /// Give keyboard focus to the input line. Default: Enter/i
    FocusInput,
    /// Scroll one line towards older messages. Default: k/↑
    StepOlder,
    /// Scroll one line towards newer messages. Default: j/↓
    StepNewer,
    /// Scroll one page towards older messages. Default: PageUp/Ctrl+u
    PageOlder,
    /// Scroll one page towards newer messages. Default: PageDown/Ctrl+d
    PageNewer,
}

/// Keys the chat widget understands while its input line has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChatKey {
    /// A printable character.
    Char(char),
    /// Delete the last character.
    Backspace,
    /// Submit the pending message.
    Enter,
    /// Recall the previous (older) history entry.
    HistoryPrev,
    /// Recall the next (newer) history entry.
    HistoryNext,
    /// Release input focus.
    Escape,
}
