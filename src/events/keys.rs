//! Key binding hints per input context.

/// The control that currently receives key presses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyContext {
    /// The employee table.
    #[default]
    Table,
    /// The search-by-name input.
    Search,
    /// The page-jump input.
    PageJump,
}

impl KeyContext {
    /// The next context in `Tab` order.
    pub fn next(self) -> Self {
        match self {
            KeyContext::Table => KeyContext::Search,
            KeyContext::Search => KeyContext::PageJump,
            KeyContext::PageJump => KeyContext::Table,
        }
    }
}

/// Get the footer hint text for a context.
///
/// Keys are written in brackets so the help bar can style them.
pub fn get_context_hints(context: KeyContext) -> &'static str {
    match context {
        KeyContext::Table => {
            "[j/k] move  [n/p] page  [1-4] sort  [/] search  [g] go to page  [r] refresh  [x] dismiss  [q] quit"
        }
        KeyContext::Search => "[type] filter by name  [Ctrl+U] clear  [Tab] next  [Esc] table",
        KeyContext::PageJump => "[0-9] page number  [Enter] jump  [Tab] next  [Esc] table",
    }
}
