//! Domain-level keyboard actions independent of key bindings.

use crate::action::ViewAction;

/// What the reader asked for, before it is turned into a view action or a
/// front-end command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    /// Scroll one row down. Default: j/↓
    LineDown,
    /// Scroll one row up. Default: k/↑
    LineUp,
    /// Next page. Default: Space/PageDown/Ctrl+d
    PageDown,
    /// Previous page. Default: b/PageUp/Ctrl+u
    PageUp,
    /// Document start. Default: g/Home
    Top,
    /// Document end. Default: G/End
    Bottom,
    /// Jump to the next chapter title. Default: ]
    NextChapter,
    /// Jump to the previous chapter title. Default: [
    PrevChapter,
    /// None → Solid → Dashed → None. Default: u
    CycleUnderline,
    /// Reflow the text into paragraphs. Default: f
    Format,
    /// Leave the reader. Default: q/Esc/Ctrl+c
    Quit,
}

impl KeyAction {
    /// The view action for plain navigation keys.
    ///
    /// Chapter jumps, underline cycling, formatting and quitting need front-end
    /// state and return `None`.
    pub fn view_action(self) -> Option<ViewAction> {
        match self {
            Self::LineDown => Some(ViewAction::LineDown),
            Self::LineUp => Some(ViewAction::LineUp),
            Self::PageDown => Some(ViewAction::PageDown),
            Self::PageUp => Some(ViewAction::PageUp),
            Self::Top => Some(ViewAction::Top),
            Self::Bottom => Some(ViewAction::Bottom),
            Self::NextChapter
            | Self::PrevChapter
            | Self::CycleUnderline
            | Self::Format
            | Self::Quit => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn navigation_keys_map_to_view_actions() {
        assert_eq!(KeyAction::PageDown.view_action(), Some(ViewAction::PageDown));
        assert_eq!(KeyAction::Top.view_action(), Some(ViewAction::Top));
    }

    #[test]
    fn front_end_commands_have_no_view_action() {
        assert_eq!(KeyAction::Quit.view_action(), None);
        assert_eq!(KeyAction::NextChapter.view_action(), None);
    }
}
