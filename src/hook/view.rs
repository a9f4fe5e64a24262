//! The page surface the chat controller draws on.

use crate::util::render::MessageCard;

/// Element ids the chat markup must provide.
pub mod ids {
    pub const MESSAGES: &str = "messages";
    pub const MESSAGE_INPUT: &str = "message-input";
    pub const MESSAGE_FORM: &str = "message-form";
    pub const TYPING_INDICATOR: &str = "typing-indicator";
    pub const TYPING_USERS: &str = "typing-users";
    pub const MESSAGES_CONTAINER: &str = "messages-container";
}

/// Shown when the server rejects a message.
pub const SEND_FAILED_ALERT: &str = "Failed to send message";

/// Rendering operations the controller needs from the page.
pub trait ChatView {
    fn clear_messages(&mut self);
    fn append_message(&mut self, card: &MessageCard);
    fn scroll_to_bottom(&mut self);
    fn input_value(&self) -> String;
    fn set_input_value(&mut self, value: &str);
    fn focus_input(&mut self);
    /// Show the typing indicator with `text`.
    fn show_typing(&mut self, text: &str);
    fn hide_typing(&mut self);
    /// Blocking, user-facing notice.
    fn alert(&mut self, message: &str);
}
