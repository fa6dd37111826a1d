use serde::{Deserialize, Serialize};

/// Marker prefix for inline image attachments inside message content.
pub const IMAGE_MARKER: &str = "[IMAGE:";

/// Author of a conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// System instructions
    System,
    /// End-user input
    User,
    /// Model output
    Assistant,
}

/// One role/content turn of a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Author of the turn
    pub role: Role,
    /// Text content, possibly carrying inline image markers
    pub content: String,
}

impl Message {
    /// Creates a message.
    pub fn new<T: Into<String>>(role: Role, content: T) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// Creates a system message.
    pub fn system<T: Into<String>>(content: T) -> Self {
        Self::new(Role::System, content)
    }

    /// Creates a user message.
    pub fn user<T: Into<String>>(content: T) -> Self {
        Self::new(Role::User, content)
    }

    /// Creates an assistant message.
    pub fn assistant<T: Into<String>>(content: T) -> Self {
        Self::new(Role::Assistant, content)
    }

    /// Whether the content embeds an inline image.
    #[must_use]
    pub fn has_image(&self) -> bool {
        self.content.contains(IMAGE_MARKER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_set_roles() {
        assert_eq!(Message::system("be terse").role, Role::System);
        assert_eq!(Message::user("hi").role, Role::User);
        assert_eq!(Message::assistant("hello").role, Role::Assistant);
    }

    #[test]
    fn test_image_detection() {
        let with_image = Message::user("Describe this\n[IMAGE:image/png]\niVBORw0KGgo=");
        assert!(with_image.has_image());
        assert!(!Message::user("no pictures here").has_image());
    }
}
