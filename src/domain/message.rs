use serde::{Deserialize, Serialize};

/// Author of a chat turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    System,
}

impl Role {
    /// Returns a short transcript label for the role.
    pub fn display_label(self) -> &'static str {
        match self {
            Role::User => "you",
            Role::Assistant => "zaman",
            Role::System => "system",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_serializes_lowercase() {
        let encoded = serde_json::to_string(&Role::Assistant).expect("role should serialize");

        assert_eq!(encoded, "\"assistant\"");
    }

    #[test]
    fn role_deserializes_from_wire_names() {
        let role: Role = serde_json::from_str("\"system\"").expect("role should deserialize");

        assert_eq!(role, Role::System);
    }

    #[test]
    fn constructors_assign_roles() {
        assert_eq!(Message::user("hi").role, Role::User);
        assert_eq!(Message::assistant("hello").role, Role::Assistant);
    }

    #[test]
    fn display_label_names_both_parties() {
        assert_eq!(Role::User.display_label(), "you");
        assert_eq!(Role::Assistant.display_label(), "zaman");
    }
}
