use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub messages: Option<Vec<Message>>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "user")]
    User,
    #[serde(rename = "assistant")]
    Assistant,
    #[serde(rename = "system")]
    System,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
    /// Provider fields such as `name`, forwarded untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
            extra: Map::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_field_is_optional() {
        let request: ChatRequest = serde_json::from_str("{}").unwrap();
        assert!(request.messages.is_none());

        let request: ChatRequest = serde_json::from_str(r#"{"messages":null}"#).unwrap();
        assert!(request.messages.is_none());
    }

    #[test]
    fn roles_use_lowercase_names() {
        let request: ChatRequest = serde_json::from_str(
            r#"{"messages":[{"role":"system","content":"a"},{"role":"user","content":"b"},{"role":"assistant","content":"c"}]}"#,
        )
        .unwrap();
        let roles: Vec<Role> = request
            .messages
            .unwrap()
            .iter()
            .map(|message| message.role)
            .collect();
        assert_eq!(roles, vec![Role::System, Role::User, Role::Assistant]);

        let json = serde_json::to_string(&Message::system("persona")).unwrap();
        assert_eq!(json, r#"{"role":"system","content":"persona"}"#);
    }

    #[test]
    fn extra_fields_survive_a_round_trip() {
        let message: Message =
            serde_json::from_str(r#"{"role":"user","content":"Hi","name":"walle"}"#).unwrap();
        assert_eq!(message.extra.get("name"), Some(&Value::from("walle")));

        let json = serde_json::to_value(&message).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"role": "user", "content": "Hi", "name": "walle"})
        );
    }

    #[test]
    fn unknown_role_is_rejected() {
        let parsed = serde_json::from_str::<ChatRequest>(
            r#"{"messages":[{"role":"moderator","content":"hi"}]}"#,
        );
        assert!(parsed.is_err());
    }
}
