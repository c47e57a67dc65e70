//! Externally visible user/tool representations.
//!
//! Field names serialize in camelCase and dates as `YYYY-MM-DD`, which is the
//! wire shape boundary layers expose.

use crate::model::tool::ToolId;
use crate::model::user::UserId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// User representation exchanged with boundary callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    /// Assigned by the store; ignored on create.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
    pub name: String,
    pub email: String,
    pub date_of_birth: NaiveDate,
    /// Epoch milliseconds; output only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<i64>,
}

impl UserDto {
    /// Builds an input DTO without identity or timestamps.
    pub fn new(name: impl Into<String>, email: impl Into<String>, date_of_birth: NaiveDate) -> Self {
        Self {
            user_id: None,
            name: name.into(),
            email: email.into(),
            date_of_birth,
            created_at: None,
        }
    }
}

/// Tool representation exchanged with boundary callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDto {
    /// Assigned by the store; required to target an update.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_id: Option<ToolId>,
    pub tool_name: String,
    pub tool_type: String,
    pub user_id: UserId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<i64>,
}

impl ToolDto {
    pub fn new(tool_name: impl Into<String>, tool_type: impl Into<String>, user_id: UserId) -> Self {
        Self {
            tool_id: None,
            tool_name: tool_name.into(),
            tool_type: tool_type.into(),
            user_id,
            created_at: None,
        }
    }

    /// Same DTO targeting an existing tool id, for update calls.
    pub fn with_tool_id(mut self, tool_id: ToolId) -> Self {
        self.tool_id = Some(tool_id);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::{ToolDto, UserDto};
    use chrono::NaiveDate;

    #[test]
    fn user_dto_uses_camel_case_and_iso_dates() {
        let mut dto = UserDto::new(
            "John Doe",
            "john@example.com",
            NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
        );
        dto.user_id = Some(7);

        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json["userId"], 7);
        assert_eq!(json["dateOfBirth"], "1990-01-01");
        assert!(json.get("createdAt").is_none());
    }

    #[test]
    fn tool_dto_accepts_payload_without_tool_id() {
        let dto: ToolDto = serde_json::from_str(
            r#"{"toolName":"Hammer","toolType":"Hand","userId":3}"#,
        )
        .unwrap();
        assert_eq!(dto, ToolDto::new("Hammer", "Hand", 3));
    }

    #[test]
    fn tool_dto_requires_user_id() {
        let result = serde_json::from_str::<ToolDto>(r#"{"toolName":"Hammer","toolType":"Hand"}"#);
        assert!(result.is_err());
    }
}
