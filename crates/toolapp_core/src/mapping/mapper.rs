//! Pure conversions between DTOs and entities.

use crate::mapping::dto::{ToolDto, UserDto};
use crate::model::tool::{NewTool, Tool};
use crate::model::user::{NewUser, User};

pub fn user_to_dto(user: User) -> UserDto {
    UserDto {
        user_id: Some(user.user_id),
        name: user.name,
        email: user.email,
        date_of_birth: user.date_of_birth,
        created_at: Some(user.created_at),
    }
}

/// Builds an insert shape; `dto.user_id` and `dto.created_at` are ignored.
pub fn dto_to_new_user(dto: &UserDto, created_at: i64) -> NewUser {
    NewUser {
        name: dto.name.clone(),
        email: dto.email.clone(),
        date_of_birth: dto.date_of_birth,
        created_at,
    }
}

/// Copies the mutable user attributes onto an existing record.
pub fn apply_user_dto(dto: &UserDto, user: &mut User) {
    user.name = dto.name.clone();
    user.email = dto.email.clone();
    user.date_of_birth = dto.date_of_birth;
}

pub fn tool_to_dto(tool: Tool) -> ToolDto {
    ToolDto {
        tool_id: Some(tool.tool_id),
        tool_name: tool.tool_name,
        tool_type: tool.tool_type,
        user_id: tool.user_id,
        created_at: Some(tool.created_at),
    }
}

pub fn dto_to_new_tool(dto: &ToolDto, created_at: i64) -> NewTool {
    NewTool {
        tool_name: dto.tool_name.clone(),
        tool_type: dto.tool_type.clone(),
        user_id: dto.user_id,
        created_at,
    }
}

/// Copies name, type and owner onto an existing record.
pub fn apply_tool_dto(dto: &ToolDto, tool: &mut Tool) {
    tool.tool_name = dto.tool_name.clone();
    tool.tool_type = dto.tool_type.clone();
    tool.user_id = dto.user_id;
}

#[cfg(test)]
mod tests {
    use super::{apply_tool_dto, apply_user_dto, dto_to_new_user, tool_to_dto, user_to_dto};
    use crate::mapping::dto::{ToolDto, UserDto};
    use crate::model::tool::Tool;
    use crate::model::user::User;
    use chrono::NaiveDate;

    fn stored_user() -> User {
        User {
            user_id: 4,
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1815, 12, 10).unwrap(),
            created_at: 1_700_000_000_000,
        }
    }

    #[test]
    fn user_round_trips_through_dto() {
        let dto = user_to_dto(stored_user());
        assert_eq!(dto.user_id, Some(4));
        assert_eq!(dto.created_at, Some(1_700_000_000_000));

        let new_user = dto_to_new_user(&dto, 42);
        assert_eq!(new_user.name, "Ada");
        assert_eq!(new_user.created_at, 42);
    }

    #[test]
    fn apply_user_dto_keeps_identity_and_created_at() {
        let mut user = stored_user();
        let mut dto = UserDto::new(
            "Ada Lovelace",
            "ada@lovelace.dev",
            NaiveDate::from_ymd_opt(1815, 12, 11).unwrap(),
        );
        dto.user_id = Some(99);
        dto.created_at = Some(1);

        apply_user_dto(&dto, &mut user);
        assert_eq!(user.user_id, 4);
        assert_eq!(user.created_at, 1_700_000_000_000);
        assert_eq!(user.name, "Ada Lovelace");
        assert_eq!(user.email, "ada@lovelace.dev");
    }

    #[test]
    fn apply_tool_dto_moves_owner_but_not_identity() {
        let mut tool = Tool {
            tool_id: 10,
            tool_name: "Saw".to_string(),
            tool_type: "Hand".to_string(),
            user_id: 1,
            created_at: 5,
        };
        let dto = ToolDto::new("Circular Saw", "Power", 2).with_tool_id(77);

        apply_tool_dto(&dto, &mut tool);
        assert_eq!(tool.tool_id, 10);
        assert_eq!(tool.user_id, 2);
        assert_eq!(tool.created_at, 5);

        let back = tool_to_dto(tool);
        assert_eq!(back.tool_id, Some(10));
        assert_eq!(back.tool_type, "Power");
    }
}
