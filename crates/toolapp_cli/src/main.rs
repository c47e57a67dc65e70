//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `toolapp_core` linkage and storage bootstrap end to end.
//! - Run one user/tool lifecycle against the configured database.
//!
//! Reads `.env` when present; see `toolapp_core::config` for variables.

use chrono::NaiveDate;
use log::info;
use std::error::Error;
use toolapp_core::{
    init_logging, open_db, validate_tool_dto, validate_user_dto, CoreConfig,
    SqliteToolRepository, SqliteUserRepository, ToolDto, ToolService, UserDto, UserService,
};

fn main() -> Result<(), Box<dyn Error>> {
    let _ = dotenvy::dotenv();
    let config = CoreConfig::from_env();
    if let Some(log_dir) = config.log_dir.as_deref() {
        init_logging(&config.log_level, log_dir)?;
    }

    println!("toolapp_core ping={}", toolapp_core::ping());
    println!("toolapp_core version={}", toolapp_core::core_version());
    println!("db_path={}", config.db_path.display());

    let conn = open_db(&config.db_path)?;
    let users = UserService::new(SqliteUserRepository::try_new(&conn)?);
    let tools = ToolService::new(SqliteToolRepository::try_new(&conn)?);

    let date_of_birth = NaiveDate::from_ymd_opt(1990, 1, 1).ok_or("invalid smoke date")?;
    let user_dto = UserDto::new("Smoke Test", "smoke@example.com", date_of_birth);
    validate_user_dto(&user_dto)?;
    let user = users.create_user(&user_dto)?;
    let user_id = user.user_id.ok_or("created user has no id")?;
    println!("created user_id={user_id}");

    let tool_dto = ToolDto::new("Smoke Drill", "Power", user_id);
    validate_tool_dto(&tool_dto)?;
    let tool = tools.create_tool(&tool_dto)?;
    println!(
        "created tool_id={} owner={}",
        tool.tool_id.unwrap_or_default(),
        tool.user_id
    );

    let owned = tools.get_tools_by_user_id(user_id)?;
    println!("owned_tools={}", owned.len());

    let page = users.get_users_page(0, 10, "userId")?;
    println!(
        "users_total={} users_pages={}",
        page.total_elements, page.total_pages
    );

    let deleted = users.delete_user(user_id)?;
    let remaining = tools.get_tools_by_user_id(user_id)?;
    println!("deleted_user={deleted} remaining_tools={}", remaining.len());

    info!("event=cli_smoke module=cli status=ok user_id={user_id}");
    Ok(())
}
