use chrono::NaiveDate;
use rusqlite::Connection;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;
use toolapp_core::db::{open_db, open_db_in_memory};
use toolapp_core::{
    RepoError, SqliteToolRepository, SqliteUserRepository, ToolDto, ToolService,
    ToolServiceError, UserDto, UserService,
};

fn setup() -> Connection {
    open_db_in_memory().unwrap()
}

fn dob() -> NaiveDate {
    NaiveDate::from_ymd_opt(1990, 1, 1).unwrap()
}

#[test]
fn deleting_user_cascades_to_owned_tools_only() {
    let conn = setup();
    let users = UserService::new(SqliteUserRepository::try_new(&conn).unwrap());
    let tools = ToolService::new(SqliteToolRepository::try_new(&conn).unwrap());

    let doomed = users
        .create_user(&UserDto::new("Doomed", "doomed@example.com", dob()))
        .unwrap()
        .user_id
        .unwrap();
    let keeper = users
        .create_user(&UserDto::new("Keeper", "keeper@example.com", dob()))
        .unwrap()
        .user_id
        .unwrap();

    let doomed_tool = tools
        .create_tool(&ToolDto::new("Drill", "Power", doomed))
        .unwrap()
        .tool_id
        .unwrap();
    tools.create_tool(&ToolDto::new("Saw", "Hand", doomed)).unwrap();
    let kept_tool = tools
        .create_tool(&ToolDto::new("Hammer", "Hand", keeper))
        .unwrap()
        .tool_id
        .unwrap();

    assert!(users.delete_user(doomed).unwrap());

    assert!(tools.get_tools_by_user_id(doomed).unwrap().is_empty());
    assert!(tools.get_tool_by_id(doomed_tool).unwrap().is_none());
    assert!(tools.get_tool_by_id(kept_tool).unwrap().is_some());
    assert_eq!(tools.get_all_tools().unwrap().len(), 1);
}

#[test]
fn every_stored_tool_references_an_existing_user() {
    let conn = setup();
    let users = UserService::new(SqliteUserRepository::try_new(&conn).unwrap());
    let tools = ToolService::new(SqliteToolRepository::try_new(&conn).unwrap());

    let owner = users
        .create_user(&UserDto::new("Owner", "owner@example.com", dob()))
        .unwrap()
        .user_id
        .unwrap();
    tools.create_tool(&ToolDto::new("Drill", "Power", owner)).unwrap();
    let gated = tools.create_tool(&ToolDto::new("Ghost", "Power", 999));
    assert!(matches!(gated, Err(ToolServiceError::OwnerNotFound(999))));
    users.delete_user(owner).unwrap();

    let orphans: i64 = conn
        .query_row(
            "SELECT COUNT(*)
             FROM tools t
             LEFT JOIN users u ON u.user_id = t.user_id
             WHERE u.user_id IS NULL;",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(orphans, 0);
}

#[test]
fn raw_user_delete_with_tools_is_blocked_by_schema() {
    let conn = setup();
    let users = UserService::new(SqliteUserRepository::try_new(&conn).unwrap());
    let tools = ToolService::new(SqliteToolRepository::try_new(&conn).unwrap());

    let owner = users
        .create_user(&UserDto::new("Owner", "owner@example.com", dob()))
        .unwrap()
        .user_id
        .unwrap();
    tools.create_tool(&ToolDto::new("Drill", "Power", owner)).unwrap();

    let err = conn
        .execute("DELETE FROM users WHERE user_id = ?1;", [owner])
        .unwrap_err();
    assert!(err.to_string().contains("FOREIGN KEY"));
}

#[test]
fn pages_cover_every_row_exactly_once() {
    let conn = setup();
    let users = UserService::new(SqliteUserRepository::try_new(&conn).unwrap());
    let tools = ToolService::new(SqliteToolRepository::try_new(&conn).unwrap());

    let owner = users
        .create_user(&UserDto::new("Owner", "owner@example.com", dob()))
        .unwrap()
        .user_id
        .unwrap();
    let total = 7;
    for index in 0..total {
        tools
            .create_tool(&ToolDto::new(format!("Tool {index}"), "Hand", owner))
            .unwrap();
    }

    let size = 3;
    let expected_pages = 3;
    let mut seen = Vec::new();
    for page_number in 0..expected_pages {
        let page = tools.get_tools_page(page_number, size, "toolId").unwrap();
        assert_eq!(page.total_elements, total);
        assert_eq!(page.total_pages, u64::from(expected_pages));
        assert_eq!(page.last, page_number + 1 == expected_pages);
        seen.extend(page.content.into_iter().filter_map(|tool| tool.tool_id));
    }

    let mut unique = seen.clone();
    unique.sort_unstable();
    unique.dedup();
    assert_eq!(seen.len() as u64, total);
    assert_eq!(unique.len(), seen.len());

    let beyond = tools.get_tools_page(expected_pages, size, "toolId").unwrap();
    assert!(beyond.content.is_empty());
    assert!(beyond.last);
}

#[test]
fn repositories_reject_unmigrated_connections() {
    let conn = Connection::open_in_memory().unwrap();

    let user_err = SqliteUserRepository::try_new(&conn).err().unwrap();
    assert!(matches!(
        user_err,
        RepoError::UninitializedConnection {
            actual_version: 0,
            ..
        }
    ));
    let tool_err = SqliteToolRepository::try_new(&conn).err().unwrap();
    assert!(matches!(tool_err, RepoError::UninitializedConnection { .. }));
}

#[test]
fn repository_creates_return_stored_rows_and_existence_tracks_lifecycle() {
    use toolapp_core::{NewTool, NewUser, ToolRepository, UserRepository};

    let conn = setup();
    let user_repo = SqliteUserRepository::try_new(&conn).unwrap();
    let tool_repo = SqliteToolRepository::try_new(&conn).unwrap();

    let user = user_repo
        .create_user(&NewUser {
            name: "Owner".to_string(),
            email: "owner@example.com".to_string(),
            date_of_birth: dob(),
            created_at: 1,
        })
        .unwrap();
    let user_id = user.user_id;
    let tool = tool_repo
        .create_tool(&NewTool {
            tool_name: "Drill".to_string(),
            tool_type: "Power".to_string(),
            user_id,
            created_at: 2,
        })
        .unwrap();
    let tool_id = tool.tool_id;

    assert_eq!(user.created_at, 1);
    assert_eq!(user_repo.get_user(user_id).unwrap(), Some(user));
    assert_eq!(tool.user_id, user_id);
    assert_eq!(tool_repo.get_tool(tool_id).unwrap(), Some(tool));

    assert!(user_repo.user_exists(user_id).unwrap());
    assert!(tool_repo.owner_exists(user_id).unwrap());
    assert!(tool_repo.tool_exists(tool_id).unwrap());

    assert!(user_repo.delete_user(user_id).unwrap());
    assert!(!user_repo.user_exists(user_id).unwrap());
    assert!(!tool_repo.owner_exists(user_id).unwrap());
    assert!(!tool_repo.tool_exists(tool_id).unwrap());
}

#[test]
fn concurrent_owner_delete_serializes_before_tool_create() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("race.sqlite3");

    let conn = open_db(&path).unwrap();
    let users = UserService::new(SqliteUserRepository::try_new(&conn).unwrap());
    let owner = users
        .create_user(&UserDto::new("Owner", "owner@example.com", dob()))
        .unwrap()
        .user_id
        .unwrap();
    let tools = ToolService::new(SqliteToolRepository::try_new(&conn).unwrap());

    let (locked_tx, locked_rx) = mpsc::channel();
    let deleter_path = path.clone();
    let deleter = thread::spawn(move || {
        let other = open_db(&deleter_path).unwrap();
        other.execute_batch("BEGIN IMMEDIATE;").unwrap();
        other
            .execute("DELETE FROM users WHERE user_id = ?1;", [owner])
            .unwrap();
        locked_tx.send(()).unwrap();
        thread::sleep(Duration::from_millis(300));
        other.execute_batch("COMMIT;").unwrap();
    });

    locked_rx.recv().unwrap();
    let err = tools
        .create_tool(&ToolDto::new("Drill", "Power", owner))
        .unwrap_err();
    deleter.join().unwrap();

    assert!(matches!(err, ToolServiceError::OwnerNotFound(id) if id == owner));
    let tool_rows: i64 = conn
        .query_row("SELECT COUNT(*) FROM tools;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(tool_rows, 0);
}
