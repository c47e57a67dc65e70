//! Tool repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD and query APIs over `tools` storage.
//! - Resolve the owning user inside every tool write.
//!
//! # Invariants
//! - Owner existence is checked in the same `IMMEDIATE` transaction as the
//!   insert/update, so a concurrent user delete cannot slip in between.
//! - `created_at` is written on insert only.
//! - Owner listings are ordered by `tool_id ASC`.

use crate::model::tool::{NewTool, Tool, ToolId};
use crate::model::user::UserId;
use crate::repo::page::{Page, PageRequest, ToolSortField};
use crate::repo::schema::{ensure_connection_ready, TOOLS_TABLE, USERS_TABLE};
use crate::repo::user_repo::{
    count_to_u64, offset_to_db, user_exists_in, RepoError, RepoResult,
};
use rusqlite::{params, Connection, OptionalExtension, Row, Transaction, TransactionBehavior};

const TOOL_SELECT_SQL: &str = "SELECT
    tool_id,
    tool_name,
    tool_type,
    user_id,
    created_at
FROM tools";

/// Repository interface for tool operations.
pub trait ToolRepository {
    /// Inserts a tool after resolving its owner and returns the stored
    /// record, read back in the same transaction.
    ///
    /// Returns `RepoError::OwnerNotFound` and writes nothing when the owner
    /// is missing.
    fn create_tool(&self, tool: &NewTool) -> RepoResult<Tool>;
    /// Overwrites `tool_name`, `tool_type` and owner.
    ///
    /// Returns `Ok(false)` when the tool is absent, and
    /// `RepoError::OwnerNotFound` when the tool exists but the owner does not.
    fn update_tool(&self, tool: &Tool) -> RepoResult<bool>;
    fn get_tool(&self, id: ToolId) -> RepoResult<Option<Tool>>;
    fn tool_exists(&self, id: ToolId) -> RepoResult<bool>;
    fn delete_tool(&self, id: ToolId) -> RepoResult<bool>;
    fn list_tools(&self) -> RepoResult<Vec<Tool>>;
    fn list_tools_page(&self, request: PageRequest, sort: ToolSortField)
        -> RepoResult<Page<Tool>>;
    /// Tools owned by `user_id`; empty for unknown users.
    fn find_tools_by_owner(&self, user_id: UserId) -> RepoResult<Vec<Tool>>;
    fn owner_exists(&self, user_id: UserId) -> RepoResult<bool>;
}

/// SQLite-backed tool repository.
pub struct SqliteToolRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteToolRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, &[USERS_TABLE, TOOLS_TABLE])?;
        Ok(Self { conn })
    }
}

impl ToolRepository for SqliteToolRepository<'_> {
    fn create_tool(&self, tool: &NewTool) -> RepoResult<Tool> {
        tool.validate()?;

        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        if !user_exists_in(&tx, tool.user_id)? {
            return Err(RepoError::OwnerNotFound(tool.user_id));
        }

        tx.execute(
            "INSERT INTO tools (
                tool_name,
                tool_type,
                user_id,
                created_at
            ) VALUES (?1, ?2, ?3, ?4);",
            params![
                tool.tool_name.as_str(),
                tool.tool_type.as_str(),
                tool.user_id,
                tool.created_at,
            ],
        )?;
        let tool_id = tx.last_insert_rowid();
        let saved = select_tool(&tx, tool_id)?.ok_or_else(|| {
            RepoError::InvalidData(format!("inserted tool {tool_id} not readable"))
        })?;
        tx.commit()?;

        Ok(saved)
    }

    fn update_tool(&self, tool: &Tool) -> RepoResult<bool> {
        tool.validate()?;

        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        if !tool_exists_in(&tx, tool.tool_id)? {
            return Ok(false);
        }
        if !user_exists_in(&tx, tool.user_id)? {
            return Err(RepoError::OwnerNotFound(tool.user_id));
        }

        tx.execute(
            "UPDATE tools
             SET
                tool_name = ?1,
                tool_type = ?2,
                user_id = ?3
             WHERE tool_id = ?4;",
            params![
                tool.tool_name.as_str(),
                tool.tool_type.as_str(),
                tool.user_id,
                tool.tool_id,
            ],
        )?;
        tx.commit()?;

        Ok(true)
    }

    fn get_tool(&self, id: ToolId) -> RepoResult<Option<Tool>> {
        select_tool(self.conn, id)
    }

    fn tool_exists(&self, id: ToolId) -> RepoResult<bool> {
        tool_exists_in(self.conn, id)
    }

    fn delete_tool(&self, id: ToolId) -> RepoResult<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM tools WHERE tool_id = ?1;", [id])?;
        Ok(changed > 0)
    }

    fn list_tools(&self) -> RepoResult<Vec<Tool>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{TOOL_SELECT_SQL} ORDER BY tool_id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut tools = Vec::new();
        while let Some(row) = rows.next()? {
            tools.push(parse_tool_row(row)?);
        }

        Ok(tools)
    }

    fn list_tools_page(
        &self,
        request: PageRequest,
        sort: ToolSortField,
    ) -> RepoResult<Page<Tool>> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Deferred)?;
        let total: i64 = tx.query_row("SELECT COUNT(*) FROM tools;", [], |row| row.get(0))?;

        let mut tools = Vec::new();
        {
            let mut stmt = tx.prepare(&format!(
                "{TOOL_SELECT_SQL}
                 ORDER BY {} ASC, tool_id ASC
                 LIMIT ?1 OFFSET ?2;",
                sort.column()
            ))?;
            let mut rows = stmt.query(params![
                i64::from(request.size()),
                offset_to_db(request.offset())?,
            ])?;
            while let Some(row) = rows.next()? {
                tools.push(parse_tool_row(row)?);
            }
        }
        tx.commit()?;

        Ok(Page::new(tools, request, count_to_u64(total)?))
    }

    fn find_tools_by_owner(&self, user_id: UserId) -> RepoResult<Vec<Tool>> {
        let mut stmt = self.conn.prepare(&format!(
            "{TOOL_SELECT_SQL}
             WHERE user_id = ?1
             ORDER BY tool_id ASC;"
        ))?;
        let mut rows = stmt.query([user_id])?;
        let mut tools = Vec::new();
        while let Some(row) = rows.next()? {
            tools.push(parse_tool_row(row)?);
        }

        Ok(tools)
    }

    fn owner_exists(&self, user_id: UserId) -> RepoResult<bool> {
        user_exists_in(self.conn, user_id)
    }
}

fn select_tool(conn: &Connection, id: ToolId) -> RepoResult<Option<Tool>> {
    let mut stmt = conn.prepare(&format!("{TOOL_SELECT_SQL} WHERE tool_id = ?1;"))?;
    let mut rows = stmt.query([id])?;
    if let Some(row) = rows.next()? {
        return Ok(Some(parse_tool_row(row)?));
    }

    Ok(None)
}

fn tool_exists_in(conn: &Connection, id: ToolId) -> RepoResult<bool> {
    let found: Option<i64> = conn
        .query_row("SELECT 1 FROM tools WHERE tool_id = ?1;", [id], |row| {
            row.get(0)
        })
        .optional()?;
    Ok(found.is_some())
}

fn parse_tool_row(row: &Row<'_>) -> RepoResult<Tool> {
    let tool = Tool {
        tool_id: row.get("tool_id")?,
        tool_name: row.get("tool_name")?,
        tool_type: row.get("tool_type")?,
        user_id: row.get("user_id")?,
        created_at: row.get("created_at")?,
    };
    tool.validate()?;
    Ok(tool)
}
