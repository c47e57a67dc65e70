//! User repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD and query APIs over `users` storage.
//! - Own the user delete cascade over `tools`.
//!
//! # Invariants
//! - Write paths call `validate()` before SQL mutations.
//! - `created_at` is written on insert only.
//! - Deleting a user removes its tools and the user in one transaction.
//! - Read paths reject invalid persisted state instead of masking it.

use crate::db::DbError;
use crate::model::tool::ToolValidationError;
use crate::model::user::{NewUser, User, UserId, UserValidationError};
use crate::repo::page::{Page, PageRequest, UserSortField};
use crate::repo::schema::{ensure_connection_ready, TOOLS_TABLE, USERS_TABLE};
use chrono::NaiveDate;
use log::info;
use rusqlite::{params, Connection, OptionalExtension, Row, Transaction, TransactionBehavior};
use thiserror::Error;

/// Storage format of calendar dates. Lexical order equals date order for
/// four-digit years, which `User::validate` enforces.
pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";

const USER_SELECT_SQL: &str = "SELECT
    user_id,
    name,
    email,
    date_of_birth,
    created_at
FROM users";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for user/tool persistence and query operations.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error(transparent)]
    UserValidation(#[from] UserValidationError),
    #[error(transparent)]
    ToolValidation(#[from] ToolValidationError),
    #[error(transparent)]
    Db(#[from] DbError),
    /// A tool write referenced a user that does not exist.
    #[error("owner user not found: {0}")]
    OwnerNotFound(UserId),
    #[error("repository requires schema version {expected_version}, got {actual_version}")]
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    #[error("repository requires table `{0}`")]
    MissingRequiredTable(&'static str),
    #[error("repository requires column `{column}` in table `{table}`")]
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
    #[error("invalid persisted data: {0}")]
    InvalidData(String),
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for user operations.
pub trait UserRepository {
    /// Inserts a user and returns the stored record, read back in the same
    /// transaction as the insert.
    fn create_user(&self, user: &NewUser) -> RepoResult<User>;
    /// Overwrites `name`, `email` and `date_of_birth`. Returns `false` when absent.
    fn update_user(&self, user: &User) -> RepoResult<bool>;
    fn get_user(&self, id: UserId) -> RepoResult<Option<User>>;
    fn user_exists(&self, id: UserId) -> RepoResult<bool>;
    /// Deletes the user and every tool it owns. Returns `false` when absent.
    fn delete_user(&self, id: UserId) -> RepoResult<bool>;
    /// Lists all users ordered by id.
    fn list_users(&self) -> RepoResult<Vec<User>>;
    fn list_users_page(&self, request: PageRequest, sort: UserSortField)
        -> RepoResult<Page<User>>;
    fn find_user_by_email(&self, email: &str) -> RepoResult<Option<User>>;
    /// Users born within `[start, end]`, both bounds inclusive.
    fn find_users_by_date_of_birth(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> RepoResult<Vec<User>>;
}

/// SQLite-backed user repository.
pub struct SqliteUserRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteUserRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, &[USERS_TABLE, TOOLS_TABLE])?;
        Ok(Self { conn })
    }
}

impl UserRepository for SqliteUserRepository<'_> {
    fn create_user(&self, user: &NewUser) -> RepoResult<User> {
        user.validate()?;

        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        tx.execute(
            "INSERT INTO users (
                name,
                email,
                date_of_birth,
                created_at
            ) VALUES (?1, ?2, ?3, ?4);",
            params![
                user.name.as_str(),
                user.email.as_str(),
                date_to_db(user.date_of_birth),
                user.created_at,
            ],
        )?;
        let user_id = tx.last_insert_rowid();
        let saved = select_user(&tx, user_id)?.ok_or_else(|| {
            RepoError::InvalidData(format!("inserted user {user_id} not readable"))
        })?;
        tx.commit()?;

        Ok(saved)
    }

    fn update_user(&self, user: &User) -> RepoResult<bool> {
        user.validate()?;

        let changed = self.conn.execute(
            "UPDATE users
             SET
                name = ?1,
                email = ?2,
                date_of_birth = ?3
             WHERE user_id = ?4;",
            params![
                user.name.as_str(),
                user.email.as_str(),
                date_to_db(user.date_of_birth),
                user.user_id,
            ],
        )?;

        Ok(changed > 0)
    }

    fn get_user(&self, id: UserId) -> RepoResult<Option<User>> {
        select_user(self.conn, id)
    }

    fn user_exists(&self, id: UserId) -> RepoResult<bool> {
        user_exists_in(self.conn, id)
    }

    fn delete_user(&self, id: UserId) -> RepoResult<bool> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        if !user_exists_in(&tx, id)? {
            return Ok(false);
        }

        let removed_tools = tx.execute("DELETE FROM tools WHERE user_id = ?1;", [id])?;
        tx.execute("DELETE FROM users WHERE user_id = ?1;", [id])?;
        tx.commit()?;

        info!(
            "event=user_delete module=repo status=ok user_id={} cascaded_tools={}",
            id, removed_tools
        );
        Ok(true)
    }

    fn list_users(&self) -> RepoResult<Vec<User>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{USER_SELECT_SQL} ORDER BY user_id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut users = Vec::new();
        while let Some(row) = rows.next()? {
            users.push(parse_user_row(row)?);
        }

        Ok(users)
    }

    fn list_users_page(
        &self,
        request: PageRequest,
        sort: UserSortField,
    ) -> RepoResult<Page<User>> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Deferred)?;
        let total: i64 = tx.query_row("SELECT COUNT(*) FROM users;", [], |row| row.get(0))?;

        let mut users = Vec::new();
        {
            let mut stmt = tx.prepare(&format!(
                "{USER_SELECT_SQL}
                 ORDER BY {} ASC, user_id ASC
                 LIMIT ?1 OFFSET ?2;",
                sort.column()
            ))?;
            let mut rows = stmt.query(params![
                i64::from(request.size()),
                offset_to_db(request.offset())?,
            ])?;
            while let Some(row) = rows.next()? {
                users.push(parse_user_row(row)?);
            }
        }
        tx.commit()?;

        Ok(Page::new(users, request, count_to_u64(total)?))
    }

    fn find_user_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let mut stmt = self.conn.prepare(&format!(
            "{USER_SELECT_SQL}
             WHERE email = ?1
             ORDER BY user_id ASC
             LIMIT 1;"
        ))?;
        let mut rows = stmt.query([email])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_user_row(row)?));
        }

        Ok(None)
    }

    fn find_users_by_date_of_birth(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> RepoResult<Vec<User>> {
        let mut stmt = self.conn.prepare(&format!(
            "{USER_SELECT_SQL}
             WHERE date_of_birth BETWEEN ?1 AND ?2
             ORDER BY user_id ASC;"
        ))?;
        let mut rows = stmt.query(params![date_to_db(start), date_to_db(end)])?;
        let mut users = Vec::new();
        while let Some(row) = rows.next()? {
            users.push(parse_user_row(row)?);
        }

        Ok(users)
    }
}

fn select_user(conn: &Connection, id: UserId) -> RepoResult<Option<User>> {
    let mut stmt = conn.prepare(&format!("{USER_SELECT_SQL} WHERE user_id = ?1;"))?;
    let mut rows = stmt.query([id])?;
    if let Some(row) = rows.next()? {
        return Ok(Some(parse_user_row(row)?));
    }

    Ok(None)
}

/// Existence check usable on a plain connection or inside a transaction.
pub(crate) fn user_exists_in(conn: &Connection, id: UserId) -> RepoResult<bool> {
    let found: Option<i64> = conn
        .query_row("SELECT 1 FROM users WHERE user_id = ?1;", [id], |row| {
            row.get(0)
        })
        .optional()?;
    Ok(found.is_some())
}

pub(crate) fn offset_to_db(offset: u64) -> RepoResult<i64> {
    i64::try_from(offset)
        .map_err(|_| RepoError::InvalidData(format!("page offset {offset} exceeds i64 range")))
}

pub(crate) fn count_to_u64(count: i64) -> RepoResult<u64> {
    u64::try_from(count).map_err(|_| RepoError::InvalidData(format!("negative row count {count}")))
}

fn parse_user_row(row: &Row<'_>) -> RepoResult<User> {
    let date_text: String = row.get("date_of_birth")?;
    let date_of_birth = parse_date(&date_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid date `{date_text}` in users.date_of_birth"
        ))
    })?;

    let user = User {
        user_id: row.get("user_id")?,
        name: row.get("name")?,
        email: row.get("email")?,
        date_of_birth,
        created_at: row.get("created_at")?,
    };
    user.validate()?;
    Ok(user)
}

fn date_to_db(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).ok()
}
