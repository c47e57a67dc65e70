//! User use-case service.
//!
//! # Responsibility
//! - Provide user CRUD, paging and query entry points.
//! - Stamp `created_at` on creation.
//!
//! # Invariants
//! - Updates overwrite `name`, `email`, `date_of_birth` only.
//! - Deletes cascade to owned tools through the repository.
//! - Misses are `None`/`false`, never errors.

use crate::error::{Classify, ErrorKind};
use crate::mapping::dto::UserDto;
use crate::mapping::mapper::{apply_user_dto, dto_to_new_user, user_to_dto};
use crate::model::user::UserId;
use crate::repo::page::{InvalidPageRequest, Page, PageRequest, UnknownSortField, UserSortField};
use crate::repo::user_repo::{RepoError, UserRepository};
use crate::service::{now_epoch_ms, observe};
use chrono::NaiveDate;
use thiserror::Error;

pub type UserServiceResult<T> = Result<T, UserServiceError>;

/// Service error for user use-cases.
#[derive(Debug, Error)]
pub enum UserServiceError {
    #[error(transparent)]
    InvalidSortField(#[from] UnknownSortField),
    #[error(transparent)]
    InvalidPageRequest(#[from] InvalidPageRequest),
    #[error(transparent)]
    Repo(#[from] RepoError),
}

impl Classify for UserServiceError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidSortField(_) | Self::InvalidPageRequest(_) => ErrorKind::Validation,
            Self::Repo(err) => err.kind(),
        }
    }
}

/// User service facade over repository implementations.
pub struct UserService<R: UserRepository> {
    repo: R,
}

impl<R: UserRepository> UserService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Persists a new user and returns it with its assigned id.
    ///
    /// `dto.user_id` and `dto.created_at` are ignored.
    pub fn create_user(&self, dto: &UserDto) -> UserServiceResult<UserDto> {
        observe("user_create", || -> UserServiceResult<_> {
            let saved = self.repo.create_user(&dto_to_new_user(dto, now_epoch_ms()))?;
            Ok(user_to_dto(saved))
        })
    }

    pub fn get_all_users(&self) -> UserServiceResult<Vec<UserDto>> {
        observe("user_list", || -> UserServiceResult<_> {
            let users = self.repo.list_users()?;
            Ok(users.into_iter().map(user_to_dto).collect())
        })
    }

    /// Returns one zero-indexed page sorted ascending by `sort_field`.
    ///
    /// Unknown sort fields and `size == 0` are rejected, never defaulted.
    pub fn get_users_page(
        &self,
        page: u32,
        size: u32,
        sort_field: &str,
    ) -> UserServiceResult<Page<UserDto>> {
        observe("user_page", || -> UserServiceResult<_> {
            let request = PageRequest::new(page, size)?;
            let sort = sort_field.parse::<UserSortField>()?;
            Ok(self.repo.list_users_page(request, sort)?.map(user_to_dto))
        })
    }

    pub fn get_user_by_id(&self, id: UserId) -> UserServiceResult<Option<UserDto>> {
        observe("user_get", || -> UserServiceResult<_> {
            Ok(self.repo.get_user(id)?.map(user_to_dto))
        })
    }

    pub fn get_user_by_email(&self, email: &str) -> UserServiceResult<Option<UserDto>> {
        observe("user_get_by_email", || -> UserServiceResult<_> {
            Ok(self.repo.find_user_by_email(email)?.map(user_to_dto))
        })
    }

    /// Users born within `[start, end]`, inclusive.
    ///
    /// Range sanity (`start <= end`, no future dates) is the caller's job;
    /// a reversed range simply matches nothing.
    pub fn get_users_by_dob_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> UserServiceResult<Vec<UserDto>> {
        observe("user_dob_range", || -> UserServiceResult<_> {
            let users = self.repo.find_users_by_date_of_birth(start, end)?;
            Ok(users.into_iter().map(user_to_dto).collect())
        })
    }

    /// Overwrites the mutable attributes of an existing user.
    ///
    /// Returns `false` when no user has `id`.
    pub fn update_user(&self, id: UserId, dto: &UserDto) -> UserServiceResult<bool> {
        observe("user_update", || -> UserServiceResult<_> {
            let Some(mut user) = self.repo.get_user(id)? else {
                return Ok(false);
            };
            apply_user_dto(dto, &mut user);
            Ok(self.repo.update_user(&user)?)
        })
    }

    /// Deletes a user and all of its tools. Returns `false` when absent.
    pub fn delete_user(&self, id: UserId) -> UserServiceResult<bool> {
        observe("user_delete", || -> UserServiceResult<_> {
            Ok(self.repo.delete_user(id)?)
        })
    }
}
