//! Tool use-case service.
//!
//! # Responsibility
//! - Provide tool CRUD, paging and owner queries.
//! - Surface missing owners as `OwnerNotFound`, distinct from plain misses.
//!
//! # Invariants
//! - A tool is only written when its owner exists at write time; the check
//!   runs even when the owner is unchanged.
//! - Owner listings for unknown users are empty, not errors.

use crate::error::{Classify, ErrorKind};
use crate::mapping::dto::ToolDto;
use crate::mapping::mapper::{apply_tool_dto, dto_to_new_tool, tool_to_dto};
use crate::model::tool::ToolId;
use crate::model::user::UserId;
use crate::repo::page::{InvalidPageRequest, Page, PageRequest, ToolSortField, UnknownSortField};
use crate::repo::tool_repo::ToolRepository;
use crate::repo::user_repo::RepoError;
use crate::service::{now_epoch_ms, observe};
use thiserror::Error;

pub type ToolServiceResult<T> = Result<T, ToolServiceError>;

/// Service error for tool use-cases.
#[derive(Debug, Error)]
pub enum ToolServiceError {
    /// Referenced owner does not exist.
    #[error("user with id {0} does not exist")]
    OwnerNotFound(UserId),
    #[error(transparent)]
    InvalidSortField(#[from] UnknownSortField),
    #[error(transparent)]
    InvalidPageRequest(#[from] InvalidPageRequest),
    #[error(transparent)]
    Repo(RepoError),
}

impl From<RepoError> for ToolServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::OwnerNotFound(user_id) => Self::OwnerNotFound(user_id),
            other => Self::Repo(other),
        }
    }
}

impl Classify for ToolServiceError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::OwnerNotFound(_) => ErrorKind::OwnerNotFound,
            Self::InvalidSortField(_) | Self::InvalidPageRequest(_) => ErrorKind::Validation,
            Self::Repo(err) => err.kind(),
        }
    }
}

/// Tool service facade over repository implementations.
pub struct ToolService<R: ToolRepository> {
    repo: R,
}

impl<R: ToolRepository> ToolService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Persists a new tool for an existing owner.
    ///
    /// # Errors
    /// - `OwnerNotFound` when `dto.user_id` does not exist; nothing is written.
    pub fn create_tool(&self, dto: &ToolDto) -> ToolServiceResult<ToolDto> {
        observe("tool_create", || -> ToolServiceResult<_> {
            let saved = self.repo.create_tool(&dto_to_new_tool(dto, now_epoch_ms()))?;
            Ok(tool_to_dto(saved))
        })
    }

    pub fn get_all_tools(&self) -> ToolServiceResult<Vec<ToolDto>> {
        observe("tool_list", || -> ToolServiceResult<_> {
            let tools = self.repo.list_tools()?;
            Ok(tools.into_iter().map(tool_to_dto).collect())
        })
    }

    /// Returns one zero-indexed page sorted ascending by `sort_field`.
    pub fn get_tools_page(
        &self,
        page: u32,
        size: u32,
        sort_field: &str,
    ) -> ToolServiceResult<Page<ToolDto>> {
        observe("tool_page", || -> ToolServiceResult<_> {
            let request = PageRequest::new(page, size)?;
            let sort = sort_field.parse::<ToolSortField>()?;
            Ok(self.repo.list_tools_page(request, sort)?.map(tool_to_dto))
        })
    }

    pub fn get_tool_by_id(&self, id: ToolId) -> ToolServiceResult<Option<ToolDto>> {
        observe("tool_get", || -> ToolServiceResult<_> {
            Ok(self.repo.get_tool(id)?.map(tool_to_dto))
        })
    }

    /// Tools owned by `user_id` in store order; empty for unknown users.
    pub fn get_tools_by_user_id(&self, user_id: UserId) -> ToolServiceResult<Vec<ToolDto>> {
        observe("tool_list_by_owner", || -> ToolServiceResult<_> {
            let tools = self.repo.find_tools_by_owner(user_id)?;
            Ok(tools.into_iter().map(tool_to_dto).collect())
        })
    }

    /// Overwrites name, type and owner of the tool named by `dto.tool_id`.
    ///
    /// Returns `false` when `dto.tool_id` is missing or unknown.
    ///
    /// # Errors
    /// - `OwnerNotFound` when the tool exists but `dto.user_id` does not.
    pub fn update_tool(&self, dto: &ToolDto) -> ToolServiceResult<bool> {
        observe("tool_update", || -> ToolServiceResult<_> {
            let Some(tool_id) = dto.tool_id else {
                return Ok(false);
            };
            let Some(mut tool) = self.repo.get_tool(tool_id)? else {
                return Ok(false);
            };
            apply_tool_dto(dto, &mut tool);
            Ok(self.repo.update_tool(&tool)?)
        })
    }

    pub fn delete_tool(&self, id: ToolId) -> ToolServiceResult<bool> {
        observe("tool_delete", || -> ToolServiceResult<_> {
            Ok(self.repo.delete_tool(id)?)
        })
    }
}
