use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;
use utoipa::IntoParams;

use super::error::ApiResult;
use crate::domain::{DomainError, MemberTeamDto, Page, PageDefaults, PageRequest, SearchCondition};
use crate::infrastructure::AppState;
use crate::utils::params::empty_string_as_none;

/// Page parameters of `/v2/members`
#[derive(Debug, Default, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageParams {
    /// Zero-based page index, defaults to 0
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub page: Option<i64>,
    /// Page size, defaults to the configured default size
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub size: Option<i64>,
    /// `property[,asc|desc]`, e.g. `age,desc`
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub sort: Option<String>,
}

impl PageParams {
    /// Negative pages clamp to 0; sizes below 1 fall back to the default and
    /// sizes above the maximum clamp to it.
    pub fn resolve(&self, defaults: &PageDefaults) -> Result<PageRequest, DomainError> {
        let number = self.page.unwrap_or(0).max(0) as u64;
        let size = match self.size {
            Some(size) if size >= 1 => (size as u64).min(defaults.max_size),
            _ => defaults.default_size,
        };

        let request = PageRequest::of(number, size);
        match self.sort.as_deref() {
            Some(sort) => Ok(request.with_sort(sort.parse()?)),
            None => Ok(request),
        }
    }
}

#[utoipa::path(
    get,
    path = "/v1/members",
    params(SearchCondition),
    responses(
        (status = 200, description = "All matching members with their team", body = [MemberTeamDto]),
        (status = 400, description = "Unparseable parameter")
    )
)]
pub async fn search_member_v1(
    State(state): State<AppState>,
    Query(condition): Query<SearchCondition>,
) -> ApiResult<Json<Vec<MemberTeamDto>>> {
    let members = state.member_repo.search(&condition).await?;
    Ok(Json(members))
}

#[utoipa::path(
    get,
    path = "/v2/members",
    params(SearchCondition, PageParams),
    responses(
        (status = 200, description = "Page of matching members: content, totalElements, totalPages, size, number"),
        (status = 400, description = "Unparseable parameter or unknown sort")
    )
)]
pub async fn search_member_v2(
    State(state): State<AppState>,
    Query(condition): Query<SearchCondition>,
    Query(params): Query<PageParams>,
) -> ApiResult<Json<Page<MemberTeamDto>>> {
    let request = params.resolve(&state.page_defaults)?;
    let page = state
        .member_repo
        .search_page_complex(&condition, &request)
        .await?;
    Ok(Json(page))
}
