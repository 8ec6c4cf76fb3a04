//! Repository trait definitions
//!
//! These traits define the contract for data access.
//! Implementations live in the infrastructure layer.

use async_trait::async_trait;

use super::{
    AgeStats, DomainError, MemberTeamDto, Page, PageRequest, SearchCondition, TeamAgeAverage,
};

/// Team data
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Team {
    pub id: i64,
    pub name: String,
}

/// Member data, without its team
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Member {
    pub id: i64,
    pub username: Option<String>,
    pub age: i32,
    pub team_id: Option<i64>,
}

/// Input for creating a member
#[derive(Debug, Clone, Default)]
pub struct NewMember {
    pub username: Option<String>,
    pub age: i32,
    pub team_id: Option<i64>,
}

impl NewMember {
    pub fn new(username: impl Into<String>, age: i32) -> Self {
        Self {
            username: Some(username.into()),
            age,
            team_id: None,
        }
    }

    pub fn in_team(mut self, team_id: i64) -> Self {
        self.team_id = Some(team_id);
        self
    }
}

/// Repository trait for Team entity
#[async_trait]
pub trait TeamRepository: Send + Sync {
    /// Create a new team
    async fn create(&self, name: String) -> Result<Team, DomainError>;

    /// Find a team by ID
    async fn find_by_id(&self, id: i64) -> Result<Option<Team>, DomainError>;

    /// Find all teams
    async fn find_all(&self) -> Result<Vec<Team>, DomainError>;
}

/// Repository trait for Member entity
#[async_trait]
pub trait MemberRepository: Send + Sync {
    /// Create a new member. The team, if any, must exist.
    async fn create(&self, member: NewMember) -> Result<Member, DomainError>;

    /// Find a member by ID
    async fn find_by_id(&self, id: i64) -> Result<Option<Member>, DomainError>;

    /// Find all members
    async fn find_all(&self) -> Result<Vec<Member>, DomainError>;

    /// Find members with exactly this username
    async fn find_by_username(&self, username: &str) -> Result<Vec<Member>, DomainError>;

    /// All members (left-joined to their team) matching the condition
    async fn search(&self, condition: &SearchCondition) -> Result<Vec<MemberTeamDto>, DomainError>;

    /// One page of matches; always issues the count query
    async fn search_page_simple(
        &self,
        condition: &SearchCondition,
        page: &PageRequest,
    ) -> Result<Page<MemberTeamDto>, DomainError>;

    /// One page of matches; skips the count query when the page proves the total
    async fn search_page_complex(
        &self,
        condition: &SearchCondition,
        page: &PageRequest,
    ) -> Result<Page<MemberTeamDto>, DomainError>;

    /// Set the username of every matching member. Returns rows affected.
    async fn bulk_rename(
        &self,
        condition: &SearchCondition,
        username: &str,
    ) -> Result<u64, DomainError>;

    /// Add `delta` to the age of every matching member. Returns rows affected.
    /// Nothing is updated if any resulting age would not fit in an `i32`.
    async fn bulk_add_age(
        &self,
        condition: &SearchCondition,
        delta: i32,
    ) -> Result<u64, DomainError>;

    /// Delete every matching member. Returns rows affected.
    async fn bulk_delete(&self, condition: &SearchCondition) -> Result<u64, DomainError>;

    /// Count, sum, average, max and min of the ages of matching members
    async fn age_stats(&self, condition: &SearchCondition) -> Result<AgeStats, DomainError>;

    /// Average member age per team, ordered by team name. Members without a team are left out.
    async fn team_age_averages(&self) -> Result<Vec<TeamAgeAverage>, DomainError>;
}
