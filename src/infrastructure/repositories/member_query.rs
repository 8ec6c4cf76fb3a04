//! Dynamic member query composition
//!
//! Each predicate builder maps one optional search field to either a single
//! condition or `None`. Composition ANDs the `Some`s onto a query and skips
//! the `None`s entirely, so an empty [`SearchCondition`] leaves the query
//! without a WHERE clause.

use sea_orm::sea_query::{Expr, Query, SimpleExpr};
use sea_orm::{
    ColumnTrait, EntityTrait, FromQueryResult, JoinType, Order, QueryFilter, QueryOrder,
    QuerySelect, RelationTrait, Select,
};

use crate::domain::{Direction, MemberTeamDto, SearchCondition, Sort, SortProperty};
use crate::models::{member, team};

/// Row shape of [`member_team_select`]
#[derive(Debug, FromQueryResult)]
pub struct MemberTeamRow {
    pub member_id: i64,
    pub username: Option<String>,
    pub age: i32,
    pub team_id: Option<i64>,
    pub team_name: Option<String>,
}

impl From<MemberTeamRow> for MemberTeamDto {
    fn from(row: MemberTeamRow) -> Self {
        MemberTeamDto {
            member_id: row.member_id,
            username: row.username,
            age: row.age,
            team_id: row.team_id,
            team_name: row.team_name,
        }
    }
}

fn has_text(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.trim().is_empty())
}

pub fn username_eq(username: Option<&str>) -> Option<SimpleExpr> {
    has_text(username).map(|u| member::Column::Username.eq(u))
}

/// Team name filter for queries that join `teams`
pub fn team_name_eq(team_name: Option<&str>) -> Option<SimpleExpr> {
    has_text(team_name).map(|t| team::Column::Name.eq(t))
}

/// Team name filter for statements on `members` alone (UPDATE, DELETE)
pub fn team_name_in(team_name: Option<&str>) -> Option<SimpleExpr> {
    has_text(team_name).map(|t| {
        member::Column::TeamId.in_subquery(
            Query::select()
                .column(team::Column::Id)
                .from(team::Entity)
                .and_where(team::Column::Name.eq(t))
                .to_owned(),
        )
    })
}

pub fn age_goe(age: Option<i32>) -> Option<SimpleExpr> {
    age.map(|a| member::Column::Age.gte(a))
}

pub fn age_loe(age: Option<i32>) -> Option<SimpleExpr> {
    age.map(|a| member::Column::Age.lte(a))
}

/// Predicates of a condition, for queries over members joined to teams
pub fn search_predicates(condition: &SearchCondition) -> [Option<SimpleExpr>; 4] {
    [
        username_eq(condition.username.as_deref()),
        team_name_eq(condition.team_name.as_deref()),
        age_goe(condition.age_goe),
        age_loe(condition.age_loe),
    ]
}

/// Predicates of a condition, for statements that cannot join `teams`
pub fn member_predicates(condition: &SearchCondition) -> [Option<SimpleExpr>; 4] {
    [
        username_eq(condition.username.as_deref()),
        team_name_in(condition.team_name.as_deref()),
        age_goe(condition.age_goe),
        age_loe(condition.age_loe),
    ]
}

/// AND every present predicate onto `query`; absent ones add nothing
pub fn where_all<Q, I>(query: Q, predicates: I) -> Q
where
    Q: QueryFilter,
    I: IntoIterator<Item = Option<SimpleExpr>>,
{
    predicates
        .into_iter()
        .flatten()
        .fold(query, |query, predicate| query.filter(predicate))
}

/// Members left-joined to teams, with no projection
pub fn member_team_join() -> Select<member::Entity> {
    member::Entity::find().join(JoinType::LeftJoin, member::Relation::Team.def())
}

/// Members left-joined to teams, projected to [`MemberTeamRow`] columns
pub fn member_team_select() -> Select<member::Entity> {
    member::Entity::find()
        .select_only()
        .column_as(member::Column::Id, "member_id")
        .column(member::Column::Username)
        .column(member::Column::Age)
        .column_as(team::Column::Id, "team_id")
        .column_as(team::Column::Name, "team_name")
        .join(JoinType::LeftJoin, member::Relation::Team.def())
}

/// Projection query filtered by `condition`, unordered
pub fn search_query(condition: &SearchCondition) -> Select<member::Entity> {
    where_all(member_team_select(), search_predicates(condition))
}

/// Count query over the same join and predicates as [`search_query`]
pub fn count_query(condition: &SearchCondition) -> Select<member::Entity> {
    where_all(member_team_join(), search_predicates(condition))
}

/// Apply the requested ordering, or member id ascending when there is none.
///
/// Nullable properties sort nulls last in both directions. Member id breaks ties.
pub fn order_by_sort(query: Select<member::Entity>, sort: Option<Sort>) -> Select<member::Entity> {
    let Some(sort) = sort else {
        return query.order_by_asc(member::Column::Id);
    };

    let order = match sort.direction {
        Direction::Asc => Order::Asc,
        Direction::Desc => Order::Desc,
    };

    let query = match sort.property {
        SortProperty::MemberId => return query.order_by(member::Column::Id, order),
        SortProperty::Age => query.order_by(member::Column::Age, order),
        SortProperty::Username => query
            .order_by(
                Expr::col((member::Entity, member::Column::Username)).is_null(),
                Order::Asc,
            )
            .order_by(member::Column::Username, order),
        SortProperty::TeamId => query
            .order_by(Expr::col((team::Entity, team::Column::Id)).is_null(), Order::Asc)
            .order_by(team::Column::Id, order),
        SortProperty::TeamName => query
            .order_by(
                Expr::col((team::Entity, team::Column::Name)).is_null(),
                Order::Asc,
            )
            .order_by(team::Column::Name, order),
    };

    query.order_by_asc(member::Column::Id)
}
