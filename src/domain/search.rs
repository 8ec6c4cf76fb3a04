//! Member search input and the flattened member/team projection

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::utils::params::empty_string_as_none;

/// Filter criteria for member searches.
///
/// Every field is optional; an unset (or blank) field means "no filter on
/// this field". Supplying nothing matches every member.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct SearchCondition {
    /// Exact username
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub username: Option<String>,
    /// Exact team name
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub team_name: Option<String>,
    /// Minimum age, inclusive
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub age_goe: Option<i32>,
    /// Maximum age, inclusive
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub age_loe: Option<i32>,
}

impl SearchCondition {
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn team_name(mut self, team_name: impl Into<String>) -> Self {
        self.team_name = Some(team_name.into());
        self
    }

    pub fn age_goe(mut self, age: i32) -> Self {
        self.age_goe = Some(age);
        self
    }

    pub fn age_loe(mut self, age: i32) -> Self {
        self.age_loe = Some(age);
        self
    }
}

/// Member joined with its (optional) team, as returned by searches
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MemberTeamDto {
    pub member_id: i64,
    pub username: Option<String>,
    pub age: i32,
    pub team_id: Option<i64>,
    pub team_name: Option<String>,
}

/// Aggregates over the ages of matching members.
///
/// `sum`, `avg`, `max` and `min` are `None` when nothing matched.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgeStats {
    pub count: u64,
    pub sum: Option<i64>,
    pub avg: Option<f64>,
    pub max: Option<i32>,
    pub min: Option<i32>,
}

/// Average member age of one team
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamAgeAverage {
    pub team_name: String,
    pub avg_age: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::Query;
    use axum::http::Uri;

    fn bind(uri: &str) -> SearchCondition {
        let uri: Uri = uri.parse().unwrap();
        Query::<SearchCondition>::try_from_uri(&uri).unwrap().0
    }

    #[test]
    fn binds_camel_case_params() {
        let condition = bind("/v1/members?username=member1&teamName=teamA&ageGoe=10&ageLoe=40");
        assert_eq!(
            condition,
            SearchCondition::default()
                .username("member1")
                .team_name("teamA")
                .age_goe(10)
                .age_loe(40)
        );
    }

    #[test]
    fn empty_params_bind_as_absent() {
        let condition = bind("/v1/members?username=&teamName=&ageGoe=&ageLoe=");
        assert_eq!(condition, SearchCondition::default());
    }

    #[test]
    fn missing_params_bind_as_absent() {
        assert_eq!(bind("/v1/members"), SearchCondition::default());
    }

    #[test]
    fn unparseable_age_is_rejected() {
        let uri: Uri = "/v1/members?ageGoe=ten".parse().unwrap();
        assert!(Query::<SearchCondition>::try_from_uri(&uri).is_err());
    }

    #[test]
    fn projection_serializes_camel_case() {
        let dto = MemberTeamDto {
            member_id: 1,
            username: Some("member1".to_string()),
            age: 10,
            team_id: None,
            team_name: None,
        };
        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "memberId": 1,
                "username": "member1",
                "age": 10,
                "teamId": null,
                "teamName": null
            })
        );
    }
}
