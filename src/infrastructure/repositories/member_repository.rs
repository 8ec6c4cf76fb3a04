//! SeaORM implementation of MemberRepository

use async_trait::async_trait;
use sea_orm::sea_query::{Expr, Func, SimpleExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult, JoinType,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set, TransactionTrait,
};

use crate::domain::{
    AgeStats, DomainError, Member, MemberRepository, MemberTeamDto, NewMember, Page, PageRequest,
    SearchCondition, TeamAgeAverage, known_total,
};
use crate::models::member::{ActiveModel, Column, Entity as MemberEntity};
use crate::models::{member, team};

use super::member_query::{
    MemberTeamRow, count_query, member_predicates, order_by_sort, search_query, where_all,
};

#[derive(Debug, FromQueryResult)]
struct AgeStatsRow {
    count: i64,
    sum: Option<i64>,
    avg: Option<f64>,
    max: Option<i32>,
    min: Option<i32>,
}

#[derive(Debug, FromQueryResult)]
struct AgeBoundsRow {
    max: Option<i64>,
    min: Option<i64>,
}

#[derive(Debug, FromQueryResult)]
struct TeamAgeAverageRow {
    team_name: String,
    avg_age: f64,
}

impl From<member::Model> for Member {
    fn from(m: member::Model) -> Self {
        Member {
            id: m.id,
            username: m.username,
            age: m.age,
            team_id: m.team_id,
        }
    }
}

/// SeaORM-based implementation of MemberRepository
pub struct SeaOrmMemberRepository {
    db: DatabaseConnection,
}

impl SeaOrmMemberRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn search_page(
        &self,
        condition: &SearchCondition,
        page: &PageRequest,
        skip_count: bool,
    ) -> Result<Page<MemberTeamDto>, DomainError> {
        tracing::debug!(
            "Search members page - condition={:?}, page={}, size={}, sort={:?}",
            condition,
            page.number(),
            page.size(),
            page.sort()
        );

        let txn = self.db.begin().await?;

        let rows = order_by_sort(search_query(condition), page.sort())
            .offset(page.offset())
            .limit(page.size())
            .into_model::<MemberTeamRow>()
            .all(&txn)
            .await?;

        let total = match known_total(page, rows.len()).filter(|_| skip_count) {
            Some(total) => {
                tracing::debug!("Count query skipped, total={} from content page", total);
                total
            }
            None => count_query(condition).count(&txn).await?,
        };

        txn.commit().await?;

        let content = rows.into_iter().map(MemberTeamDto::from).collect();
        Ok(Page::new(content, page, total))
    }
}

#[async_trait]
impl MemberRepository for SeaOrmMemberRepository {
    async fn create(&self, member: NewMember) -> Result<Member, DomainError> {
        if let Some(team_id) = member.team_id
            && team::Entity::find_by_id(team_id).one(&self.db).await?.is_none()
        {
            return Err(DomainError::Validation(format!(
                "team {} does not exist",
                team_id
            )));
        }

        let new_member = ActiveModel {
            username: Set(member.username),
            age: Set(member.age),
            team_id: Set(member.team_id),
            ..Default::default()
        };

        let result = new_member.insert(&self.db).await?;
        Ok(Member::from(result))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Member>, DomainError> {
        let member = MemberEntity::find_by_id(id).one(&self.db).await?;
        Ok(member.map(Member::from))
    }

    async fn find_all(&self) -> Result<Vec<Member>, DomainError> {
        let members = MemberEntity::find()
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await?;
        Ok(members.into_iter().map(Member::from).collect())
    }

    async fn find_by_username(&self, username: &str) -> Result<Vec<Member>, DomainError> {
        let members = MemberEntity::find()
            .filter(Column::Username.eq(username))
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await?;
        Ok(members.into_iter().map(Member::from).collect())
    }

    async fn search(&self, condition: &SearchCondition) -> Result<Vec<MemberTeamDto>, DomainError> {
        tracing::debug!("Search members - condition={:?}", condition);

        let rows = order_by_sort(search_query(condition), None)
            .into_model::<MemberTeamRow>()
            .all(&self.db)
            .await?;

        Ok(rows.into_iter().map(MemberTeamDto::from).collect())
    }

    async fn search_page_simple(
        &self,
        condition: &SearchCondition,
        page: &PageRequest,
    ) -> Result<Page<MemberTeamDto>, DomainError> {
        self.search_page(condition, page, false).await
    }

    async fn search_page_complex(
        &self,
        condition: &SearchCondition,
        page: &PageRequest,
    ) -> Result<Page<MemberTeamDto>, DomainError> {
        self.search_page(condition, page, true).await
    }

    async fn bulk_rename(
        &self,
        condition: &SearchCondition,
        username: &str,
    ) -> Result<u64, DomainError> {
        let update = MemberEntity::update_many()
            .col_expr(Column::Username, Expr::val(username).into());

        let result = where_all(update, member_predicates(condition))
            .exec(&self.db)
            .await?;

        tracing::info!(
            "Bulk rename to {:?} affected {} members",
            username,
            result.rows_affected
        );
        Ok(result.rows_affected)
    }

    async fn bulk_add_age(
        &self,
        condition: &SearchCondition,
        delta: i32,
    ) -> Result<u64, DomainError> {
        let txn = self.db.begin().await?;

        let age = || Expr::col((MemberEntity, Column::Age));
        let bounds = where_all(
            MemberEntity::find()
                .select_only()
                .column_as(SimpleExpr::from(Func::max(age())), "max")
                .column_as(SimpleExpr::from(Func::min(age())), "min"),
            member_predicates(condition),
        )
        .into_model::<AgeBoundsRow>()
        .one(&txn)
        .await?;

        // Ages are read back as i32
        let shifted_out_of_range =
            |age: i64| i32::try_from(age.saturating_add(i64::from(delta))).is_err();
        if let Some(AgeBoundsRow { max, min }) = bounds
            && (max.is_some_and(shifted_out_of_range) || min.is_some_and(shifted_out_of_range))
        {
            return Err(DomainError::Validation(format!(
                "adding {} would move a member age out of range",
                delta
            )));
        }

        let update =
            MemberEntity::update_many().col_expr(Column::Age, Expr::col(Column::Age).add(delta));

        let result = where_all(update, member_predicates(condition))
            .exec(&txn)
            .await?;

        txn.commit().await?;

        tracing::info!(
            "Bulk age += {} affected {} members",
            delta,
            result.rows_affected
        );
        Ok(result.rows_affected)
    }

    async fn bulk_delete(&self, condition: &SearchCondition) -> Result<u64, DomainError> {
        let result = where_all(MemberEntity::delete_many(), member_predicates(condition))
            .exec(&self.db)
            .await?;

        tracing::info!("Bulk delete removed {} members", result.rows_affected);
        Ok(result.rows_affected)
    }

    async fn age_stats(&self, condition: &SearchCondition) -> Result<AgeStats, DomainError> {
        let age = || Expr::col((MemberEntity, Column::Age));

        let query = count_query(condition)
            .select_only()
            .column_as(
                SimpleExpr::from(Func::count(Expr::col((MemberEntity, Column::Id)))),
                "count",
            )
            .column_as(SimpleExpr::from(Func::sum(age())), "sum")
            .column_as(SimpleExpr::from(Func::avg(age())), "avg")
            .column_as(SimpleExpr::from(Func::max(age())), "max")
            .column_as(SimpleExpr::from(Func::min(age())), "min");

        let row = query.into_model::<AgeStatsRow>().one(&self.db).await?;

        Ok(match row {
            Some(row) => AgeStats {
                count: row.count.max(0) as u64,
                sum: row.sum,
                avg: row.avg,
                max: row.max,
                min: row.min,
            },
            None => AgeStats {
                count: 0,
                sum: None,
                avg: None,
                max: None,
                min: None,
            },
        })
    }

    async fn team_age_averages(&self) -> Result<Vec<TeamAgeAverage>, DomainError> {
        let rows = MemberEntity::find()
            .select_only()
            .column_as(team::Column::Name, "team_name")
            .column_as(
                SimpleExpr::from(Func::avg(Expr::col((MemberEntity, Column::Age)))),
                "avg_age",
            )
            .join(JoinType::InnerJoin, member::Relation::Team.def())
            .group_by(team::Column::Name)
            .order_by_asc(team::Column::Name)
            .into_model::<TeamAgeAverageRow>()
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|r| TeamAgeAverage {
                team_name: r.team_name,
                avg_age: r.avg_age,
            })
            .collect())
    }
}
