use sea_orm::*;

use crate::models::{member, team};

/// Number of demo members created by [`seed_demo_data`]
pub const DEMO_MEMBER_COUNT: i32 = 100;

/// Seed two teams and `member0..member99` (age = index, alternating teams).
///
/// Does nothing if any member already exists.
pub async fn seed_demo_data(db: &DatabaseConnection) -> Result<(), DbErr> {
    if member::Entity::find().count(db).await? > 0 {
        tracing::info!("Members already present, skipping demo seed");
        return Ok(());
    }

    let txn = db.begin().await?;

    let team_a = team::ActiveModel {
        name: Set("teamA".to_owned()),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    let team_b = team::ActiveModel {
        name: Set("teamB".to_owned()),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    let members = (0..DEMO_MEMBER_COUNT).map(|i| {
        let team_id = if i % 2 == 0 { team_a.id } else { team_b.id };
        member::ActiveModel {
            username: Set(Some(format!("member{}", i))),
            age: Set(i),
            team_id: Set(Some(team_id)),
            ..Default::default()
        }
    });

    member::Entity::insert_many(members).exec(&txn).await?;
    txn.commit().await?;

    tracing::info!("Seeded 2 teams and {} members", DEMO_MEMBER_COUNT);
    Ok(())
}
