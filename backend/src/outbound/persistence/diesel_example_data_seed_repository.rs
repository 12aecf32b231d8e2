//! PostgreSQL-backed demo data seeding.
//!
//! The run marker and every seeded row are written in one transaction. A
//! conflicting marker short-circuits the run; any later failure rolls the
//! marker back with the data.

use async_trait::async_trait;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use tracing::debug;

use crate::domain::ports::{
    ExampleDataSeedRepository, ExampleDataSeedRepositoryError, ExampleDataSeedRequest,
    SeedingResult,
};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::{
    FollowRow, NewEventRow, NewExampleDataRunRow, NewRegistrationRow, NewSkillRow, NewUserRow,
};
use super::pool::DbPool;
use super::schema::{events, example_data_runs, follows, registrations, user_skills, users};

/// Diesel implementation of [`ExampleDataSeedRepository`].
#[derive(Clone)]
pub struct DieselExampleDataSeedRepository {
    pool: DbPool,
}

impl DieselExampleDataSeedRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Insert rows borrowed from a seed request.
struct SeedRows<'a> {
    run: NewExampleDataRunRow<'a>,
    users: Vec<NewUserRow<'a>>,
    events: Vec<NewEventRow<'a>>,
    registrations: Vec<NewRegistrationRow>,
    follows: Vec<FollowRow>,
    skills: Vec<NewSkillRow<'a>>,
}

fn seed_rows(
    request: &ExampleDataSeedRequest,
) -> Result<SeedRows<'_>, ExampleDataSeedRepositoryError> {
    let seed = i64::try_from(request.seed)
        .map_err(|_| ExampleDataSeedRepositoryError::query("seed value overflows BIGINT"))?;
    let user_count = i32::try_from(request.users.len())
        .map_err(|_| ExampleDataSeedRepositoryError::query("user count overflows INTEGER"))?;

    let users = request
        .users
        .iter()
        .map(|user| NewUserRow {
            id: *user.id().as_uuid(),
            email: user.email().as_ref(),
            password_hash: request.password_hash.as_ref(),
            display_name: user.display_name().as_ref(),
            role: user.role().as_str(),
            profile_image_url: user.profile_image_url(),
        })
        .collect();
    let skills = request
        .skills
        .iter()
        .flat_map(|(user_id, set)| {
            set.iter().map(move |skill| NewSkillRow {
                user_id: *user_id.as_uuid(),
                skill: skill.as_ref(),
            })
        })
        .collect();

    Ok(SeedRows {
        run: NewExampleDataRunRow {
            seed_key: &request.seed_key,
            seed,
            user_count,
        },
        users,
        events: request.events.iter().map(NewEventRow::from).collect(),
        registrations: request
            .registrations
            .iter()
            .map(|registration| NewRegistrationRow {
                user_id: *registration.user_id.as_uuid(),
                event_id: *registration.event_id.as_uuid(),
            })
            .collect(),
        follows: request
            .follows
            .iter()
            .map(|(follower, followed)| FollowRow {
                follower_id: *follower.as_uuid(),
                followed_id: *followed.as_uuid(),
            })
            .collect(),
        skills,
    })
}

#[async_trait]
impl ExampleDataSeedRepository for DieselExampleDataSeedRepository {
    async fn seed_example_data(
        &self,
        request: ExampleDataSeedRequest,
    ) -> Result<SeedingResult, ExampleDataSeedRepositoryError> {
        let rows = seed_rows(&request)?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let result = conn
            .transaction(|conn| {
                async move {
                    let recorded = diesel::insert_into(example_data_runs::table)
                        .values(&rows.run)
                        .on_conflict(example_data_runs::seed_key)
                        .do_nothing()
                        .execute(conn)
                        .await?;
                    if recorded == 0 {
                        return Ok(SeedingResult::AlreadySeeded);
                    }

                    if !rows.users.is_empty() {
                        diesel::insert_into(users::table)
                            .values(&rows.users)
                            .execute(conn)
                            .await?;
                    }
                    if !rows.events.is_empty() {
                        diesel::insert_into(events::table)
                            .values(&rows.events)
                            .execute(conn)
                            .await?;
                    }
                    if !rows.registrations.is_empty() {
                        diesel::insert_into(registrations::table)
                            .values(&rows.registrations)
                            .on_conflict_do_nothing()
                            .execute(conn)
                            .await?;
                    }
                    if !rows.follows.is_empty() {
                        diesel::insert_into(follows::table)
                            .values(&rows.follows)
                            .on_conflict_do_nothing()
                            .execute(conn)
                            .await?;
                    }
                    if !rows.skills.is_empty() {
                        diesel::insert_into(user_skills::table)
                            .values(&rows.skills)
                            .on_conflict_do_nothing()
                            .execute(conn)
                            .await?;
                    }
                    Ok(SeedingResult::Applied)
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        debug!(seed_key = %request.seed_key, ?result, "example data seed transaction finished");
        Ok(result)
    }
}
