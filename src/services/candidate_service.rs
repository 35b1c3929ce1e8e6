use sqlx::PgPool;
use uuid::Uuid;

use crate::database::query::{bind_query_as, bind_query_scalar};
use crate::dto::candidate_dto::{
    CandidatePatch, CandidateSearch, NewCandidate, Pagination, StatusSummary,
};
use crate::error::{Error, Result};
use crate::models::candidate::{Candidate, CANDIDATE_COLUMNS};
use crate::services::candidate_query::{self, CandidateListQuery};

#[derive(Clone)]
pub struct CandidateService {
    pool: PgPool,
}

pub struct CandidateList {
    pub items: Vec<Candidate>,
    pub pagination: Pagination,
}

impl CandidateService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The page and the count are independent reads issued concurrently, so
    /// `total` may drift from the rows under concurrent writes.
    pub async fn list(&self, recruiter_id: Uuid, search: &CandidateSearch) -> Result<CandidateList> {
        let query = CandidateListQuery::build(recruiter_id, search);

        let page_sql = query.page_sql();
        let page_args = query.page_args();
        let items_statement =
            bind_query_as(sqlx::query_as::<_, Candidate>(&page_sql), &page_args);

        let count_sql = query.count_sql();
        let total_statement =
            bind_query_scalar(sqlx::query_scalar::<_, i64>(&count_sql), query.count_args());

        let (items, total) = tokio::try_join!(
            items_statement.fetch_all(&self.pool),
            total_statement.fetch_one(&self.pool),
        )?;

        Ok(CandidateList {
            items,
            pagination: Pagination::new(search.page, query.limit(), total),
        })
    }

    pub async fn get(&self, recruiter_id: Uuid, candidate_id: Uuid) -> Result<Candidate> {
        let sql = format!(
            "SELECT {} FROM candidates WHERE id = $1 AND recruiter_id = $2",
            CANDIDATE_COLUMNS
        );
        sqlx::query_as::<_, Candidate>(&sql)
            .bind(candidate_id)
            .bind(recruiter_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(Error::NotFoundOrForbidden)
    }

    pub async fn create(&self, recruiter_id: Uuid, candidate: NewCandidate) -> Result<Candidate> {
        let (sql, args) = candidate_query::insert_candidate(recruiter_id, candidate);
        let created = bind_query_as(sqlx::query_as::<_, Candidate>(&sql), &args)
            .fetch_one(&self.pool)
            .await?;

        tracing::info!(
            recruiter_id = %recruiter_id,
            candidate_id = %created.id,
            "candidate created"
        );
        Ok(created)
    }

    /// Missing and foreign candidates are indistinguishable to the caller.
    pub async fn update(
        &self,
        recruiter_id: Uuid,
        candidate_id: Uuid,
        patch: CandidatePatch,
    ) -> Result<Candidate> {
        let (sql, args) = candidate_query::update_candidate(recruiter_id, candidate_id, patch);
        let updated = bind_query_as(sqlx::query_as::<_, Candidate>(&sql), &args)
            .fetch_optional(&self.pool)
            .await?;

        match updated {
            Some(candidate) => {
                tracing::info!(
                    recruiter_id = %recruiter_id,
                    candidate_id = %candidate_id,
                    "candidate updated"
                );
                Ok(candidate)
            }
            None => {
                tracing::debug!(
                    recruiter_id = %recruiter_id,
                    candidate_id = %candidate_id,
                    "update matched no owned candidate"
                );
                Err(Error::NotFoundOrForbidden)
            }
        }
    }

    pub async fn delete(&self, recruiter_id: Uuid, candidate_id: Uuid) -> Result<()> {
        let res = sqlx::query("DELETE FROM candidates WHERE id = $1 AND recruiter_id = $2")
            .bind(candidate_id)
            .bind(recruiter_id)
            .execute(&self.pool)
            .await?;

        if res.rows_affected() == 0 {
            return Err(Error::NotFoundOrForbidden);
        }

        tracing::info!(
            recruiter_id = %recruiter_id,
            candidate_id = %candidate_id,
            "candidate deleted"
        );
        Ok(())
    }

    pub async fn status_summary(&self, recruiter_id: Uuid) -> Result<StatusSummary> {
        let rows = sqlx::query_as::<_, (String, i64)>(
            r#"
            SELECT status, COUNT(*)
            FROM candidates
            WHERE recruiter_id = $1
            GROUP BY status
            "#,
        )
        .bind(recruiter_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(StatusSummary::from_counts(rows))
    }
}
