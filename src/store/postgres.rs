use async_trait::async_trait;
use serde_json::{Map, Value};
use sqlx::postgres::{PgArguments, PgRow};
use sqlx::{PgPool, Postgres, Row};

use crate::model::ResourceSpec;

use super::{ResourceStore, StoreError};

type PgQuery<'q> = sqlx::query::Query<'q, Postgres, PgArguments>;

/// Postgres-backed store. Column lists come from validated payload maps only,
/// so identifiers are trusted; values are always bound.
pub struct PgStore {
    table: &'static str,
    pool: PgPool,
}

impl PgStore {
    pub fn new(spec: &'static ResourceSpec, pool: PgPool) -> Self {
        Self {
            table: spec.table,
            pool,
        }
    }
}

/// Rows are projected through row_to_json so one query shape serves every
/// table regardless of its column set.
fn row_value(row: &PgRow) -> Result<Value, StoreError> {
    row.try_get::<Value, _>("row").map_err(StoreError::from)
}

fn bind_json<'q>(query: PgQuery<'q>, value: &'q Value) -> PgQuery<'q> {
    match value {
        Value::String(s) => query.bind(s.as_str()),
        Value::Number(n) if n.is_i64() => query.bind(n.as_i64()),
        Value::Number(n) => query.bind(n.as_f64()),
        Value::Bool(b) => query.bind(*b),
        // Arrays, objects and nulls land in jsonb columns (deck card lists)
        other => query.bind(other),
    }
}

#[async_trait]
impl ResourceStore for PgStore {
    async fn find_many(&self) -> Result<Vec<Value>, StoreError> {
        let sql = format!(
            "SELECT row_to_json(t) AS row FROM (SELECT * FROM \"{}\" ORDER BY id) t",
            self.table
        );
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;
        rows.iter().map(row_value).collect()
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Value>, StoreError> {
        let sql = format!(
            "SELECT row_to_json(t) AS row FROM (SELECT * FROM \"{}\" WHERE id = $1) t",
            self.table
        );
        match sqlx::query(&sql).bind(id).fetch_optional(&self.pool).await? {
            Some(row) => Ok(Some(row_value(&row)?)),
            None => Ok(None),
        }
    }

    async fn create(&self, draft: Map<String, Value>) -> Result<Value, StoreError> {
        let columns: Vec<String> = draft.keys().map(|k| format!("\"{}\"", k)).collect();
        let placeholders: Vec<String> = (1..=draft.len()).map(|i| format!("${}", i)).collect();
        let sql = format!(
            "WITH inserted AS (INSERT INTO \"{}\" ({}) VALUES ({}) RETURNING *) \
             SELECT row_to_json(inserted) AS row FROM inserted",
            self.table,
            columns.join(", "),
            placeholders.join(", ")
        );

        let mut query = sqlx::query(&sql);
        for value in draft.values() {
            query = bind_json(query, value);
        }

        let row = query.fetch_one(&self.pool).await?;
        row_value(&row)
    }

    async fn update(&self, id: i64, patch: Map<String, Value>) -> Result<Value, StoreError> {
        let assignments: Vec<String> = patch
            .keys()
            .enumerate()
            .map(|(i, k)| format!("\"{}\" = ${}", k, i + 1))
            .collect();
        let sql = format!(
            "WITH updated AS (UPDATE \"{}\" SET {} WHERE id = ${} RETURNING *) \
             SELECT row_to_json(updated) AS row FROM updated",
            self.table,
            assignments.join(", "),
            patch.len() + 1
        );

        let mut query = sqlx::query(&sql);
        for value in patch.values() {
            query = bind_json(query, value);
        }
        query = query.bind(id);

        // A row deleted between the handler's existence check and this call
        // surfaces as RowNotFound; that race is accepted, not locked away.
        let row = query.fetch_one(&self.pool).await?;
        row_value(&row)
    }

    async fn delete(&self, id: i64) -> Result<(), StoreError> {
        let sql = format!("DELETE FROM \"{}\" WHERE id = $1", self.table);
        let result = sqlx::query(&sql).bind(id).execute(&self.pool).await?;

        // Deleting an absent row is a storage failure, matching the engine
        // this replaces; the handler reports it as the delete error message.
        if result.rows_affected() == 0 {
            return Err(StoreError::Backend(format!(
                "no {} row with id {}",
                self.table, id
            )));
        }
        Ok(())
    }
}
