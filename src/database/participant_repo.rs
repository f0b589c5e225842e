use sqlx::SqlitePool;

use crate::models::ParticipantRow;

pub const SQL_INSERT_PARTICIPANT: &str = r#"
INSERT INTO participants DEFAULT VALUES
"#;

pub const SQL_FIND_PARTICIPANT: &str = r#"
SELECT
    id,
    created_at,
    age,
    gender
FROM participants
WHERE id = ?1
LIMIT 1
"#;

pub const SQL_UPDATE_DEMOGRAPHICS: &str = r#"
UPDATE participants
SET age = ?2,
    gender = ?3
WHERE id = ?1
"#;

pub async fn insert_participant(pool: &SqlitePool) -> sqlx::Result<i64> {
    let result = sqlx::query(SQL_INSERT_PARTICIPANT).execute(pool).await?;
    Ok(result.last_insert_rowid())
}

pub async fn find_participant(
    pool: &SqlitePool,
    participant_id: i64,
) -> sqlx::Result<Option<ParticipantRow>> {
    sqlx::query_as::<_, ParticipantRow>(SQL_FIND_PARTICIPANT)
        .bind(participant_id)
        .fetch_optional(pool)
        .await
}

pub async fn update_demographics(
    pool: &SqlitePool,
    participant_id: i64,
    age: Option<i64>,
    gender: Option<&str>,
) -> sqlx::Result<u64> {
    let result = sqlx::query(SQL_UPDATE_DEMOGRAPHICS)
        .bind(participant_id)
        .bind(age)
        .bind(gender)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}
