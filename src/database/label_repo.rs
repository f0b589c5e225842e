use sqlx::SqlitePool;

pub struct NewLabel {
    pub participant_id: i64,
    pub image_id: i64,
    pub rating: i64,
}

pub const SQL_INSERT_LABEL: &str = r#"
INSERT INTO labels (
  participant_id,
  image_id,
  rating
) VALUES (?1, ?2, ?3)
"#;

pub const SQL_COUNT_LABELS: &str = r#"
SELECT COUNT(*)
FROM labels
"#;

pub const SQL_COUNT_LABELS_FOR_IMAGE: &str = r#"
SELECT COUNT(*)
FROM labels
WHERE image_id = ?1
"#;

pub async fn insert_label(pool: &SqlitePool, label: NewLabel) -> sqlx::Result<i64> {
    let result = sqlx::query(SQL_INSERT_LABEL)
        .bind(label.participant_id)
        .bind(label.image_id)
        .bind(label.rating)
        .execute(pool)
        .await?;
    Ok(result.last_insert_rowid())
}

pub async fn count_labels(pool: &SqlitePool) -> sqlx::Result<i64> {
    sqlx::query_scalar::<_, i64>(SQL_COUNT_LABELS)
        .fetch_one(pool)
        .await
}

pub async fn count_labels_for_image(pool: &SqlitePool, image_id: i64) -> sqlx::Result<i64> {
    sqlx::query_scalar::<_, i64>(SQL_COUNT_LABELS_FOR_IMAGE)
        .bind(image_id)
        .fetch_one(pool)
        .await
}
