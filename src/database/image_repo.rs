use sqlx::SqlitePool;

use crate::models::ImageRow;

pub const SQL_FIND_IMAGE: &str = r#"
SELECT
    id,
    filename,
    gender,
    url
FROM images
WHERE id = ?1
LIMIT 1
"#;

pub const SQL_FIND_BY_FILENAME_GENDER: &str = r#"
SELECT
    id,
    filename,
    gender,
    url
FROM images
WHERE filename = ?1
  AND gender = ?2
LIMIT 1
"#;

pub const SQL_LIST_IDS_BY_GENDER: &str = r#"
SELECT id
FROM images
WHERE gender = ?1
ORDER BY id
"#;

pub const SQL_INSERT_IMAGE: &str = r#"
INSERT INTO images (filename, gender, url)
VALUES (?1, ?2, ?3)
"#;

pub const SQL_UPDATE_IMAGE_URL: &str = r#"
UPDATE images
SET url = ?3
WHERE filename = ?1
  AND gender = ?2
"#;

pub const SQL_COUNT_IMAGES: &str = r#"
SELECT COUNT(*)
FROM images
"#;

pub async fn find_image(pool: &SqlitePool, image_id: i64) -> sqlx::Result<Option<ImageRow>> {
    sqlx::query_as::<_, ImageRow>(SQL_FIND_IMAGE)
        .bind(image_id)
        .fetch_optional(pool)
        .await
}

pub async fn find_by_filename_gender(
    pool: &SqlitePool,
    filename: &str,
    gender: &str,
) -> sqlx::Result<Option<ImageRow>> {
    sqlx::query_as::<_, ImageRow>(SQL_FIND_BY_FILENAME_GENDER)
        .bind(filename)
        .bind(gender)
        .fetch_optional(pool)
        .await
}

pub async fn list_ids_by_gender(pool: &SqlitePool, gender: &str) -> sqlx::Result<Vec<i64>> {
    sqlx::query_scalar::<_, i64>(SQL_LIST_IDS_BY_GENDER)
        .bind(gender)
        .fetch_all(pool)
        .await
}

pub async fn insert_image(
    pool: &SqlitePool,
    filename: &str,
    gender: &str,
    url: Option<&str>,
) -> sqlx::Result<i64> {
    let result = sqlx::query(SQL_INSERT_IMAGE)
        .bind(filename)
        .bind(gender)
        .bind(url)
        .execute(pool)
        .await?;
    Ok(result.last_insert_rowid())
}

pub async fn update_image_url(
    pool: &SqlitePool,
    filename: &str,
    gender: &str,
    url: Option<&str>,
) -> sqlx::Result<u64> {
    let result = sqlx::query(SQL_UPDATE_IMAGE_URL)
        .bind(filename)
        .bind(gender)
        .bind(url)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

pub async fn count_images(pool: &SqlitePool) -> sqlx::Result<i64> {
    sqlx::query_scalar::<_, i64>(SQL_COUNT_IMAGES)
        .fetch_one(pool)
        .await
}
