use sqlx::SqlitePool;

pub const SQL_CREATE_PARTICIPANTS: &str = r#"
CREATE TABLE IF NOT EXISTS participants (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    created_at TEXT NOT NULL DEFAULT (datetime('now')),
    age INTEGER,
    gender TEXT
)
"#;

pub const SQL_CREATE_IMAGES: &str = r#"
CREATE TABLE IF NOT EXISTS images (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    filename TEXT NOT NULL,
    gender TEXT NOT NULL,
    url TEXT,
    UNIQUE (filename, gender)
)
"#;

pub const SQL_CREATE_LABELS: &str = r#"
CREATE TABLE IF NOT EXISTS labels (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    participant_id INTEGER NOT NULL REFERENCES participants(id),
    image_id INTEGER NOT NULL REFERENCES images(id),
    rating INTEGER NOT NULL,
    created_at TEXT NOT NULL DEFAULT (datetime('now'))
)
"#;

/// Creates the three survey tables and their indexes. Every statement is
/// IF NOT EXISTS, so this runs at each process start.
pub async fn ensure_schema(pool: &SqlitePool) -> sqlx::Result<()> {
    sqlx::query(SQL_CREATE_PARTICIPANTS).execute(pool).await?;
    sqlx::query(SQL_CREATE_IMAGES).execute(pool).await?;
    sqlx::query(SQL_CREATE_LABELS).execute(pool).await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_images_gender ON images (gender)")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_labels_participant ON labels (participant_id)")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_labels_image ON labels (image_id)")
        .execute(pool)
        .await?;

    Ok(())
}
