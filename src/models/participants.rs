#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ParticipantRow {
    pub id: i64,
    pub created_at: String,
    pub age: Option<i64>,
    pub gender: Option<String>,
}
