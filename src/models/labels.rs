#[derive(Debug, Clone, sqlx::FromRow)]
pub struct LabelRow {
    pub id: i64,
    pub participant_id: i64,
    pub image_id: i64,
    pub rating: i64,
    pub created_at: String,
}
