/// One catalog entry. `filename` is the path relative to the dataset root
/// (e.g. `male/20-29/asian/14335.png`); `url` is only set in hosted mode.
#[derive(Debug, Clone, serde::Serialize, sqlx::FromRow)]
pub struct ImageRow {
    pub id: i64,
    pub filename: String,
    pub gender: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}
