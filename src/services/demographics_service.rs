use sqlx::SqlitePool;

use crate::database::participant_repo;

#[derive(Debug, PartialEq, Eq)]
pub enum DemographicsOutcome {
    Updated,
    ParticipantMissing,
}

/// Attaches self-reported age/gender to an existing participant. Both
/// fields are optional and stored as given, null included.
pub async fn submit_demographics(
    pool: &SqlitePool,
    participant_id: i64,
    age: Option<i64>,
    gender: Option<&str>,
) -> sqlx::Result<DemographicsOutcome> {
    if participant_repo::find_participant(pool, participant_id)
        .await?
        .is_none()
    {
        return Ok(DemographicsOutcome::ParticipantMissing);
    }

    participant_repo::update_demographics(pool, participant_id, age, gender).await?;
    Ok(DemographicsOutcome::Updated)
}
