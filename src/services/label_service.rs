use sqlx::SqlitePool;

use crate::database::{image_repo, label_repo, participant_repo};

pub const RATING_MIN: i64 = 0;
pub const RATING_MAX: i64 = 5;

#[derive(Debug, PartialEq, Eq)]
pub enum SubmitLabelOutcome {
    Created,
    RatingOutOfRange,
    ParticipantMissing,
    ImageMissing,
}

/// Records one rating. Both referenced rows must exist before the insert;
/// nothing is written when either lookup fails.
pub async fn submit_label(
    pool: &SqlitePool,
    participant_id: i64,
    image_id: i64,
    rating: i64,
) -> sqlx::Result<SubmitLabelOutcome> {
    if !(RATING_MIN..=RATING_MAX).contains(&rating) {
        return Ok(SubmitLabelOutcome::RatingOutOfRange);
    }

    if participant_repo::find_participant(pool, participant_id)
        .await?
        .is_none()
    {
        return Ok(SubmitLabelOutcome::ParticipantMissing);
    }

    if image_repo::find_image(pool, image_id).await?.is_none() {
        return Ok(SubmitLabelOutcome::ImageMissing);
    }

    label_repo::insert_label(
        pool,
        label_repo::NewLabel {
            participant_id,
            image_id,
            rating,
        },
    )
    .await?;

    Ok(SubmitLabelOutcome::Created)
}
