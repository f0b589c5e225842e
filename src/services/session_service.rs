use rand::seq::SliceRandom;
use rand::Rng;
use sqlx::SqlitePool;

use crate::database::{image_repo, participant_repo};
use crate::models::ImageRow;

pub const SAMPLES_PER_GENDER: usize = 10;

pub struct SurveySession {
    pub participant_id: i64,
    pub images: Vec<ImageRow>,
}

/// Creates a participant and draws the balanced image set for one survey
/// run: up to 10 male images followed by up to 10 female images. A catalog
/// with fewer images per gender just yields a shorter list.
pub async fn start_session(
    pool: &SqlitePool,
    rng: &mut impl Rng,
) -> sqlx::Result<SurveySession> {
    let participant_id = participant_repo::insert_participant(pool).await?;

    let mut images = sample_gender(pool, "male", SAMPLES_PER_GENDER, rng).await?;
    images.extend(sample_gender(pool, "female", SAMPLES_PER_GENDER, rng).await?);

    Ok(SurveySession {
        participant_id,
        images,
    })
}

async fn sample_gender(
    pool: &SqlitePool,
    gender: &str,
    count: usize,
    rng: &mut impl Rng,
) -> sqlx::Result<Vec<ImageRow>> {
    let ids = image_repo::list_ids_by_gender(pool, gender).await?;
    let picked = draw_sample(&ids, count, rng);

    let mut rows = Vec::with_capacity(picked.len());
    for id in picked {
        // Images are never deleted, so every picked id resolves.
        if let Some(row) = image_repo::find_image(pool, id).await? {
            rows.push(row);
        }
    }
    Ok(rows)
}

/// Random draw of `count` ids without replacement, in random order.
/// `choose_multiple` keeps the source order, so shuffle afterwards.
pub fn draw_sample(ids: &[i64], count: usize, rng: &mut impl Rng) -> Vec<i64> {
    let mut picked: Vec<i64> = ids.choose_multiple(rng, count).copied().collect();
    picked.shuffle(rng);
    picked
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn draw_sample_is_without_replacement() {
        let ids: Vec<i64> = (1..=50).collect();
        let mut rng = SmallRng::seed_from_u64(1);
        let picked = draw_sample(&ids, 10, &mut rng);

        assert_eq!(picked.len(), 10);
        let mut deduped = picked.clone();
        deduped.sort_unstable();
        deduped.dedup();
        assert_eq!(deduped.len(), 10);
    }

    #[test]
    fn draw_sample_short_pool_returns_everything() {
        let ids = vec![3, 7, 9];
        let mut rng = SmallRng::seed_from_u64(2);
        let mut picked = draw_sample(&ids, 10, &mut rng);
        picked.sort_unstable();
        assert_eq!(picked, ids);
    }

    #[test]
    fn draw_sample_is_deterministic_for_a_seed() {
        let ids: Vec<i64> = (1..=100).collect();
        let mut a = SmallRng::seed_from_u64(42);
        let mut b = SmallRng::seed_from_u64(42);
        assert_eq!(draw_sample(&ids, 10, &mut a), draw_sample(&ids, 10, &mut b));
    }
}
