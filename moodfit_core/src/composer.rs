//! Workout composer: turns (emotion, length, profile, progress) into a
//! concrete ordered sequence of timed exercises.
//!
//! Selection is a greedy fill over the emotion's catalog pool:
//! - Base tier comes from the user's experience level
//! - Progress (when present) can promote or demote the tier one step
//! - A single multiplier scales every template's duration/rest/reps
//! - Templates are visited in catalog order, cycling, until the target
//!   duration is reached or the visit budget runs out

use crate::{
    scaling, Catalog, Difficulty, Emotion, Error, Exercise, Progress, Result, SessionLength,
    UserProfile, Workout,
};
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Accepted overshoot past the requested duration, in seconds
const OVERSHOOT_MARGIN_SECONDS: u32 = 60;

/// Weekly consistency at or above which a steady streak earns a
/// one-tier promotion
const PROMOTE_CONSISTENCY: u8 = 75;

/// Streak length required (together with consistency) for promotion
const PROMOTE_STREAK: u32 = 5;

/// Weekly consistency below which the tier is demoted one step
const DEMOTE_CONSISTENCY: u8 = 40;

/// Direction for a manual difficulty override on an existing workout
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RescaleDirection {
    Easier,
    Harder,
}

/// Compose a workout for the given emotion and requested length
///
/// `progress` is absent for a user's first session; when present it
/// feeds the adaptive tier adjustment. `now` stamps the workout - the
/// engine never reads the wall clock itself.
///
/// A pool whose every candidate would overshoot the margin yields a
/// workout with fewer exercises than the target calls for, possibly
/// zero; that is a valid result, not an error.
pub fn compose(
    catalog: &Catalog,
    emotion: Emotion,
    length: SessionLength,
    profile: &UserProfile,
    progress: Option<&Progress>,
    now: DateTime<Utc>,
) -> Result<Workout> {
    let pool = catalog
        .pool(emotion)
        .filter(|p| !p.is_empty())
        .ok_or_else(|| Error::Catalog(format!("No exercise pool for {:?}", emotion)))?;

    let base = base_difficulty(profile.experience);
    let tier = match progress {
        Some(progress) => adjust_for_progress(base, progress),
        None => base,
    };

    tracing::info!(
        "Composing {:?} workout: {} min, tier {:?} (base {:?})",
        emotion,
        length.minutes(),
        tier,
        base
    );

    let multiplier = scaling::multiplier(tier, profile.experience);
    let exercises = fill_to_duration(pool, length, tier, multiplier);

    Ok(Workout {
        id: Uuid::new_v4(),
        user_id: profile.id,
        emotion,
        requested: length,
        difficulty: tier,
        // Recomputed from the exercise list, independently of the
        // running total used during the fill
        total_seconds: scaling::total_seconds(&exercises),
        exercises,
        created_at: now,
        feedback: None,
    })
}

/// Base tier from self-reported experience
fn base_difficulty(experience: crate::ExperienceLevel) -> Difficulty {
    match experience {
        crate::ExperienceLevel::Novice => Difficulty::Easy,
        crate::ExperienceLevel::Intermediate => Difficulty::Medium,
        crate::ExperienceLevel::Advanced => Difficulty::Hard,
    }
}

/// Adjust the base tier from the user's recent consistency and streak
///
/// High consistency plus a steady streak promotes one step; low
/// consistency demotes one step. Both clamp at the tier endpoints.
fn adjust_for_progress(base: Difficulty, progress: &Progress) -> Difficulty {
    if progress.weekly_consistency >= PROMOTE_CONSISTENCY
        && progress.current_streak >= PROMOTE_STREAK
    {
        tracing::debug!(
            "Consistency {} and streak {} earn a promotion",
            progress.weekly_consistency,
            progress.current_streak
        );
        return base.promoted();
    }

    if progress.weekly_consistency < DEMOTE_CONSISTENCY {
        tracing::debug!(
            "Consistency {} below {}, demoting tier",
            progress.weekly_consistency,
            DEMOTE_CONSISTENCY
        );
        return base.demoted();
    }

    base
}

/// Greedily select scaled exercises until the target duration is met
///
/// Walks the pool in catalog order, cycling back to the start, and
/// accepts a candidate only when it fits inside the overshoot margin.
/// The visit budget of `3 * pool.len()` bounds the loop; running out
/// of budget legitimately leaves the workout short.
fn fill_to_duration(
    pool: &[crate::ExerciseTemplate],
    length: SessionLength,
    tier: Difficulty,
    multiplier: f64,
) -> Vec<Exercise> {
    let target_seconds = length.minutes() * 60;
    let visit_budget = pool.len() * 3;

    let mut exercises = Vec::new();
    let mut running = 0u32;
    let mut index = 0usize;

    while running < target_seconds && index <= visit_budget {
        let candidate = scaling::scale_template(&pool[index % pool.len()], tier, multiplier);
        let cost = scaling::exercise_seconds(&candidate);

        if running + cost <= target_seconds + OVERSHOOT_MARGIN_SECONDS {
            running += cost;
            exercises.push(candidate);
        }

        index += 1;
    }

    tracing::debug!(
        "Filled {}s of {}s target with {} exercises",
        running,
        target_seconds,
        exercises.len()
    );

    exercises
}

/// Manually push an existing workout one tier easier or harder
///
/// Applies a flat 1.2x (harder) or 0.8x (easier) multiplier to each
/// exercise's duration and reps. Rest time and set counts are left
/// untouched. Pure function; no history interaction.
pub fn rescale(workout: &Workout, direction: RescaleDirection) -> Workout {
    let (tier, multiplier) = match direction {
        RescaleDirection::Harder => (workout.difficulty.promoted(), 1.2),
        RescaleDirection::Easier => (workout.difficulty.demoted(), 0.8),
    };

    let exercises: Vec<Exercise> = workout
        .exercises
        .iter()
        .map(|ex| Exercise {
            difficulty: tier,
            duration_seconds: scaling::scale_value(ex.duration_seconds, multiplier),
            reps: scaling::scale_value(ex.reps, multiplier),
            ..ex.clone()
        })
        .collect();

    tracing::info!(
        "Rescaled workout {} to {:?} ({:?})",
        workout.id,
        tier,
        direction
    );

    Workout {
        difficulty: tier,
        total_seconds: scaling::total_seconds(&exercises),
        exercises,
        ..workout.clone()
    }
}
