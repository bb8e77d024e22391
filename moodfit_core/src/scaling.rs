//! Shared scaling helpers for the composer and the manual rescale path.
//!
//! A single scalar multiplier, derived from difficulty tier and
//! experience level, inflates or deflates every template's base
//! duration, rest and rep count. Set counts are never scaled.

use crate::{Difficulty, Exercise, ExerciseTemplate, ExperienceLevel};
use uuid::Uuid;

/// Reps used when a template omits a base rep count
const DEFAULT_REPS: u32 = 10;

/// Sets used when a template omits a base set count
const DEFAULT_SETS: u32 = 3;

/// Per-tier intensity factor
pub fn difficulty_factor(tier: Difficulty) -> f64 {
    match tier {
        Difficulty::Easy => 0.7,
        Difficulty::Medium => 1.0,
        Difficulty::Hard => 1.3,
    }
}

/// Per-experience intensity factor
pub fn experience_factor(level: ExperienceLevel) -> f64 {
    match level {
        ExperienceLevel::Novice => 0.8,
        ExperienceLevel::Intermediate => 1.0,
        ExperienceLevel::Advanced => 1.2,
    }
}

/// Combined multiplier applied to template base values
pub fn multiplier(tier: Difficulty, level: ExperienceLevel) -> f64 {
    difficulty_factor(tier) * experience_factor(level)
}

/// Round a scaled base value to the nearest integer
pub fn scale_value(base: u32, multiplier: f64) -> u32 {
    (base as f64 * multiplier).round() as u32
}

/// Instantiate a template into a concrete exercise at the given tier
///
/// Duration, rest and reps are scaled; sets are copied from the
/// template (defaulting to 3 when omitted).
pub fn scale_template(template: &ExerciseTemplate, tier: Difficulty, multiplier: f64) -> Exercise {
    Exercise {
        id: Uuid::new_v4(),
        name: template.name.clone(),
        description: template.description.clone(),
        muscle_groups: template.muscle_groups.clone(),
        difficulty: tier,
        duration_seconds: scale_value(template.base_duration_seconds, multiplier),
        rest_seconds: scale_value(template.base_rest_seconds, multiplier),
        reps: scale_value(template.base_reps.unwrap_or(DEFAULT_REPS), multiplier),
        sets: template.base_sets.unwrap_or(DEFAULT_SETS),
    }
}

/// Wall-clock cost of one exercise: `(duration + rest) * sets`
pub fn exercise_seconds(exercise: &Exercise) -> u32 {
    (exercise.duration_seconds + exercise.rest_seconds) * exercise.sets
}

/// Total workout duration: the sum of `exercise_seconds` over all
/// exercises, in execution order
pub fn total_seconds(exercises: &[Exercise]) -> u32 {
    exercises.iter().map(exercise_seconds).sum()
}
