//! Default catalog of exercise templates, keyed by emotion.
//!
//! Each emotion maps to an ordered pool of templates; the composer
//! walks that pool in order when filling a workout.

use crate::types::*;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Cached default catalog - built once and reused across all operations
static DEFAULT_CATALOG: Lazy<Catalog> = Lazy::new(build_default_catalog);

/// Get a reference to the cached default catalog
pub fn default_catalog() -> &'static Catalog {
    &DEFAULT_CATALOG
}

fn template(
    name: &str,
    description: &str,
    muscle_groups: &[&str],
    difficulty: Difficulty,
    base_duration_seconds: u32,
    base_rest_seconds: u32,
    base_reps: u32,
    base_sets: u32,
) -> ExerciseTemplate {
    ExerciseTemplate {
        name: name.into(),
        description: description.into(),
        muscle_groups: muscle_groups.iter().map(|g| (*g).into()).collect(),
        difficulty,
        base_duration_seconds,
        base_rest_seconds,
        base_reps: Some(base_reps),
        base_sets: Some(base_sets),
    }
}

/// Builds the default catalog with built-in exercise pools
///
/// **Note**: For production use, prefer `default_catalog()` which
/// returns a cached reference. This function is retained for testing
/// and custom catalog creation.
pub fn build_default_catalog() -> Catalog {
    let mut pools = HashMap::new();

    // High-intensity outlet for frustration
    pools.insert(
        Emotion::Angry,
        vec![
            template(
                "Explosive Burpees",
                "Full-body movement at high intensity",
                &["full_body"],
                Difficulty::Medium,
                30,
                15,
                10,
                3,
            ),
            template(
                "Mountain Climbers",
                "Fast climbing drive on the floor",
                &["core", "cardio"],
                Difficulty::Medium,
                40,
                20,
                20,
                3,
            ),
            template(
                "Jumping Jacks",
                "High-intensity jumping jacks",
                &["cardio", "legs"],
                Difficulty::Easy,
                45,
                15,
                30,
                3,
            ),
        ],
    );

    // Controlled, breath-focused work
    pools.insert(
        Emotion::Anxious,
        vec![
            template(
                "Isometric Plank",
                "Plank hold with a focus on breathing",
                &["core"],
                Difficulty::Medium,
                45,
                30,
                1,
                3,
            ),
            template(
                "Controlled Squat",
                "Slow, controlled bodyweight squat",
                &["legs", "glutes"],
                Difficulty::Easy,
                60,
                30,
                15,
                3,
            ),
            template(
                "Push-up",
                "Standard push-up at a controlled tempo",
                &["chest", "triceps"],
                Difficulty::Medium,
                40,
                30,
                10,
                3,
            ),
        ],
    );

    // Gentle movement to get started at all
    pools.insert(
        Emotion::Sluggish,
        vec![
            template(
                "Stationary Walk",
                "Walking in place at an easy pace",
                &["cardio"],
                Difficulty::Easy,
                60,
                20,
                1,
                2,
            ),
            template(
                "Dynamic Stretching",
                "Gentle flowing stretch movements",
                &["full_body"],
                Difficulty::Easy,
                45,
                15,
                10,
                2,
            ),
            template(
                "Knee Raises",
                "Alternating high knee raises",
                &["core", "legs"],
                Difficulty::Easy,
                40,
                20,
                20,
                2,
            ),
        ],
    );

    // Demanding work for when energy is high
    pools.insert(
        Emotion::Motivated,
        vec![
            template(
                "Jump Burpees",
                "Full burpee finished with a vertical jump",
                &["full_body"],
                Difficulty::Hard,
                45,
                20,
                12,
                4,
            ),
            template(
                "Jump Squats",
                "Explosive squat into a jump",
                &["legs", "glutes"],
                Difficulty::Hard,
                40,
                25,
                15,
                4,
            ),
            template(
                "Diamond Push-ups",
                "Push-up with hands together",
                &["chest", "triceps"],
                Difficulty::Hard,
                35,
                25,
                12,
                3,
            ),
        ],
    );

    Catalog { pools }
}

impl Catalog {
    /// Validate the catalog for consistency and completeness
    ///
    /// Returns a list of validation errors, or empty Vec if valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        for (emotion, pool) in &self.pools {
            if pool.is_empty() {
                errors.push(format!("Pool for {:?} is empty", emotion));
            }

            for tpl in pool {
                if tpl.name.is_empty() {
                    errors.push(format!("Template in {:?} pool has empty name", emotion));
                }
                if tpl.base_duration_seconds == 0 {
                    errors.push(format!(
                        "Template '{}' has zero base duration",
                        tpl.name
                    ));
                }
                if tpl.base_reps == Some(0) {
                    errors.push(format!("Template '{}' has zero base reps", tpl.name));
                }
                if tpl.base_sets == Some(0) {
                    errors.push(format!("Template '{}' has zero base sets", tpl.name));
                }
            }
        }

        // Every enumerated emotion must have a pool
        for emotion in Emotion::ALL {
            if !self.pools.contains_key(&emotion) {
                errors.push(format!("Catalog has no pool for {:?}", emotion));
            }
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_loads() {
        let catalog = build_default_catalog();
        assert_eq!(catalog.pools.len(), 4);
    }

    #[test]
    fn test_every_emotion_has_a_pool() {
        let catalog = build_default_catalog();
        for emotion in Emotion::ALL {
            let pool = catalog.pool(emotion);
            assert!(pool.is_some(), "Missing pool for {:?}", emotion);
            assert!(!pool.unwrap().is_empty());
        }
    }

    #[test]
    fn test_pools_have_three_templates() {
        let catalog = build_default_catalog();
        for emotion in Emotion::ALL {
            assert_eq!(catalog.pool(emotion).unwrap().len(), 3);
        }
    }

    #[test]
    fn test_motivated_pool_is_hard() {
        let catalog = build_default_catalog();
        for tpl in catalog.pool(Emotion::Motivated).unwrap() {
            assert_eq!(tpl.difficulty, Difficulty::Hard);
        }
    }

    #[test]
    fn test_default_catalog_validates() {
        let catalog = build_default_catalog();
        let errors = catalog.validate();
        assert!(
            errors.is_empty(),
            "Default catalog has validation errors: {:?}",
            errors
        );
    }

    #[test]
    fn test_validate_flags_empty_pool() {
        let mut catalog = build_default_catalog();
        catalog.pools.insert(Emotion::Angry, vec![]);
        let errors = catalog.validate();
        assert!(errors.iter().any(|e| e.contains("Angry")));
    }
}
