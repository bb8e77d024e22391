//! Core domain types for the Moodfit workout engine.
//!
//! This module defines the fundamental types used throughout the system:
//! - Emotions and the fixed session lengths a user can pick
//! - Experience tiers and workout difficulty tiers
//! - Exercise templates (catalog) and instantiated exercises
//! - Workouts, completion history and progress aggregates

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

// ============================================================================
// Enumerations
// ============================================================================

/// Emotional state the user reports before a session
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Emotion {
    Angry,
    Anxious,
    Sluggish,
    Motivated,
}

impl Emotion {
    /// All emotion categories, in catalog order
    pub const ALL: [Emotion; 4] = [
        Emotion::Angry,
        Emotion::Anxious,
        Emotion::Sluggish,
        Emotion::Motivated,
    ];
}

/// Self-reported training experience, set once at onboarding
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceLevel {
    Novice,
    Intermediate,
    Advanced,
}

/// Body-type tag collected at onboarding
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BodyType {
    Ectomorph,
    Mesomorph,
    Endomorph,
}

/// Workout difficulty tier, totally ordered: easy < medium < hard
///
/// Promotion and demotion move exactly one step and clamp at the ends,
/// so the adjustment logic in the composer never has to special-case
/// the boundaries.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// One tier up, clamped at `Hard`
    pub fn promoted(self) -> Self {
        match self {
            Difficulty::Easy => Difficulty::Medium,
            Difficulty::Medium => Difficulty::Hard,
            Difficulty::Hard => Difficulty::Hard,
        }
    }

    /// One tier down, clamped at `Easy`
    pub fn demoted(self) -> Self {
        match self {
            Difficulty::Hard => Difficulty::Medium,
            Difficulty::Medium => Difficulty::Easy,
            Difficulty::Easy => Difficulty::Easy,
        }
    }
}

/// Fixed session lengths the user can request
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SessionLength {
    Ten,
    Twenty,
    Thirty,
    Sixty,
    TwoHours,
}

impl SessionLength {
    /// Length in minutes
    pub fn minutes(self) -> u32 {
        match self {
            SessionLength::Ten => 10,
            SessionLength::Twenty => 20,
            SessionLength::Thirty => 30,
            SessionLength::Sixty => 60,
            SessionLength::TwoHours => 120,
        }
    }

    /// Parse a minute count into one of the fixed lengths
    pub fn from_minutes(minutes: u32) -> Option<Self> {
        match minutes {
            10 => Some(SessionLength::Ten),
            20 => Some(SessionLength::Twenty),
            30 => Some(SessionLength::Thirty),
            60 => Some(SessionLength::Sixty),
            120 => Some(SessionLength::TwoHours),
            _ => None,
        }
    }
}

// ============================================================================
// Profile
// ============================================================================

/// User profile created once at onboarding, read-only afterwards
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub name: String,
    pub experience: ExperienceLevel,
    pub body_type: BodyType,
    pub goals: Vec<String>,
    pub preferred_length: SessionLength,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Catalog Types
// ============================================================================

/// An exercise definition in the catalog, before any scaling
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExerciseTemplate {
    pub name: String,
    pub description: String,
    pub muscle_groups: Vec<String>,
    pub difficulty: Difficulty,
    pub base_duration_seconds: u32,
    pub base_rest_seconds: u32,
    pub base_reps: Option<u32>,
    pub base_sets: Option<u32>,
}

/// The complete catalog: an ordered exercise pool per emotion
///
/// Pool order is meaningful - the composer walks each pool in catalog
/// order when filling a workout.
#[derive(Clone, Debug)]
pub struct Catalog {
    pub pools: HashMap<Emotion, Vec<ExerciseTemplate>>,
}

impl Catalog {
    /// Get the exercise pool for an emotion, if one is configured
    pub fn pool(&self, emotion: Emotion) -> Option<&[ExerciseTemplate]> {
        self.pools.get(&emotion).map(|p| p.as_slice())
    }
}

// ============================================================================
// Workout Types
// ============================================================================

/// A concrete exercise instantiated from a template for one workout
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Exercise {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub muscle_groups: Vec<String>,
    pub difficulty: Difficulty,
    pub duration_seconds: u32,
    pub rest_seconds: u32,
    pub reps: u32,
    pub sets: u32,
}

/// Post-completion feedback for a workout
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Feedback {
    pub was_easy: bool,
    pub completed: bool,
    /// 1..=5
    pub rating: u8,
}

/// One generated, timed sequence of exercises
///
/// Exercise order is execution order. `total_seconds` always equals
/// the sum of `(duration + rest) * sets` over the exercises.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Workout {
    pub id: Uuid,
    pub user_id: Uuid,
    pub emotion: Emotion,
    pub requested: SessionLength,
    pub difficulty: Difficulty,
    pub exercises: Vec<Exercise>,
    pub total_seconds: u32,
    pub created_at: DateTime<Utc>,
    pub feedback: Option<Feedback>,
}

// ============================================================================
// History and Progress Types
// ============================================================================

/// Immutable record of one completed session, appended to the journal
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    pub workout_id: Uuid,
    pub completed_at: DateTime<Utc>,
    pub duration_minutes: u32,
    pub difficulty: Difficulty,
    pub feedback: Feedback,
}

/// Aggregate progress for a user, recomputed in full after every
/// completed session
///
/// Everything here is derivable from the history log except
/// `longest_streak`, which is a running maximum carried forward
/// across recomputations.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Progress {
    pub user_id: Uuid,
    pub total_workouts: u32,
    pub total_minutes: u32,
    pub current_streak: u32,
    pub longest_streak: u32,
    /// 0..=100, percent of a 4-session weekly target
    pub weekly_consistency: u8,
    pub last_workout_date: Option<DateTime<Utc>>,
    pub difficulty_level: Difficulty,
}
