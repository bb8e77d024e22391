use clap::{Parser, Subcommand};
use moodfit_core::*;
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "moodfit")]
#[command(about = "Mood-driven workout generator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create your profile (run once)
    Onboard {
        /// Display name
        #[arg(long)]
        name: String,

        /// Experience level (novice, intermediate, advanced)
        #[arg(long)]
        experience: String,

        /// Body type (ectomorph, mesomorph, endomorph)
        #[arg(long)]
        body_type: String,

        /// Training goal (repeatable)
        #[arg(long = "goal")]
        goals: Vec<String>,

        /// Preferred session length in minutes (10, 20, 30, 60, 120)
        #[arg(long, default_value_t = 20)]
        minutes: u32,
    },

    /// Generate and run a workout for how you feel right now (default)
    Workout {
        /// Current emotion (angry, anxious, sluggish, motivated)
        #[arg(long)]
        emotion: String,

        /// Session length in minutes (10, 20, 30, 60, 120); defaults
        /// to the profile preference
        #[arg(long)]
        minutes: Option<u32>,

        /// Dry run - show the workout without logging it
        #[arg(long)]
        dry_run: bool,

        /// Auto-complete (for testing) - mark done with default feedback
        #[arg(long)]
        auto_complete: bool,
    },

    /// Show progress statistics
    Progress,

    /// Roll up journal entries to the CSV archive
    Rollup {
        /// Clean up processed journal files after rollup
        #[arg(long)]
        cleanup: bool,
    },
}

fn main() -> Result<()> {
    moodfit_core::logging::init();

    let cli = Cli::parse();

    let config = Config::load()?;
    let data_dir = cli.data_dir.unwrap_or_else(|| config.data.data_dir.clone());
    let store = FileStore::new(&data_dir);

    match cli.command {
        Some(Commands::Onboard {
            name,
            experience,
            body_type,
            goals,
            minutes,
        }) => cmd_onboard(&store, name, &experience, &body_type, goals, minutes),
        Some(Commands::Workout {
            emotion,
            minutes,
            dry_run,
            auto_complete,
        }) => cmd_workout(&store, &emotion, minutes, dry_run, auto_complete),
        Some(Commands::Progress) => cmd_progress(&store),
        Some(Commands::Rollup { cleanup }) => cmd_rollup(&store, cleanup),
        None => cmd_progress(&store),
    }
}

fn cmd_onboard(
    store: &FileStore,
    name: String,
    experience: &str,
    body_type: &str,
    goals: Vec<String>,
    minutes: u32,
) -> Result<()> {
    if store.load_profile()?.is_some() {
        return Err(Error::Store(
            "A profile already exists; remove it manually to start over".into(),
        ));
    }

    let experience = parse_experience(experience)
        .ok_or_else(|| Error::Other(format!("Unknown experience level: {}", experience)))?;
    let body_type = parse_body_type(body_type)
        .ok_or_else(|| Error::Other(format!("Unknown body type: {}", body_type)))?;
    let preferred_length = SessionLength::from_minutes(minutes)
        .ok_or_else(|| Error::Other(format!("Unsupported session length: {} min", minutes)))?;

    let profile = UserProfile {
        id: uuid::Uuid::new_v4(),
        name,
        experience,
        body_type,
        goals,
        preferred_length,
        created_at: chrono::Utc::now(),
    };

    store.save_profile(&profile)?;

    println!("✓ Profile created for {}", profile.name);
    println!("  Experience: {:?}", profile.experience);
    println!("  Preferred length: {} min", profile.preferred_length.minutes());

    Ok(())
}

fn cmd_workout(
    store: &FileStore,
    emotion: &str,
    minutes: Option<u32>,
    dry_run: bool,
    auto_complete: bool,
) -> Result<()> {
    let profile = store.load_profile()?.ok_or_else(|| {
        Error::Store("No profile found - run `moodfit onboard` first".into())
    })?;

    let emotion = parse_emotion(emotion)
        .ok_or_else(|| Error::Other(format!("Unknown emotion: {}", emotion)))?;

    let length = match minutes {
        Some(m) => SessionLength::from_minutes(m)
            .ok_or_else(|| Error::Other(format!("Unsupported session length: {} min", m)))?,
        None => profile.preferred_length,
    };

    let catalog = default_catalog();
    let errors = catalog.validate();
    if !errors.is_empty() {
        eprintln!("Catalog validation errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        return Err(Error::Catalog("Invalid catalog".into()));
    }

    let progress = store.load_progress()?;
    let now = chrono::Utc::now();

    let mut workout = compose(catalog, emotion, length, &profile, progress.as_ref(), now)?;

    // Session loop - the user can push the plan easier or harder
    // before starting
    loop {
        display_workout(&workout);

        if dry_run {
            println!("\n[Dry run - not logging session]");
            return Ok(());
        }

        let action = if auto_complete {
            UserAction::Done
        } else {
            prompt_user_action()?
        };

        match action {
            UserAction::Harder => {
                workout = rescale(&workout, RescaleDirection::Harder);
                println!("\nPushed one tier harder.\n");
            }
            UserAction::Easier => {
                workout = rescale(&workout, RescaleDirection::Easier);
                println!("\nDialed one tier easier.\n");
            }
            UserAction::Abandon => {
                println!("\nSession abandoned - nothing logged.");
                return Ok(());
            }
            UserAction::Done => {
                let feedback = if auto_complete {
                    Feedback {
                        was_easy: false,
                        completed: true,
                        rating: 4,
                    }
                } else {
                    prompt_feedback()?
                };

                complete_workout(store, &profile, &workout, feedback)?;
                println!("\n✓ Session logged!");
                return Ok(());
            }
        }
    }
}

/// Append the completion to the journal and recompute progress
fn complete_workout(
    store: &FileStore,
    profile: &UserProfile,
    workout: &Workout,
    feedback: Feedback,
) -> Result<()> {
    let now = chrono::Utc::now();

    // Snapshot the log before appending: the tracker adds the new
    // entry itself
    let prior_history = load_history(&store.journal_path(), &store.archive_path())?;

    let entry = HistoryEntry {
        id: uuid::Uuid::new_v4(),
        user_id: profile.id,
        workout_id: workout.id,
        completed_at: now,
        duration_minutes: workout.requested.minutes(),
        difficulty: workout.difficulty,
        feedback,
    };

    let mut journal = JsonlJournal::new(store.journal_path());
    journal.append(&entry)?;

    let previous_longest = store
        .load_progress()?
        .map(|p| p.longest_streak)
        .unwrap_or(0);

    let progress = record_completion(&prior_history, &entry, previous_longest, now);
    store.save_progress(&progress)?;

    Ok(())
}

fn cmd_progress(store: &FileStore) -> Result<()> {
    match store.load_progress()? {
        Some(progress) => {
            println!("\n╭─────────────────────────────────────────╮");
            println!("│  PROGRESS");
            println!("╰─────────────────────────────────────────╯");
            println!();
            println!("  Workouts completed: {}", progress.total_workouts);
            println!("  Minutes trained:    {}", progress.total_minutes);
            println!(
                "  Current streak:     {} day(s) (longest {})",
                progress.current_streak, progress.longest_streak
            );
            println!("  Weekly consistency: {}%", progress.weekly_consistency);
            println!("  Current tier:       {:?}", progress.difficulty_level);
            if let Some(last) = progress.last_workout_date {
                println!("  Last workout:       {}", last.format("%Y-%m-%d %H:%M"));
            }
            println!();
        }
        None => {
            println!("No workouts completed yet - run `moodfit workout` to start.");
        }
    }
    Ok(())
}

fn cmd_rollup(store: &FileStore, cleanup: bool) -> Result<()> {
    let journal_path = store.journal_path();
    let csv_path = store.archive_path();

    if !journal_path.exists() {
        println!("No journal file found - nothing to roll up.");
        return Ok(());
    }

    let count = moodfit_core::archive::journal_to_csv_and_archive(&journal_path, &csv_path)?;

    println!("✓ Rolled up {} entries to CSV", count);
    println!("  CSV: {}", csv_path.display());

    if cleanup {
        if let Some(journal_dir) = journal_path.parent() {
            let cleaned = moodfit_core::archive::cleanup_processed(journal_dir)?;
            if cleaned > 0 {
                println!("✓ Cleaned up {} processed journal files", cleaned);
            }
        }
    }

    Ok(())
}

fn display_workout(workout: &Workout) {
    println!("\n╭─────────────────────────────────────────╮");
    println!("│  {:?} WORKOUT ({:?})", workout.emotion, workout.difficulty);
    println!("╰─────────────────────────────────────────╯");
    println!();
    println!(
        "  Requested: {} min · Planned: {} min {} s",
        workout.requested.minutes(),
        workout.total_seconds / 60,
        workout.total_seconds % 60
    );
    println!();

    if workout.exercises.is_empty() {
        println!("  (no exercise fits this session length)");
    }

    for (i, ex) in workout.exercises.iter().enumerate() {
        println!("  {}. {}", i + 1, ex.name);
        println!("     {}", ex.description);
        println!(
            "     {} sets × {} reps · {}s work / {}s rest",
            ex.sets, ex.reps, ex.duration_seconds, ex.rest_seconds
        );
    }

    println!();
}

enum UserAction {
    Done,
    Harder,
    Easier,
    Abandon,
}

fn prompt_user_action() -> Result<UserAction> {
    println!("─────────────────────────────────────────");
    println!("Press Enter when done");
    println!("  'h' + Enter for a harder version");
    println!("  'e' + Enter for an easier version");
    println!("  'q' + Enter to abandon");
    print!("> ");
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    let action = match input.trim().to_lowercase().as_str() {
        "h" => UserAction::Harder,
        "e" => UserAction::Easier,
        "q" => UserAction::Abandon,
        _ => UserAction::Done,
    };

    Ok(action)
}

fn prompt_feedback() -> Result<Feedback> {
    print!("Rate the session 1-5 [3]: ");
    io::stdout().flush()?;
    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    let rating = input.trim().parse::<u8>().unwrap_or(3).clamp(1, 5);

    print!("Was it too easy? y/N: ");
    io::stdout().flush()?;
    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    let was_easy = matches!(input.trim().to_lowercase().as_str(), "y" | "yes");

    Ok(Feedback {
        was_easy,
        completed: true,
        rating,
    })
}

fn parse_emotion(s: &str) -> Option<Emotion> {
    match s.to_lowercase().as_str() {
        "angry" => Some(Emotion::Angry),
        "anxious" => Some(Emotion::Anxious),
        "sluggish" => Some(Emotion::Sluggish),
        "motivated" => Some(Emotion::Motivated),
        _ => None,
    }
}

fn parse_experience(s: &str) -> Option<ExperienceLevel> {
    match s.to_lowercase().as_str() {
        "novice" => Some(ExperienceLevel::Novice),
        "intermediate" => Some(ExperienceLevel::Intermediate),
        "advanced" => Some(ExperienceLevel::Advanced),
        _ => None,
    }
}

fn parse_body_type(s: &str) -> Option<BodyType> {
    match s.to_lowercase().as_str() {
        "ectomorph" => Some(BodyType::Ectomorph),
        "mesomorph" => Some(BodyType::Mesomorph),
        "endomorph" => Some(BodyType::Endomorph),
        _ => None,
    }
}
