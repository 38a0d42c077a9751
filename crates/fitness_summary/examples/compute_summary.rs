use fitness_summary::{LogRecord, SessionRecord, compute_user_summary};
use serde_json::json;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let log_env = std::env::var("FITNESS_SUMMARY_LOG_LEVEL")
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| "info".to_string());
    let env_filter = tracing_subscriber::EnvFilter::try_new(log_env)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .compact()
        .with_writer(std::io::stderr)
        .with_env_filter(env_filter)
        .init();

    let log: Vec<LogRecord> = serde_json::from_value(json!([
        {"id": "l1", "userId": "u1", "action": "workout_finished",
         "meta": {"kcalBurned": 320, "duration": 45}, "createdAt": "2026-08-24T08:30:00"},
        {"id": "l2", "userId": "u1", "action": "imc_calcule",
         "meta": {"poids": 80, "taille": 180}, "createdAt": "2026-08-23T09:00:00"},
        {"id": "l3", "userId": "u1", "action": "calorie_suivi",
         "meta": {"calorie": "2100 kcal"}, "createdAt": "2026-08-23T20:00:00"},
        {"id": "l4", "userId": "u1", "action": "imc_calcule",
         "meta": {"poids": 83}, "createdAt": "2026-06-01T09:00:00"}
    ]))?;

    let sessions: Vec<SessionRecord> = serde_json::from_value(json!([
        {"id": "s1", "userId": "u1", "name": "Push day",
         "startedAt": "2026-08-24T18:00:00", "endedAt": "2026-08-24T18:50:00",
         "entries": [
            {"exerciseName": "développé couché", "type": "muscu",
             "muscles": ["pectoraux", "triceps"],
             "sets": [{"reps": 10, "weightKg": 60}, {"reps": 8, "weightKg": 70}]}
         ]}
    ]))?;

    let summary = compute_user_summary(&log, Some(&sessions));
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
