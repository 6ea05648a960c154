//! Shiritori Demo
//!
//! Plays a scripted game through a session and logs every turn.
//! Set `SHIRITORI_CONFIG` to a JSON config file to change the rules.

use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use shiritori::{
    Author, EngineConfig, SessionManager, SubmitError, VERSION,
    core::hash::short_hex,
    game::color::ColorSelector,
};

const CONFIG_ENV: &str = "SHIRITORI_CONFIG";

fn load_config() -> anyhow::Result<EngineConfig> {
    match std::env::var(CONFIG_ENV) {
        Ok(path) => {
            let json = std::fs::read_to_string(&path)
                .with_context(|| format!("reading config {path}"))?;
            let config = EngineConfig::from_json_str(&json)
                .with_context(|| format!("parsing config {path}"))?;
            info!(%path, "loaded config");
            Ok(config)
        }
        Err(_) => Ok(EngineConfig::with_players(2)),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Shiritori Engine v{}", VERSION);

    let config = load_config()?;
    let player_count = config.player_count;

    let manager = SessionManager::new();
    let id = manager.create_session(config).await?;

    let names: Vec<String> = (0..player_count)
        .map(|i| ((b'A' + i as u8) as char).to_string())
        .collect();

    let answers = ["りんご", "ゴリラ", "ごりら", "らっぱ", "ぱんだ", "だんご", "ごはん", "ごま"];

    manager
        .with_session(&id, |session| -> Result<(), SubmitError> {
            session.submit_roster(&names)?;

            for word in answers {
                let player = session.state().current_player()
                    .and_then(|p| p.name.clone())
                    .unwrap_or_default();

                match session.submit_word(word) {
                    Ok(()) => info!(%player, word, round = session.state().round(), "accepted"),
                    Err(SubmitError::Rejected(outcome)) => warn!(%player, word, %outcome, "rejected"),
                    Err(err) => return Err(err),
                }
            }

            Ok(())
        })
        .await?;

    let session = manager
        .get_session(&id)
        .await
        .context("demo session vanished")?;
    let session = session.read().await;
    let state = session.state();

    info!("=== Chain ===");
    for entry in state.chain_history() {
        let color = match &entry.submitted_by {
            Author::Player(name) => state
                .color_for(&ColorSelector::ByName(name.clone()))?
                .map(|c| c.to_string())
                .unwrap_or_else(|| "-".to_string()),
            Author::System => "-".to_string(),
        };
        info!("{} ({}, {})", entry.word, entry.submitted_by, color);
    }

    let claimed = state.syllabary_board().iter().filter(|c| c.color.is_some()).count();
    info!("Syllables claimed: {}", claimed);
    info!("Events recorded: {}", session.events().len());

    let snapshot = session.snapshot();
    let json = snapshot.to_json()?;
    info!(
        "Snapshot: {} bytes, state {}",
        json.len(),
        short_hex(&state.compute_hash())
    );

    let resumed = manager.resume_session(&json).await?;
    info!("Resumed as session {}", hex::encode(resumed));

    Ok(())
}
