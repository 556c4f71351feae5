use std::time::Duration;

use tokio::time::sleep;

use cricket_fantasy::{CricketDataClient, FantasyEngine, MatchDataProvider, MatchListKind};

/// Poll upcoming fixtures until one of them opens for team creation.
///
/// Usage: `CRICKET_API_KEY=... cargo run --example gate_poll`
#[tokio::main]
async fn main() -> cricket_fantasy::Result<()> {
    let api_key = std::env::var("CRICKET_API_KEY").unwrap_or_default();
    let engine = FantasyEngine::new(CricketDataClient::new(api_key));

    let fixtures = engine.provider().matches(MatchListKind::Fixtures).await?;
    println!("Found {} upcoming fixtures", fixtures.len());

    for round in 1..=20 {
        for fixture in &fixtures {
            let decision = engine.check_gate(&fixture.id).await?;
            println!("[{round}] {}: {}", fixture.name, decision.reason);
            if decision.can_create {
                if let Some(toss) = decision.toss_info {
                    println!("  toss won by {} ({:?})", toss.winner, toss.choice);
                }
                if let Some(squad) = engine.provider().squad(&fixture.id).await? {
                    println!("  {} players available", squad.players.len());
                }
                return Ok(());
            }
            sleep(Duration::from_millis(100)).await;
        }
        sleep(Duration::from_secs(20)).await;
    }
    Ok(())
}
