//! String-in/string-out game simulation API.
//!
//! The request carries a schema version, the seed, and optional per-team
//! rosters and tactics; omitted rosters fall back to the deterministic
//! default lineups. The response is the finalized game result.

use serde::{Deserialize, Serialize};

use crate::engine::{run_game_with, GameResult};
use crate::error::{Result, SimError};
use crate::models::{
    DefenseTactic, OffenseTactic, Player, Team, TeamRoster, TeamTactics,
};
use crate::SCHEMA_VERSION;

#[derive(Debug, Deserialize)]
pub struct GameRequest {
    pub schema_version: u8,
    pub seed: u32,
    #[serde(default)]
    pub home_team: Option<TeamRequest>,
    #[serde(default)]
    pub away_team: Option<TeamRequest>,
}

#[derive(Debug, Deserialize)]
pub struct TeamRequest {
    pub name: Option<String>,
    #[serde(default)]
    pub offense: OffenseTactic,
    #[serde(default)]
    pub defense: DefenseTactic,
    /// Five starters. Omit to use the default lineup.
    #[serde(default)]
    pub players: Option<Vec<Player>>,
}

#[derive(Debug, Serialize)]
pub struct GameResponse {
    pub schema_version: u8,
    pub seed: u32,
    pub home_name: String,
    pub away_name: String,
    #[serde(flatten)]
    pub result: GameResult,
}

fn build_roster(team: Team, request: Option<&TeamRequest>) -> Result<TeamRoster> {
    let mut roster = TeamRoster::default_for(team);
    if let Some(req) = request {
        if let Some(name) = &req.name {
            roster.name = name.clone();
        }
        if let Some(players) = &req.players {
            roster.players = players.clone();
        }
    }
    roster.validate()?;
    Ok(roster)
}

fn tactics_of(request: Option<&TeamRequest>) -> TeamTactics {
    request
        .map(|r| TeamTactics { offense: r.offense, defense: r.defense })
        .unwrap_or_default()
}

/// Simulate a full game from a JSON request; returns the response JSON.
pub fn simulate_game_json(request_json: &str) -> Result<String> {
    let request: GameRequest = serde_json::from_str(request_json)?;
    if request.schema_version != SCHEMA_VERSION {
        return Err(SimError::InvalidSchemaVersion {
            expected: SCHEMA_VERSION,
            found: request.schema_version,
        });
    }

    let home = build_roster(Team::Home, request.home_team.as_ref())?;
    let away = build_roster(Team::Away, request.away_team.as_ref())?;
    let home_name = home.name.clone();
    let away_name = away.name.clone();
    let result = run_game_with(
        request.seed,
        home,
        away,
        tactics_of(request.home_team.as_ref()),
        tactics_of(request.away_team.as_ref()),
    );

    let response = GameResponse {
        schema_version: SCHEMA_VERSION,
        seed: request.seed,
        home_name,
        away_name,
        result,
    };
    Ok(serde_json::to_string(&response)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_minimal_request_simulates() {
        let request = json!({ "schema_version": 1, "seed": 42 });
        let response = simulate_game_json(&request.to_string()).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&response).unwrap();
        assert_eq!(parsed["schema_version"], 1);
        assert!(parsed["score_home"].is_number());
        assert!(parsed["score_away"].is_number());
        assert_eq!(parsed["box_scores"].as_array().unwrap().len(), 10);
    }

    #[test]
    fn test_same_seed_same_response() {
        let request = json!({
            "schema_version": 1,
            "seed": 999,
            "home_team": { "name": "Reds", "offense": "shoot", "defense": "zone" },
            "away_team": { "name": "Blues", "offense": "inside", "defense": "man" }
        })
        .to_string();
        let a = simulate_game_json(&request).unwrap();
        let b = simulate_game_json(&request).unwrap();
        assert_eq!(a, b, "same seed must produce the same response");
    }

    #[test]
    fn test_schema_version_is_checked() {
        let request = json!({ "schema_version": 9, "seed": 1 });
        let err = simulate_game_json(&request.to_string()).unwrap_err();
        assert!(matches!(err, SimError::InvalidSchemaVersion { expected: 1, found: 9 }));
    }

    #[test]
    fn test_short_roster_is_rejected() {
        let roster = crate::models::TeamRoster::default_for(Team::Home);
        let request = json!({
            "schema_version": 1,
            "seed": 1,
            "home_team": { "name": "Shorthanded", "players": [roster.players[0]] }
        });
        let err = simulate_game_json(&request.to_string()).unwrap_err();
        assert!(matches!(err, SimError::InvalidRosterSize { expected: 5, found: 1 }));
    }

    #[test]
    fn test_tactics_affect_outcome() {
        let base = json!({ "schema_version": 1, "seed": 31415 }).to_string();
        let tweaked = json!({
            "schema_version": 1,
            "seed": 31415,
            "home_team": { "offense": "fast_break", "defense": "press" }
        })
        .to_string();
        let a = simulate_game_json(&base).unwrap();
        let b = simulate_game_json(&tweaked).unwrap();
        assert_ne!(a, b, "tactics should steer the simulation");
    }
}
