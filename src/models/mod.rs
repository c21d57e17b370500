use serde::{Deserialize, Deserializer, Serialize};

mod schema;
mod validation;

pub use schema::{SchemaExport, export_schemas};
pub use validation::FieldError;

use validation::{check_email, check_max, check_min};

/// A record shape that can be accepted by a create endpoint and persisted
/// in the collection named by `KIND`.
pub trait Record: Serialize + for<'de> Deserialize<'de> + Send + Sync + 'static {
    /// Collection name, also the schema entry name.
    const KIND: &'static str;

    /// Field name to type descriptor, in declaration order.
    const FIELDS: &'static [(&'static str, &'static str)];

    /// Boundary checks that serde's typing can't express.
    fn validate(&self) -> Vec<FieldError> {
        Vec::new()
    }
}

// Games

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Game {
    pub name: String,
    /// Logo URL
    pub logo: Option<String>,
    pub genre: Option<String>,
    /// Primary platform
    pub platform: Option<String>,
    pub release_year: Option<i64>,
}

impl Record for Game {
    const KIND: &'static str = "game";
    const FIELDS: &'static [(&'static str, &'static str)] = &[
        ("name", "string"),
        ("logo", "optional[string]"),
        ("genre", "optional[string]"),
        ("platform", "optional[string]"),
        ("release_year", "optional[int]"),
    ];
}

// Players

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PlayerStatistics {
    pub kda: Option<f64>,
    pub winrate: Option<f64>,
    pub matches_played: Option<i64>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Player {
    pub player_name: String,
    pub email: Option<String>,
    pub avatar: Option<String>,
    pub age: Option<i64>,
    pub country: Option<String>,
    /// Team id as string, not checked against the team collection
    pub team_id: Option<String>,
    pub rank: Option<String>,
    pub statistics: Option<PlayerStatistics>,
}

impl Record for Player {
    const KIND: &'static str = "player";
    const FIELDS: &'static [(&'static str, &'static str)] = &[
        ("player_name", "string"),
        ("email", "optional[email]"),
        ("avatar", "optional[string]"),
        ("age", "optional[int]"),
        ("country", "optional[string]"),
        ("team_id", "optional[string]"),
        ("rank", "optional[string]"),
        ("statistics", "optional[PlayerStatistics]"),
    ];

    fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        if let Some(email) = &self.email {
            errors.extend(check_email("email", email));
        }
        if let Some(age) = self.age {
            errors.extend(check_min("age", age, 0));
            errors.extend(check_max("age", age, 120));
        }
        errors
    }
}

// Teams

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TeamStatistics {
    pub winrate: Option<f64>,
    pub matches_played: Option<i64>,
    pub trophies: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Team {
    pub team_name: String,
    pub logo: Option<String>,
    pub country: Option<String>,
    /// Player ids, in roster order
    #[serde(default, deserialize_with = "null_as_empty")]
    pub members: Vec<String>,
    pub coach: Option<String>,
    pub team_statistics: Option<TeamStatistics>,
}

impl Record for Team {
    const KIND: &'static str = "team";
    const FIELDS: &'static [(&'static str, &'static str)] = &[
        ("team_name", "string"),
        ("logo", "optional[string]"),
        ("country", "optional[string]"),
        ("members", "optional[list[string]]"),
        ("coach", "optional[string]"),
        ("team_statistics", "optional[TeamStatistics]"),
    ];
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

// Tournaments

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Tournament {
    pub tournament_name: String,
    /// Game id or name
    pub game: Option<String>,
    /// e.g. BO3, Swiss, Groups+Playoffs
    pub format: Option<String>,
    /// ISO date string, stored as given
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub prize_pool: Option<f64>,
    pub teams_limit: Option<i64>,
    /// planned | ongoing | completed, by convention only
    pub status: Option<String>,
}

impl Record for Tournament {
    const KIND: &'static str = "tournament";
    const FIELDS: &'static [(&'static str, &'static str)] = &[
        ("tournament_name", "string"),
        ("game", "optional[string]"),
        ("format", "optional[string]"),
        ("start_date", "optional[string]"),
        ("end_date", "optional[string]"),
        ("prize_pool", "optional[float]"),
        ("teams_limit", "optional[int]"),
        ("status", "optional[string]"),
    ];

    fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        if let Some(prize_pool) = self.prize_pool {
            errors.extend(check_min("prize_pool", prize_pool, 0.0));
        }
        if let Some(teams_limit) = self.teams_limit {
            errors.extend(check_min("teams_limit", teams_limit, 2));
        }
        errors
    }
}

// Matches

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MatchStatistics {
    pub duration_minutes: Option<i64>,
    pub highlights: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Match {
    /// Caller supplied, uniqueness is not enforced
    pub match_id: String,
    pub tournament_id: Option<String>,
    pub team_a: Option<String>,
    pub team_b: Option<String>,
    /// ISO datetime string, stored as given
    pub schedule_time: Option<String>,
    /// e.g. "2-1"
    pub score: Option<String>,
    pub winner: Option<String>,
    pub match_statistics: Option<MatchStatistics>,
}

impl Record for Match {
    const KIND: &'static str = "match";
    const FIELDS: &'static [(&'static str, &'static str)] = &[
        ("match_id", "string"),
        ("tournament_id", "optional[string]"),
        ("team_a", "optional[string]"),
        ("team_b", "optional[string]"),
        ("schedule_time", "optional[string]"),
        ("score", "optional[string]"),
        ("winner", "optional[string]"),
        ("match_statistics", "optional[MatchStatistics]"),
    ];
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn player(age: i64) -> Player {
        serde_json::from_value(json!({ "player_name": "s1mple", "age": age })).unwrap()
    }

    #[test]
    fn player_age_bounds_are_inclusive() {
        assert!(player(0).validate().is_empty());
        assert!(player(120).validate().is_empty());

        let errors = player(150).validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "age");

        assert_eq!(player(-1).validate()[0].field, "age");
    }

    #[test]
    fn player_email_must_look_like_an_address() {
        let mut p = player(20);
        p.email = Some("not-an-email".to_string());
        assert_eq!(p.validate()[0].field, "email");

        p.email = Some("zywoo@vitality.gg".to_string());
        assert!(p.validate().is_empty());
    }

    #[test]
    fn tournament_bounds() {
        let mut t: Tournament =
            serde_json::from_value(json!({ "tournament_name": "Major" })).unwrap();
        assert!(t.validate().is_empty());

        t.teams_limit = Some(1);
        t.prize_pool = Some(-5.0);
        let fields: Vec<_> = t.validate().into_iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["prize_pool", "teams_limit"]);

        t.teams_limit = Some(2);
        t.prize_pool = Some(0.0);
        assert!(t.validate().is_empty());
    }

    #[test]
    fn team_members_default_to_empty() {
        let omitted: Team = serde_json::from_value(json!({ "team_name": "NaVi" })).unwrap();
        assert!(omitted.members.is_empty());

        let null: Team =
            serde_json::from_value(json!({ "team_name": "NaVi", "members": null })).unwrap();
        assert!(null.members.is_empty());
    }

    #[test]
    fn optional_fields_are_dumped_as_null() {
        let game: Game = serde_json::from_value(json!({ "name": "Dota 2" })).unwrap();
        let dumped = serde_json::to_value(&game).unwrap();
        assert_eq!(dumped["logo"], serde_json::Value::Null);
        assert_eq!(dumped.as_object().unwrap().len(), Game::FIELDS.len());
    }

    #[test]
    fn missing_required_field_is_a_deserialize_error() {
        let err = serde_json::from_value::<Match>(json!({ "score": "2-1" })).unwrap_err();
        assert!(err.to_string().contains("match_id"));
    }
}
