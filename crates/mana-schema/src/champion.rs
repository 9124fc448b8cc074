//! Champion identity and request keys
//!
//! A request is identified by the champion and either its lane or, for
//! lane-less modes such as ARAM, the game mode itself.

use crate::error::SchemaError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Champion identity supplied by the caller
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Champion {
    /// Numeric champion id
    pub id: u32,
    /// Stable key used in upstream URLs (e.g. `MonkeyKing`)
    pub key: String,
    /// Display name
    pub name: String,
}

impl Champion {
    /// Create new champion record
    #[inline]
    #[must_use]
    pub fn new(id: u32, key: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id,
            key: key.into(),
            name: name.into(),
        }
    }

    /// Check identity fields
    ///
    /// # Errors
    /// - `SchemaError::InvalidChampion` for a zero id or an empty key/name
    pub fn validate(&self) -> Result<(), SchemaError> {
        if self.id == 0 {
            return Err(SchemaError::InvalidChampion("id must be non-zero".to_string()));
        }
        if self.key.trim().is_empty() {
            return Err(SchemaError::InvalidChampion(format!(
                "champion {} has an empty key",
                self.id
            )));
        }
        if self.name.trim().is_empty() {
            return Err(SchemaError::InvalidChampion(format!(
                "champion {} has an empty name",
                self.id
            )));
        }
        Ok(())
    }
}

/// Lane assignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Position {
    /// Top lane
    Top,
    /// Jungle
    Jungle,
    /// Middle lane
    Middle,
    /// Bottom lane carry
    Adc,
    /// Bottom lane support
    Support,
}

impl Position {
    /// All positions, in the order upstream sites list them
    pub const ALL: [Position; 5] = [
        Position::Top,
        Position::Jungle,
        Position::Middle,
        Position::Adc,
        Position::Support,
    ];

    /// Canonical upper-case name
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Position::Top => "TOP",
            Position::Jungle => "JUNGLE",
            Position::Middle => "MIDDLE",
            Position::Adc => "ADC",
            Position::Support => "SUPPORT",
        }
    }

    /// Map the game client's assigned position
    ///
    /// The client reports `UTILITY` and `BOTTOM` for the bot lane roles and
    /// an empty string when no lane is assigned (blind pick, ARAM).
    ///
    /// # Errors
    /// - `SchemaError::UnknownPosition` for anything else outside the set
    pub fn from_assigned(assigned: &str) -> Result<Option<Self>, SchemaError> {
        match assigned.trim() {
            "" => Ok(None),
            "UTILITY" => Ok(Some(Position::Support)),
            "BOTTOM" => Ok(Some(Position::Adc)),
            other => other.parse().map(Some),
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Position {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Position::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| SchemaError::UnknownPosition(s.to_string()))
    }
}

/// Game mode identifier (`CLASSIC`, `ARAM`, ...)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct GameMode(String);

impl GameMode {
    /// Create game mode from identifier
    ///
    /// # Errors
    /// - `SchemaError::EmptyGameMode` if the identifier is blank
    pub fn new(mode: impl Into<String>) -> Result<Self, SchemaError> {
        let mode = mode.into();
        if mode.trim().is_empty() {
            return Err(SchemaError::EmptyGameMode);
        }
        Ok(Self(mode))
    }

    /// Summoner's Rift
    #[inline]
    #[must_use]
    pub fn classic() -> Self {
        Self("CLASSIC".to_string())
    }

    /// Howling Abyss
    #[inline]
    #[must_use]
    pub fn aram() -> Self {
        Self("ARAM".to_string())
    }

    /// Identifier string
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this is ARAM
    #[inline]
    #[must_use]
    pub fn is_aram(&self) -> bool {
        self.0.eq_ignore_ascii_case("ARAM")
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for GameMode {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for GameMode {
    type Error = SchemaError;

    fn try_from(mode: String) -> Result<Self, Self::Error> {
        Self::new(mode)
    }
}

impl From<GameMode> for String {
    fn from(mode: GameMode) -> Self {
        mode.0
    }
}

/// Cache/lookup key: `<championId>.<position or game mode>`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestKey(String);

impl RequestKey {
    /// Derive key from request inputs
    #[must_use]
    pub fn new(champion_id: u32, position: Option<Position>, mode: &GameMode) -> Self {
        let dimension = position.map_or_else(|| mode.as_str(), |p| p.as_str());
        Self(format!("{champion_id}.{dimension}"))
    }

    /// Key string
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Store key for rune pages
    #[inline]
    #[must_use]
    pub fn runes_key(&self) -> String {
        format!("runes.{}", self.0)
    }

    /// Store key for summoner spells
    #[inline]
    #[must_use]
    pub fn summoner_spells_key(&self) -> String {
        format!("summonerspells.{}", self.0)
    }
}

impl fmt::Display for RequestKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Inputs of one build resolution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildRequest {
    /// Champion being played
    pub champion: Champion,
    /// Assigned lane, if the mode has lanes
    pub position: Option<Position>,
    /// Current game mode
    pub game_mode: GameMode,
}

impl BuildRequest {
    /// Create new request
    #[inline]
    #[must_use]
    pub fn new(champion: Champion, position: Option<Position>, game_mode: GameMode) -> Self {
        Self {
            champion,
            position,
            game_mode,
        }
    }

    /// Check champion identity and game mode
    ///
    /// # Errors
    /// - `SchemaError::InvalidChampion` from [`Champion::validate`]
    /// - `SchemaError::EmptyGameMode` if the mode is blank
    pub fn validate(&self) -> Result<(), SchemaError> {
        self.champion.validate()?;
        if self.game_mode.as_str().trim().is_empty() {
            return Err(SchemaError::EmptyGameMode);
        }
        Ok(())
    }

    /// Derived request key
    #[inline]
    #[must_use]
    pub fn key(&self) -> RequestKey {
        RequestKey::new(self.champion.id, self.position, &self.game_mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn request_key_uses_position() {
        let key = RequestKey::new(1, Some(Position::Middle), &GameMode::classic());
        assert_eq!(key.as_str(), "1.MIDDLE");
        assert_eq!(key.runes_key(), "runes.1.MIDDLE");
        assert_eq!(key.summoner_spells_key(), "summonerspells.1.MIDDLE");
    }

    #[test]
    fn request_key_falls_back_to_mode() {
        let key = RequestKey::new(22, None, &GameMode::aram());
        assert_eq!(key.as_str(), "22.ARAM");
    }

    #[test]
    fn position_parse_is_case_insensitive() {
        assert_eq!("support".parse::<Position>().unwrap(), Position::Support);
        assert_eq!(" Adc ".parse::<Position>().unwrap(), Position::Adc);
        assert!(matches!(
            "MID".parse::<Position>(),
            Err(SchemaError::UnknownPosition(_))
        ));
    }

    #[test]
    fn assigned_position_mapping() {
        assert_eq!(Position::from_assigned("UTILITY").unwrap(), Some(Position::Support));
        assert_eq!(Position::from_assigned("BOTTOM").unwrap(), Some(Position::Adc));
        assert_eq!(Position::from_assigned("").unwrap(), None);
        assert_eq!(Position::from_assigned("JUNGLE").unwrap(), Some(Position::Jungle));
        assert!(Position::from_assigned("FILL").is_err());
    }

    #[test]
    fn game_mode_rejects_blank() {
        assert_eq!(GameMode::new("  "), Err(SchemaError::EmptyGameMode));
        assert!(GameMode::new("URF").is_ok());
        assert!(GameMode::aram().is_aram());
        assert!(!GameMode::classic().is_aram());
    }

    #[test]
    fn blank_game_mode_does_not_deserialize() {
        let mode: GameMode = serde_json::from_str("\"ARAM\"").unwrap();
        assert_eq!(mode, GameMode::aram());
        assert_eq!(serde_json::to_string(&mode).unwrap(), "\"ARAM\"");

        let err = serde_json::from_str::<GameMode>("\" \"").unwrap_err();
        assert!(err.to_string().contains("game mode"));

        let request = serde_json::json!({
            "champion": { "id": 103, "key": "Ahri", "name": "Ahri" },
            "position": null,
            "game_mode": "",
        });
        assert!(serde_json::from_value::<BuildRequest>(request).is_err());
    }

    #[test]
    fn request_validation_covers_champion() {
        let request = BuildRequest::new(Champion::new(0, "Ahri", "Ahri"), None, GameMode::aram());
        assert!(matches!(request.validate(), Err(SchemaError::InvalidChampion(_))));
        let request = BuildRequest::new(Champion::new(103, "Ahri", "Ahri"), None, GameMode::aram());
        assert!(request.validate().is_ok());
    }

    #[test]
    fn champion_validation() {
        assert!(Champion::new(103, "Ahri", "Ahri").validate().is_ok());
        assert!(Champion::new(0, "Ahri", "Ahri").validate().is_err());
        assert!(Champion::new(103, "", "Ahri").validate().is_err());
        assert!(Champion::new(103, "Ahri", " ").validate().is_err());
    }

    #[test]
    fn position_serializes_upper_case() {
        let json = serde_json::to_string(&Position::Adc).unwrap();
        assert_eq!(json, "\"ADC\"");
    }

    fn position_strategy() -> impl Strategy<Value = Option<Position>> {
        prop_oneof![
            Just(None),
            proptest::sample::select(Position::ALL.to_vec()).prop_map(Some),
        ]
    }

    proptest! {
        #[test]
        fn prop_request_key_is_id_and_dimension(
            id in 1u32..2000,
            position in position_strategy(),
            mode in "[A-Z]{3,10}",
        ) {
            let mode = GameMode::new(mode).unwrap();
            let key = RequestKey::new(id, position, &mode);
            let expected = format!("{id}.{}", position.map_or(mode.as_str(), |p| p.as_str()));
            prop_assert_eq!(key.as_str(), expected.as_str());
            prop_assert_eq!(key.runes_key(), format!("runes.{expected}"));
        }
    }
}
