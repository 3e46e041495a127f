//! Typed model of the external save-file format.
//!
//! The save document is an undocumented JSON format owned by the game and
//! subject to silent changes, so every structural assumption is validated
//! explicitly and violations fail loudly instead of being scanned around.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;

/// Position of the abilities sphere within `RootPopulationCommand.Spheres`.
pub const ABILITIES_SPHERE_INDEX: usize = 19;
/// Position of the skills sphere within `RootPopulationCommand.Spheres`.
pub const SKILLS_SPHERE_INDEX: usize = 20;

/// Governing-sphere id of the abilities sphere.
pub const ABILITIES_SPHERE_ID: &str = "hand.abilities";
/// Governing-sphere id of the skills sphere.
pub const SKILLS_SPHERE_ID: &str = "hand.skills";

/// Mutation key marking a skill as committed to a wisdom.
pub const WISDOM_COMMITTED_KEY: &str = "wisdom.committed";
/// Mutation key carrying the number of level-ups applied to a skill.
pub const LEVEL_UP_KEY: &str = "skill";
/// Mutation key prefix naming the wisdom the skill was NOT committed to.
pub const WISDOM_KEY_PREFIX: &str = "w.";
/// Mutation key prefix naming a soul made evolvable by the commitment.
pub const SOUL_KEY_PREFIX: &str = "a.";

/// Structural problems with a save document. All fatal: the format is
/// externally owned, so a shape mismatch means it changed upstream.
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("failed to read save file {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse save file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("sphere index {index} out of range ({count} spheres present)")]
    SphereOutOfRange { index: usize, count: usize },
    #[error("expected sphere '{expected}' at index {index}, found '{found}'")]
    SphereMismatch {
        index: usize,
        expected: &'static str,
        found: String,
    },
    #[error("missing field: {0}")]
    FieldMissing(String),
    #[error("unexpected type for {field}: expected {expected}")]
    UnexpectedType {
        field: String,
        expected: &'static str,
    },
    /// The save references a skill the catalog does not know. Skills are a
    /// closed set, so this signals catalog/save drift rather than an
    /// internal-only entry.
    #[error("save references unknown skill '{0}'")]
    UnknownSkill(String),
}

/// A parsed save file.
#[derive(Debug, Clone, Deserialize)]
pub struct SaveDocument {
    #[serde(rename = "CharacterCreationCommands", default)]
    pub character_creation_commands: Vec<CharacterCreation>,
    #[serde(rename = "RootPopulationCommand")]
    pub root_population_command: RootPopulation,
}

/// The character-creation section: flat lists of everything the player has
/// manifested or unlocked.
#[derive(Debug, Clone, Deserialize)]
pub struct CharacterCreation {
    #[serde(rename = "UniqueElementsManifested", default)]
    pub unique_elements_manifested: Vec<String>,
    #[serde(rename = "AmbittableRecipesUnlocked", default)]
    pub ambittable_recipes_unlocked: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RootPopulation {
    #[serde(rename = "Spheres", default)]
    pub spheres: Vec<Sphere>,
}

/// A named container in the population section, holding game-state tokens.
#[derive(Debug, Clone, Deserialize)]
pub struct Sphere {
    #[serde(rename = "GoverningSphereSpec")]
    pub governing_sphere_spec: SphereSpec,
    #[serde(rename = "Tokens", default)]
    pub tokens: Vec<Token>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SphereSpec {
    #[serde(rename = "Id")]
    pub id: String,
}

/// One entity record within a sphere.
#[derive(Debug, Clone, Deserialize)]
pub struct Token {
    #[serde(rename = "Payload")]
    pub payload: Payload,
}

/// Token payload: an entity id plus the mutations applied to it during play.
#[derive(Debug, Clone, Deserialize)]
pub struct Payload {
    #[serde(rename = "EntityId")]
    pub entity_id: String,
    #[serde(rename = "Mutations", default)]
    pub mutations: Map<String, Value>,
}

impl SaveDocument {
    pub fn load_from_path(path: &Path) -> Result<Self, SaveError> {
        let content = std::fs::read_to_string(path).map_err(|e| SaveError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self, SaveError> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// The first (and only meaningful) character-creation command.
    pub fn character_creation(&self) -> Result<&CharacterCreation, SaveError> {
        self.character_creation_commands
            .first()
            .ok_or_else(|| SaveError::FieldMissing("CharacterCreationCommands[0]".to_string()))
    }

    /// Fetch the sphere at a fixed position, asserting its governing id.
    ///
    /// The positions are brittle assumptions inherited from the save format;
    /// asserting the id here is what turns a silent layout change upstream
    /// into a loud, diagnosable error.
    pub fn sphere_at(&self, index: usize, expected: &'static str) -> Result<&Sphere, SaveError> {
        let spheres = &self.root_population_command.spheres;
        let sphere = spheres.get(index).ok_or(SaveError::SphereOutOfRange {
            index,
            count: spheres.len(),
        })?;
        if sphere.governing_sphere_spec.id != expected {
            return Err(SaveError::SphereMismatch {
                index,
                expected,
                found: sphere.governing_sphere_spec.id.clone(),
            });
        }
        Ok(sphere)
    }
}

impl Payload {
    /// Number of level-ups recorded in the mutations, if any. Present but
    /// non-integer (or negative) values are a structure error.
    pub fn level_ups(&self) -> Result<Option<u64>, SaveError> {
        match self.mutations.get(LEVEL_UP_KEY) {
            None => Ok(None),
            Some(value) => value
                .as_u64()
                .map(Some)
                .ok_or_else(|| SaveError::UnexpectedType {
                    field: format!("Mutations.{LEVEL_UP_KEY}"),
                    expected: "non-negative integer",
                }),
        }
    }

    /// Whether the skill has been committed to a wisdom.
    pub fn wisdom_committed(&self) -> bool {
        self.mutations.contains_key(WISDOM_COMMITTED_KEY)
    }

    /// The wisdom named in the mutations (by `w.`-prefixed key). For a
    /// committed skill this names the wisdom NOT chosen.
    pub fn mutation_wisdom(&self) -> Option<&str> {
        self.mutations
            .keys()
            .find_map(|k| k.strip_prefix(WISDOM_KEY_PREFIX))
    }

    /// The soul id named by an `a.`-prefixed mutation key, if any.
    pub fn mutation_soul(&self) -> Option<&str> {
        self.mutations
            .keys()
            .find_map(|k| k.strip_prefix(SOUL_KEY_PREFIX))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn document(value: serde_json::Value) -> SaveDocument {
        serde_json::from_value(value).unwrap()
    }

    fn sphere(id: &str) -> serde_json::Value {
        json!({"GoverningSphereSpec": {"Id": id}, "Tokens": []})
    }

    #[test]
    fn test_sphere_at_asserts_governing_id() {
        let mut spheres: Vec<serde_json::Value> =
            (0..19).map(|i| sphere(&format!("filler.{i}"))).collect();
        spheres.push(sphere(ABILITIES_SPHERE_ID));
        spheres.push(sphere(SKILLS_SPHERE_ID));
        let doc = document(json!({
            "CharacterCreationCommands": [],
            "RootPopulationCommand": {"Spheres": spheres},
        }));

        assert!(doc.sphere_at(ABILITIES_SPHERE_INDEX, ABILITIES_SPHERE_ID).is_ok());
        assert!(doc.sphere_at(SKILLS_SPHERE_INDEX, SKILLS_SPHERE_ID).is_ok());

        // Wrong id at the expected position fails loudly, never scans.
        let err = doc.sphere_at(ABILITIES_SPHERE_INDEX, SKILLS_SPHERE_ID).unwrap_err();
        assert!(matches!(
            err,
            SaveError::SphereMismatch { index: 19, expected: SKILLS_SPHERE_ID, .. }
        ));
    }

    #[test]
    fn test_sphere_out_of_range() {
        let doc = document(json!({
            "CharacterCreationCommands": [],
            "RootPopulationCommand": {"Spheres": [sphere("hand.misc")]},
        }));
        let err = doc.sphere_at(SKILLS_SPHERE_INDEX, SKILLS_SPHERE_ID).unwrap_err();
        assert!(matches!(err, SaveError::SphereOutOfRange { index: 20, count: 1 }));
    }

    #[test]
    fn test_character_creation_missing() {
        let doc = document(json!({
            "CharacterCreationCommands": [],
            "RootPopulationCommand": {"Spheres": []},
        }));
        assert!(matches!(
            doc.character_creation().unwrap_err(),
            SaveError::FieldMissing(_)
        ));
    }

    #[test]
    fn test_payload_mutation_accessors() {
        let payload: Payload = serde_json::from_value(json!({
            "EntityId": "s.hushery",
            "Mutations": {
                "wisdom.committed": true,
                "w.horomachistry": 1,
                "a.xsoulname": 1,
                "skill": 3,
            },
        }))
        .unwrap();

        assert!(payload.wisdom_committed());
        assert_eq!(payload.mutation_wisdom(), Some("horomachistry"));
        assert_eq!(payload.mutation_soul(), Some("xsoulname"));
        assert_eq!(payload.level_ups().unwrap(), Some(3));
    }

    #[test]
    fn test_committed_key_is_not_a_wisdom_key() {
        // "wisdom.committed" must not be picked up by the "w." prefix scan.
        let payload: Payload = serde_json::from_value(json!({
            "EntityId": "s.hushery",
            "Mutations": {"wisdom.committed": true},
        }))
        .unwrap();
        assert!(payload.wisdom_committed());
        assert_eq!(payload.mutation_wisdom(), None);
    }

    #[test]
    fn test_level_ups_wrong_type() {
        let payload: Payload = serde_json::from_value(json!({
            "EntityId": "s.hushery",
            "Mutations": {"skill": "three"},
        }))
        .unwrap();
        assert!(matches!(
            payload.level_ups().unwrap_err(),
            SaveError::UnexpectedType { .. }
        ));
    }

    #[test]
    fn test_missing_mutations_defaults_empty() {
        let payload: Payload =
            serde_json::from_value(json!({"EntityId": "s.hushery"})).unwrap();
        assert!(payload.mutations.is_empty());
        assert_eq!(payload.level_ups().unwrap(), None);
    }
}
