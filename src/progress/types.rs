//! Player-progress records derived from one save-file snapshot.
//!
//! All of these are read-only outputs of a single processing run; they are
//! serialized for whoever called the engine (e.g. an HTTP handler) and never
//! mutated afterwards.

use serde::Serialize;

use crate::catalog::{ItemRef, SkillRef, Wisdom};

/// A skill the player has learned.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KnownSkill {
    pub id: String,
    /// 1 plus the level-up count recorded in the save.
    pub level: u64,
    /// The wisdom the skill was committed to, when committed. This is the
    /// *other* of the skill's two wisdoms, not the one named in the save's
    /// mutation payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub committed_wisdom: Option<Wisdom>,
    /// Soul made evolvable by the committed path; only kept when its id
    /// resolves to a valid catalog item.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evolvable_soul: Option<ItemRef>,
}

impl KnownSkill {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            level: 1,
            committed_wisdom: None,
            evolvable_soul: None,
        }
    }
}

/// A recipe the player has unlocked, annotated with every skill it was
/// learned through. A recipe reachable via multiple skills is a single entry
/// with an accumulated, insertion-ordered skill list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KnownRecipe {
    pub id: String,
    pub skills: Vec<SkillRef>,
}

/// The engine's single output: everything the player knows, reconstructed
/// from one save snapshot. Lists keep save-document order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessedAutosave {
    pub items: Vec<ItemRef>,
    pub skills: Vec<KnownSkill>,
    pub recipes: Vec<KnownRecipe>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optional_fields_omitted_from_json() {
        let skill = KnownSkill::new("s.hushery");
        let json = serde_json::to_value(&skill).unwrap();
        assert_eq!(json, serde_json::json!({"id": "s.hushery", "level": 1}));
    }

    #[test]
    fn test_committed_skill_serialization() {
        let skill = KnownSkill {
            id: "s.hushery".to_string(),
            level: 4,
            committed_wisdom: Some(Wisdom::new("Ithastry")),
            evolvable_soul: Some(ItemRef::new("xsoulname")),
        };
        let json = serde_json::to_value(&skill).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": "s.hushery",
                "level": 4,
                "committed_wisdom": {"id": "Ithastry"},
                "evolvable_soul": {"id": "xsoulname"},
            })
        );
    }
}
