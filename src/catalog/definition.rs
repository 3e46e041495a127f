use serde::{Deserialize, Serialize};

// ============================================================================
// References
// ============================================================================

/// Stable reference to a catalog item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRef {
    pub id: String,
}

impl ItemRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// Stable reference to a catalog skill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillRef {
    pub id: String,
}

impl SkillRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

// ============================================================================
// Principles
// ============================================================================

/// The game's thirteen principles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Principle {
    Edge,
    Forge,
    Grail,
    Heart,
    Knock,
    Lantern,
    Moon,
    Moth,
    Nectar,
    Rose,
    Scale,
    Sky,
    Winter,
}

impl Principle {
    pub fn as_str(&self) -> &'static str {
        match self {
            Principle::Edge => "edge",
            Principle::Forge => "forge",
            Principle::Grail => "grail",
            Principle::Heart => "heart",
            Principle::Knock => "knock",
            Principle::Lantern => "lantern",
            Principle::Moon => "moon",
            Principle::Moth => "moth",
            Principle::Nectar => "nectar",
            Principle::Rose => "rose",
            Principle::Scale => "scale",
            Principle::Sky => "sky",
            Principle::Winter => "winter",
        }
    }
}

// ============================================================================
// Wisdoms
// ============================================================================

/// A skill-progression wisdom. Each skill is associated with exactly two,
/// of which at most one can be committed by the player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wisdom {
    pub id: String,
}

impl Wisdom {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

// ============================================================================
// Items
// ============================================================================

/// Aspect tag carried by an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Aspect {
    pub id: String,
}

/// A catalog item record. Catalog files carry more fields than the engine
/// needs; anything beyond these is ignored on load.
#[derive(Debug, Clone, Deserialize)]
pub struct Item {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub aspects: Vec<Aspect>,
}

// ============================================================================
// Skills
// ============================================================================

/// A catalog skill definition.
#[derive(Debug, Clone, Deserialize)]
pub struct Skill {
    pub id: String,
    pub name: String,
    pub primary_principle: Principle,
    pub secondary_principle: Principle,
    /// Ordered pair of distinct wisdoms this skill can commit to.
    pub wisdoms: Vec<Wisdom>,
}

impl Skill {
    /// The wisdom this skill is associated with that is NOT the given one.
    pub fn other_wisdom(&self, wisdom_id: &str) -> Option<&Wisdom> {
        self.wisdoms.iter().find(|w| w.id != wisdom_id)
    }
}

// ============================================================================
// Recipes
// ============================================================================

/// How a recipe is performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CraftingAction {
    Craft,
    Read,
}

impl Default for CraftingAction {
    fn default() -> Self {
        CraftingAction::Craft
    }
}

/// An unstable, save-format-specific recipe identifier. The external game
/// engine records "this recipe variant, taught by this skill" under these
/// ids; they must be reconciled back to stable (recipe, skill) pairs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeInternal {
    pub id: String,
}

/// A catalog recipe record.
#[derive(Debug, Clone, Deserialize)]
pub struct Recipe {
    pub id: String,
    /// The item this recipe produces.
    pub product: ItemRef,
    pub principle: Principle,
    pub principle_amount: i32,
    #[serde(default)]
    pub crafting_action: CraftingAction,
    /// Internal ids the save format uses for this recipe, one per skill
    /// that can teach it.
    #[serde(default)]
    pub recipe_internals: Vec<RecipeInternal>,
}
