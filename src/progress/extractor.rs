//! Save-file progress extraction.
//!
//! Walks one parsed save document against one catalog snapshot and
//! reconstructs what the player knows: manifested items, learned skills
//! (with levels and wisdom commitments), and unlocked recipes.

use std::collections::{HashMap, HashSet};

use tracing::warn;

use crate::catalog::{Catalog, CatalogError, ItemRef, SkillRef};
use crate::save::document::{
    Payload, SaveDocument, SaveError, ABILITIES_SPHERE_ID, ABILITIES_SPHERE_INDEX,
    SKILLS_SPHERE_ID, SKILLS_SPHERE_INDEX,
};

use super::reconcile::RecipeIndex;
use super::types::{KnownRecipe, KnownSkill, ProcessedAutosave};

/// One-shot processor for save documents against a fixed catalog snapshot.
///
/// The reconciliation index is built in the constructor; reloading the
/// catalog means constructing a fresh processor.
pub struct SaveProcessor<'a> {
    catalog: &'a Catalog,
    index: RecipeIndex,
}

impl<'a> SaveProcessor<'a> {
    pub fn new(catalog: &'a Catalog) -> Result<Self, CatalogError> {
        let index = RecipeIndex::build(catalog)?;
        Ok(Self { catalog, index })
    }

    /// Extract everything the player knows from one save document.
    ///
    /// The item list concatenates manifested items, souls, and recipe
    /// products in that order, without deduplicating across the three
    /// sources; only the souls extraction deduplicates internally.
    pub fn process(&self, save: &SaveDocument) -> Result<ProcessedAutosave, SaveError> {
        let mut items = self.get_items(save)?;
        let skills = self.get_skills(save)?;
        let recipes = self.get_recipes(save)?;
        items.extend(self.get_souls(save)?);
        items.extend(self.get_items_from_recipes(&recipes));
        Ok(ProcessedAutosave {
            items,
            skills,
            recipes,
        })
    }

    /// Manifested items from character creation, filtered to the catalog,
    /// in save-document order.
    fn get_items(&self, save: &SaveDocument) -> Result<Vec<ItemRef>, SaveError> {
        let creation = save.character_creation()?;
        Ok(creation
            .unique_elements_manifested
            .iter()
            .filter(|id| self.catalog.is_valid_item(id))
            .map(ItemRef::new)
            .collect())
    }

    /// Souls from the abilities sphere, with identifier normalization and
    /// per-run deduplication. Ids unknown to the catalog are internal-only
    /// ability variants and are dropped without error.
    fn get_souls(&self, save: &SaveDocument) -> Result<Vec<ItemRef>, SaveError> {
        let sphere = save.sphere_at(ABILITIES_SPHERE_INDEX, ABILITIES_SPHERE_ID)?;
        let mut seen = HashSet::new();
        let mut souls = Vec::new();
        for token in &sphere.tokens {
            let id = normalize_soul_id(&token.payload.entity_id);
            if !self.catalog.is_valid_item(&id) {
                warn!("Skipping unknown soul '{}'", id);
                continue;
            }
            if seen.insert(id.clone()) {
                souls.push(ItemRef { id });
            }
        }
        Ok(souls)
    }

    /// Learned skills from the skills sphere. A skill id the catalog does
    /// not know is fatal; skills are a closed set.
    fn get_skills(&self, save: &SaveDocument) -> Result<Vec<KnownSkill>, SaveError> {
        let sphere = save.sphere_at(SKILLS_SPHERE_INDEX, SKILLS_SPHERE_ID)?;
        sphere
            .tokens
            .iter()
            .map(|token| self.get_skill(&token.payload))
            .collect()
    }

    fn get_skill(&self, payload: &Payload) -> Result<KnownSkill, SaveError> {
        let skill_id = &payload.entity_id;
        let skill = self
            .catalog
            .skill(skill_id)
            .ok_or_else(|| SaveError::UnknownSkill(skill_id.clone()))?;

        let mut known = KnownSkill::new(skill_id.clone());
        if let Some(level_ups) = payload.level_ups()? {
            known.level += level_ups;
        }

        if payload.wisdom_committed() {
            // The mutation names the wisdom NOT chosen; the committed one is
            // the other of the skill's two wisdoms.
            let not_wisdom = payload.mutation_wisdom().map(capitalize).ok_or_else(|| {
                SaveError::FieldMissing(format!("Mutations.w.* for committed skill '{skill_id}'"))
            })?;
            let wisdom = skill.other_wisdom(&not_wisdom).ok_or_else(|| {
                SaveError::FieldMissing(format!(
                    "wisdom other than '{not_wisdom}' for skill '{skill_id}'"
                ))
            })?;
            known.committed_wisdom = Some(wisdom.clone());
        }

        if let Some(soul_id) = payload.mutation_soul() {
            if self.catalog.is_valid_item(soul_id) {
                known.evolvable_soul = Some(ItemRef::new(soul_id));
            }
        }

        Ok(known)
    }

    /// Unlocked recipes from character creation, reconciled through the
    /// internal-id index and merged per recipe. Repeated identical internal
    /// ids are idempotent; internal ids the index does not know are dropped.
    fn get_recipes(&self, save: &SaveDocument) -> Result<Vec<KnownRecipe>, SaveError> {
        let creation = save.character_creation()?;
        let mut recipes: Vec<KnownRecipe> = Vec::new();
        let mut positions: HashMap<String, usize> = HashMap::new();
        for internal_id in &creation.ambittable_recipes_unlocked {
            let Some((recipe_id, skill_id)) = self.index.resolve(internal_id) else {
                continue;
            };
            match positions.get(recipe_id) {
                Some(&ix) => {
                    let skills = &mut recipes[ix].skills;
                    if !skills.iter().any(|s| s.id == skill_id) {
                        skills.push(SkillRef::new(skill_id));
                    }
                }
                None => {
                    positions.insert(recipe_id.to_string(), recipes.len());
                    recipes.push(KnownRecipe {
                        id: recipe_id.to_string(),
                        skills: vec![SkillRef::new(skill_id)],
                    });
                }
            }
        }
        Ok(recipes)
    }

    /// Every unlocked recipe implicitly reveals its product item, even when
    /// that item was never manifested directly.
    fn get_items_from_recipes(&self, recipes: &[KnownRecipe]) -> Vec<ItemRef> {
        recipes
            .iter()
            .filter_map(|known| self.catalog.recipe(&known.id))
            .map(|recipe| recipe.product.clone())
            .collect()
    }
}

/// Correct the historical identifier-scheme drift in soul ids: the save
/// format still records some souls under a leading `z` where the catalog
/// uses `x`.
fn normalize_soul_id(id: &str) -> String {
    match id.strip_prefix('z') {
        Some(rest) => format!("x{rest}"),
        None => id.to_string(),
    }
}

/// Uppercase the first character and lowercase the rest, matching how the
/// catalog spells wisdom ids against the save's lowercased mutation keys.
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
