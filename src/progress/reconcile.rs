//! Identifier reconciliation.
//!
//! The save format records unlocked recipes under unstable internal ids of
//! the game engine. Each internal id embeds a fragment of exactly one skill
//! id, so a substring match against the catalog's skill fragments recovers
//! the stable (recipe, skill) pair it stands for.

use std::collections::HashMap;

use crate::catalog::{Catalog, CatalogError};

/// Length of the category prefix on skill ids (e.g. `s.` in `s.hushery`).
const SKILL_ID_PREFIX_LEN: usize = 2;

/// Index from save-internal recipe ids to stable (recipe, skill) pairs.
///
/// Pure given a fixed catalog; built once per processor and shared read-only
/// across runs. A reloaded catalog means building a fresh index.
#[derive(Debug)]
pub struct RecipeIndex {
    by_internal: HashMap<String, (String, String)>,
}

impl RecipeIndex {
    /// Build the index for a catalog snapshot.
    ///
    /// An internal id matching zero or multiple skill fragments is a fatal
    /// catalog integrity error, surfaced here at build time rather than at
    /// first lookup.
    pub fn build(catalog: &Catalog) -> Result<Self, CatalogError> {
        let fragments: Vec<(&str, &String)> = catalog
            .skill_ids()
            .filter_map(|id| {
                id.get(SKILL_ID_PREFIX_LEN..)
                    .filter(|frag| !frag.is_empty())
                    .map(|frag| (frag, id))
            })
            .collect();

        let mut by_internal = HashMap::new();
        for recipe in catalog.recipes() {
            for internal in &recipe.recipe_internals {
                let mut matches = fragments
                    .iter()
                    .filter(|(frag, _)| internal.id.contains(frag));
                let skill_id = match (matches.next(), matches.next()) {
                    (Some((_, skill_id)), None) => (*skill_id).clone(),
                    (None, _) => {
                        return Err(CatalogError::UnmatchedInternal {
                            recipe: recipe.id.clone(),
                            internal: internal.id.clone(),
                        });
                    }
                    (Some(first), Some(second)) => {
                        let mut candidates = vec![first.1.clone(), second.1.clone()];
                        candidates.extend(matches.map(|(_, id)| (*id).clone()));
                        return Err(CatalogError::AmbiguousInternal {
                            recipe: recipe.id.clone(),
                            internal: internal.id.clone(),
                            candidates,
                        });
                    }
                };
                by_internal.insert(internal.id.clone(), (recipe.id.clone(), skill_id));
            }
        }

        Ok(Self { by_internal })
    }

    /// Resolve an internal id to its (recipe, skill) pair, if known.
    pub fn resolve(&self, internal_id: &str) -> Option<(&str, &str)> {
        self.by_internal
            .get(internal_id)
            .map(|(recipe, skill)| (recipe.as_str(), skill.as_str()))
    }

    pub fn len(&self) -> usize {
        self.by_internal.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_internal.is_empty()
    }
}
