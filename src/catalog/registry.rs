//! Catalog Registry
//!
//! Loads the generated game-content reference data (items, skills, recipes)
//! from JSON files and exposes the lookup structures the save-processing
//! engine validates against.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use super::definition::{Item, Recipe, Skill};

/// Fatal catalog problems. The engine cannot produce meaningful output
/// without a complete, internally consistent catalog, so none of these are
/// recoverable at runtime.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog file {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse catalog file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    /// A recipe internal id matched no skill fragment, meaning the bundled
    /// catalog and the save format disagree about which skills exist.
    #[error("recipe '{recipe}' internal id '{internal}' matches no skill fragment")]
    UnmatchedInternal { recipe: String, internal: String },
    /// A recipe internal id matched more than one skill fragment.
    #[error("recipe '{recipe}' internal id '{internal}' matches multiple skills: {candidates:?}")]
    AmbiguousInternal {
        recipe: String,
        internal: String,
        candidates: Vec<String>,
    },
}

/// The static game-content reference data, assembled once per load.
///
/// Construct one per catalog snapshot; reloading the catalog means building
/// a fresh `Catalog` (and a fresh processor on top of it).
#[derive(Debug)]
pub struct Catalog {
    item_ids: HashSet<String>,
    skills: HashMap<String, Skill>,
    /// Preserves file order so recipe-derived output stays stable.
    recipes: Vec<Recipe>,
    recipe_positions: HashMap<String, usize>,
}

impl Catalog {
    /// Load `item.json`, `skill.json` and `recipe.json` from a directory of
    /// generated catalog files. A missing or malformed file is fatal.
    pub fn load_from_directory(data_dir: &Path) -> Result<Self, CatalogError> {
        let items: Vec<Item> = load_catalog_file(&data_dir.join("item.json"))?;
        let skills: Vec<Skill> = load_catalog_file(&data_dir.join("skill.json"))?;
        let recipes: Vec<Recipe> = load_catalog_file(&data_dir.join("recipe.json"))?;

        info!(
            "Loaded catalog: {} items, {} skills, {} recipes",
            items.len(),
            skills.len(),
            recipes.len()
        );

        Ok(Self::from_records(items, skills, recipes))
    }

    /// Assemble a catalog from already-loaded records.
    pub fn from_records(items: Vec<Item>, skills: Vec<Skill>, recipes: Vec<Recipe>) -> Self {
        let item_ids = items.into_iter().map(|i| i.id).collect();
        let skills = skills.into_iter().map(|s| (s.id.clone(), s)).collect();
        let recipe_positions = recipes
            .iter()
            .enumerate()
            .map(|(ix, r)| (r.id.clone(), ix))
            .collect();
        Self {
            item_ids,
            skills,
            recipes,
            recipe_positions,
        }
    }

    /// Check whether an item id exists in the catalog
    pub fn is_valid_item(&self, id: &str) -> bool {
        self.item_ids.contains(id)
    }

    /// Check whether a skill id exists in the catalog
    pub fn is_valid_skill(&self, id: &str) -> bool {
        self.skills.contains_key(id)
    }

    /// Get a skill definition by ID
    pub fn skill(&self, id: &str) -> Option<&Skill> {
        self.skills.get(id)
    }

    /// Get a recipe definition by ID
    pub fn recipe(&self, id: &str) -> Option<&Recipe> {
        self.recipe_positions.get(id).map(|&ix| &self.recipes[ix])
    }

    /// All skill IDs
    pub fn skill_ids(&self) -> impl Iterator<Item = &String> {
        self.skills.keys()
    }

    /// All recipes, in catalog file order
    pub fn recipes(&self) -> impl Iterator<Item = &Recipe> {
        self.recipes.iter()
    }

    pub fn item_count(&self) -> usize {
        self.item_ids.len()
    }

    pub fn skill_count(&self) -> usize {
        self.skills.len()
    }

    pub fn recipe_count(&self) -> usize {
        self.recipes.len()
    }
}

fn load_catalog_file<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Vec<T>, CatalogError> {
    let content = std::fs::read_to_string(path).map_err(|e| CatalogError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    serde_json::from_str(&content).map_err(|e| CatalogError::Parse {
        path: path.to_path_buf(),
        source: e,
    })
}
