pub mod definition;
pub mod registry;

pub use definition::{
    Aspect, CraftingAction, Item, ItemRef, Principle, Recipe, RecipeInternal, Skill, SkillRef,
    Wisdom,
};
pub use registry::{Catalog, CatalogError};
