pub mod extractor;
pub mod reconcile;
pub mod types;

pub use extractor::SaveProcessor;
pub use reconcile::RecipeIndex;
pub use types::{KnownRecipe, KnownSkill, ProcessedAutosave};
