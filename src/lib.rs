//! Save-file progress reconciliation for a game companion tool.
//!
//! Loads the generated game-content catalog (items, skills, recipes), parses
//! the game's autosave document, and reconstructs the player's known items,
//! skills, and recipes. The save format records recipes under unstable
//! internal ids; these are reconciled back to stable catalog identifiers
//! before anything is reported.
//!
//! One `Catalog` plus one `SaveProcessor` per catalog load; run
//! `SaveProcessor::process` once per save snapshot.

pub mod catalog;
pub mod progress;
pub mod save;

pub use catalog::{Catalog, CatalogError};
pub use progress::{KnownRecipe, KnownSkill, ProcessedAutosave, SaveProcessor};
pub use save::{SaveDocument, SaveError};

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::TempDir;

    use super::*;

    /// End to end: catalog files on disk, save bytes in, progress out.
    #[test]
    fn test_catalog_to_progress_round() {
        let temp_dir = TempDir::new().unwrap();
        let write = |name: &str, content: &str| {
            let mut file = std::fs::File::create(temp_dir.path().join(name)).unwrap();
            file.write_all(content.as_bytes()).unwrap();
        };
        write("item.json", r#"[{"id": "wine"}, {"id": "x.memory01"}]"#);
        write(
            "skill.json",
            r#"[{
                "id": "s.hushery",
                "name": "Hushery",
                "primary_principle": "moon",
                "secondary_principle": "knock",
                "wisdoms": [{"id": "Horomachistry"}, {"id": "Ithastry"}]
            }]"#,
        );
        write(
            "recipe.json",
            r#"[{
                "id": "wine_grail",
                "product": {"id": "wine"},
                "principle": "grail",
                "principle_amount": 5,
                "recipe_internals": [{"id": "craft.wine.hushery"}]
            }]"#,
        );

        let catalog = Catalog::load_from_directory(temp_dir.path()).unwrap();
        let processor = SaveProcessor::new(&catalog).unwrap();

        let mut spheres: Vec<serde_json::Value> = (0..19)
            .map(|i| {
                serde_json::json!({
                    "GoverningSphereSpec": {"Id": format!("filler.{i}")},
                    "Tokens": [],
                })
            })
            .collect();
        spheres.push(serde_json::json!({
            "GoverningSphereSpec": {"Id": "hand.abilities"},
            "Tokens": [{"Payload": {"EntityId": "z.memory01"}}],
        }));
        spheres.push(serde_json::json!({
            "GoverningSphereSpec": {"Id": "hand.skills"},
            "Tokens": [{"Payload": {
                "EntityId": "s.hushery",
                "Mutations": {"wisdom.committed": true, "w.horomachistry": 1, "skill": 1},
            }}],
        }));
        let save_bytes = serde_json::to_vec(&serde_json::json!({
            "CharacterCreationCommands": [{
                "UniqueElementsManifested": ["wine"],
                "AmbittableRecipesUnlocked": ["craft.wine.hushery"],
            }],
            "RootPopulationCommand": {"Spheres": spheres},
        }))
        .unwrap();

        let save = SaveDocument::from_slice(&save_bytes).unwrap();
        let result = processor.process(&save).unwrap();

        assert_eq!(result.skills.len(), 1);
        assert_eq!(result.skills[0].level, 2);
        assert_eq!(
            result.skills[0].committed_wisdom.as_ref().unwrap().id,
            "Ithastry"
        );
        assert_eq!(result.recipes.len(), 1);
        assert_eq!(result.recipes[0].id, "wine_grail");
        // Manifested wine, the soul, then wine again as a recipe product.
        let item_ids: Vec<&str> = result.items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(item_ids, ["wine", "x.memory01", "wine"]);
    }
}
