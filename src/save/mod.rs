pub mod document;

pub use document::{
    CharacterCreation, Payload, SaveDocument, SaveError, Sphere, Token, ABILITIES_SPHERE_ID,
    ABILITIES_SPHERE_INDEX, SKILLS_SPHERE_ID, SKILLS_SPHERE_INDEX,
};
