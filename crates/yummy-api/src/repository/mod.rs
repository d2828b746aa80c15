//! Persistence layer for the catalogue entities
//!
//! One repository per entity, each a thin struct over the shared pool.
//! Every query is scoped to the owning user (categories) or owning
//! category (recipes); cascade deletes are the schema's job.

pub mod categories;
pub mod recipes;

pub use categories::{CategoryRepository, CategoryRow};
pub use recipes::{RecipeRepository, RecipeRow};
