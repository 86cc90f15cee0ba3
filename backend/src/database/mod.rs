//! Module for the read model and its setup.
//!
//! The backend only reads projections of households and their shopping lists.
//! They are loaded once at startup from a JSON seed file (`SEED_PATH`), or the
//! database starts empty.

pub mod models;
pub mod queries;

use std::{collections::HashMap, fs, path::Path};

use thiserror::Error;
use tracing::info;

use models::ShoppingListWithItems;

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("failed to read seed file: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed seed file: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Default)]
pub struct Database {
    lists: HashMap<String, ShoppingListWithItems>,
}

impl Database {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_lists(lists: impl IntoIterator<Item = ShoppingListWithItems>) -> Self {
        Self {
            lists: lists
                .into_iter()
                .map(|list| (list.list.id.clone(), list))
                .collect(),
        }
    }

    /// Loads a JSON array of shopping-list projections.
    pub fn load(path: &Path) -> Result<Self, DatabaseError> {
        let raw = fs::read_to_string(path)?;
        let lists: Vec<ShoppingListWithItems> = serde_json::from_str(&raw)?;

        let database = Self::from_lists(lists);

        info!("Loaded {} shopping lists from {}", database.len(), path.display());
        Ok(database)
    }

    fn len(&self) -> usize {
        self.lists.len()
    }
}
