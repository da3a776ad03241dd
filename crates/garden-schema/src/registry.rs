//! Schema registry for loading and managing kind tables

use crate::field::{KindSchema, SchemaFile};
use crate::kinds::{self, GardenSpec};
use garden_core::{ContentKind, GardenError, Result};
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Registry that holds the field table of every known kind
#[derive(Debug, Default, Clone)]
pub struct SchemaRegistry {
    schemas: HashMap<String, KindSchema>,
}

impl SchemaRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the four built-in tables
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        for kind in ContentKind::ALL {
            registry.register(kinds::builtin_schema(kind));
        }
        registry
    }

    /// Load every `*.toml` file in a directory into this registry.
    /// A file for an existing kind replaces its table.
    pub fn load_directory<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let mut files: Vec<_> = fs::read_dir(path.as_ref())?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.extension().map(|e| e == "toml").unwrap_or(false))
            .collect();
        files.sort();

        for file_path in files {
            self.load_file(&file_path)?;
        }
        Ok(())
    }

    /// Load a kind table from a TOML file
    pub fn load_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let content = fs::read_to_string(path)?;
        self.load_string(&content)
    }

    /// Load a kind table from a TOML string
    pub fn load_string(&mut self, content: &str) -> Result<()> {
        let file: SchemaFile = toml::from_str(content)?;
        let schema = file.schema.to_kind_schema()?;
        self.register(schema);
        Ok(())
    }

    /// Register a table directly
    pub fn register(&mut self, schema: KindSchema) {
        self.schemas.insert(schema.kind.clone(), schema);
    }

    /// Get a kind table by name
    pub fn get(&self, kind: &str) -> Option<&KindSchema> {
        self.schemas.get(kind)
    }

    /// List all kind names, sorted
    pub fn kind_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.schemas.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    /// Validate an object against a named table without typing it
    pub fn validate(&self, kind: &str, candidate: Value) -> Result<Value> {
        self.get(kind)
            .ok_or_else(|| GardenError::UnknownKind(kind.to_string()))?
            .validate(candidate)
    }

    /// Default, validate and type an object using this registry's table for `S`
    pub fn normalize<S: GardenSpec>(&self, candidate: Value) -> Result<S> {
        let schema = self
            .get(S::KIND.as_str())
            .ok_or_else(|| GardenError::UnknownKind(S::KIND.to_string()))?;
        kinds::normalize(schema, candidate)
    }
}
