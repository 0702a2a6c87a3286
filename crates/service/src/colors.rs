//! Color reference table.
//!
//! Loaded once at startup from a two-column `id,name` file and shared
//! read-only afterwards. Name lookups ignore case.

use std::{collections::HashMap, path::Path};

use common::types::Person;
use tracing::{debug, info, warn};

use crate::errors::ServiceError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColorEntry {
    pub id: i32,
    pub name: String,
}

#[derive(Clone, Debug, Default)]
pub struct ColorTable {
    entries: Vec<ColorEntry>,
    by_id: HashMap<i32, String>,
    by_name: HashMap<String, i32>,
}

impl ColorTable {
    /// Read and parse the reference file. A missing or unreadable file is an error.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, ServiceError> {
        let path = path.as_ref();
        let text = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| ServiceError::Storage(format!("cannot read color table {}: {e}", path.display())))?;
        let table = Self::parse(&text);
        info!(file = %path.display(), colors = table.len(), "color table loaded");
        Ok(table)
    }

    /// Parse `id,name` lines; malformed lines are skipped with a warning.
    pub fn parse(text: &str) -> Self {
        let mut entries = Vec::new();
        for (idx, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let mut cols = line.split(',');
            let (Some(id), Some(name)) = (cols.next(), cols.next()) else {
                warn!(line = idx + 1, content = line, "skipping color line without two columns");
                continue;
            };
            let Ok(id) = id.trim().parse::<i32>() else {
                warn!(line = idx + 1, content = line, "skipping color line with non-integer id");
                continue;
            };
            let name = name.trim();
            if name.is_empty() {
                warn!(line = idx + 1, content = line, "skipping color line with empty name");
                continue;
            }
            entries.push(ColorEntry { id, name: name.to_string() });
        }
        Self::from_entries(entries)
    }

    pub fn from_entries(entries: impl IntoIterator<Item = ColorEntry>) -> Self {
        let entries: Vec<ColorEntry> = entries.into_iter().collect();
        let mut by_id = HashMap::with_capacity(entries.len());
        let mut by_name = HashMap::with_capacity(entries.len());
        for e in &entries {
            by_id.insert(e.id, e.name.clone());
            by_name.insert(e.name.to_lowercase(), e.id);
        }
        Self { entries, by_id, by_name }
    }

    pub fn name_to_id(&self, name: &str) -> Option<i32> {
        self.by_name.get(&name.trim().to_lowercase()).copied()
    }

    /// Empty string when the id is unknown.
    pub fn id_to_name(&self, id: i32) -> &str {
        self.by_id.get(&id).map(String::as_str).unwrap_or("")
    }

    pub fn entries(&self) -> &[ColorEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Make the color fields of a person consistent before it is stored.
    ///
    /// The color id is authoritative and the name is always rewritten from the
    /// table. A name without an id is resolved first. A person with neither
    /// keeps `color_id == 0` and an empty name.
    pub fn canonicalize(&self, mut person: Person) -> Result<Person, ServiceError> {
        if person.has_color_id() {
            let name = self.id_to_name(person.color_id);
            if name.is_empty() {
                return Err(ServiceError::UnknownColor(format!("color id {}", person.color_id)));
            }
            if person.has_color_name() && !same_name(&person.color, name) {
                debug!(given = %person.color, derived = name, color_id = person.color_id, "color name replaced by table name");
            }
            person.color = name.to_string();
        } else if person.has_color_name() {
            let id = self
                .name_to_id(&person.color)
                .ok_or_else(|| ServiceError::UnknownColor(person.color.trim().to_string()))?;
            person.color_id = id;
            person.color = self.id_to_name(id).to_string();
        } else {
            person.color.clear();
        }
        Ok(person)
    }
}

/// Name equality under the same folding `name_to_id` uses.
fn same_name(given: &str, table: &str) -> bool {
    given.trim().to_lowercase() == table.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    const COLORS: &str = "1, blau\n2, grün\n3, violett\n4, rot\n5, gelb\n6, türkis\n7, weiß\n";

    fn person(color: &str, color_id: i32) -> Person {
        Person { name: "Hans".into(), color: color.into(), color_id, ..Person::default() }
    }

    #[test]
    fn lookups_are_inverse_on_loaded_entries() {
        let table = ColorTable::parse(COLORS);
        assert_eq!(table.len(), 7);
        for e in table.entries() {
            assert_eq!(table.name_to_id(&e.name.to_lowercase()), Some(e.id));
            assert_eq!(table.id_to_name(e.id), e.name);
        }
    }

    #[test]
    fn name_lookup_ignores_case_and_padding() {
        let table = ColorTable::parse(COLORS);
        assert_eq!(table.name_to_id("ROT"), Some(4));
        assert_eq!(table.name_to_id(" Grün "), Some(2));
        assert_eq!(table.name_to_id("WEISS"), None);
        assert_eq!(table.name_to_id("WEIß"), Some(7));
        assert_eq!(table.name_to_id("schwarz"), None);
    }

    #[test]
    fn unknown_id_gives_empty_name() {
        let table = ColorTable::parse(COLORS);
        assert_eq!(table.id_to_name(42), "");
        assert_eq!(table.id_to_name(0), "");
    }

    #[test]
    fn malformed_lines_are_skipped() {
        let table = ColorTable::parse("1,red\n\nnot-a-number,blue\n3\n4,   \n5,green,extra\n");
        assert_eq!(
            table.entries(),
            &[
                ColorEntry { id: 1, name: "red".into() },
                ColorEntry { id: 5, name: "green".into() },
            ]
        );
        assert_eq!(table.name_to_id("blue"), None);
    }

    #[test]
    fn later_duplicates_win() {
        let table = ColorTable::parse("1,red\n1,crimson\n2,Blue\n3,blue\n");
        assert_eq!(table.id_to_name(1), "crimson");
        assert_eq!(table.name_to_id("blue"), Some(3));
    }

    #[tokio::test]
    async fn load_missing_file_fails() {
        let missing = std::env::temp_dir().join(format!("colors_{}.csv", uuid::Uuid::new_v4()));
        assert!(matches!(ColorTable::load(&missing).await, Err(ServiceError::Storage(_))));
    }

    #[tokio::test]
    async fn load_reads_file() -> Result<(), anyhow::Error> {
        let path = std::env::temp_dir().join(format!("colors_{}.csv", uuid::Uuid::new_v4()));
        tokio::fs::write(&path, COLORS).await?;
        let table = ColorTable::load(&path).await?;
        assert_eq!(table.name_to_id("gelb"), Some(5));
        let _ = tokio::fs::remove_file(&path).await;
        Ok(())
    }

    #[test]
    fn canonicalize_resolves_name_to_id() {
        let table = ColorTable::parse(COLORS);
        let p = table.canonicalize(person("ROT", 0)).unwrap();
        assert_eq!(p.color_id, 4);
        assert_eq!(p.color, "rot");
    }

    #[test]
    fn canonicalize_prefers_id_and_derives_name() {
        let table = ColorTable::parse(COLORS);
        let p = table.canonicalize(person("", 1)).unwrap();
        assert_eq!(p.color, "blau");
        let p = table.canonicalize(person("rot", 1)).unwrap();
        assert_eq!((p.color_id, p.color.as_str()), (1, "blau"));
    }

    #[test]
    fn canonicalize_rejects_unknown_colors() {
        let table = ColorTable::parse(COLORS);
        assert!(matches!(table.canonicalize(person("green", 0)), Err(ServiceError::UnknownColor(_))));
        assert!(matches!(table.canonicalize(person("", 99)), Err(ServiceError::UnknownColor(_))));
    }

    #[test]
    fn name_comparison_folds_non_ascii() {
        assert!(same_name(" GRÜN ", "grün"));
        assert!(same_name("WEIß", "weiß"));
        assert!(!same_name("rot", "blau"));
        let table = ColorTable::parse(COLORS);
        let p = table.canonicalize(person("GRÜN", 2)).unwrap();
        assert_eq!(p.color, "grün");
    }

    #[test]
    fn canonicalize_without_color_keeps_none() {
        let table = ColorTable::parse(COLORS);
        let p = table.canonicalize(person("  ", 0)).unwrap();
        assert_eq!((p.color_id, p.color.as_str()), (0, ""));
    }
}
