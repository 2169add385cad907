//! # Deck Store
//!
//! The card data model: categories of card types, each holding a list of
//! card texts. Loaded once from a JSON document and read-only afterwards.
//!
//! ```text
//! Deck
//! ├── "holidays": CategoryDeck
//! │   ├── "christmas": ["Gift A", "Gift B"]
//! │   └── "easter":    ["Egg hunt"]
//! └── "class": CategoryDeck
//!     └── "math":      ["Solve 2 + 2"]
//! ```
//!
//! Key order always follows the source document (`serde_json` is built with
//! `preserve_order`), so iteration, merge output and serialization are stable.

use log::{debug, info};
use serde_json::{Map, Value};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// An ordered list of card texts for one card type.
pub type CardList = Vec<String>;

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum LoadError {
    /// The deck file is missing or unreadable.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The document is not valid JSON.
    Parse(serde_json::Error),
    /// Valid JSON, but not a category → card type → list of strings mapping.
    /// `pointer` locates the offending value (e.g. `/holidays/christmas/0`).
    Shape {
        pointer: String,
        expected: &'static str,
    },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io { path, source } => {
                write!(f, "cannot read deck {}: {source}", path.display())
            }
            LoadError::Parse(e) => write!(f, "deck is not valid JSON: {e}"),
            LoadError::Shape { pointer, expected } => {
                let at = if pointer.is_empty() { "/" } else { pointer.as_str() };
                write!(f, "deck has wrong shape at {at}: expected {expected}")
            }
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io { source, .. } => Some(source),
            LoadError::Parse(e) => Some(e),
            LoadError::Shape { .. } => None,
        }
    }
}

#[derive(Debug)]
pub enum SaveError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Encode(serde_json::Error),
}

impl fmt::Display for SaveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaveError::Io { path, source } => {
                write!(f, "cannot write deck {}: {source}", path.display())
            }
            SaveError::Encode(e) => write!(f, "cannot encode deck: {e}"),
        }
    }
}

impl std::error::Error for SaveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SaveError::Io { source, .. } => Some(source),
            SaveError::Encode(e) => Some(e),
        }
    }
}

// ============================================================================
// Data Model
// ============================================================================

/// The card types of one category, in document order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CategoryDeck {
    card_types: Vec<(String, CardList)>,
}

impl CategoryDeck {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a card type. A name already present has its cards replaced,
    /// mirroring how a JSON object keeps the last duplicate key.
    pub fn insert(&mut self, card_type: impl Into<String>, cards: CardList) {
        let card_type = card_type.into();
        match self.card_types.iter_mut().find(|(name, _)| *name == card_type) {
            Some((_, existing)) => *existing = cards,
            None => self.card_types.push((card_type, cards)),
        }
    }

    /// Cards for a card type, if this category has it.
    pub fn cards(&self, card_type: &str) -> Option<&[String]> {
        self.card_types
            .iter()
            .find(|(name, _)| name == card_type)
            .map(|(_, cards)| cards.as_slice())
    }

    pub fn card_types(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.card_types
            .iter()
            .map(|(name, cards)| (name.as_str(), cards.as_slice()))
    }

    pub fn card_type_names(&self) -> impl Iterator<Item = &str> {
        self.card_types.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.card_types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.card_types.is_empty()
    }

    /// Concatenates per card type: `self`'s cards first, then `other`'s.
    ///
    /// Card types from `self` keep their order; card types only in `other`
    /// follow in `other`'s order.
    pub fn merge(&self, other: &CategoryDeck) -> CategoryDeck {
        let mut merged = self.clone();
        for (name, cards) in &other.card_types {
            match merged.card_types.iter_mut().find(|(n, _)| n == name) {
                Some((_, existing)) => existing.extend(cards.iter().cloned()),
                None => merged.card_types.push((name.clone(), cards.clone())),
            }
        }
        merged
    }

    /// Parses a category value: an object whose values are arrays of strings.
    ///
    /// `pointer` is the JSON pointer of `value`, used in shape errors.
    pub fn from_value(value: &Value, pointer: &str) -> Result<Self, LoadError> {
        let object = value.as_object().ok_or_else(|| LoadError::Shape {
            pointer: pointer.to_string(),
            expected: "an object of card types",
        })?;

        let mut category = CategoryDeck::new();
        for (card_type, cards) in object {
            let type_pointer = format!("{pointer}/{}", escape_pointer_token(card_type));
            let entries = cards.as_array().ok_or_else(|| LoadError::Shape {
                pointer: type_pointer.clone(),
                expected: "an array of card texts",
            })?;

            let mut list = CardList::with_capacity(entries.len());
            for (i, entry) in entries.iter().enumerate() {
                let text = entry.as_str().ok_or_else(|| LoadError::Shape {
                    pointer: format!("{type_pointer}/{i}"),
                    expected: "a string",
                })?;
                list.push(text.to_string());
            }
            category.card_types.push((card_type.clone(), list));
        }
        Ok(category)
    }

    pub fn to_value(&self) -> Value {
        let object: Map<String, Value> = self
            .card_types
            .iter()
            .map(|(name, cards)| {
                let list = cards.iter().cloned().map(Value::String).collect();
                (name.clone(), Value::Array(list))
            })
            .collect();
        Value::Object(object)
    }
}

/// The whole card collection: categories in document order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Deck {
    categories: Vec<(String, CategoryDeck)>,
}

impl Deck {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a deck from a JSON file.
    ///
    /// A missing file is an error like any other; callers that want to show
    /// an empty deck must decide that themselves.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let deck = Self::from_json_str(&contents)?;
        info!(
            "Loaded deck from {} ({} categories, {} card types, {} cards)",
            path.display(),
            deck.len(),
            deck.card_type_count(),
            deck.card_count()
        );
        Ok(deck)
    }

    pub fn from_json_str(text: &str) -> Result<Self, LoadError> {
        let value: Value = serde_json::from_str(text).map_err(LoadError::Parse)?;
        Self::from_value(&value)
    }

    pub fn from_value(value: &Value) -> Result<Self, LoadError> {
        let object = value.as_object().ok_or_else(|| LoadError::Shape {
            pointer: String::new(),
            expected: "an object of categories",
        })?;

        let mut deck = Deck::new();
        for (name, category) in object {
            let pointer = format!("/{}", escape_pointer_token(name));
            deck.categories
                .push((name.clone(), CategoryDeck::from_value(category, &pointer)?));
        }
        debug!("Parsed deck with {} categories", deck.len());
        Ok(deck)
    }

    pub fn to_value(&self) -> Value {
        let object: Map<String, Value> = self
            .categories
            .iter()
            .map(|(name, category)| (name.clone(), category.to_value()))
            .collect();
        Value::Object(object)
    }

    /// Renders the deck as 4-space indented JSON with a trailing newline.
    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        to_pretty_json(&self.to_value())
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SaveError> {
        let text = self.to_json_string().map_err(SaveError::Encode)?;
        write_atomically(path.as_ref(), &text)
    }

    /// Appends a category. A name already present is replaced.
    pub fn insert(&mut self, name: impl Into<String>, category: CategoryDeck) {
        let name = name.into();
        match self.categories.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = category,
            None => self.categories.push((name, category)),
        }
    }

    pub fn category(&self, name: &str) -> Option<&CategoryDeck> {
        self.categories
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, category)| category)
    }

    pub fn categories(&self) -> impl Iterator<Item = (&str, &CategoryDeck)> {
        self.categories
            .iter()
            .map(|(name, category)| (name.as_str(), category))
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn card_type_count(&self) -> usize {
        self.categories.iter().map(|(_, c)| c.len()).sum()
    }

    pub fn card_count(&self) -> usize {
        self.categories
            .iter()
            .flat_map(|(_, c)| c.card_types())
            .map(|(_, cards)| cards.len())
            .sum()
    }

    /// Category → card type names, in deck order. One control is rendered
    /// per card type.
    pub fn layout(&self) -> Vec<(String, Vec<String>)> {
        self.categories
            .iter()
            .map(|(name, category)| {
                let types = category.card_type_names().map(str::to_string).collect();
                (name.clone(), types)
            })
            .collect()
    }

    /// Card type names that appear in more than one category, with the
    /// categories they appear in. Lookup by card type takes the first.
    pub fn duplicate_card_types(&self) -> Vec<(String, Vec<String>)> {
        let mut seen: Vec<(String, Vec<String>)> = Vec::new();
        for (category, deck) in &self.categories {
            for card_type in deck.card_type_names() {
                match seen.iter_mut().find(|(name, _)| name == card_type) {
                    Some((_, owners)) => owners.push(category.clone()),
                    None => seen.push((card_type.to_string(), vec![category.clone()])),
                }
            }
        }
        seen.retain(|(_, owners)| owners.len() > 1);
        seen
    }

    /// Merge two decks into a new one; neither input is touched.
    ///
    /// Categories of `self` come first in their order, then categories only
    /// in `other`. Shared categories are merged with [`CategoryDeck::merge`].
    pub fn merge(&self, other: &Deck) -> Deck {
        let mut merged = self.clone();
        for (name, category) in &other.categories {
            match merged.categories.iter_mut().find(|(n, _)| n == name) {
                Some((_, existing)) => *existing = existing.merge(category),
                None => merged.categories.push((name.clone(), category.clone())),
            }
        }
        merged
    }
}

// ============================================================================
// Serialization helpers
// ============================================================================

/// 4-space indented JSON with a trailing newline.
pub(crate) fn to_pretty_json(value: &Value) -> Result<String, serde_json::Error> {
    use serde::Serialize;

    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer)?;
    buf.push(b'\n');
    // serde_json only ever emits UTF-8
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Write `<path>.tmp`, then rename over `path`.
pub(crate) fn write_atomically(path: &Path, contents: &str) -> Result<(), SaveError> {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    let io_err = |source| SaveError::Io {
        path: path.to_path_buf(),
        source,
    };
    fs::write(&tmp, contents).map_err(io_err)?;
    fs::rename(&tmp, path).map_err(io_err)?;
    info!("Wrote deck to {}", path.display());
    Ok(())
}

fn escape_pointer_token(token: &str) -> String {
    token.replace('~', "~0").replace('/', "~1")
}
