//! # Deck Merging
//!
//! Combines two deck files into one. Works on raw JSON documents rather than
//! a typed [`Deck`] so that category values which do not have the usual
//! shape can still be carried through.
//!
//! Policy, per category key:
//!
//! | In A | In B | Result                                              |
//! |------|------|-----------------------------------------------------|
//! | obj  | obj  | per card type: A's cards then B's cards             |
//! | list | list | A's entries then B's entries                        |
//! | any  | any  | otherwise B's value wholesale                       |
//! | yes  | no   | A's value unchanged                                 |
//! | no   | yes  | B's value unchanged, after all of A's categories    |
//!
//! "obj" means an object whose card types present on both sides are all
//! arrays. A card type found on one side only is carried through as is.

use log::{debug, info, warn};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

use crate::core::deck::{Deck, LoadError, SaveError, to_pretty_json, write_atomically};

/// A deck file as parsed JSON: a top-level object with arbitrary values.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DeckDocument(Map<String, Value>);

impl DeckDocument {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let document = Self::from_json_str(&contents)?;
        info!(
            "Loaded deck document {} ({} categories)",
            path.display(),
            document.0.len()
        );
        Ok(document)
    }

    pub fn from_json_str(text: &str) -> Result<Self, LoadError> {
        match serde_json::from_str(text).map_err(LoadError::Parse)? {
            Value::Object(map) => Ok(Self(map)),
            _ => Err(LoadError::Shape {
                pointer: String::new(),
                expected: "an object of categories",
            }),
        }
    }

    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        to_pretty_json(&Value::Object(self.0.clone()))
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SaveError> {
        let text = self.to_json_string().map_err(SaveError::Encode)?;
        write_atomically(path.as_ref(), &text)
    }

    /// Strict view of the document as a [`Deck`].
    pub fn to_deck(&self) -> Result<Deck, LoadError> {
        Deck::from_value(&Value::Object(self.0.clone()))
    }

    pub fn categories(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&Deck> for DeckDocument {
    fn from(deck: &Deck) -> Self {
        match deck.to_value() {
            Value::Object(map) => Self(map),
            _ => Self::default(),
        }
    }
}

/// Merge `b` into `a`, producing a new document.
pub fn merge_documents(a: &DeckDocument, b: &DeckDocument) -> DeckDocument {
    let mut merged = Map::new();

    for (key, a_value) in &a.0 {
        let value = match b.0.get(key) {
            Some(b_value) => merge_category(key, a_value, b_value),
            None => a_value.clone(),
        };
        merged.insert(key.clone(), value);
    }

    for (key, b_value) in &b.0 {
        if !merged.contains_key(key) {
            merged.insert(key.clone(), b_value.clone());
        }
    }

    debug!(
        "Merged {} + {} categories into {}",
        a.0.len(),
        b.0.len(),
        merged.len()
    );
    DeckDocument(merged)
}

fn merge_category(key: &str, a: &Value, b: &Value) -> Value {
    match (a, b) {
        (Value::Array(a_items), Value::Array(b_items)) => {
            Value::Array(a_items.iter().chain(b_items).cloned().collect())
        }
        (Value::Object(a_types), Value::Object(b_types))
            if shared_types_are_lists(a_types, b_types) =>
        {
            let mut merged = a_types.clone();
            for (card_type, b_cards) in b_types {
                match (merged.get_mut(card_type), b_cards) {
                    (Some(Value::Array(cards)), Value::Array(extra)) => {
                        cards.extend(extra.iter().cloned());
                    }
                    _ => {
                        merged.insert(card_type.clone(), b_cards.clone());
                    }
                }
            }
            Value::Object(merged)
        }
        _ => {
            warn!("Category '{key}' has mismatched shapes; keeping the second deck's value");
            b.clone()
        }
    }
}

/// Card types found on only one side never count as a mismatch; they are
/// carried through as they are.
fn shared_types_are_lists(a_types: &Map<String, Value>, b_types: &Map<String, Value>) -> bool {
    a_types.iter().all(|(card_type, a_cards)| match b_types.get(card_type) {
        Some(b_cards) => a_cards.is_array() && b_cards.is_array(),
        None => true,
    })
}

/// Load both files, merge, and write the result to `output`.
///
/// Nothing is written unless both inputs load. `output` may be one of the
/// inputs.
pub fn merge_files(
    a: impl AsRef<Path>,
    b: impl AsRef<Path>,
    output: impl AsRef<Path>,
) -> Result<DeckDocument, MergeError> {
    let a = DeckDocument::load(a).map_err(MergeError::Load)?;
    let b = DeckDocument::load(b).map_err(MergeError::Load)?;
    let merged = merge_documents(&a, &b);
    merged.save(output).map_err(MergeError::Save)?;
    Ok(merged)
}

#[derive(Debug)]
pub enum MergeError {
    Load(LoadError),
    Save(SaveError),
}

impl std::fmt::Display for MergeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MergeError::Load(e) => write!(f, "merge input: {e}"),
            MergeError::Save(e) => write!(f, "merge output: {e}"),
        }
    }
}

impl std::error::Error for MergeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MergeError::Load(e) => Some(e),
            MergeError::Save(e) => Some(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: Value) -> DeckDocument {
        DeckDocument::from_json_str(&value.to_string()).unwrap()
    }

    fn as_value(document: &DeckDocument) -> Value {
        Value::Object(document.0.clone())
    }

    #[test]
    fn test_merge_documents_concatenates_and_adds() {
        let a = doc(json!({"a": {"x": ["1"]}}));
        let b = doc(json!({"a": {"x": ["2"]}, "b": {"y": ["3"]}}));
        let merged = merge_documents(&a, &b);
        assert_eq!(as_value(&merged), json!({"a": {"x": ["1", "2"]}, "b": {"y": ["3"]}}));
    }

    #[test]
    fn test_card_type_only_in_a_is_unchanged() {
        let a = doc(json!({"h": {"x": ["1", "2"], "only_a": ["k", "j"]}}));
        let b = doc(json!({"h": {"x": ["3"]}}));
        let merged = merge_documents(&a, &b);
        assert_eq!(as_value(&merged)["h"]["only_a"], json!(["k", "j"]));
    }

    #[test]
    fn test_shared_card_type_length_and_order() {
        let a = doc(json!({"h": {"x": ["a1", "a2", "a3"]}}));
        let b = doc(json!({"h": {"x": ["b1", "b2"]}}));
        let merged = merge_documents(&a, &b);
        assert_eq!(
            as_value(&merged)["h"]["x"],
            json!(["a1", "a2", "a3", "b1", "b2"])
        );
    }

    #[test]
    fn test_category_order_a_then_b_only() {
        let a = doc(json!({"z": {}, "m": {}}));
        let b = doc(json!({"q": {}, "m": {}, "a": {}}));
        let merged = merge_documents(&a, &b);
        let keys: Vec<_> = merged.categories().map(|(k, _)| k).collect();
        assert_eq!(keys, ["z", "m", "q", "a"]);
    }

    #[test]
    fn test_card_type_order_a_then_b_only() {
        let a = doc(json!({"c": {"x": [], "z": []}}));
        let b = doc(json!({"c": {"y": [], "x": []}}));
        let merged = merge_documents(&a, &b);
        let keys: Vec<_> = merged.0["c"].as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, ["x", "z", "y"]);
    }

    #[test]
    fn test_structural_mismatch_takes_b() {
        let a = doc(json!({"h": {"x": "not a list"}, "k": {"y": ["1"]}}));
        let b = doc(json!({"h": {"x": ["2"]}, "k": ["flat"]}));
        let merged = merge_documents(&a, &b);
        assert_eq!(as_value(&merged)["h"], json!({"x": ["2"]}));
        assert_eq!(as_value(&merged)["k"], json!(["flat"]));
    }

    #[test]
    fn test_one_sided_non_list_card_type_is_not_a_mismatch() {
        let a = doc(json!({"h": {"x": ["1"], "junk": 5}}));
        let b = doc(json!({"h": {"x": ["2"], "extra": {"odd": true}}}));
        let merged = merge_documents(&a, &b);
        assert_eq!(
            as_value(&merged)["h"],
            json!({"x": ["1", "2"], "junk": 5, "extra": {"odd": true}})
        );
    }

    #[test]
    fn test_shared_non_list_card_type_takes_b() {
        let a = doc(json!({"h": {"x": ["1"], "y": ["keep?"]}}));
        let b = doc(json!({"h": {"x": "scalar"}}));
        let merged = merge_documents(&a, &b);
        assert_eq!(as_value(&merged)["h"], json!({"x": "scalar"}));
    }

    #[test]
    fn test_top_level_lists_concatenate() {
        let a = doc(json!({"flat": ["1"]}));
        let b = doc(json!({"flat": ["2", "3"]}));
        let merged = merge_documents(&a, &b);
        assert_eq!(as_value(&merged)["flat"], json!(["1", "2", "3"]));
    }

    #[test]
    fn test_typed_merge_agrees_with_document_merge() {
        let a = Deck::from_json_str(r#"{"a": {"x": ["1"], "w": ["0"]}, "c": {"z": []}}"#).unwrap();
        let b = Deck::from_json_str(r#"{"a": {"x": ["2"], "v": ["9"]}, "b": {"y": ["3"]}}"#)
            .unwrap();
        let typed = DeckDocument::from(&a.merge(&b));
        let raw = merge_documents(&DeckDocument::from(&a), &DeckDocument::from(&b));
        assert_eq!(typed, raw);
    }

    #[test]
    fn test_top_level_must_be_object() {
        assert!(matches!(
            DeckDocument::from_json_str("[1, 2]"),
            Err(LoadError::Shape { .. })
        ));
    }

    #[test]
    fn test_to_deck_is_strict() {
        let loose = doc(json!({"flat": ["1"]}));
        assert!(loose.to_deck().is_err());
        let ok = doc(json!({"a": {"x": ["1"]}}));
        assert_eq!(ok.to_deck().unwrap().card_count(), 1);
    }
}
