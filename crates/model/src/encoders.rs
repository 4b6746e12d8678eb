//! Categorical encoders.

use crate::error::{EncodeError, ModelError, Result};
use crate::traits::CategoricalEncoder;
use std::collections::{BTreeMap, HashMap};

/// Encoder where a category's code is its position in `classes`.
#[derive(Debug, Clone)]
pub struct LabelEncoder {
    classes: Vec<String>,
    index: HashMap<String, i64>,
}

impl LabelEncoder {
    /// Build an encoder from the ordered class list.
    ///
    /// Duplicate classes are rejected since they would make the reverse
    /// lookup ambiguous.
    pub fn new(classes: Vec<String>) -> Result<Self> {
        let mut index = HashMap::with_capacity(classes.len());
        for (code, class) in classes.iter().enumerate() {
            if index.insert(class.clone(), code as i64).is_some() {
                return Err(ModelError::invalid(
                    "LabelEncoder",
                    format!("duplicate class {:?}", class),
                ));
            }
        }
        Ok(Self { classes, index })
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

impl CategoricalEncoder for LabelEncoder {
    fn type_name(&self) -> &str {
        "LabelEncoder"
    }

    fn known_categories(&self) -> Option<&[String]> {
        Some(&self.classes)
    }

    fn transform(&self, category: &str) -> std::result::Result<i64, EncodeError> {
        self.index
            .get(category)
            .copied()
            .ok_or_else(|| EncodeError::UnknownCategory(category.to_string()))
    }

    fn inverse_transform(&self, code: i64) -> Option<&str> {
        usize::try_from(code)
            .ok()
            .and_then(|i| self.classes.get(i))
            .map(String::as_str)
    }
}

/// Encoder backed by an explicit category -> code table.
///
/// Codes need not be contiguous. Known categories are listed in code order.
#[derive(Debug, Clone)]
pub struct CategoryMap {
    mapping: HashMap<String, i64>,
    reverse: HashMap<i64, usize>,
    ordered: Vec<String>,
}

impl CategoryMap {
    pub fn new(mapping: BTreeMap<String, i64>) -> Result<Self> {
        let mut pairs: Vec<(String, i64)> = mapping.into_iter().collect();
        pairs.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(&b.0)));

        let mut reverse = HashMap::with_capacity(pairs.len());
        let mut ordered = Vec::with_capacity(pairs.len());
        let mut forward = HashMap::with_capacity(pairs.len());
        for (category, code) in pairs {
            if reverse.insert(code, ordered.len()).is_some() {
                return Err(ModelError::invalid(
                    "CategoryMap",
                    format!("code {} is assigned to more than one category", code),
                ));
            }
            forward.insert(category.clone(), code);
            ordered.push(category);
        }

        Ok(Self {
            mapping: forward,
            reverse,
            ordered,
        })
    }
}

impl CategoricalEncoder for CategoryMap {
    fn type_name(&self) -> &str {
        "CategoryMap"
    }

    fn known_categories(&self) -> Option<&[String]> {
        Some(&self.ordered)
    }

    fn transform(&self, category: &str) -> std::result::Result<i64, EncodeError> {
        self.mapping
            .get(category)
            .copied()
            .ok_or_else(|| EncodeError::UnknownCategory(category.to_string()))
    }

    fn inverse_transform(&self, code: i64) -> Option<&str> {
        self.reverse
            .get(&code)
            .map(|&i| self.ordered[i].as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn genres() -> Vec<String> {
        vec![
            "Arts, Film & Photography".to_string(),
            "Literature & Fiction".to_string(),
            "Romance".to_string(),
        ]
    }

    #[test]
    fn test_label_encoder_codes_are_positions() {
        let encoder = LabelEncoder::new(genres()).unwrap();
        assert_eq!(encoder.transform("Arts, Film & Photography").unwrap(), 0);
        assert_eq!(encoder.transform("Romance").unwrap(), 2);
        assert_eq!(encoder.len(), 3);
    }

    #[test]
    fn test_label_encoder_keeps_given_order() {
        let encoder = LabelEncoder::new(vec!["Romance".to_string(), "Poetry".to_string()]).unwrap();
        assert_eq!(encoder.transform("Romance").unwrap(), 0);
        assert_eq!(encoder.known_categories().unwrap(), ["Romance", "Poetry"]);
    }

    #[test]
    fn test_label_encoder_unknown_category() {
        let encoder = LabelEncoder::new(genres()).unwrap();
        let err = encoder.transform("Cookbooks").unwrap_err();
        assert_eq!(err, EncodeError::UnknownCategory("Cookbooks".to_string()));
    }

    #[test]
    fn test_label_encoder_round_trip() {
        let encoder = LabelEncoder::new(genres()).unwrap();
        for genre in genres() {
            let code = encoder.transform(&genre).unwrap();
            assert_eq!(encoder.inverse_transform(code), Some(genre.as_str()));
        }
        assert_eq!(encoder.inverse_transform(-1), None);
        assert_eq!(encoder.inverse_transform(3), None);
    }

    #[test]
    fn test_label_encoder_rejects_duplicates() {
        let result = LabelEncoder::new(vec!["Romance".to_string(), "Romance".to_string()]);
        assert!(result.is_err());
    }

    #[test]
    fn test_category_map_orders_by_code() {
        let mut mapping = BTreeMap::new();
        mapping.insert("Romance".to_string(), 7);
        mapping.insert("Thriller".to_string(), 2);
        mapping.insert("Poetry".to_string(), 4);

        let encoder = CategoryMap::new(mapping).unwrap();
        assert_eq!(
            encoder.known_categories().unwrap(),
            &["Thriller".to_string(), "Poetry".to_string(), "Romance".to_string()]
        );
        assert_eq!(encoder.transform("Romance").unwrap(), 7);
        assert_eq!(encoder.inverse_transform(4), Some("Poetry"));
        assert_eq!(encoder.inverse_transform(5), None);
    }

    #[test]
    fn test_category_map_rejects_shared_codes() {
        let mut mapping = BTreeMap::new();
        mapping.insert("Romance".to_string(), 1);
        mapping.insert("Thriller".to_string(), 1);
        assert!(CategoryMap::new(mapping).is_err());
    }
}
