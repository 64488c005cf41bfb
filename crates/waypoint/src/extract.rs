//! Structural table inference.
//!
//! The terminal page's markup is unknown in advance. Two sample tokens are
//! enough to recover it: a label known to appear in the table (say a team
//! name) and the shape of a value (say fractional odds). The element holding
//! each sample gives a `(tag, classes)` signature; every element sharing a
//! signature is then taken to be a row label or a row value, and the two
//! lists are zipped together in document order.
//!
//! The two phases are separate so each can be checked on its own:
//! [`infer_schema`] finds the signatures, [`harvest`] applies them.
//!
//! Nothing validates the result. If the sample label happens to sit in page
//! furniture that shares its signature, the output is garbage.

use crate::document::{element_text, HtmlDocument, StructuralSchema};
use crate::error::{ScrapeError, ScrapeResult};
use indexmap::IndexMap;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Entity label → value token, in document order.
///
/// A label seen twice keeps its first position and takes the last value.
pub type EntityValueMap = IndexMap<String, String>;

/// Fractional odds such as `9/2`, the token shape bookmakers print.
pub const DEFAULT_VALUE_PATTERN: &str = r"\d*/\d*";

/// A value-token shape, matched against the whole trimmed text of a node.
#[derive(Debug, Clone)]
pub struct ValuePattern {
    source: String,
    regex: Regex,
}

impl ValuePattern {
    pub fn new(pattern: &str) -> ScrapeResult<Self> {
        let regex = Regex::new(&format!("^(?:{pattern})$"))?;
        Ok(Self {
            source: pattern.to_string(),
            regex,
        })
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }
}

/// Signatures of the label and value elements of one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSchema {
    pub label: StructuralSchema,
    pub value: StructuralSchema,
}

/// Infer the label and value signatures from the two sample tokens.
pub fn infer_schema(
    doc: &HtmlDocument,
    sample_label: &str,
    value_pattern: &ValuePattern,
) -> ScrapeResult<TableSchema> {
    let sample_label = sample_label.trim();
    let label_node = doc
        .find_text_matching(|text| text == sample_label)
        .ok_or_else(|| ScrapeError::Parse(format!("label anchor not found: `{sample_label}`")))?;
    let label = StructuralSchema::of(HtmlDocument::parent_of(&label_node));

    let value_node = doc
        .find_text_matching(|text| value_pattern.is_match(text))
        .ok_or_else(|| {
            ScrapeError::Parse(format!(
                "value anchor not found: `{}`",
                value_pattern.as_str()
            ))
        })?;
    let value = StructuralSchema::of(HtmlDocument::parent_of(&value_node));

    tracing::debug!(?label, ?value, "inferred table schema");
    Ok(TableSchema { label, value })
}

/// Collect every label/value pair matching `schema`.
///
/// Labels and values are paired by position. When one list is longer, its
/// excess elements are dropped without error.
pub fn harvest(doc: &HtmlDocument, schema: &TableSchema) -> EntityValueMap {
    let entities: Vec<String> = doc
        .find_all_matching(&schema.label)
        .into_iter()
        .map(element_text)
        .collect();
    let values: Vec<String> = doc
        .find_all_matching(&schema.value)
        .into_iter()
        .map(element_text)
        .collect();

    if entities.len() != values.len() {
        tracing::debug!(
            entities = entities.len(),
            values = values.len(),
            "label and value counts differ, truncating to the shorter"
        );
    }

    let mut table = EntityValueMap::new();
    for (entity, value) in entities.into_iter().zip(values) {
        table.insert(entity, value);
    }
    table
}

/// [`infer_schema`] followed by [`harvest`].
pub fn extract(
    doc: &HtmlDocument,
    sample_label: &str,
    value_pattern: &ValuePattern,
) -> ScrapeResult<EntityValueMap> {
    let schema = infer_schema(doc, sample_label, value_pattern)?;
    Ok(harvest(doc, &schema))
}
