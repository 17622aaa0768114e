use std::fmt;

use serde::{
    de::{MapAccess, Visitor},
    Deserialize, Deserializer,
};

/// Spending total for one category, in the configured currency unit.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryAmount {
    pub name: String,
    pub amount: f64,
}

impl CategoryAmount {
    #[cfg_attr(not(test), allow(dead_code))]
    pub fn new(name: impl Into<String>, amount: f64) -> Self {
        Self {
            name: name.into(),
            amount,
        }
    }

    /// Formats the category as `"<name>: <rounded amount> <currency>"`.
    pub fn display_line(&self, currency: &str) -> String {
        format!("{}: {} {}", self.name, whole_units(self.amount), currency)
    }
}

/// Formats an amount rounded half away from zero, without a fractional part.
pub fn whole_units(amount: f64) -> String {
    // Adding +0.0 turns a rounded -0.0 into 0.0.
    format!("{:.0}", amount.round() + 0.0)
}

/// Result of a spending analysis returned by the assistant service.
///
/// Categories keep the order the service returned them in.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AnalysisResult {
    pub summary: String,
    #[serde(deserialize_with = "deserialize_categories")]
    pub categories: Vec<CategoryAmount>,
}

impl AnalysisResult {
    #[cfg_attr(not(test), allow(dead_code))]
    pub fn new(summary: impl Into<String>, categories: Vec<CategoryAmount>) -> Self {
        Self {
            summary: summary.into(),
            categories,
        }
    }
}

// Reads a JSON object as an ordered list; a repeated key keeps its first
// position and takes the last value.
fn deserialize_categories<'de, D>(deserializer: D) -> Result<Vec<CategoryAmount>, D::Error>
where
    D: Deserializer<'de>,
{
    struct CategoriesVisitor;

    impl<'de> Visitor<'de> for CategoriesVisitor {
        type Value = Vec<CategoryAmount>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a map of category name to amount")
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut categories: Vec<CategoryAmount> =
                Vec::with_capacity(map.size_hint().unwrap_or(0));

            while let Some((name, amount)) = map.next_entry::<String, f64>()? {
                match categories.iter_mut().find(|entry| entry.name == name) {
                    Some(existing) => existing.amount = amount,
                    None => categories.push(CategoryAmount { name, amount }),
                }
            }

            Ok(categories)
        }
    }

    deserializer.deserialize_map(CategoriesVisitor)
}
