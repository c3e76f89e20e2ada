use serde::{Deserialize, Serialize};
use std::fmt;

/// Equipment categories, in report declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Shirt,
    Pants,
    TShirt,
    Jacket,
    Boots,
    Beret,
    BeretInsignia,
    Belt,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::Shirt,
        Category::Pants,
        Category::TShirt,
        Category::Jacket,
        Category::Boots,
        Category::Beret,
        Category::BeretInsignia,
        Category::Belt,
    ];

    /// Section title used by the screen report and both documents.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Category::Shirt => "Camisa Operacional",
            Category::Pants => "Calça Operacional",
            Category::TShirt => "Camiseta Cinza",
            Category::Jacket => "Jaqueta Operacional",
            Category::Boots => "Coturno",
            Category::Beret => "Boina",
            Category::BeretInsignia => "Distintivo Boina",
            Category::Belt => "Cinto Lona",
        }
    }

    /// Field name inside the stored `romaneio` object.
    #[must_use]
    pub const fn wire_key(self) -> &'static str {
        match self {
            Category::Shirt => "camisa",
            Category::Pants => "calca",
            Category::TShirt => "camiseta",
            Category::Jacket => "jaqueta",
            Category::Boots => "coturno",
            Category::Beret => "boina",
            Category::BeretInsignia => "distintivo",
            Category::Belt => "cinto",
        }
    }

    /// Only pants are tallied per gender.
    #[must_use]
    pub const fn has_gender_breakdown(self) -> bool {
        matches!(self, Category::Pants)
    }

    /// Sizes offered for this category, or `None` when the size is free text.
    #[must_use]
    pub fn catalog_sizes(self) -> Option<Vec<u32>> {
        match self {
            Category::Shirt | Category::Pants | Category::Jacket => {
                Some((36..=68).step_by(2).collect())
            }
            Category::Boots => Some((33..=48).collect()),
            Category::Beret => Some((54..=62).collect()),
            Category::TShirt | Category::BeretInsignia | Category::Belt => None,
        }
    }

    /// Whether `value` is acceptable for the catalog. Free-text categories accept anything.
    #[must_use]
    pub fn accepts(self, value: &str) -> bool {
        match self.catalog_sizes() {
            None => true,
            Some(sizes) => value
                .trim()
                .parse::<u32>()
                .is_ok_and(|size| sizes.contains(&size)),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// The per-person sizing sub-record ("romaneio").
///
/// Always complete: fields missing on the wire come back as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizingRecord {
    #[serde(rename = "camisa", default)]
    pub shirt: String,
    #[serde(rename = "calca", default)]
    pub pants: String,
    #[serde(rename = "camiseta", default)]
    pub t_shirt: String,
    #[serde(rename = "jaqueta", default)]
    pub jacket: String,
    #[serde(rename = "coturno", default)]
    pub boots: String,
    #[serde(rename = "boina", default)]
    pub beret: String,
    #[serde(rename = "distintivo", default)]
    pub beret_insignia: String,
    #[serde(rename = "cinto", default)]
    pub belt: String,
}

impl SizingRecord {
    #[must_use]
    pub fn size(&self, category: Category) -> &str {
        match category {
            Category::Shirt => &self.shirt,
            Category::Pants => &self.pants,
            Category::TShirt => &self.t_shirt,
            Category::Jacket => &self.jacket,
            Category::Boots => &self.boots,
            Category::Beret => &self.beret,
            Category::BeretInsignia => &self.beret_insignia,
            Category::Belt => &self.belt,
        }
    }

    pub fn set(&mut self, category: Category, value: impl Into<String>) {
        let slot = match category {
            Category::Shirt => &mut self.shirt,
            Category::Pants => &mut self.pants,
            Category::TShirt => &mut self.t_shirt,
            Category::Jacket => &mut self.jacket,
            Category::Boots => &mut self.boots,
            Category::Beret => &mut self.beret,
            Category::BeretInsignia => &mut self.beret_insignia,
            Category::Belt => &mut self.belt,
        };
        *slot = value.into();
    }

    #[must_use]
    pub fn with_size(mut self, category: Category, value: impl Into<String>) -> Self {
        self.set(category, value);
        self
    }

    /// Categories whose value falls outside the size catalog.
    #[must_use]
    pub fn off_catalog(&self) -> Vec<Category> {
        Category::ALL
            .into_iter()
            .filter(|category| !category.accepts(self.size(*category)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn catalog_ranges_match_form_options() {
        let shirt = Category::Shirt.catalog_sizes().unwrap();
        assert_eq!(shirt.first(), Some(&36));
        assert_eq!(shirt.last(), Some(&68));
        assert_eq!(shirt.len(), 17);
        assert_eq!(Category::Boots.catalog_sizes().unwrap().len(), 16);
        assert_eq!(
            Category::Beret.catalog_sizes().unwrap(),
            (54..=62).collect::<Vec<_>>()
        );
        assert!(Category::Belt.catalog_sizes().is_none());
    }

    #[test]
    fn partial_wire_object_deserializes_complete() {
        let sizing: SizingRecord = serde_json::from_str(r#"{"camisa":"40","calca":"42"}"#).unwrap();
        assert_eq!(sizing.size(Category::Shirt), "40");
        assert_eq!(sizing.size(Category::Pants), "42");
        assert_eq!(sizing.size(Category::Belt), "");
    }

    #[test]
    fn off_catalog_reports_only_catalog_categories() {
        let sizing = SizingRecord::default()
            .with_size(Category::Shirt, "41")
            .with_size(Category::Pants, "40")
            .with_size(Category::Jacket, "44")
            .with_size(Category::Boots, "40")
            .with_size(Category::Beret, "57")
            .with_size(Category::Belt, "anything");
        assert_eq!(sizing.off_catalog(), vec![Category::Shirt]);
    }
}
