use clap::ValueEnum;
use romaneio_protocol::{Category, Gender};
use romaneio_report::ReportKind;

#[derive(Copy, Clone, Debug, ValueEnum)]
pub(crate) enum GenderFlag {
    #[value(name = "masculino", alias = "m")]
    Masculine,
    #[value(name = "feminino", alias = "f")]
    Feminine,
}

impl GenderFlag {
    pub(crate) const fn as_domain(self) -> Gender {
        match self {
            GenderFlag::Masculine => Gender::Masculine,
            GenderFlag::Feminine => Gender::Feminine,
        }
    }
}

#[derive(Copy, Clone, Debug, ValueEnum)]
pub(crate) enum DocumentFlag {
    /// Aggregated tallies
    Normal,
    /// One block per person
    Detailed,
}

impl DocumentFlag {
    pub(crate) const fn as_domain(self) -> ReportKind {
        match self {
            DocumentFlag::Normal => ReportKind::Summary,
            DocumentFlag::Detailed => ReportKind::Detailed,
        }
    }
}

#[derive(Copy, Clone, Debug, ValueEnum)]
pub(crate) enum CategoryFlag {
    Shirt,
    Pants,
    Tshirt,
    Jacket,
    Boots,
    Beret,
    Insignia,
    Belt,
}

impl CategoryFlag {
    pub(crate) const fn as_domain(self) -> Category {
        match self {
            CategoryFlag::Shirt => Category::Shirt,
            CategoryFlag::Pants => Category::Pants,
            CategoryFlag::Tshirt => Category::TShirt,
            CategoryFlag::Jacket => Category::Jacket,
            CategoryFlag::Boots => Category::Boots,
            CategoryFlag::Beret => Category::Beret,
            CategoryFlag::Insignia => Category::BeretInsignia,
            CategoryFlag::Belt => Category::Belt,
        }
    }
}
