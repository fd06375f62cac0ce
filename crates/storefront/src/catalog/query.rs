//! Search, filter and sort over catalog products.

use std::cmp::Ordering;

use mrseafarm_core::Product;

/// Ordering applied to a product listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProductSort {
    /// Newest first.
    #[default]
    Latest,
    /// Oldest first.
    Oldest,
    /// Title ascending.
    AToZ,
    /// Title descending.
    ZToA,
}

impl std::fmt::Display for ProductSort {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Latest => write!(f, "latest"),
            Self::Oldest => write!(f, "oldest"),
            Self::AToZ => write!(f, "a-z"),
            Self::ZToA => write!(f, "z-a"),
        }
    }
}

impl std::str::FromStr for ProductSort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "latest" => Ok(Self::Latest),
            "oldest" => Ok(Self::Oldest),
            "a-z" => Ok(Self::AToZ),
            "z-a" => Ok(Self::ZToA),
            _ => Err(format!("invalid sort order: {s} (expected latest, oldest, a-z or z-a)")),
        }
    }
}

/// Admin listing criteria.
///
/// Blank `search` or `category` means "no filter".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductQuery {
    /// Case-insensitive substring matched against title and description.
    pub search: Option<String>,
    /// Exact category label.
    pub category: Option<String>,
    pub sort: ProductSort,
}

impl ProductQuery {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    #[must_use]
    pub const fn sorted_by(mut self, sort: ProductSort) -> Self {
        self.sort = sort;
        self
    }

    /// Whether `product` passes the search and category filters.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        let search_ok = match self.search.as_deref().map(str::trim) {
            Some(term) if !term.is_empty() => {
                let term = term.to_lowercase();
                product.title.to_lowercase().contains(&term)
                    || product.description.to_lowercase().contains(&term)
            }
            _ => true,
        };

        let category_ok = match self.category.as_deref() {
            Some(category) if !category.is_empty() => product.category == category,
            _ => true,
        };

        search_ok && category_ok
    }

    /// Filter and sort `products`. Sorting is stable.
    #[must_use]
    pub fn apply<'a, I>(&self, products: I) -> Vec<&'a Product>
    where
        I: IntoIterator<Item = &'a Product>,
    {
        let mut listed: Vec<&Product> = products.into_iter().filter(|p| self.matches(p)).collect();
        match self.sort {
            ProductSort::Latest => listed.sort_by(|a, b| by_listed_at(a, b, true)),
            ProductSort::Oldest => listed.sort_by(|a, b| by_listed_at(a, b, false)),
            ProductSort::AToZ => listed.sort_by(|a, b| by_title(a, b)),
            ProductSort::ZToA => listed.sort_by(|a, b| by_title(b, a)),
        }
        listed
    }
}

/// Products without any timestamp go last in both directions.
fn by_listed_at(a: &Product, b: &Product, newest_first: bool) -> Ordering {
    match (a.listed_at(), b.listed_at()) {
        (Some(x), Some(y)) if newest_first => y.cmp(&x),
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn by_title(a: &Product, b: &Product) -> Ordering {
    a.title
        .to_lowercase()
        .cmp(&b.title.to_lowercase())
        .then_with(|| a.title.cmp(&b.title))
}
