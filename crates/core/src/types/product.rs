//! Product records and the admin product form.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::price::Price;

/// Unit assumed when a product has a pack size but no unit.
pub const DEFAULT_UNIT: &str = "litre";

/// A catalog product.
///
/// Field names follow the catalog's JSON shape (`desc`, `imageUrl`,
/// `quantity`, ...). The cart only relies on `id` and `price`; everything
/// else is carried along as part of the snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Catalog key.
    pub id: ProductId,
    /// Display name.
    #[serde(default)]
    pub title: String,
    /// Price as entered by the admin.
    #[serde(default)]
    pub price: Price,
    /// Long description.
    #[serde(default, rename = "desc")]
    pub description: String,
    /// Category label (e.g. "Milk", "Poultry").
    #[serde(default)]
    pub category: String,
    /// Hosted image URL, empty when none was uploaded.
    #[serde(default)]
    pub image_url: String,
    /// Units in stock.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<u32>,
    /// Pack size descriptor, e.g. "500" for 500 ml.
    #[serde(default, rename = "quantity", skip_serializing_if = "Option::is_none")]
    pub pack_size: Option<String>,
    /// Unit of the pack size.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    /// Shown on the home page.
    #[serde(default)]
    pub featured: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Product {
    /// Create a bare product with just an identifier, title and price.
    #[must_use]
    pub fn new(id: ProductId, title: impl Into<String>, price: impl Into<Price>) -> Self {
        Self {
            id,
            title: title.into(),
            price: price.into(),
            description: String::new(),
            category: String::new(),
            image_url: String::new(),
            stock: None,
            pack_size: None,
            unit: None,
            featured: false,
            created_at: None,
            updated_at: None,
        }
    }

    /// Build a new catalog record from a validated draft.
    ///
    /// Both timestamps are set to `now`.
    ///
    /// # Errors
    ///
    /// Returns the draft's validation error if required fields are missing.
    pub fn from_draft(
        id: ProductId,
        draft: &ProductDraft,
        now: DateTime<Utc>,
    ) -> Result<Self, ProductDraftError> {
        draft.validate(false)?;
        let mut product = Self::new(id, "", Price::default());
        product.fill_from(draft);
        product.created_at = Some(now);
        product.updated_at = Some(now);
        Ok(product)
    }

    /// Overwrite this record with an edited draft.
    ///
    /// `created_at` is kept; `updated_at` becomes `now`.
    ///
    /// # Errors
    ///
    /// Returns the draft's validation error. Edits additionally require an
    /// image, either from the draft or already on the record.
    pub fn apply_draft(
        &mut self,
        draft: &ProductDraft,
        now: DateTime<Utc>,
    ) -> Result<(), ProductDraftError> {
        let has_image = !self.image_url.is_empty() || draft.has_image();
        draft.validate(!has_image)?;

        let image_url = std::mem::take(&mut self.image_url);
        self.fill_from(draft);
        if self.image_url.is_empty() {
            self.image_url = image_url;
        }
        self.updated_at = Some(now);
        Ok(())
    }

    /// Unit to display next to the pack size.
    #[must_use]
    pub fn unit_or_default(&self) -> &str {
        self.unit.as_deref().unwrap_or(DEFAULT_UNIT)
    }

    /// Timestamp used for recency ordering: creation time, else last update.
    #[must_use]
    pub fn listed_at(&self) -> Option<DateTime<Utc>> {
        self.created_at.or(self.updated_at)
    }

    fn fill_from(&mut self, draft: &ProductDraft) {
        self.title = draft.title.trim().to_owned();
        self.price = Price::Text(draft.price.trim().to_owned());
        self.description = draft.description.trim().to_owned();
        self.category = draft.category.trim().to_owned();
        self.image_url = draft.image_url.clone().unwrap_or_default();
        self.stock = Some(draft.stock.as_deref().map_or(0, leading_integer));
        self.pack_size = draft
            .pack_size
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_owned);
        self.unit = Some(
            draft
                .unit
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .unwrap_or(DEFAULT_UNIT)
                .to_owned(),
        );
        self.featured = draft.featured;
    }
}

/// Leading unsigned integer of a form value, `0` when there is none.
fn leading_integer(s: &str) -> u32 {
    let trimmed = s.trim_start();
    let digits = trimmed.bytes().take_while(u8::is_ascii_digit).count();
    trimmed
        .get(..digits)
        .and_then(|d| d.parse().ok())
        .unwrap_or(0)
}

/// Errors from validating a [`ProductDraft`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ProductDraftError {
    /// One or more required fields are blank.
    #[error("missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),
    /// Edited products must keep an image.
    #[error("an image is required for this product")]
    MissingImage,
}

/// The admin product form, before it becomes a catalog record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDraft {
    pub title: String,
    pub price: String,
    pub description: String,
    pub category: String,
    pub image_url: Option<String>,
    pub stock: Option<String>,
    pub pack_size: Option<String>,
    pub unit: Option<String>,
    pub featured: bool,
}

impl ProductDraft {
    /// Check required fields.
    ///
    /// # Errors
    ///
    /// [`ProductDraftError::MissingFields`] lists every blank required field;
    /// [`ProductDraftError::MissingImage`] is returned when `require_image`
    /// is set and the draft carries no image.
    pub fn validate(&self, require_image: bool) -> Result<(), ProductDraftError> {
        let missing: Vec<&'static str> = [
            ("title", &self.title),
            ("price", &self.price),
            ("description", &self.description),
            ("category", &self.category),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect();

        if !missing.is_empty() {
            return Err(ProductDraftError::MissingFields(missing));
        }
        if require_image && !self.has_image() {
            return Err(ProductDraftError::MissingImage);
        }
        Ok(())
    }

    fn has_image(&self) -> bool {
        self.image_url.as_deref().is_some_and(|url| !url.trim().is_empty())
    }
}
