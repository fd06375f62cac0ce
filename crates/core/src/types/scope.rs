//! Cart scopes.
//!
//! The storefront runs two independent carts with identical semantics: the
//! customer-facing one and the one inside the admin panel. Each has its own
//! storage key and they never see each other's state.

use serde::{Deserialize, Serialize};

/// Which cart a store instance serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CartScope {
    /// The public site cart.
    Customer,
    /// The cart inside the admin panel.
    Admin,
}

/// What `clear()` leaves in durable storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearPolicy {
    /// Overwrite the record with an empty cart.
    PersistEmpty,
    /// Delete the record entirely.
    RemoveRecord,
}

impl CartScope {
    /// Storage key holding this scope's serialized cart.
    ///
    /// The key names match the ones the browser storefront used, but the
    /// record layout does not: lines are stored as `{"product": {..},
    /// "quantity": n}` rather than a flat product object carrying a
    /// `quantity` field. Flat records fail to parse and hydrate as an empty
    /// cart; there is no migration.
    #[must_use]
    pub const fn storage_key(self) -> &'static str {
        match self {
            Self::Customer => "websiteCart",
            Self::Admin => "adminCart",
        }
    }

    #[must_use]
    pub const fn clear_policy(self) -> ClearPolicy {
        match self {
            Self::Customer => ClearPolicy::PersistEmpty,
            Self::Admin => ClearPolicy::RemoveRecord,
        }
    }
}

impl std::fmt::Display for CartScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Customer => write!(f, "customer"),
            Self::Admin => write!(f, "admin"),
        }
    }
}

impl std::str::FromStr for CartScope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "customer" => Ok(Self::Customer),
            "admin" => Ok(Self::Admin),
            _ => Err(format!("invalid cart scope: {s}")),
        }
    }
}
