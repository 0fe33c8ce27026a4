//! Spending categories
//!
//! Categories form a closed, versioned set. Free-text names from onboarding
//! answers or imported history are normalized and resolved through an alias
//! table; anything unrecognised lands in [`Category::Other`] so no money is
//! silently dropped.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Version of the closed category set. Bump when variants or aliases change.
pub const CATEGORY_SET_VERSION: u32 = 1;

/// A spending category
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Rent,
    Utilities,
    Insurance,
    Loans,
    Phone,
    Internet,
    Subscriptions,
    Childcare,
    Education,
    Groceries,
    DiningOut,
    Coffee,
    Transport,
    Entertainment,
    Clothing,
    Travel,
    Health,
    PersonalCare,
    Gifts,
    Hobbies,
    Other,
}

impl Category {
    /// All categories in set order
    pub fn all() -> &'static [Category] {
        &[
            Category::Rent,
            Category::Utilities,
            Category::Insurance,
            Category::Loans,
            Category::Phone,
            Category::Internet,
            Category::Subscriptions,
            Category::Childcare,
            Category::Education,
            Category::Groceries,
            Category::DiningOut,
            Category::Coffee,
            Category::Transport,
            Category::Entertainment,
            Category::Clothing,
            Category::Travel,
            Category::Health,
            Category::PersonalCare,
            Category::Gifts,
            Category::Hobbies,
            Category::Other,
        ]
    }

    /// Canonical snake_case key
    pub fn key(&self) -> &'static str {
        match self {
            Category::Rent => "rent",
            Category::Utilities => "utilities",
            Category::Insurance => "insurance",
            Category::Loans => "loans",
            Category::Phone => "phone",
            Category::Internet => "internet",
            Category::Subscriptions => "subscriptions",
            Category::Childcare => "childcare",
            Category::Education => "education",
            Category::Groceries => "groceries",
            Category::DiningOut => "dining_out",
            Category::Coffee => "coffee",
            Category::Transport => "transport",
            Category::Entertainment => "entertainment",
            Category::Clothing => "clothing",
            Category::Travel => "travel",
            Category::Health => "health",
            Category::PersonalCare => "personal_care",
            Category::Gifts => "gifts",
            Category::Hobbies => "hobbies",
            Category::Other => "other",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Category::Rent => "Rent",
            Category::Utilities => "Utilities",
            Category::Insurance => "Insurance",
            Category::Loans => "Loans",
            Category::Phone => "Phone",
            Category::Internet => "Internet",
            Category::Subscriptions => "Subscriptions",
            Category::Childcare => "Childcare",
            Category::Education => "Education",
            Category::Groceries => "Groceries",
            Category::DiningOut => "Dining Out",
            Category::Coffee => "Coffee",
            Category::Transport => "Transport",
            Category::Entertainment => "Entertainment",
            Category::Clothing => "Clothing",
            Category::Travel => "Travel",
            Category::Health => "Health",
            Category::PersonalCare => "Personal Care",
            Category::Gifts => "Gifts",
            Category::Hobbies => "Hobbies",
            Category::Other => "Other",
        }
    }

    /// Resolve a free-text name to a known category.
    ///
    /// Returns `None` when the name is not in the set or its aliases.
    pub fn lookup(name: &str) -> Option<Category> {
        let normalized = normalize(name);
        let category = match normalized.as_str() {
            "rent" | "mortgage" | "housing" => Category::Rent,
            "utilities" | "electric" | "electricity" | "water" | "gas_bill" => Category::Utilities,
            "insurance" => Category::Insurance,
            "loans" | "loan" | "debt" | "student_loan" | "car_payment" => Category::Loans,
            "phone" | "mobile" => Category::Phone,
            "internet" | "broadband" => Category::Internet,
            "subscriptions" | "subscription" | "streaming" => Category::Subscriptions,
            "childcare" | "daycare" => Category::Childcare,
            "education" | "tuition" => Category::Education,
            "groceries" | "grocery" | "supermarket" => Category::Groceries,
            "dining_out" | "dining" | "restaurants" | "restaurant" | "eating_out" | "takeout" => {
                Category::DiningOut
            }
            "coffee" | "cafe" | "coffee_shops" => Category::Coffee,
            "transport" | "transportation" | "fuel" | "gas" | "transit" | "commute" => {
                Category::Transport
            }
            "entertainment" | "movies" | "events" => Category::Entertainment,
            "clothing" | "clothes" | "apparel" | "shopping" => Category::Clothing,
            "travel" | "vacation" | "trips" => Category::Travel,
            "health" | "medical" | "healthcare" | "pharmacy" => Category::Health,
            "personal_care" | "beauty" | "haircut" => Category::PersonalCare,
            "gifts" | "gift" | "donations" => Category::Gifts,
            "hobbies" | "hobby" | "sports" => Category::Hobbies,
            "other" | "misc" | "miscellaneous" => Category::Other,
            _ => return None,
        };
        Some(category)
    }

    /// Resolve a free-text name, falling back to [`Category::Other`]
    pub fn from_name(name: &str) -> Category {
        match Self::lookup(name) {
            Some(category) => category,
            None => {
                tracing::warn!(name, "unknown category, filing under 'other'");
                Category::Other
            }
        }
    }
}

/// Lowercase, trim, and fold spaces and hyphens into underscores
fn normalize(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut last_was_sep = false;
    for c in name.trim().chars() {
        if c == ' ' || c == '-' || c == '_' || c == '/' {
            if !last_was_sep && !out.is_empty() {
                out.push('_');
            }
            last_was_sep = true;
        } else {
            out.extend(c.to_lowercase());
            last_was_sep = false;
        }
    }
    while out.ends_with('_') {
        out.pop();
    }
    out
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::lookup(s).ok_or_else(|| format!("Unknown category: {}", s))
    }
}

/// Whether a category's money is anchored (fixed) or spread (discretionary)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryKind {
    Fixed,
    Discretionary,
}
