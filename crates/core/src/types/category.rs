//! Product categories.

use serde::{Deserialize, Serialize};

/// Catalog category.
///
/// The storefront navigation is built from this closed set; the wire form is
/// the capitalized variant name (`"Shoes"`, `"Tees"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Shoes,
    Tees,
    Bags,
    Pants,
    Other,
}

impl Category {
    /// All categories, in storefront navigation order.
    pub const ALL: [Self; 5] = [Self::Shoes, Self::Tees, Self::Bags, Self::Pants, Self::Other];
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Shoes => write!(f, "Shoes"),
            Self::Tees => write!(f, "Tees"),
            Self::Bags => write!(f, "Bags"),
            Self::Pants => write!(f, "Pants"),
            Self::Other => write!(f, "Other"),
        }
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Shoes" => Ok(Self::Shoes),
            "Tees" => Ok(Self::Tees),
            "Bags" => Ok(Self::Bags),
            "Pants" => Ok(Self::Pants),
            "Other" => Ok(Self::Other),
            _ => Err(format!("invalid category: {s}")),
        }
    }
}
