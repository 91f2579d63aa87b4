//! Bill schema definitions.
//!
//! Two generations of the bill schema exist: an item-level one where every
//! product carries its own category, and a bill-level one with a single
//! coarse category on the bill itself. Both are served by the same types;
//! [`SchemaVariant`] selects which rules the prompt builder and the parser
//! apply, so the two can never drift apart.

pub mod parse;
pub mod prompt;

pub use parse::{parse_bill, sanitize, ParseError};
pub use prompt::build_prompt;

use serde::{Deserialize, Serialize};

/// Selects which bill schema generation is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SchemaVariant {
    /// Fine-grained category per product.
    #[serde(rename = "item")]
    ItemCategories,
    /// Single coarse category on the bill; products carry none.
    #[serde(rename = "bill")]
    BillCategories,
}

/// Structured representation of a purchase receipt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub establishment: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    /// Calendar date, `YYYY-MM-DD`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    /// Time of day, `HH:MM:SS`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,

    pub products: Vec<Product>,

    #[serde(
        default,
        deserialize_with = "lenient_f64::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub total_bill: Option<f64>,

    #[serde(
        default,
        deserialize_with = "lenient_f64::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub vat_amount: Option<f64>,

    /// Bill-level category. Populated only under [`SchemaVariant::BillCategories`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<BillCategory>,
}

/// One line item on a receipt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub name: String,

    #[serde(
        default,
        deserialize_with = "lenient_f64::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub unit_price: Option<f64>,

    #[serde(
        default,
        deserialize_with = "lenient_f64::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub quantity: Option<f64>,

    #[serde(deserialize_with = "lenient_f64::required")]
    pub total_price: f64,

    /// Item-level category. Populated only under [`SchemaVariant::ItemCategories`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<ItemCategory>,
}

/// Item-level expense categories.
///
/// The generation backend is instructed to stay inside this set but is not
/// contractually bound to; any unrecognized value deserializes to `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ItemCategory {
    Meal,
    FastFood,
    PizzaPasta,
    OrientalCuisine,
    Dessert,
    Tax,
    Service,
    SoftDrink,
    AlcoholicDrink,
    GroceriesSupermarket,
    RetailShopping,
    OnlinePurchase,
    Gift,
    Flight,
    Transport,
    Accommodation,
    UtilitiesHome,
    Tech,
    HealthMedical,
    EntertainmentLeisure,
    Education,
    Miscellaneous,
    #[serde(other)]
    Unknown,
}

impl ItemCategory {
    /// Wire names of every member, in declaration order.
    pub fn members() -> &'static [&'static str] {
        &[
            "MEAL",
            "FAST_FOOD",
            "PIZZA_PASTA",
            "ORIENTAL_CUISINE",
            "DESSERT",
            "TAX",
            "SERVICE",
            "SOFT_DRINK",
            "ALCOHOLIC_DRINK",
            "GROCERIES_SUPERMARKET",
            "RETAIL_SHOPPING",
            "ONLINE_PURCHASE",
            "GIFT",
            "FLIGHT",
            "TRANSPORT",
            "ACCOMMODATION",
            "UTILITIES_HOME",
            "TECH",
            "HEALTH_MEDICAL",
            "ENTERTAINMENT_LEISURE",
            "EDUCATION",
            "MISCELLANEOUS",
            "UNKNOWN",
        ]
    }
}

/// Bill-level expense categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BillCategory {
    Restaurant,
    BarPub,
    GroceriesSupermarket,
    RetailShopping,
    OnlinePurchase,
    FlightTicket,
    Transport,
    Accommodation,
    UtilitiesHome,
    HealthMedical,
    Services,
    EntertainmentLeisure,
    Education,
    Miscellaneous,
    #[serde(other)]
    Unknown,
}

impl BillCategory {
    /// Wire names of every member, in declaration order.
    pub fn members() -> &'static [&'static str] {
        &[
            "RESTAURANT",
            "BAR_PUB",
            "GROCERIES_SUPERMARKET",
            "RETAIL_SHOPPING",
            "ONLINE_PURCHASE",
            "FLIGHT_TICKET",
            "TRANSPORT",
            "ACCOMMODATION",
            "UTILITIES_HOME",
            "HEALTH_MEDICAL",
            "SERVICES",
            "ENTERTAINMENT_LEISURE",
            "EDUCATION",
            "MISCELLANEOUS",
            "UNKNOWN",
        ]
    }
}

/// Amount fields tolerate JSON strings: `"12.50"` (or `"12,50"`) coerces to
/// a number. Optional fields treat anything non-numeric as absent; required
/// fields fail deserialization instead.
mod lenient_f64 {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    fn coerce(value: &Value) -> Option<f64> {
        match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => {
                let trimmed = s.trim();
                trimmed
                    .parse::<f64>()
                    .ok()
                    .or_else(|| trimmed.replace(',', ".").parse::<f64>().ok())
            }
            _ => None,
        }
    }

    pub fn optional<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(value.as_ref().and_then(coerce))
    }

    pub fn required<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        coerce(&value)
            .ok_or_else(|| D::Error::custom(format!("expected a numeric amount, got {value}")))
    }
}
