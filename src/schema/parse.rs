//! Sanitization and parsing of generation backend output.
//!
//! The prompt asks for raw JSON, but the backend is not contractually
//! structured output: responses arrive wrapped in markdown fences or
//! surrounded by prose often enough that the parser assumes nothing.

use thiserror::Error;

use super::{Bill, BillCategory, ItemCategory, SchemaVariant};

#[derive(Error, Debug)]
pub enum ParseError {
    /// The sanitized response is not syntactically valid JSON.
    #[error("Model response is not valid JSON: {message}")]
    Malformed { message: String },

    /// The response parsed but does not match the bill schema.
    #[error("Model response does not match the bill schema: {message}")]
    SchemaValidation { message: String },
}

/// Strip markdown fences and any prose around the JSON payload.
///
/// Interior content is never altered: only a leading fence marker (with an
/// optional language tag), a trailing fence marker, and text outside the
/// outermost `{`/`[` ... `}`/`]` span are discarded.
pub fn sanitize(raw: &str) -> &str {
    let mut text = raw.trim();

    if let Some(rest) = text.strip_prefix("```") {
        text = match rest.split_once('\n') {
            Some((_tag, body)) => body,
            None => rest,
        };
    }
    if let Some(rest) = text.strip_suffix("```") {
        text = rest;
    }
    let text = text.trim();

    extract_json_span(text).unwrap_or(text)
}

fn extract_json_span(text: &str) -> Option<&str> {
    let (open, close) = match (text.find('{'), text.find('[')) {
        (Some(obj), Some(arr)) if arr < obj => (arr, ']'),
        (Some(obj), _) => (obj, '}'),
        (None, Some(arr)) => (arr, ']'),
        (None, None) => return None,
    };
    let end = text.rfind(close)?;
    if end < open {
        return None;
    }
    Some(&text[open..=end])
}

/// Parse a generation backend response into a [`Bill`].
///
/// Syntax failures and shape failures are reported separately; a missing
/// required field (`products`, or `name`/`totalPrice` on a product) is a
/// schema failure, while unknown extra fields are ignored and unknown
/// category strings coerce to the catch-all member.
pub fn parse_bill(raw: &str, variant: SchemaVariant) -> Result<Bill, ParseError> {
    let cleaned = sanitize(raw);

    let value: serde_json::Value =
        serde_json::from_str(cleaned).map_err(|e| ParseError::Malformed {
            message: e.to_string(),
        })?;

    let mut bill: Bill =
        serde_json::from_value(value).map_err(|e| ParseError::SchemaValidation {
            message: e.to_string(),
        })?;

    normalize(&mut bill, variant);
    Ok(bill)
}

/// Enforce the variant's category placement after a successful parse.
fn normalize(bill: &mut Bill, variant: SchemaVariant) {
    match variant {
        SchemaVariant::ItemCategories => {
            bill.category = None;
            for product in &mut bill.products {
                if product.category.is_none() {
                    product.category = Some(ItemCategory::Unknown);
                }
            }
        }
        SchemaVariant::BillCategories => {
            if bill.category.is_none() {
                bill.category = Some(BillCategory::Unknown);
            }
            for product in &mut bill.products {
                product.category = None;
            }
        }
    }
}
