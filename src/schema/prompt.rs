//! Prompt construction for the generation backend.
//!
//! Pure string assembly, deterministic for identical inputs. The prompt
//! embeds the full schema contract for the active variant so the model
//! never has to guess field names, formats, or category members.

use super::{BillCategory, ItemCategory, SchemaVariant};

const TEXT_START: &str = "--- RECEIPT TEXT START ---";
const TEXT_END: &str = "--- RECEIPT TEXT END ---";

/// Build the instruction prompt that translates recognized receipt text
/// into a bill matching the given schema variant.
pub fn build_prompt(text: &str, variant: SchemaVariant) -> String {
    let mut prompt = String::with_capacity(2048 + text.len());

    prompt.push_str(
        "You are an expert at reading purchase receipts. The text between the \
         delimiters below was produced by optical character recognition of a \
         receipt photograph. Translate it into a single JSON object describing \
         the bill.\n\n",
    );

    prompt.push_str("STRICT RULES:\n");
    prompt.push_str("1. Use ONLY information present in the receipt text - never invent data\n");
    prompt.push_str("2. Omit any optional field you cannot determine - never use null placeholders like \"Unknown\"\n");
    prompt.push_str("3. Dates use the format YYYY-MM-DD and times use the format HH:MM:SS\n");
    prompt.push_str("4. Every category value MUST be one of the members listed below\n");
    match variant {
        SchemaVariant::ItemCategories => {
            prompt.push_str(
                "5. Tax and service charges that appear on the receipt MUST become \
                 separate line items in \"products\" (categories TAX and SERVICE), \
                 never folded into \"totalBill\"\n",
            );
            prompt.push_str("6. Respond with nothing but raw JSON - no prose, no markdown fences, no comments\n\n");
        }
        SchemaVariant::BillCategories => {
            prompt.push_str("5. Respond with nothing but raw JSON - no prose, no markdown fences, no comments\n\n");
        }
    }

    prompt.push_str("The JSON object must have exactly this shape:\n");
    prompt.push_str(schema_contract(variant));
    prompt.push_str("\nValid category members: ");
    let members = match variant {
        SchemaVariant::ItemCategories => ItemCategory::members(),
        SchemaVariant::BillCategories => BillCategory::members(),
    };
    prompt.push_str(&members.join(", "));
    prompt.push_str("\n\n");

    prompt.push_str(TEXT_START);
    prompt.push('\n');
    prompt.push_str(text);
    prompt.push('\n');
    prompt.push_str(TEXT_END);
    prompt.push('\n');

    prompt
}

fn schema_contract(variant: SchemaVariant) -> &'static str {
    match variant {
        SchemaVariant::ItemCategories => {
            r#"{
  "establishment": string (optional),
  "address": string (optional),
  "date": string, format YYYY-MM-DD (optional),
  "time": string, format HH:MM:SS (optional),
  "products": [
    {
      "name": string (required),
      "unitPrice": number (optional),
      "quantity": number (optional),
      "totalPrice": number (required),
      "category": string, one of the category members (required)
    }
  ],
  "totalBill": number (optional),
  "vatAmount": number (optional)
}
"#
        }
        SchemaVariant::BillCategories => {
            r#"{
  "establishment": string (optional),
  "address": string (optional),
  "date": string, format YYYY-MM-DD (optional),
  "time": string, format HH:MM:SS (optional),
  "products": [
    {
      "name": string (required),
      "unitPrice": number (optional),
      "quantity": number (optional),
      "totalPrice": number (required)
    }
  ],
  "totalBill": number (optional),
  "vatAmount": number (optional),
  "category": string, one of the category members (required)
}
"#
        }
    }
}
