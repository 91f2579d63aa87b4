use billscan::schema::{parse_bill, ItemCategory, ParseError, SchemaVariant};

const ITEM: SchemaVariant = SchemaVariant::ItemCategories;
const BILL: SchemaVariant = SchemaVariant::BillCategories;

#[test]
fn fenced_and_bare_json_parse_identically() {
    let bare = parse_bill(r#"{"products":[]}"#, ITEM).unwrap();
    let fenced = parse_bill("```json\n{\"products\":[]}\n```", ITEM).unwrap();
    let untagged_fence = parse_bill("```\n{\"products\":[]}\n```", ITEM).unwrap();

    assert_eq!(bare, fenced);
    assert_eq!(bare, untagged_fence);
    assert!(bare.products.is_empty());
}

#[test]
fn prose_around_the_json_is_discarded() {
    let raw = "Here is the bill you asked for:\n{\"products\":[{\"name\":\"Coffee\",\"totalPrice\":3.5,\"category\":\"SOFT_DRINK\"}]}\nHope this helps!";
    let bill = parse_bill(raw, ITEM).unwrap();

    assert_eq!(bill.products.len(), 1);
    assert_eq!(bill.products[0].name, "Coffee");
    assert_eq!(bill.products[0].category, Some(ItemCategory::SoftDrink));
}

#[test]
fn interior_content_is_never_altered() {
    let raw = r#"{"products":[{"name":"weird ``` name","totalPrice":1.0,"category":"MEAL"}]}"#;
    let bill = parse_bill(raw, ITEM).unwrap();

    assert_eq!(bill.products[0].name, "weird ``` name");
}

#[test]
fn unknown_category_coerces_to_catch_all() {
    let raw = r#"{"products":[{"name":"Thing","totalPrice":10,"category":"SPACESHIP"}]}"#;
    let bill = parse_bill(raw, ITEM).unwrap();

    assert_eq!(bill.products[0].category, Some(ItemCategory::Unknown));
}

#[test]
fn unknown_extra_fields_are_ignored() {
    let raw = r#"{"products":[],"confidence":0.93,"reasoning":"looked at the totals"}"#;
    assert!(parse_bill(raw, ITEM).is_ok());
}

#[test]
fn product_missing_name_is_a_schema_failure() {
    let raw = r#"{"products":[{"totalPrice":10}]}"#;
    let err = parse_bill(raw, ITEM).unwrap_err();

    assert!(matches!(err, ParseError::SchemaValidation { .. }));
}

#[test]
fn missing_products_is_a_schema_failure() {
    let raw = r#"{"establishment":"Cafe"}"#;
    let err = parse_bill(raw, ITEM).unwrap_err();

    assert!(matches!(err, ParseError::SchemaValidation { .. }));
}

#[test]
fn non_json_output_is_malformed() {
    let err = parse_bill("I could not read the receipt, sorry.", ITEM).unwrap_err();
    assert!(matches!(err, ParseError::Malformed { .. }));
}

#[test]
fn truncated_json_is_malformed() {
    let err = parse_bill(r#"{"products":[{"name":"Cof"#, ITEM).unwrap_err();
    assert!(matches!(err, ParseError::Malformed { .. }));
}

#[test]
fn numeric_strings_coerce_to_numbers() {
    let raw = r#"{"products":[{"name":"Beans","totalPrice":"12.50","unitPrice":"12,50","category":"GROCERIES_SUPERMARKET"}],"totalBill":"12.50"}"#;
    let bill = parse_bill(raw, ITEM).unwrap();

    assert_eq!(bill.products[0].total_price, 12.5);
    assert_eq!(bill.products[0].unit_price, Some(12.5));
    assert_eq!(bill.total_bill, Some(12.5));
}

#[test]
fn non_numeric_optional_amounts_become_absent() {
    let raw = r#"{"products":[{"name":"Beans","totalPrice":5,"quantity":"a few","category":"MEAL"}],"vatAmount":"n/a"}"#;
    let bill = parse_bill(raw, ITEM).unwrap();

    assert_eq!(bill.products[0].quantity, None);
    assert_eq!(bill.vat_amount, None);
}

#[test]
fn non_numeric_required_amount_is_a_schema_failure() {
    let raw = r#"{"products":[{"name":"Beans","totalPrice":"free","category":"MEAL"}]}"#;
    let err = parse_bill(raw, ITEM).unwrap_err();

    assert!(matches!(err, ParseError::SchemaValidation { .. }));
}

#[test]
fn item_variant_fills_missing_product_categories() {
    let raw = r#"{"products":[{"name":"Mystery","totalPrice":2}],"category":"RESTAURANT"}"#;
    let bill = parse_bill(raw, ITEM).unwrap();

    assert_eq!(bill.products[0].category, Some(ItemCategory::Unknown));
    // Bill-level category does not belong to this variant.
    assert_eq!(bill.category, None);
}

#[test]
fn bill_variant_drops_product_categories_and_fills_bill_category() {
    use billscan::schema::BillCategory;

    let raw = r#"{"products":[{"name":"Steak","totalPrice":30,"category":"MEAL"}]}"#;
    let bill = parse_bill(raw, BILL).unwrap();

    assert_eq!(bill.products[0].category, None);
    assert_eq!(bill.category, Some(BillCategory::Unknown));
}

#[test]
fn bill_variant_keeps_known_bill_category() {
    use billscan::schema::BillCategory;

    let raw = r#"{"products":[],"category":"BAR_PUB"}"#;
    let bill = parse_bill(raw, BILL).unwrap();

    assert_eq!(bill.category, Some(BillCategory::BarPub));
}

#[test]
fn full_bill_round_trips_through_the_wire_shape() {
    let raw = r#"{
        "establishment": "Cantina do Porto",
        "address": "Rua das Flores 12",
        "date": "2024-11-02",
        "time": "13:45:00",
        "products": [
            {"name": "Feijoada", "unitPrice": 18.0, "quantity": 2, "totalPrice": 36.0, "category": "MEAL"},
            {"name": "Service charge", "totalPrice": 3.6, "category": "SERVICE"}
        ],
        "totalBill": 39.6,
        "vatAmount": 2.3
    }"#;
    let bill = parse_bill(raw, ITEM).unwrap();

    assert_eq!(bill.establishment.as_deref(), Some("Cantina do Porto"));
    assert_eq!(bill.date.as_deref(), Some("2024-11-02"));
    assert_eq!(bill.time.as_deref(), Some("13:45:00"));
    assert_eq!(bill.products.len(), 2);
    assert_eq!(bill.products[1].category, Some(ItemCategory::Service));
    assert_eq!(bill.total_bill, Some(39.6));

    // Serialization uses the same camelCase wire names.
    let json = serde_json::to_value(&bill).unwrap();
    assert_eq!(json["products"][0]["unitPrice"], 18.0);
    assert_eq!(json["vatAmount"], 2.3);
    assert_eq!(json["products"][1]["category"], "SERVICE");
}
