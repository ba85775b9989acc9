use wordkeeper_core::{Category, Word};

#[test]
fn word_serialization_uses_entity_field_names() {
    let word = Word::new(42, "book", "книга", "Nouns");

    let json = serde_json::to_value(&word).unwrap();
    assert_eq!(json["id"], 42);
    assert_eq!(json["name"], "book");
    assert_eq!(json["translation"], "книга");
    assert_eq!(json["category"], "Nouns");

    let decoded: Word = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, word);
}

#[test]
fn category_serialization_uses_entity_field_names() {
    let json = serde_json::json!({ "id": 3, "name": "Food" });
    let category: Category = serde_json::from_value(json).unwrap();
    assert_eq!(category, Category::new(3, "Food"));
}

#[test]
fn word_category_is_plain_text_reference() {
    let category = Category::new(1, "Verbs");
    let word = Word::new(1, "run", "бежать", category.name.clone());
    assert!(word.belongs_to(&category.name));

    let renamed = Category::new(category.id, "Actions");
    assert!(!word.belongs_to(&renamed.name));
}
