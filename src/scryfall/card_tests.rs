//! Tests for raw card normalization

use crate::scryfall::card::ScryfallCard;

/// Parse a card from a JSON object, filling in required identity fields
/// so individual tests only spell out what they exercise.
fn card_from(json: &str) -> ScryfallCard {
    let mut value: serde_json::Value = serde_json::from_str(json).unwrap();
    let defaults = serde_json::json!({
        "id": "47fee476-25b6-40bb-afa9-d755c9a021a5",
        "oracle_id": "4d2a465e-9ebd-4002-b6cd-e0eab08bad54",
        "lang": "en",
        "name": "Last Stand",
        "set_id": "e4e00913-d08d-4899-86ea-5cf631e09ce0",
        "set": "apc",
        "set_name": "Apocalypse",
        "uri": "https://api.scryfall.com/cards/47fee476-25b6-40bb-afa9-d755c9a021a5",
        "scryfall_uri": "https://scryfall.com/card/apc/107/last-stand"
    });
    let object = value.as_object_mut().unwrap();
    for (key, default) in defaults.as_object().unwrap() {
        object.entry(key.clone()).or_insert(default.clone());
    }
    serde_json::from_value(value).unwrap()
}

#[test]
fn test_unpack_yields_one_set_and_one_printing() {
    let card = card_from(
        r#"{
            "lang": "en",
            "collector_number": "107",
            "colors": ["W", "B"],
            "color_identity": ["W", "B"],
            "rarity": "rare",
            "type_line": "Sorcery",
            "games": ["paper", "mtgo"]
        }"#,
    );

    let (set, printing) = card.unpack();

    assert_eq!(set.code, "apc");
    assert_eq!(set.name, "Apocalypse");
    assert_eq!(set.scryfall_id, card.set_id);

    assert_eq!(printing.scryfall_id, card.id);
    assert_eq!(printing.oracle_id, card.oracle_id);
    assert_eq!(printing.set_scryfall_id, card.set_id);
    assert_eq!(printing.name, "Last Stand");
    assert_eq!(printing.collector_number, "107");
    assert_eq!(printing.type_line, "Sorcery");
    assert_eq!(printing.rarity.as_deref(), Some("rare"));
    assert_eq!(printing.language, "en");
    assert_eq!(printing.localized_name, None);
}

#[test]
fn test_colors_top_level_are_canonically_sorted() {
    let card = card_from(r#"{"colors": ["W", "U"]}"#);
    let (_, printing) = card.unpack();
    assert_eq!(printing.colors.as_deref(), Some("UW"));
}

#[test]
fn test_colors_combined_across_faces_sorted_and_deduped() {
    let card = card_from(
        r#"{
            "card_faces": [
                {"colors": ["W"]},
                {"colors": ["U", "W"]}
            ]
        }"#,
    );
    let (_, printing) = card.unpack();
    assert_eq!(printing.colors.as_deref(), Some("UW"));
}

#[test]
fn test_colors_top_level_wins_over_faces() {
    let card = card_from(
        r#"{
            "colors": ["R"],
            "card_faces": [
                {"colors": ["W"]},
                {"colors": ["U"]}
            ]
        }"#,
    );
    let (_, printing) = card.unpack();
    assert_eq!(printing.colors.as_deref(), Some("R"));
}

#[test]
fn test_colors_empty_faces_yield_none() {
    let card = card_from(
        r#"{
            "card_faces": [
                {"colors": []},
                {"colors": []}
            ]
        }"#,
    );
    let (_, printing) = card.unpack();
    assert_eq!(printing.colors, None);
}

#[test]
fn test_colors_absent_everywhere_yield_none() {
    let card = card_from(r#"{}"#);
    let (_, printing) = card.unpack();
    assert_eq!(printing.colors, None);
}

#[test]
fn test_color_identity_has_no_face_fallback() {
    let card = card_from(
        r#"{
            "card_faces": [
                {"colors": ["W"]},
                {"colors": ["U"]}
            ]
        }"#,
    );
    let (_, printing) = card.unpack();
    assert_eq!(printing.color_identity, None);
}

#[test]
fn test_color_identity_canonicalized() {
    let card = card_from(r#"{"color_identity": ["W", "U", "B", "R", "G"]}"#);
    let (_, printing) = card.unpack();
    assert_eq!(printing.color_identity.as_deref(), Some("BGRUW"));
}

#[test]
fn test_localized_name_suppressed_in_default_language() {
    let card = card_from(
        r#"{
            "lang": "en",
            "printed_name": "Should Not Appear"
        }"#,
    );
    let (_, printing) = card.unpack();
    assert_eq!(printing.localized_name, None);
}

#[test]
fn test_localized_name_taken_directly_when_present() {
    let card = card_from(
        r#"{
            "lang": "es",
            "printed_name": "Última Resistencia"
        }"#,
    );
    let (_, printing) = card.unpack();
    assert_eq!(printing.localized_name.as_deref(), Some("Última Resistencia"));
}

#[test]
fn test_localized_name_joined_across_faces() {
    let card = card_from(
        r#"{
            "lang": "es",
            "card_faces": [
                {"printed_name": "Jorn, dios del invierno"},
                {"printed_name": "Káldring, la Varaescarcha"}
            ]
        }"#,
    );
    let (_, printing) = card.unpack();
    assert_eq!(
        printing.localized_name.as_deref(),
        Some("Jorn, dios del invierno // Káldring, la Varaescarcha")
    );
}

#[test]
fn test_localized_name_requires_both_faces() {
    let card = card_from(
        r#"{
            "lang": "es",
            "card_faces": [
                {"printed_name": "Jorn, dios del invierno"},
                {"printed_name": ""}
            ]
        }"#,
    );
    let (_, printing) = card.unpack();
    assert_eq!(printing.localized_name, None);

    let card = card_from(
        r#"{
            "lang": "es",
            "card_faces": [
                {"printed_name": ""},
                {"printed_name": "Káldring, la Varaescarcha"}
            ]
        }"#,
    );
    let (_, printing) = card.unpack();
    assert_eq!(printing.localized_name, None);
}

#[test]
fn test_is_syncable_requires_paper() {
    let digital_only = card_from(r#"{"lang": "en", "games": ["mtgo", "arena"]}"#);
    assert!(!digital_only.is_syncable());

    let paper = card_from(r#"{"lang": "en", "games": ["paper"]}"#);
    assert!(paper.is_syncable());
}

#[test]
fn test_is_syncable_accepts_exactly_two_languages() {
    assert!(card_from(r#"{"lang": "en", "games": ["paper"]}"#).is_syncable());
    assert!(card_from(r#"{"lang": "es", "games": ["paper"]}"#).is_syncable());
    assert!(!card_from(r#"{"lang": "ja", "games": ["paper"]}"#).is_syncable());
    assert!(!card_from(r#"{"lang": "de", "games": ["paper"]}"#).is_syncable());
}

#[test]
fn test_rarity_empty_becomes_none() {
    let card = card_from(r#"{"rarity": ""}"#);
    let (_, printing) = card.unpack();
    assert_eq!(printing.rarity, None);
}

#[test]
fn test_deserialize_ignores_unknown_fields() {
    let card = card_from(
        r#"{
            "cmc": 5.0,
            "layout": "normal",
            "prices": {"usd": "1.23"}
        }"#,
    );
    assert_eq!(card.name, "Last Stand");
}
