use std::io::Write;

use tempfile::{NamedTempFile, tempdir};

use shake_pick::engine::{PickRequest, candidate_pool, high_rated_ids, top_rated_ids};
use shake_pick::models::{FilterCriteria, HistoryEntry, SweetnessLevel};
use shake_pick::state::{
    export_history_csv, import_history_csv, load_catalog, load_history, save_history,
};

const CATALOG_JSON: &str = r#"{
    "brands": [{"brand_id": "kebuke", "brand_name": "Kebuke", "is_active": true}],
    "drinks": [
        {"drink_id": "kebuke_001", "brand_id": "kebuke", "name": "Aged Black Tea", "category": "pureTea",
         "base_calories": 90, "has_caffeine": true, "caffeine_content": 60,
         "calories_by_sugar": {"sugar0": 0, "sugar30": 35, "sugar50": 55, "sugar70": 75, "sugar100": 90}},
        {"drink_id": "kebuke_002", "brand_id": "kebuke", "name": "Aged Au Lait", "category": "milkTea",
         "base_calories": 280, "sugar_grams": 30.5, "has_caffeine": true},
        {"drink_id": "milkshop_001", "brand_id": "milkshop", "name": "Taro Fresh Milk", "category": "fresh",
         "base_calories": 380, "has_caffeine": null,
         "available_sugar_levels": ["sugar0", "sugar30", "sugar50"]}
    ]
}"#;

#[test]
fn test_catalog_and_history_feed_the_engine() {
    let mut catalog_file = NamedTempFile::new().unwrap();
    catalog_file.write_all(CATALOG_JSON.as_bytes()).unwrap();
    let catalog = load_catalog(catalog_file.path()).unwrap();
    assert_eq!(catalog.len(), 3);
    assert_eq!(catalog[2].sugar_levels.len(), 3);
    assert_eq!(catalog[2].has_caffeine, None);

    let dir = tempdir().unwrap();
    let history_path = dir.path().join("history.json");
    save_history(&history_path, &[HistoryEntry::new("kebuke_002", 2).unwrap()]).unwrap();
    let history = load_history(&history_path).unwrap();

    let mut criteria = FilterCriteria {
        avoid_low_rated: true,
        ..Default::default()
    };
    criteria.has_caffeine = Some(true);

    let request = PickRequest::new(&catalog, &criteria, &history);
    let ids: Vec<&str> = candidate_pool(&request)
        .iter()
        .map(|d| d.id.as_str())
        .collect();
    assert_eq!(ids, vec!["kebuke_001"]);
}

#[test]
fn test_history_csv_roundtrip_keeps_order() {
    let history = vec![
        HistoryEntry::new("a", 5)
            .unwrap()
            .with_comment("just right, not too sweet")
            .unwrap(),
        HistoryEntry::new("b", 1)
            .unwrap()
            .with_sugar_level(SweetnessLevel::Sugar100),
        HistoryEntry::new("a", 3).unwrap(),
    ];

    let dir = tempdir().unwrap();
    let csv_path = dir.path().join("history.csv");
    export_history_csv(&csv_path, &history).unwrap();

    let imported = import_history_csv(&csv_path).unwrap();
    assert_eq!(imported, history);
}

#[test]
fn test_load_history_drops_out_of_range_ratings() {
    let json = r#"[
        {"drink_id": "a", "rating": 9},
        {"drink_id": "b", "rating": 0},
        {"drink_id": "c", "rating": 5}
    ]"#;
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(json.as_bytes()).unwrap();

    let history = load_history(file.path()).unwrap();
    assert_eq!(history, vec![HistoryEntry::new("c", 5).unwrap()]);

    assert!(high_rated_ids(&history).contains("c"));
    assert!(!high_rated_ids(&history).contains("a"));
    assert_eq!(top_rated_ids(&history).len(), 1);
}

#[test]
fn test_import_csv_skips_malformed_row() {
    let csv = "drink_id,rating,sugar_level,comment\n\
               a,5,,\n\
               b,x,,bad\n\
               c,4,sugar30,\n";
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(csv.as_bytes()).unwrap();

    let history = import_history_csv(file.path()).unwrap();
    let ids: Vec<&str> = history.iter().map(|e| e.drink_id.as_str()).collect();
    assert_eq!(ids, vec!["a", "c"]);
    assert_eq!(history[1].sugar_level, Some(SweetnessLevel::Sugar30));
}
