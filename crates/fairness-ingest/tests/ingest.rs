use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use polars::prelude::{DataFrame, IntoColumn, NamedFrom, Series};

use fairness_ingest::{
    ColumnStatistics, DatasetId, DatasetStatistics, DatasetStore, InMemoryDatasetStore,
    IngestError, dataset_from_frame, load_csv_dataset, preview_rows,
    validate_protected_attribute,
};

fn temp_dir() -> PathBuf {
    let stamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time")
        .as_nanos();
    let dir = std::env::temp_dir().join(format!("fairness_ingest_{stamp}"));
    fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

#[test]
fn loads_csv_and_derives_age_group() {
    let dir = temp_dir();
    let path = dir.join("candidates.csv");
    fs::write(
        &path,
        "\u{feff}Gender,age,shortlisted\n\nM,25,1\nF,44,0\nF,70,1\n",
    )
    .expect("write csv");

    let loaded = load_csv_dataset(&path).expect("load");
    assert_eq!(loaded.metadata.filename, "candidates.csv");
    assert_eq!(loaded.metadata.rows, 3);
    assert!(loaded.metadata.has_age_group);
    assert_eq!(
        loaded.metadata.column_names,
        vec!["Gender", "age", "shortlisted", "age_group"]
    );
    assert_eq!(loaded.metadata.dataset_id, DatasetId::of(&loaded.dataset));

    let idx = loaded.dataset.column_index("age_group").expect("age_group");
    let bands: Vec<&str> = loaded
        .dataset
        .column_values(idx)
        .filter_map(|cell| cell.as_text())
        .collect();
    assert_eq!(bands, vec!["20-30", "41-50", "Other"]);
    assert_eq!(validate_protected_attribute(&loaded.dataset, "gender"), Ok(()));

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn short_rows_are_padded() {
    let dir = temp_dir();
    let path = dir.join("short.csv");
    fs::write(&path, "gender,shortlisted,score\nM,1\nF,0,55\n").expect("write csv");

    let loaded = load_csv_dataset(&path).expect("load");
    assert!(loaded.dataset.rows()[0][2].is_missing());
    assert_eq!(loaded.dataset.rows()[1][2].as_text(), Some("55"));

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn missing_shortlisted_is_rejected() {
    let dir = temp_dir();
    let path = dir.join("bad.csv");
    fs::write(&path, "gender,score\nM,10\n").expect("write csv");

    let err = load_csv_dataset(&path).expect_err("missing column");
    let ingest = err.downcast_ref::<IngestError>().expect("ingest error");
    assert_eq!(
        ingest,
        &IngestError::MissingRequiredColumns {
            columns: vec!["shortlisted".to_string()]
        }
    );

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn missing_file_reports_path() {
    let err = load_csv_dataset(&temp_dir().join("absent.csv")).expect_err("missing file");
    assert!(format!("{err:#}").contains("absent.csv"));
}

#[test]
fn converts_polars_frame() {
    let df = DataFrame::new(vec![
        Series::new("gender".into(), ["M", "F"]).into_column(),
        Series::new("shortlisted".into(), [true, false]).into_column(),
        Series::new("score".into(), [Some(72.5f64), None]).into_column(),
    ])
    .expect("frame");

    let ds = dataset_from_frame(&df);
    assert_eq!(ds.columns(), &["gender", "shortlisted", "score"]);
    assert_eq!(ds.rows()[0][1].as_text(), Some("1"));
    assert_eq!(ds.rows()[1][1].as_text(), Some("0"));
    assert_eq!(ds.rows()[0][2].as_text(), Some("72.5"));
    assert!(ds.rows()[1][2].is_missing());
}

#[test]
fn store_round_trip_uses_content_id() {
    let df = DataFrame::new(vec![
        Series::new("gender".into(), ["M", "F"]).into_column(),
        Series::new("shortlisted".into(), [1i32, 0]).into_column(),
    ])
    .expect("frame");
    let ds = dataset_from_frame(&df);
    let expected = DatasetId::of(&ds);

    let store = InMemoryDatasetStore::new();
    let id = store.insert(ds);
    assert_eq!(id, expected);
    let stored = store.get(&id).expect("stored");
    assert_eq!(stored.rows()[0][1].as_text(), Some("1"));
}

#[test]
fn statistics_summarize_loaded_csv() {
    let dir = temp_dir();
    let path = dir.join("stats.csv");
    fs::write(
        &path,
        "gender,age,shortlisted,score\nM,25,1,60\nF,44,0,70\nF,70,1,80\nM,30,1,\nF,,0,90\n",
    )
    .expect("write csv");
    let loaded = load_csv_dataset(&path).expect("load");

    let stats = DatasetStatistics::from_dataset(&loaded.dataset).expect("stats");
    assert_eq!(stats.rows, 5);
    assert_eq!(stats.columns, 5);
    assert_eq!(stats.numeric_columns, vec!["age", "shortlisted", "score"]);
    assert_eq!(stats.categorical_columns, vec!["gender", "age_group"]);
    assert_eq!(stats.missing_values["age"], 1);
    assert_eq!(stats.missing_values["score"], 1);
    assert_eq!(stats.missing_values["gender"], 0);

    let ColumnStatistics::Numeric(score) = &stats.column_stats["score"] else {
        panic!("score should be numeric");
    };
    assert_eq!(score.mean, Some(75.0));
    assert_eq!(score.median, Some(75.0));
    assert_eq!(score.min, Some(60.0));
    assert_eq!(score.max, Some(90.0));
    let std = score.std.expect("std");
    assert!((std - (500.0f64 / 3.0).sqrt()).abs() < 1e-9);

    let ColumnStatistics::Categorical(gender) = &stats.column_stats["gender"] else {
        panic!("gender should be categorical");
    };
    assert_eq!(gender.unique_values, 2);
    let top: Vec<(&str, usize)> = gender
        .top_values
        .iter()
        .map(|entry| (entry.value.as_str(), entry.count))
        .collect();
    assert_eq!(top, vec![("F", 3), ("M", 2)]);

    let preview = preview_rows(&loaded.dataset, 2);
    assert_eq!(preview.len(), 2);
    assert_eq!(preview[0][0].as_deref(), Some("M"));

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn top_values_are_capped_at_ten() {
    let df = DataFrame::new(vec![
        Series::new(
            "city".into(),
            (0..12).map(|i| format!("city{i:02}")).collect::<Vec<_>>(),
        )
        .into_column(),
    ])
    .expect("frame");

    let stats = DatasetStatistics::from_frame(&df).expect("stats");
    let ColumnStatistics::Categorical(city) = &stats.column_stats["city"] else {
        panic!("city should be categorical");
    };
    assert_eq!(city.unique_values, 12);
    assert_eq!(city.top_values.len(), 10);
    assert_eq!(city.top_values[0].value, "city00");
}
