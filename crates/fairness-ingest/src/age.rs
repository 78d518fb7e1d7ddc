//! Age band derivation.

use fairness_model::{CellValue, Dataset, parse_number};

pub const AGE_COLUMN: &str = "age";
pub const AGE_GROUP_COLUMN: &str = "age_group";

/// Inclusive age bands, checked in order.
const AGE_BANDS: &[(f64, f64, &str)] = &[
    (20.0, 30.0, "20-30"),
    (31.0, 40.0, "31-40"),
    (41.0, 50.0, "41-50"),
    (51.0, 60.0, "51-60"),
];

/// Band label for an age; anything outside the bands is "Other".
pub fn age_band(age: f64) -> &'static str {
    AGE_BANDS
        .iter()
        .find(|(low, high, _)| age >= *low && age <= *high)
        .map_or("Other", |(_, _, label)| *label)
}

/// Append `age_group` when the dataset has `age` but no `age_group`.
///
/// Returns `None` when nothing needed deriving. Blank or non-numeric ages
/// fall into "Other".
pub fn derive_age_group(dataset: &Dataset) -> Option<Dataset> {
    if dataset.has_column(AGE_GROUP_COLUMN) {
        return None;
    }
    let idx = dataset.column_index(AGE_COLUMN)?;
    let bands = dataset
        .column_values(idx)
        .map(|cell| {
            let band = cell.as_text().and_then(parse_number).map_or("Other", age_band);
            CellValue::Text(band.to_string())
        })
        .collect();
    Some(dataset.with_column(AGE_GROUP_COLUMN, bands))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn band_edges_are_inclusive() {
        assert_eq!(age_band(20.0), "20-30");
        assert_eq!(age_band(30.0), "20-30");
        assert_eq!(age_band(31.0), "31-40");
        assert_eq!(age_band(60.0), "51-60");
        assert_eq!(age_band(19.0), "Other");
        assert_eq!(age_band(61.0), "Other");
        assert_eq!(age_band(30.5), "Other");
    }

    #[test]
    fn derives_only_when_absent() {
        let ds = Dataset::from_records(
            ["age", "shortlisted"],
            vec![vec!["25", "1"], vec!["45", "0"], vec!["", "1"]],
        );
        let derived = derive_age_group(&ds).expect("derived");
        let idx = derived.column_index("age_group").expect("column");
        let bands: Vec<&str> = derived
            .column_values(idx)
            .filter_map(CellValue::as_text)
            .collect();
        assert_eq!(bands, vec!["20-30", "41-50", "Other"]);

        assert!(derive_age_group(&derived).is_none());
        let no_age = Dataset::from_records(["shortlisted"], vec![vec!["1"]]);
        assert!(derive_age_group(&no_age).is_none());
    }
}
