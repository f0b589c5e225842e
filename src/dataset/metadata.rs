use std::collections::HashMap;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Deserialize;

/// One row of the FFHQ aging-labels CSV. `age_group` is only present in
/// the variants of the file that carry it; callers that need it say so.
#[derive(Debug, Deserialize)]
pub struct AgingRecord {
    pub image_number: i64,
    pub gender: String,
    #[serde(default)]
    pub age_group: String,
}

pub fn load_aging_labels(csv_path: &Path, require_age_group: bool) -> Result<Vec<AgingRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(csv_path)
        .with_context(|| format!("cannot read {}", csv_path.display()))?;

    let headers = reader.headers()?.clone();
    let mut required = vec!["image_number", "gender"];
    if require_age_group {
        required.push("age_group");
    }
    for column in &required {
        if !headers.iter().any(|h| h == *column) {
            bail!(
                "{} is missing required column '{}'",
                csv_path.display(),
                column
            );
        }
    }

    let mut records = Vec::new();
    for record in reader.deserialize() {
        let record: AgingRecord =
            record.with_context(|| format!("malformed row in {}", csv_path.display()))?;
        records.push(record);
    }
    Ok(records)
}

#[derive(Debug, Deserialize)]
struct DemographicRecord {
    #[serde(rename = "File")]
    file: String,
    #[serde(rename = "Ethnic")]
    ethnic: String,
}

/// filename -> ethnicity lookup from the demographics CSV.
pub fn load_ethnicity_map(csv_path: &Path) -> Result<HashMap<String, String>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(csv_path)
        .with_context(|| format!("cannot read {}", csv_path.display()))?;

    let headers = reader.headers()?.clone();
    for column in ["File", "Ethnic"] {
        if !headers.iter().any(|h| h == column) {
            bail!("{} must contain 'File' and 'Ethnic' columns", csv_path.display());
        }
    }

    let mut map = HashMap::new();
    for record in reader.deserialize() {
        let record: DemographicRecord =
            record.with_context(|| format!("malformed row in {}", csv_path.display()))?;
        map.insert(record.file, record.ethnic);
    }
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn aging_labels_parse_and_trim() {
        let file = write_csv("image_number,gender,age_group\n14335, male ,20-29\n7,female,30-39\n");
        let records = load_aging_labels(file.path(), true).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].image_number, 14335);
        assert_eq!(records[0].gender, "male");
        assert_eq!(records[1].age_group, "30-39");
    }

    #[test]
    fn aging_labels_missing_column_is_an_error() {
        let file = write_csv("image_number,something\n1,x\n");
        assert!(load_aging_labels(file.path(), false).is_err());
    }

    #[test]
    fn age_group_only_required_on_request() {
        let file = write_csv("image_number,gender\n1,male\n");
        assert!(load_aging_labels(file.path(), false).is_ok());
        assert!(load_aging_labels(file.path(), true).is_err());
    }

    #[test]
    fn ethnicity_map_reads_renamed_columns() {
        let file = write_csv("File,Ethnic\n00001.png,Asian\n00002.png,White\n");
        let map = load_ethnicity_map(file.path()).unwrap();
        assert_eq!(map.get("00001.png").map(String::as_str), Some("Asian"));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn ethnicity_map_missing_column_is_an_error() {
        let file = write_csv("File,Other\n00001.png,x\n");
        assert!(load_ethnicity_map(file.path()).is_err());
    }
}
