//! Placeholder datasets written when an expected input file is absent.

use log::debug;
use std::fs;
use std::io;
use std::path::Path;

const VACCINATIONS_WIDE: &str = "Country,Jan_2021,Feb_2021,Mar_2021,Apr_2021,May_2021,Population
United States,12.5,35.2,58.1,72.4,82.6,331000000
United Kingdom,15.8,30.5,52.7,68.9,75.2,67200000
Germany,5.2,12.8,30.4,52.1,63.8,83100000";

const CASES_WIDE: &str = "Country,Jan_2021,Feb_2021,Mar_2021,Apr_2021,May_2021,Population
United States,25000000,28000000,30000000,32000000,33000000,331000000
United Kingdom,3700000,4100000,4400000,4600000,4800000,67200000
Germany,2200000,2500000,2800000,3100000,3300000,83100000";

const MORTALITY_WIDE: &str = "Country,Jan_2021,Feb_2021,Mar_2021,Apr_2021,May_2021,Population
United States,420000,460000,490000,510000,520000,331000000
United Kingdom,115000,125000,135000,140000,145000,67200000
Germany,75000,82000,89000,93000,96000,83100000";

/// Every known placeholder, by file name.
pub const SAMPLES: [(&str, &str); 3] = [
    ("vaccinations_wide.csv", VACCINATIONS_WIDE),
    ("cases_wide.csv", CASES_WIDE),
    ("mortality_wide.csv", MORTALITY_WIDE),
];

/// Placeholder content for `file_name`, if one exists.
pub fn placeholder(file_name: &str) -> Option<&'static str> {
    SAMPLES
        .iter()
        .find(|(name, _)| *name == file_name)
        .map(|(_, content)| *content)
}

/// Write the placeholder for each missing file in `names`.
///
/// Existing files are left untouched and names without a placeholder are
/// skipped. Returns the names that were created, in input order.
pub fn ensure_samples<S: AsRef<str>>(data_dir: &Path, names: &[S]) -> io::Result<Vec<String>> {
    let mut created = Vec::new();

    for name in names.iter().map(AsRef::as_ref) {
        let path = data_dir.join(name);
        if path.exists() {
            continue;
        }
        match placeholder(name) {
            Some(content) => {
                fs::write(&path, content)?;
                created.push(name.to_string());
            }
            None => debug!("no placeholder for {}", name),
        }
    }

    Ok(created)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_creates_missing_files_exactly() {
        let dir = tempdir().unwrap();
        let names = ["vaccinations_wide.csv", "cases_wide.csv"];

        let created = ensure_samples(dir.path(), &names).unwrap();
        assert_eq!(created, vec!["vaccinations_wide.csv", "cases_wide.csv"]);

        let content = fs::read_to_string(dir.path().join("cases_wide.csv")).unwrap();
        assert_eq!(content, CASES_WIDE);
        assert!(!content.ends_with('\n'));
    }

    #[test]
    fn test_existing_file_not_overwritten() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("mortality_wide.csv");
        fs::write(&path, "Country,Population\nX,1").unwrap();

        let created = ensure_samples(dir.path(), &["mortality_wide.csv"]).unwrap();
        assert!(created.is_empty());
        assert_eq!(fs::read_to_string(&path).unwrap(), "Country,Population\nX,1");
    }

    #[test]
    fn test_unknown_name_skipped() {
        let dir = tempdir().unwrap();
        let created = ensure_samples(dir.path(), &["other_wide.csv"]).unwrap();

        assert!(created.is_empty());
        assert!(!dir.path().join("other_wide.csv").exists());
    }

    #[test]
    fn test_placeholder_lookup() {
        assert!(placeholder("cases_wide.csv").unwrap().starts_with("Country,Jan_2021"));
        assert!(placeholder("cases_tidy.csv").is_none());
    }
}
