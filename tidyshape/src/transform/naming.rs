//! File-name conventions for the dataset driver.
//!
//! The value label is derived from the file topic (`cases_wide.csv` → `case`)
//! by dropping the last character of everything before the first `_`. This is
//! a plain string cut, not a singularizer: `mortality_wide.csv` yields
//! `mortalit`, and that output is kept as-is.

/// Derive the value-column label from an input file name.
///
/// ```
/// use tidyshape::derive_label;
///
/// assert_eq!(derive_label("cases_wide.csv"), "case");
/// assert_eq!(derive_label("vaccinations_wide.csv"), "vaccination");
/// assert_eq!(derive_label("mortality_wide.csv"), "mortalit");
/// ```
pub fn derive_label(file_name: &str) -> String {
    let topic = file_name.split('_').next().unwrap_or("");
    let mut chars = topic.chars();
    chars.next_back();
    chars.as_str().to_string()
}

/// Output file name: the first `wide` becomes `tidy`.
pub fn tidy_file_name(file_name: &str) -> String {
    file_name.replacen("wide", "tidy", 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_from_known_files() {
        assert_eq!(derive_label("cases_wide.csv"), "case");
        assert_eq!(derive_label("vaccinations_wide.csv"), "vaccination");
        assert_eq!(derive_label("mortality_wide.csv"), "mortalit");
    }

    #[test]
    fn test_label_without_underscore() {
        assert_eq!(derive_label("data.csv"), "data.cs");
    }

    #[test]
    fn test_label_empty_topic() {
        assert_eq!(derive_label("_wide.csv"), "");
        assert_eq!(derive_label(""), "");
    }

    #[test]
    fn test_label_multibyte_topic() {
        assert_eq!(derive_label("décès_wide.csv"), "décè");
    }

    #[test]
    fn test_tidy_file_name() {
        assert_eq!(tidy_file_name("vaccinations_wide.csv"), "vaccinations_tidy.csv");
        assert_eq!(tidy_file_name("cases_wide.csv"), "cases_tidy.csv");
    }

    #[test]
    fn test_tidy_file_name_first_occurrence_only() {
        assert_eq!(tidy_file_name("wide_wide.csv"), "tidy_wide.csv");
        assert_eq!(tidy_file_name("cases.csv"), "cases.csv");
    }
}
