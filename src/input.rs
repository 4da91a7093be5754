use std::{fs, path::Path};

use tracing::error;

/// Load one entry per line from `path`, trimming surrounding whitespace and
/// skipping blank lines.
///
/// Unreadable files yield an empty list so that, for example, a missing
/// proxy file degrades to direct connections instead of aborting startup.
pub fn read_lines(path: impl AsRef<Path>) -> Vec<String> {
    let path = path.as_ref();
    match fs::read_to_string(path) {
        Ok(data) => parse_lines(&data),
        Err(err) => {
            error!(path = %path.display(), %err, "failed to read input file");
            Vec::new()
        }
    }
}

pub(crate) fn parse_lines(data: &str) -> Vec<String> {
    data.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::parse_lines;

    #[test]
    fn trims_and_skips_blank_lines() {
        let data = "  tokA  \n\n\ttokB\n   \ntokC";
        assert_eq!(parse_lines(data), vec!["tokA", "tokB", "tokC"]);
    }

    #[test]
    fn empty_input_yields_empty_list() {
        assert!(parse_lines("").is_empty());
        assert!(parse_lines("\n \n\t\n").is_empty());
    }
}
