//! Candidate label input.
//!
//! Candidates come from an external generator as plain text, one label per
//! line. Blank lines and `#` comments are skipped; duplicates are dropped
//! while keeping first-seen order.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

/// Reads candidate labels from `path`, or from stdin when `path` is `-`.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or a line cannot be read.
pub async fn read_candidates(path: &Path) -> Result<Vec<String>> {
    if path.as_os_str() == "-" {
        log::info!("Reading candidates from stdin");
        return parse_candidate_lines(BufReader::new(tokio::io::stdin())).await;
    }

    let file = tokio::fs::File::open(path)
        .await
        .with_context(|| format!("Failed to open candidate file {}", path.display()))?;
    parse_candidate_lines(BufReader::new(file))
        .await
        .with_context(|| format!("Failed to read candidate file {}", path.display()))
}

/// Collects candidate labels from any buffered reader.
pub async fn parse_candidate_lines<R>(reader: R) -> Result<Vec<String>>
where
    R: AsyncBufRead + Unpin,
{
    let mut seen = HashSet::new();
    let mut candidates = Vec::new();
    let mut lines = reader.lines();
    while let Some(line) = lines.next_line().await? {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        if seen.insert(trimmed.to_string()) {
            candidates.push(trimmed.to_string());
        }
    }
    Ok(candidates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_parse_skips_comments_and_blanks() {
        let input = b"# generated\nexample\n\n  examp1e  \nexample\n#exampel\nexampel\n";
        let candidates = parse_candidate_lines(&input[..]).await.unwrap();
        assert_eq!(candidates, vec!["example", "examp1e", "exampel"]);
    }

    #[tokio::test]
    async fn test_read_candidates_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "paypa1").unwrap();
        writeln!(file, "pay-pal").unwrap();
        file.flush().unwrap();

        let candidates = read_candidates(file.path()).await.unwrap();
        assert_eq!(candidates, vec!["paypa1", "pay-pal"]);
    }

    #[tokio::test]
    async fn test_read_candidates_missing_file() {
        let result = read_candidates(Path::new("/nonexistent/candidates.txt")).await;
        let err = result.unwrap_err();
        assert!(err.to_string().contains("Failed to open candidate file"));
    }
}
