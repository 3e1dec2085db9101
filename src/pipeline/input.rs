// src/pipeline/input.rs

//! Target input files.
//!
//! One target per line, with optional per-line flags:
//!
//! ```text
//! # comments and blank lines are skipped
//! https://letterboxd.com/dave/list/official-top-250/ -p 1~3 -on top
//! https://letterboxd.com/dave/watchlist/ --pages '<3'
//! ```

use std::path::Path;

use crate::error::Result;
use crate::models::RawTarget;

const PAGE_FLAGS: [&str; 2] = ["-p", "--pages"];
const NAME_FLAGS: [&str; 2] = ["-on", "--output_name"];

/// Read and parse an input file.
pub async fn read_targets(path: impl AsRef<Path>) -> Result<Vec<RawTarget>> {
    let text = tokio::fs::read_to_string(path.as_ref()).await?;
    let targets = parse_targets(&text);
    log::info!(
        "A total of {} URLs were read from {}",
        targets.len(),
        path.as_ref().display()
    );
    Ok(targets)
}

/// Parse input file text into raw targets, in file order.
///
/// The URL is the first chunk containing `https://`; a line without one
/// keeps its first chunk so that validation can report it.
pub fn parse_targets(text: &str) -> Vec<RawTarget> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(parse_line)
        .collect()
}

fn parse_line(line: &str) -> RawTarget {
    let chunks: Vec<&str> = line.split_whitespace().collect();
    let url = chunks
        .iter()
        .find(|chunk| chunk.contains("https://"))
        .or_else(|| chunks.first())
        .copied()
        .unwrap_or_default();

    RawTarget {
        url: url.to_string(),
        pages: flag_value(&chunks, &PAGE_FLAGS),
        output_name: flag_value(&chunks, &NAME_FLAGS),
    }
}

/// Value following the first occurrence of any of `flags`.
///
/// A trailing flag without a value yields an empty string, which fails validation.
fn flag_value(chunks: &[&str], flags: &[&str]) -> Option<String> {
    let index = chunks.iter().position(|chunk| flags.contains(chunk))?;
    Some(chunks.get(index + 1).copied().unwrap_or_default().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_targets() {
        let text = "\
# my lists
https://letterboxd.com/dave/list/official-top-250/ -p 1~3 -on top

https://letterboxd.com/dave/watchlist/ --pages '<3' --output_name later
   https://letterboxd.com/actor/al-pacino/
";
        let targets = parse_targets(text);
        assert_eq!(
            targets,
            vec![
                RawTarget::new("https://letterboxd.com/dave/list/official-top-250/")
                    .with_pages("1~3")
                    .with_output_name("top"),
                RawTarget::new("https://letterboxd.com/dave/watchlist/")
                    .with_pages("'<3'")
                    .with_output_name("later"),
                RawTarget::new("https://letterboxd.com/actor/al-pacino/"),
            ]
        );
    }

    #[test]
    fn test_flags_before_url() {
        let targets = parse_targets("-p 2 https://letterboxd.com/dave/list/top/");
        assert_eq!(targets[0].url, "https://letterboxd.com/dave/list/top/");
        assert_eq!(targets[0].pages.as_deref(), Some("2"));
    }

    #[test]
    fn test_line_without_url_kept_for_validation() {
        let targets = parse_targets("letterboxd.com/dave/list/top/ -p");
        assert_eq!(targets[0].url, "letterboxd.com/dave/list/top/");
        assert_eq!(targets[0].pages.as_deref(), Some(""));
    }

    #[tokio::test]
    async fn test_read_targets() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("lists.txt");
        std::fs::write(&path, "https://letterboxd.com/dave/list/top/\n# done\n").unwrap();

        let targets = read_targets(&path).await.unwrap();
        assert_eq!(targets.len(), 1);
    }
}
