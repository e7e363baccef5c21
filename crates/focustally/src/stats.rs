//! The `stats` command: show what has been persisted.

use std::{
    io::{self, Write},
    path::Path,
};

use tally::ActivityStore;
use tracing::warn;

use crate::{cli::StatsArgs, error::Result};

/// Print the store at `db` to stdout. Prints nothing if the file is missing.
pub fn run(db: &Path, args: &StatsArgs) -> Result<()> {
    write_report(db, args, &mut io::stdout().lock())
}

/// Write the store at `db` to `out`, followed by a newline if the content
/// lacks one.
fn write_report<W: Write>(db: &Path, args: &StatsArgs, out: &mut W) -> Result<()> {
    let text = render(ActivityStore::report(db), args.sorted);
    if text.is_empty() {
        return Ok(());
    }
    out.write_all(text.as_bytes())?;
    if !text.ends_with('\n') {
        out.write_all(b"\n")?;
    }
    out.flush()?;
    Ok(())
}

/// Text to print for raw store content. Sorted output falls back to the raw
/// content when it cannot be parsed.
fn render(raw: String, sorted: bool) -> String {
    if !sorted {
        return raw;
    }
    match ActivityStore::parse(&raw) {
        Ok(store) => store.render_ranked(),
        Err(err) => {
            warn!(error = %err, "activity store is not valid; showing raw content");
            raw
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_raw_is_verbatim() {
        let raw = r#"{"Editor":42,"Browser":17}"#.to_string();
        assert_eq!(render(raw.clone(), false), raw);
    }

    #[test]
    fn test_sorted_ranks_entries() {
        let raw = r#"{"Browser":17,"Editor":42}"#.to_string();
        assert_eq!(render(raw, true), "42\tEditor\n17\tBrowser\n");
    }

    #[test]
    fn test_sorted_falls_back_to_raw() {
        assert_eq!(render("garbage".into(), true), "garbage");
        assert_eq!(render(String::new(), true), "");
    }

    fn report(path: &Path, sorted: bool) -> String {
        let args = StatsArgs {
            sorted,
            ..StatsArgs::default()
        };
        let mut out = Vec::new();
        write_report(path, &args, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_missing_store_prints_nothing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("db.json");
        assert_eq!(report(&path, false), "");
        assert_eq!(report(&path, true), "");
        assert!(!path.exists());
    }

    #[test]
    fn test_report_prints_file_with_newline() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("db.json");
        fs::write(&path, r#"{"Editor":3}"#).unwrap();
        assert_eq!(report(&path, false), "{\"Editor\":3}\n");
        assert_eq!(report(&path, true), "3\tEditor\n");

        fs::write(&path, "").unwrap();
        assert_eq!(report(&path, false), "");
    }
}
