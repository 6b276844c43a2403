use anyhow::{bail, Context, Result};
use std::io::Read;
use std::path::Path;

use crate::cli::{is_stdin, Cli};
use crate::highlight::{detect_language, resolve_language};

/// The two texts to compare plus what to call and highlight them as.
#[derive(Debug)]
pub struct LoadedInputs {
    pub old_text: String,
    pub new_text: String,
    pub old_title: String,
    pub new_title: String,
    pub language: Option<String>,
}

/// Read both sides named on the command line. At most one side may be `-`.
pub fn load(cli: &Cli, stdin: &mut impl Read) -> Result<LoadedInputs> {
    if is_stdin(&cli.old) && is_stdin(&cli.new) {
        bail!("only one side can be read from stdin");
    }

    let old_text = read_side(&cli.old, stdin)?;
    let new_text = read_side(&cli.new, stdin)?;

    Ok(LoadedInputs {
        old_text,
        new_text,
        old_title: display_name(&cli.old),
        new_title: display_name(&cli.new),
        language: pick_language(cli.language.as_deref(), &cli.old, &cli.new),
    })
}

fn read_side(path: &Path, stdin: &mut impl Read) -> Result<String> {
    let bytes = if is_stdin(path) {
        let mut buf = Vec::new();
        stdin.read_to_end(&mut buf).context("reading stdin")?;
        buf
    } else {
        std::fs::read(path).with_context(|| format!("reading {}", path.display()))?
    };
    // Invalid UTF-8 is shown with replacement characters rather than refused.
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn display_name(path: &Path) -> String {
    if is_stdin(path) {
        "stdin".to_string()
    } else {
        path.display().to_string()
    }
}

/// An explicit language wins; otherwise guess from the new path, then the old.
fn pick_language(explicit: Option<&str>, old: &Path, new: &Path) -> Option<String> {
    if let Some(id) = explicit {
        let resolved = resolve_language(id);
        if resolved.is_none() {
            log::warn!("unknown language {id:?}; showing plain text");
        }
        return resolved.map(String::from);
    }
    [new, old]
        .into_iter()
        .filter(|path| !is_stdin(path))
        .find_map(detect_language)
        .map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use pretty_assertions::assert_eq;
    use std::io::Cursor;

    fn cli(args: &[&str]) -> Cli {
        let mut argv = vec!["pairdiff"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    fn temp_file(name: &str, contents: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!("pairdiff-input-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn reads_one_side_from_stdin() {
        let old = temp_file("old.py", "a\nb\n");
        let old_arg = old.to_string_lossy().into_owned();
        let loaded = load(&cli(&[&old_arg, "-"]), &mut Cursor::new("a\nc\n")).unwrap();

        assert_eq!(loaded.old_text, "a\nb\n");
        assert_eq!(loaded.new_text, "a\nc\n");
        assert_eq!(loaded.new_title, "stdin");
        assert_eq!(loaded.language.as_deref(), Some("python"));
    }

    #[test]
    fn invalid_utf8_reads_the_same_from_file_and_stdin() {
        let bytes: &[u8] = b"a\xffb\n";
        let old = temp_file("bad.txt", "");
        std::fs::write(&old, bytes).unwrap();
        let old_arg = old.to_string_lossy().into_owned();
        let loaded = load(&cli(&[&old_arg, "-"]), &mut Cursor::new(bytes)).unwrap();

        assert_eq!(loaded.old_text, "a\u{fffd}b\n");
        assert_eq!(loaded.new_text, loaded.old_text);
    }

    #[test]
    fn refuses_two_stdin_sides() {
        let err = load(&cli(&["-", "-"]), &mut Cursor::new("")).unwrap_err();
        assert!(err.to_string().contains("stdin"));
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = load(
            &cli(&["/nonexistent/pairdiff/old.txt", "-"]),
            &mut Cursor::new(""),
        )
        .unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/pairdiff/old.txt"));
    }

    #[test]
    fn explicit_language_wins() {
        assert_eq!(
            pick_language(Some("ts"), Path::new("a.rs"), Path::new("b.rs")).as_deref(),
            Some("typescript")
        );
        assert_eq!(
            pick_language(None, Path::new("a.txt"), Path::new("b.rs")).as_deref(),
            Some("rust")
        );
        assert_eq!(pick_language(Some("cobol"), Path::new("a.rs"), Path::new("b.rs")), None);
    }
}
