//! pageflow - Entry Point

use clap::Parser;
use pageflow::model::{AppError, UnderlineMode};
use std::path::PathBuf;
use tracing::info;

/// pageflow - paginated reader for long plain-text documents
#[derive(Parser, Debug)]
#[command(name = "pageflow")]
#[command(version)]
#[command(about = "Read long plain-text documents page by page in the terminal")]
pub struct Args {
    /// Path to the text file
    pub file: PathBuf,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Reflow the text into paragraphs after opening
    #[arg(short, long)]
    pub format: bool,

    /// Leading indent of every line, in wide characters
    #[arg(short, long)]
    pub indent: Option<usize>,

    /// Start at specific line number (must be positive)
    #[arg(short, long, default_value = "1", value_parser = clap::value_parser!(u32).range(1..))]
    pub line: u32,

    /// Underline decoration
    #[arg(short, long, value_parser = parse_underline)]
    pub underline: Option<UnderlineMode>,
}

fn parse_underline(value: &str) -> Result<UnderlineMode, String> {
    UnderlineMode::from_name(value)
        .ok_or_else(|| format!("unknown underline mode {value:?} (expected none, solid or dashed)"))
}

fn main() -> Result<(), AppError> {
    let args = Args::parse();

    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = pageflow::config::load_config_with_precedence(args.config.clone())?;
        let merged = pageflow::config::merge_config(config_file);
        let with_env = pageflow::config::apply_env_overrides(merged);
        pageflow::config::apply_cli_overrides(with_env, args.underline, args.indent)
    };

    pageflow::logging::init(&config.log_file_path)?;

    info!(config = ?config, "Configuration loaded and resolved");

    let source = pageflow::source::FileSource::open(&args.file)?;
    let title = args
        .file
        .file_name()
        .map_or_else(|| args.file.display().to_string(), |n| n.to_string_lossy().into_owned());

    pageflow::view::run(pageflow::view::ReaderSetup {
        title,
        lines: source.into_lines(),
        config,
        start_line: args.line as usize - 1,
        format_on_open: args.format,
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_help_does_not_error() {
        let err = Args::try_parse_from(["pageflow", "--help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_version_does_not_error() {
        let err = Args::try_parse_from(["pageflow", "--version"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_file_is_required() {
        let err = Args::try_parse_from(["pageflow"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["pageflow", "book.txt"]);
        assert_eq!(args.file, PathBuf::from("book.txt"));
        assert_eq!(args.config, None);
        assert!(!args.format);
        assert_eq!(args.indent, None);
        assert_eq!(args.line, 1);
        assert_eq!(args.underline, None);
    }

    #[test]
    fn test_line_rejects_zero() {
        let err = Args::try_parse_from(["pageflow", "book.txt", "-l", "0"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn test_underline_accepts_known_modes() {
        let args = Args::parse_from(["pageflow", "book.txt", "--underline", "dashed"]);
        assert_eq!(args.underline, Some(UnderlineMode::Dashed));
        let args = Args::parse_from(["pageflow", "book.txt", "-u", "Solid"]);
        assert_eq!(args.underline, Some(UnderlineMode::Solid));
    }

    #[test]
    fn test_underline_rejects_unknown_mode() {
        let err = Args::try_parse_from(["pageflow", "book.txt", "--underline", "wavy"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn test_combined_flags() {
        let args = Args::parse_from([
            "pageflow",
            "novel.txt",
            "--format",
            "-i",
            "2",
            "-l",
            "42",
            "--config",
            "/custom/config.toml",
        ]);
        assert!(args.format);
        assert_eq!(args.indent, Some(2));
        assert_eq!(args.line, 42);
        assert_eq!(args.config, Some(PathBuf::from("/custom/config.toml")));
    }
}
