use std::io::{Read, Write};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use commit_sections::{HeaderSet, SectionMap};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "commit-sections")]
#[command(about = "Split commit messages into sections and put them back together")]
struct Cli {
    /// Log parser decisions to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Read a message from stdin and print its sections as TOML
    Parse {
        #[command(flatten)]
        vocabulary: VocabularyArgs,
    },

    /// Read a TOML section map from stdin and print the commit message
    Build,

    /// Parse a message from stdin and print it rebuilt in canonical form
    Normalize {
        #[command(flatten)]
        vocabulary: VocabularyArgs,
    },

    /// Print the default header vocabulary as TOML
    Vocabulary,
}

#[derive(Args)]
struct VocabularyArgs {
    /// Treat every `Name:` line as a header
    #[arg(long, conflicts_with_all = ["header", "phabricator"])]
    any: bool,

    /// Header to recognize (can be specified multiple times)
    #[arg(long = "header", value_name = "NAME")]
    header: Vec<String>,

    /// Include the Phabricator headers alongside any `--header` values
    #[arg(long)]
    phabricator: bool,
}

impl VocabularyArgs {
    fn resolve(&self) -> Option<HeaderSet> {
        if self.any {
            return None;
        }
        let mut vocab = if self.header.is_empty() || self.phabricator {
            HeaderSet::phabricator()
        } else {
            HeaderSet::new()
        };
        vocab.extend(&self.header);
        Some(vocab)
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let output = match cli.command {
        Command::Parse { vocabulary } => {
            let sections = commit_sections::parse(&read_stdin()?, vocabulary.resolve().as_ref());
            sections.to_toml().context("failed to render sections")?
        }
        Command::Build => {
            let sections =
                SectionMap::from_toml(&read_stdin()?).context("failed to read section map")?;
            commit_sections::build(&sections)
        }
        Command::Normalize { vocabulary } => {
            commit_sections::parse(&read_stdin()?, vocabulary.resolve().as_ref()).to_string()
        }
        Command::Vocabulary => HeaderSet::phabricator()
            .to_toml()
            .context("failed to render vocabulary")?,
    };

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(output.as_bytes())?;
    if !output.ends_with('\n') {
        stdout.write_all(b"\n")?;
    }

    Ok(())
}

fn read_stdin() -> anyhow::Result<String> {
    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .context("failed to read stdin")?;
    Ok(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vocabulary(args: &[&str]) -> Option<HeaderSet> {
        let cli = Cli::try_parse_from(["commit-sections", "parse"].iter().chain(args)).unwrap();
        match cli.command {
            Command::Parse { vocabulary } => vocabulary.resolve(),
            _ => panic!("expected the parse subcommand"),
        }
    }

    #[test]
    fn default_vocabulary_is_phabricator() {
        assert_eq!(vocabulary(&[]), Some(HeaderSet::phabricator()));
    }

    #[test]
    fn any_disables_vocabulary() {
        assert_eq!(vocabulary(&["--any"]), None);
    }

    #[test]
    fn explicit_headers_replace_default() {
        let vocab = vocabulary(&["--header", "FBOnly", "--header", "summary"]).unwrap();
        assert_eq!(vocab.iter().collect::<Vec<_>>(), vec!["fbonly", "summary"]);
    }

    #[test]
    fn phabricator_flag_extends_default() {
        let vocab = vocabulary(&["--phabricator", "--header", "fbonly"]).unwrap();
        let mut expected = HeaderSet::phabricator();
        expected.insert("fbonly");
        assert_eq!(vocab, expected);
    }

    #[test]
    fn any_conflicts_with_headers() {
        let result = Cli::try_parse_from(["commit-sections", "parse", "--any", "--header", "x"]);
        assert_eq!(
            result.err().map(|e| e.kind()),
            Some(clap::error::ErrorKind::ArgumentConflict)
        );
    }

    #[test]
    fn normalize_accepts_vocabulary_flags() {
        let cli = Cli::try_parse_from(["commit-sections", "-v", "normalize", "--any"]).unwrap();
        assert!(cli.verbose);
        assert!(matches!(
            cli.command,
            Command::Normalize { vocabulary } if vocabulary.resolve().is_none()
        ));
    }
}
