use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Repository classifier and convention-based Dockerfile generator
#[derive(Parser, Debug)]
#[command(
    name = "dockgen",
    about = "Repository classifier and convention-based Dockerfile generator",
    version,
    author,
    long_about = "dockgen inspects a source-code checkout, infers its language, framework, \
                  and entry point from manifest files and naming conventions, and generates \
                  a Dockerfile and .dockerignore tailored to the detected stack."
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(
        short = 'v',
        long,
        global = true,
        help = "Increase verbosity (can be used multiple times)"
    )]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Quiet mode - suppress non-error output"
    )]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(
        about = "Classify a repository without writing anything",
        long_about = "Indexes the repository, runs every ecosystem detector, and prints the \
                      resulting findings (language, framework, entry point, confidence).\n\n\
                      Examples:\n  \
                      dockgen classify\n  \
                      dockgen classify /path/to/repo\n  \
                      dockgen classify --format json"
    )]
    Classify(ClassifyArgs),

    #[command(
        about = "Classify a repository and generate deployment files",
        long_about = "Runs classification, optionally refines the findings through configured \
                      AI providers, and writes a Dockerfile and .dockerignore into the \
                      repository. Existing files are never overwritten.\n\n\
                      Examples:\n  \
                      dockgen generate\n  \
                      dockgen generate /path/to/repo --refine"
    )]
    Generate(GenerateArgs),
}

#[derive(Parser, Debug, Clone)]
pub struct ClassifyArgs {
    #[arg(
        value_name = "PATH",
        help = "Path to repository (defaults to current directory)"
    )]
    pub repository_path: Option<PathBuf>,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,

    #[arg(
        short = 'o',
        long,
        value_name = "FILE",
        help = "Write output to file instead of stdout"
    )]
    pub output: Option<PathBuf>,
}

#[derive(Parser, Debug, Clone)]
pub struct GenerateArgs {
    #[arg(
        value_name = "PATH",
        help = "Path to repository (defaults to current directory)"
    )]
    pub repository_path: Option<PathBuf>,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format for the findings summary"
    )]
    pub format: OutputFormatArg,

    #[arg(long, help = "Refine findings through configured AI providers first")]
    pub refine: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormatArg {
    Json,
    Yaml,
    Human,
}

impl From<OutputFormatArg> for super::output::OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Json => super::output::OutputFormat::Json,
            OutputFormatArg::Yaml => super::output::OutputFormat::Yaml,
            OutputFormatArg::Human => super::output::OutputFormat::Human,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_args_verify() {
        CliArgs::command().debug_assert();
    }

    #[test]
    fn test_default_classify_args() {
        let args = CliArgs::parse_from(["dockgen", "classify"]);
        match args.command {
            Commands::Classify(classify_args) => {
                assert_eq!(classify_args.format, OutputFormatArg::Human);
                assert!(classify_args.repository_path.is_none());
                assert!(classify_args.output.is_none());
            }
            _ => panic!("Expected Classify command"),
        }
    }

    #[test]
    fn test_classify_with_path_and_format() {
        let args = CliArgs::parse_from(["dockgen", "classify", "/tmp/repo", "--format", "json"]);
        match args.command {
            Commands::Classify(classify_args) => {
                assert_eq!(
                    classify_args.repository_path,
                    Some(PathBuf::from("/tmp/repo"))
                );
                assert_eq!(classify_args.format, OutputFormatArg::Json);
            }
            _ => panic!("Expected Classify command"),
        }
    }

    #[test]
    fn test_generate_with_refine() {
        let args = CliArgs::parse_from(["dockgen", "generate", "/tmp/repo", "--refine"]);
        match args.command {
            Commands::Generate(generate_args) => {
                assert!(generate_args.refine);
                assert_eq!(
                    generate_args.repository_path,
                    Some(PathBuf::from("/tmp/repo"))
                );
            }
            _ => panic!("Expected Generate command"),
        }
    }

    #[test]
    fn test_global_flags() {
        let args = CliArgs::parse_from(["dockgen", "-q", "classify"]);
        assert!(args.quiet);
        assert!(!args.verbose);

        let args = CliArgs::parse_from(["dockgen", "--log-level", "debug", "classify"]);
        assert_eq!(args.log_level, Some("debug".to_string()));
    }
}
