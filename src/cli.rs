use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Remove editing protection from Word documents and normalize their
/// headers and footers.
#[derive(Parser, Debug, Clone)]
#[command(name = "unlatch", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Strip protection and normalize headers/footers of each input
    Unlock(BatchArgs),

    /// Pour each input's content into the shell of a model document
    Merge {
        #[command(flatten)]
        batch: BatchArgs,

        /// Model document to merge into
        #[arg(long, conflicts_with = "template", required_unless_present = "template")]
        model: Option<PathBuf>,

        /// Id of a stored template to merge into
        #[arg(long)]
        template: Option<String>,

        /// Directory holding the template store
        #[arg(long, default_value = "templates", env = "UNLATCH_TEMPLATES_DIR")]
        templates_dir: PathBuf,
    },

    /// Copy each input's content into a blank document
    Rebuild(BatchArgs),

    /// List the templates of a template store
    Templates {
        /// Directory holding the template store
        #[arg(long, default_value = "templates", env = "UNLATCH_TEMPLATES_DIR")]
        templates_dir: PathBuf,

        /// Print the listing as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Debug, Clone)]
pub struct BatchArgs {
    /// Input .docx files; other files are skipped
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Directory the unlocked_* outputs are written to
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Write the batch report as JSON to this file
    #[arg(long)]
    pub report_json: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_unlock() {
        let cli = Cli::try_parse_from(["unlatch", "unlock", "a.docx", "b.docx", "-o", "out"]).unwrap();
        let Command::Unlock(args) = cli.command else {
            panic!("expected unlock");
        };
        assert_eq!(args.inputs, vec![PathBuf::from("a.docx"), PathBuf::from("b.docx")]);
        assert_eq!(args.output_dir, PathBuf::from("out"));
        assert!(args.report_json.is_none());
    }

    #[test]
    fn test_merge_requires_one_model_source() {
        assert!(Cli::try_parse_from(["unlatch", "merge", "a.docx"]).is_err());
        assert!(
            Cli::try_parse_from(["unlatch", "merge", "a.docx", "--model", "m.docx", "--template", "t"]).is_err()
        );

        let cli = Cli::try_parse_from([
            "unlatch",
            "merge",
            "a.docx",
            "--template",
            "b81c",
            "--templates-dir",
            "store",
        ])
        .unwrap();
        let Command::Merge {
            template,
            templates_dir,
            model,
            ..
        } = cli.command
        else {
            panic!("expected merge");
        };
        assert_eq!(template.as_deref(), Some("b81c"));
        assert_eq!(templates_dir, PathBuf::from("store"));
        assert!(model.is_none());
    }

    #[test]
    fn test_batch_needs_inputs() {
        assert!(Cli::try_parse_from(["unlatch", "rebuild"]).is_err());
    }
}
