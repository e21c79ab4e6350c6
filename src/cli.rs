use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pdfsplice")]
#[command(about = "Delete, merge and insert PDF pages, with MCP server support")]
#[command(version)]
pub struct Cli {
    /// Log more (-v info, -vv debug); RUST_LOG takes precedence
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run as MCP server
    Mcp,

    /// Remove pages from a PDF
    #[command(alias = "rm")]
    Delete {
        /// PDF file to delete pages from
        path: PathBuf,

        /// Pages to delete, 1-based (e.g., "1, 3, 5-8")
        #[arg(allow_hyphen_values = true)]
        pages: String,

        /// Output file [default: <name>_deleted.pdf next to the input]
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Combine multiple PDFs into one, in the order given
    #[command(alias = "cat")]
    Merge {
        /// PDF files to merge
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Output file [default: merged_document.pdf next to the first input]
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Insert all pages of one PDF into another
    Insert {
        /// PDF file to insert into
        base: PathBuf,

        /// PDF file whose pages are inserted
        injected: PathBuf,

        /// Page number the first inserted page will have (1 = front,
        /// page count + 1 = end)
        #[arg(allow_hyphen_values = true)]
        position: String,

        /// Output file [default: <base>_inserted.pdf next to the base]
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_delete_accepts_leading_hyphen() {
        let cli = Cli::try_parse_from(["pdfsplice", "delete", "a.pdf", "-3"]).unwrap();
        match cli.command {
            Commands::Delete { pages, output, .. } => {
                assert_eq!(pages, "-3");
                assert!(output.is_none());
            }
            _ => panic!("expected delete"),
        }
    }

    #[test]
    fn test_merge_keeps_argument_order() {
        let cli =
            Cli::try_parse_from(["pdfsplice", "-v", "merge", "b.pdf", "a.pdf", "-o", "out.pdf"])
                .unwrap();
        assert_eq!(cli.verbose, 1);
        match cli.command {
            Commands::Merge { inputs, output } => {
                assert_eq!(inputs, vec![PathBuf::from("b.pdf"), PathBuf::from("a.pdf")]);
                assert_eq!(output, Some(PathBuf::from("out.pdf")));
            }
            _ => panic!("expected merge"),
        }
    }

    #[test]
    fn test_insert_arguments() {
        let cli = Cli::try_parse_from(["pdfsplice", "insert", "base.pdf", "new.pdf", "2"]).unwrap();
        match cli.command {
            Commands::Insert {
                base,
                injected,
                position,
                ..
            } => {
                assert_eq!(base, PathBuf::from("base.pdf"));
                assert_eq!(injected, PathBuf::from("new.pdf"));
                assert_eq!(position, "2");
            }
            _ => panic!("expected insert"),
        }
    }
}
