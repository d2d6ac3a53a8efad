//! CLI argument definitions.
//!
//! Uses clap derive macros for type-safe argument parsing.

use clap::{Parser, Subcommand};

/// Job board core - token tooling and job post queries
#[derive(Parser, Debug)]
#[command(name = "job-board")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Use an empty in-memory store instead of the database
    #[arg(long, global = true, env = "JOB_BOARD_IN_MEMORY")]
    pub in_memory: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Issue or verify auth tokens
    Token(TokenArgs),

    /// Query job posts
    Jobs(JobsArgs),

    /// List catalog reference data
    Catalog(CatalogArgs),
}

/// Arguments for the token command
#[derive(Parser, Debug)]
pub struct TokenArgs {
    #[command(subcommand)]
    pub action: TokenAction,
}

#[derive(Subcommand, Debug)]
pub enum TokenAction {
    /// Print a signed token for a principal
    Issue {
        /// Principal email embedded in the token
        #[arg(long)]
        email: String,
    },
    /// Verify a token and print its claims
    Verify {
        /// Raw token, optionally prefixed with "Bearer "
        token: String,
    },
}

/// Arguments for the jobs command
#[derive(Parser, Debug)]
pub struct JobsArgs {
    #[command(subcommand)]
    pub action: JobsAction,
}

#[derive(Subcommand, Debug)]
pub enum JobsAction {
    /// List job posts matching the given criteria
    List(JobSearchArgs),
    /// Show a single job post
    Show {
        id: i32,
    },
}

/// Search criteria; every flag is optional
#[derive(Parser, Debug, Default)]
pub struct JobSearchArgs {
    /// Case-insensitive title substring
    #[arg(short, long)]
    pub q: Option<String>,

    #[arg(long)]
    pub user: Option<i32>,

    #[arg(long)]
    pub location: Option<i32>,

    #[arg(long)]
    pub category: Option<i32>,

    /// Comma separated skill ids; posts with any of them match
    #[arg(long, value_delimiter = ',')]
    pub skills: Vec<i32>,
}

/// Arguments for the catalog command
#[derive(Parser, Debug)]
pub struct CatalogArgs {
    #[command(subcommand)]
    pub kind: CatalogKind,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogKind {
    Locations,
    Categories,
    Skills,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_job_search() {
        let cli = Cli::try_parse_from([
            "job-board", "jobs", "list", "--q", "golang", "--location", "2", "--skills", "1,3",
        ])
        .unwrap();

        let Commands::Jobs(JobsArgs {
            action: JobsAction::List(search),
        }) = cli.command
        else {
            panic!("expected jobs list");
        };
        assert_eq!(search.q.as_deref(), Some("golang"));
        assert_eq!(search.location, Some(2));
        assert_eq!(search.skills, vec![1, 3]);
    }

    #[test]
    fn test_parse_token_issue() {
        let cli = Cli::try_parse_from(["job-board", "-v", "token", "issue", "--email", "a@b.com"]).unwrap();

        assert!(cli.verbose);
        assert!(matches!(
            cli.command,
            Commands::Token(TokenArgs {
                action: TokenAction::Issue { .. }
            })
        ));
    }
}
