use crate::config::{
    SiteConfig,
    DEFAULT_CHESS_API_URL,
    DEFAULT_CHESS_USER,
    DEFAULT_GITHUB_API_URL,
    DEFAULT_GITHUB_USER,
    DEFAULT_MAX_PROJECTS,
};
use crate::error::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "portfolio-server")]
#[command(about = "Portfolio Server - Serves a personal portfolio with live GitHub projects and Chess.com ratings")]
#[command(version = "0.1.0")]
pub struct Cli {
    /// GitHub account whose profile and repositories are shown
    #[arg(long, env = "GITHUB_USER", default_value = DEFAULT_GITHUB_USER)]
    pub github_user: String,

    /// Chess.com account whose ratings are shown
    #[arg(long, env = "CHESS_USER", default_value = DEFAULT_CHESS_USER)]
    pub chess_user: String,

    /// GitHub REST API base URL
    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_GITHUB_API_URL)]
    pub github_api_url: String,

    /// Chess.com published-data API base URL
    #[arg(long, env = "CHESS_API_URL", default_value = DEFAULT_CHESS_API_URL)]
    pub chess_api_url: String,

    /// Maximum number of featured projects (0 shows all)
    #[arg(long, env = "MAX_PROJECTS", default_value_t = DEFAULT_MAX_PROJECTS)]
    pub max_projects: usize,

    /// Per-request timeout in seconds (none by default)
    #[arg(long, env = "REQUEST_TIMEOUT")]
    pub request_timeout: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Serve the portfolio over HTTP
    Serve {
        /// Port to listen on
        #[arg(long, env = "PORT", default_value_t = 8080)]
        port: u16,
    },
    /// Fetch once and write the rendered portfolio
    Render {
        /// Output file (stdout when omitted)
        #[arg(long, short)]
        output: Option<PathBuf>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Html)]
        format: OutputFormat,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Html,
    Json,
}

impl Cli {
    pub fn site_config(&self) -> Result<SiteConfig> {
        let mut site = SiteConfig::new(
            self.github_user.clone(),
            self.chess_user.clone(),
            &self.github_api_url,
            &self.chess_api_url,
        )?;
        site.request_timeout = self.request_timeout.map(Duration::from_secs);
        Ok(site)
    }

    pub fn max_curated(&self) -> Option<usize> {
        if self.max_projects == 0 {
            None
        } else {
            Some(self.max_projects)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["portfolio-server", "serve"]).unwrap();
        assert_eq!(cli.max_curated(), Some(DEFAULT_MAX_PROJECTS));
        assert!(matches!(cli.command, Command::Serve { .. }));
        let site = cli.site_config().unwrap();
        assert!(site.request_timeout.is_none());
    }

    #[test]
    fn test_zero_max_projects_is_uncapped() {
        let cli = Cli::try_parse_from([
            "portfolio-server",
            "--max-projects",
            "0",
            "--request-timeout",
            "10",
            "render",
            "--format",
            "json",
        ])
        .unwrap();
        assert_eq!(cli.max_curated(), None);
        assert_eq!(cli.site_config().unwrap().request_timeout, Some(Duration::from_secs(10)));
        match cli.command {
            Command::Render { output, format } => {
                assert!(output.is_none());
                assert_eq!(format, OutputFormat::Json);
            }
            _ => panic!("Expected render command"),
        }
    }
}
