use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "playcop", version, about = "A fast linter for Playwright test files")]
pub struct Args {
    /// Files or directories to lint
    #[arg(default_value = ".")]
    pub paths: Vec<PathBuf>,

    /// Path to configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, default_value = "text", value_parser = ["text", "json", "github", "quiet"])]
    pub format: String,

    /// Run only the specified cops (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub only: Vec<String>,

    /// Exclude the specified cops (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub except: Vec<String>,

    /// List all registered cops with their descriptions, then exit
    #[arg(long)]
    pub list_cops: bool,

    /// Read source from stdin, use PATH for display and config matching
    #[arg(long, value_name = "PATH")]
    pub stdin: Option<PathBuf>,

    /// Apply suggested fixes and write the results back
    #[arg(short = 'a', long)]
    pub fix: bool,

    /// Enable debug output
    #[arg(long)]
    pub debug: bool,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            paths: vec![],
            config: None,
            format: "text".to_string(),
            only: vec![],
            except: vec![],
            list_cops: false,
            stdin: None,
            fix: false,
            debug: false,
        }
    }
}
