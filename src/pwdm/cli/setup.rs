use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Returns the version string, including git hash and commit date for non-release builds.
/// Format: "0.3.2" for releases, "0.3.2@abc1234 2024-01-15" for dev builds
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

#[derive(Parser, Debug)]
#[command(name = "pwdm", bin_name = "pwdm", version = get_version())]
#[command(
    about = "Generate passwords and keep them in a plain text file",
    long_about = "Generate passwords and keep them in a plain text file.\n\n\
                  Run without arguments for the interactive menu."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub quick: QuickFlags,

    /// Database file to use
    #[arg(long, global = true, value_name = "PATH", help_heading = "Options")]
    pub db: Option<PathBuf>,

    /// Debug logging on stderr
    #[arg(long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

/// One-shot operations that prompt for their inputs.
#[derive(Args, Debug, Default, Clone, Copy)]
#[group(multiple = false)]
pub struct QuickFlags {
    /// Add a new password
    #[arg(short = 'a', help_heading = "Quick actions")]
    pub add: bool,

    /// Get a password
    #[arg(short = 'g', help_heading = "Quick actions")]
    pub get: bool,

    /// Delete a password
    #[arg(short = 'd', help_heading = "Quick actions")]
    pub delete: bool,

    /// View all the passwords
    #[arg(short = 'v', help_heading = "Quick actions")]
    pub view: bool,
}

impl QuickFlags {
    pub fn any(&self) -> bool {
        self.add || self.get || self.delete || self.view
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a password for an account and store it
    #[command(alias = "new", display_order = 1)]
    Add {
        /// Account name (prompted if omitted)
        account: Option<String>,

        /// Length of the generated password
        #[arg(short, long)]
        length: Option<String>,

        /// Store this password instead of generating one
        #[arg(long, conflicts_with = "length")]
        password: Option<String>,

        /// Accept the first generated password
        #[arg(long, short = 'y')]
        yes: bool,

        /// Replace the password of an existing account
        #[arg(long)]
        force: bool,
    },

    /// Get a stored password and copy it to the clipboard
    #[command(display_order = 2)]
    Get {
        account: String,

        /// Print only, do not touch the clipboard
        #[arg(long)]
        no_clip: bool,
    },

    /// Delete a stored password
    #[command(alias = "rm", display_order = 3)]
    Delete {
        account: String,

        /// Skip confirmation
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// View all stored passwords
    #[command(alias = "ls", display_order = 4)]
    View,

    /// Print a fresh password without storing it
    #[command(alias = "gen", display_order = 5)]
    Generate {
        /// Length of the password
        length: Option<String>,

        /// Also copy it to the clipboard
        #[arg(long)]
        clip: bool,
    },

    /// Check the database for malformed lines and repeated accounts
    #[command(display_order = 10)]
    Doctor {
        /// Remove the problem lines
        #[arg(long)]
        fix: bool,
    },

    /// Create an empty database
    #[command(display_order = 11)]
    Init,

    /// Print the database path
    #[command(display_order = 12)]
    Path,

    /// Get or set configuration
    #[command(display_order = 13)]
    Config {
        /// Configuration key (database, length, clipboard)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}
