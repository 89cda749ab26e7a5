//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};

/// Wayfarer CLI - Plan and keep track of your trips.
#[derive(Debug, Parser)]
#[command(name = "wayfarer")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "WAYFARER_CONFIG")]
    pub config: Option<String>,

    /// Profile to use
    #[arg(short, long, global = true)]
    pub profile: Option<String>,

    /// Log debug output to stderr (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (IDs only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    #[command(flatten)]
    Itinerary(ItineraryCommand),

    /// Manage configuration profiles
    Profile(ProfileArgs),
}

/// Commands that operate on the active profile's itineraries.
#[derive(Debug, Subcommand)]
pub enum ItineraryCommand {
    /// List itineraries
    List(ListArgs),

    /// Show one itinerary in full
    Show(ShowArgs),

    /// Create a new itinerary
    Create(CreateArgs),

    /// Delete an itinerary
    Delete(DeleteArgs),

    /// Toggle the favorite flag of an itinerary
    Favorite(FavoriteArgs),

    /// Ask the AI for more places to visit on a trip
    Suggest(SuggestArgs),
}

/// Arguments for the list command.
#[derive(Debug, Parser)]
pub struct ListArgs {
    /// Only show favorites
    #[arg(long)]
    pub favorites: bool,

    /// Case-insensitive search over title, destination and categories
    #[arg(short, long)]
    pub search: Option<String>,
}

/// Arguments for the show command.
#[derive(Debug, Parser)]
pub struct ShowArgs {
    /// Itinerary ID
    pub id: String,
}

/// Arguments for the create command.
#[derive(Debug, Parser)]
pub struct CreateArgs {
    /// JSON file containing the itinerary draft
    #[arg(long, conflicts_with_all = ["title", "destination", "start", "end", "category", "description", "photo", "activity"])]
    pub file: Option<String>,

    /// Trip title
    #[arg(short, long)]
    pub title: Option<String>,

    /// Destination (e.g., "Interlaken, Switzerland")
    #[arg(short, long)]
    pub destination: Option<String>,

    /// Start date (YYYY-MM-DD)
    #[arg(long)]
    pub start: Option<String>,

    /// End date (YYYY-MM-DD)
    #[arg(long)]
    pub end: Option<String>,

    /// Category tag (repeatable)
    #[arg(long = "category")]
    pub category: Vec<String>,

    /// Longer description of the trip
    #[arg(long)]
    pub description: Option<String>,

    /// Cover photo URL
    #[arg(long)]
    pub photo: Option<String>,

    /// Planned activity as "day|name|lat|lng" (repeatable)
    #[arg(short, long = "activity")]
    pub activity: Vec<String>,
}

/// Arguments for the delete command.
#[derive(Debug, Parser)]
pub struct DeleteArgs {
    /// Itinerary ID
    pub id: String,

    /// Skip confirmation prompt
    #[arg(short = 'y', long)]
    pub yes: bool,
}

/// Arguments for the favorite command.
#[derive(Debug, Parser)]
pub struct FavoriteArgs {
    /// Itinerary ID
    pub id: String,
}

/// Arguments for the suggest command.
#[derive(Debug, Parser)]
pub struct SuggestArgs {
    /// Itinerary ID
    pub id: String,

    /// Print one cleaned paragraph instead of a list
    #[arg(long)]
    pub plain: bool,

    /// Model to use instead of the configured one
    #[arg(short, long)]
    pub model: Option<String>,
}

/// Arguments for profile management.
#[derive(Debug, Parser)]
pub struct ProfileArgs {
    #[command(subcommand)]
    pub action: ProfileAction,
}

/// Profile management actions.
#[derive(Debug, Subcommand)]
pub enum ProfileAction {
    /// List all profiles
    List,

    /// Show active profile
    Show,

    /// Switch to a different profile
    Switch {
        /// Profile name
        name: String,
    },

    /// Create or update a profile
    Set {
        /// Profile name
        name: String,
        /// SQLite database file
        #[arg(short, long)]
        database: String,
        /// User the profile signs in as
        #[arg(short, long)]
        user: String,
    },

    /// Delete a profile
    Delete {
        /// Profile name
        name: String,
    },
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_command() {
        let cli = Cli::parse_from(["wayfarer", "list", "--favorites", "--search", "alps"]);
        match cli.command {
            Command::Itinerary(ItineraryCommand::List(args)) => {
                assert!(args.favorites);
                assert_eq!(args.search.as_deref(), Some("alps"));
            }
            _ => panic!("Expected List command"),
        }
    }

    #[test]
    fn test_create_command_with_flags() {
        let cli = Cli::parse_from([
            "wayfarer",
            "--format",
            "json",
            "create",
            "--title",
            "Summer in the Alps",
            "--category",
            "Adventure",
            "--category",
            "Leisure",
            "--activity",
            "1|Harder Kulm|46.69|7.86",
        ]);
        assert!(matches!(cli.format, Some(CliFormat::Json)));
        match cli.command {
            Command::Itinerary(ItineraryCommand::Create(args)) => {
                assert_eq!(args.category, vec!["Adventure", "Leisure"]);
                assert_eq!(args.activity.len(), 1);
                assert!(args.file.is_none());
            }
            _ => panic!("Expected Create command"),
        }
    }

    #[test]
    fn test_create_file_conflicts_with_flags() {
        let result = Cli::try_parse_from([
            "wayfarer", "create", "--file", "draft.json", "--title", "Trip",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_profile_set_command() {
        let cli = Cli::parse_from([
            "wayfarer", "profile", "set", "work", "--database", "/tmp/work.db", "--user", "bob",
        ]);
        match cli.command {
            Command::Profile(ProfileArgs {
                action: ProfileAction::Set { name, database, user },
            }) => {
                assert_eq!(name, "work");
                assert_eq!(database, "/tmp/work.db");
                assert_eq!(user, "bob");
            }
            _ => panic!("Expected Profile Set command"),
        }
    }

    #[test]
    fn test_profile_is_not_an_itinerary_command() {
        let cli = Cli::parse_from(["wayfarer", "profile", "list"]);
        assert!(matches!(cli.command, Command::Profile(_)));

        let cli = Cli::parse_from(["wayfarer", "favorite", "42"]);
        assert!(matches!(
            cli.command,
            Command::Itinerary(ItineraryCommand::Favorite(_))
        ));
    }

    #[test]
    fn test_missing_command_is_an_error() {
        assert!(Cli::try_parse_from(["wayfarer"]).is_err());
    }
}
