use clap::Subcommand;

/// User commands.
#[derive(Clone, Debug, Subcommand)]
pub enum UserCommands {
    /// Create a user.
    Create {
        #[arg(long)]
        username: Option<String>,
    },
    /// Rename a user.
    Update {
        id: i64,
        #[arg(long)]
        username: Option<String>,
    },
    /// List users.
    List {
        #[arg(long)]
        search: Option<String>,
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Get a user by id.
    Get { id: i64 },
    /// Delete a user. Records they authored are kept.
    Delete { id: i64 },
}
