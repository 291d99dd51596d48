use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "jot", about = concat!("[=] jot v", env!("CARGO_PKG_VERSION"), " - your notes are local first"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Run against a different store directory
    #[arg(short = 'C', long = "store-dir", global = true)]
    pub store_dir: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the note store
    Init(InitArgs),
    /// Add a note
    Add(AddArgs),
    /// List notes
    List(ListArgs),
    /// Show a note in full
    Show(ShowArgs),
    /// Edit a note's title or content
    Edit(EditArgs),
    /// Set or clear a note's color tag
    Color(ColorArgs),
    /// Toggle favorite
    Fav(IdArg),
    /// Toggle hidden
    Hide(IdArg),
    /// Checklist item operations
    Item(ItemCmd),
    /// Set or clear a task's due date
    Due(DueArgs),
    /// Set a task's priority
    Priority(PriorityArgs),
    /// Set or clear a task's reminder
    Remind(RemindArgs),
    /// Set a task's repeat interval
    Repeat(RepeatArgs),
    /// Set or clear a task's location
    Location(LocationArgs),
    /// Toggle task completion
    Done(IdArg),
    /// Move a note to the trash
    Delete(IdArg),
    /// Trash management
    Trash(TrashCmd),
    /// Search notes by regex
    Search(SearchArgs),
    /// Show tasks by due date
    Agenda(AgendaArgs),
    /// Show store statistics
    Stats,
    /// Write a backup file
    Export(ExportArgs),
    /// Merge a backup file into the store
    Import(ImportArgs),
    /// Remote synchronization
    Sync(SyncCmd),
    /// View or edit configuration
    Config(ConfigCmd),
}

// ---------------------------------------------------------------------------
// Shared args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct IdArg {
    /// Note id (or unique prefix)
    pub id: String,
}

// ---------------------------------------------------------------------------
// Init / add
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct InitArgs {
    /// Reinitialize even if the store already exists
    #[arg(long)]
    pub force: bool,
}

#[derive(Args)]
pub struct AddArgs {
    /// Note title
    pub title: String,
    /// Note body
    #[arg(long, default_value = "")]
    pub content: String,
    /// Create a checklist note
    #[arg(long, conflicts_with = "task")]
    pub checklist: bool,
    /// Create a task note
    #[arg(long)]
    pub task: bool,
    /// Color tag
    #[arg(long)]
    pub color: Option<String>,
    /// Mark as favorite
    #[arg(long)]
    pub fav: bool,
}

// ---------------------------------------------------------------------------
// Read command args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct ListArgs {
    /// Filter by kind (text, checklist, task)
    #[arg(long)]
    pub kind: Option<String>,
    /// Filter by color tag
    #[arg(long)]
    pub color: Option<String>,
    /// Favorites only
    #[arg(long)]
    pub favorites: bool,
    /// Include hidden notes
    #[arg(long)]
    pub hidden: bool,
    /// Case-insensitive substring filter over title and content
    #[arg(long)]
    pub query: Option<String>,
    /// Only notes updated on or after this date
    #[arg(long)]
    pub since: Option<String>,
    /// Only notes updated before this date
    #[arg(long)]
    pub until: Option<String>,
    /// Sort order (updated, created, title, due)
    #[arg(long, default_value = "updated")]
    pub sort: String,
    /// List the trash instead of active notes
    #[arg(long)]
    pub trash: bool,
}

#[derive(Args)]
pub struct ShowArgs {
    /// Note id (or unique prefix)
    pub id: String,
}

#[derive(Args)]
pub struct SearchArgs {
    /// Regex pattern
    pub pattern: String,
    /// Search the trash instead of active notes
    #[arg(long)]
    pub trash: bool,
    /// Include hidden notes
    #[arg(long)]
    pub hidden: bool,
}

#[derive(Args)]
pub struct AgendaArgs {
    /// Start date (default: today)
    #[arg(long)]
    pub from: Option<String>,
    /// End date, exclusive (default: from + days)
    #[arg(long)]
    pub to: Option<String>,
    /// Window length in days when --to is absent
    #[arg(long, default_value_t = 7)]
    pub days: u32,
    /// Include completed tasks
    #[arg(long)]
    pub done: bool,
}

// ---------------------------------------------------------------------------
// Write command args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct EditArgs {
    /// Note id (or unique prefix)
    pub id: String,
    /// New title
    #[arg(long)]
    pub title: Option<String>,
    /// New content
    #[arg(long)]
    pub content: Option<String>,
}

#[derive(Args)]
pub struct ColorArgs {
    /// Note id (or unique prefix)
    pub id: String,
    /// Color tag to set
    #[arg(required_unless_present = "clear")]
    pub color: Option<String>,
    /// Remove the color tag
    #[arg(long)]
    pub clear: bool,
}

#[derive(Args)]
pub struct ItemCmd {
    #[command(subcommand)]
    pub command: ItemCommands,
}

#[derive(Subcommand)]
pub enum ItemCommands {
    /// Append a checklist item
    Add {
        /// Note id (or unique prefix)
        id: String,
        /// Item text
        text: String,
    },
    /// Toggle a checklist item
    Toggle {
        /// Note id (or unique prefix)
        id: String,
        /// Item index (as shown by `jot show`)
        index: usize,
    },
    /// Remove a checklist item
    Remove {
        /// Note id (or unique prefix)
        id: String,
        /// Item index (as shown by `jot show`)
        index: usize,
    },
}

#[derive(Args)]
pub struct DueArgs {
    /// Note id (or unique prefix)
    pub id: String,
    /// Due date (today, tomorrow, YYYY-MM-DD, or "YYYY-MM-DD HH:MM")
    #[arg(required_unless_present = "clear")]
    pub when: Option<String>,
    /// Remove the due date
    #[arg(long)]
    pub clear: bool,
}

#[derive(Args)]
pub struct PriorityArgs {
    /// Note id (or unique prefix)
    pub id: String,
    /// Priority (low, medium, high)
    pub level: String,
}

#[derive(Args)]
pub struct RemindArgs {
    /// Note id (or unique prefix)
    pub id: String,
    /// Reminder time (same formats as due dates)
    #[arg(required_unless_present = "clear")]
    pub when: Option<String>,
    /// Remove the reminder
    #[arg(long)]
    pub clear: bool,
}

#[derive(Args)]
pub struct RepeatArgs {
    /// Note id (or unique prefix)
    pub id: String,
    /// Repeat interval (none, daily, weekly, monthly, yearly)
    pub every: String,
}

#[derive(Args)]
pub struct LocationArgs {
    /// Note id (or unique prefix)
    pub id: String,
    /// Location text
    #[arg(required_unless_present = "clear")]
    pub place: Option<String>,
    /// Remove the location
    #[arg(long)]
    pub clear: bool,
}

// ---------------------------------------------------------------------------
// Trash
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct TrashCmd {
    #[command(subcommand)]
    pub command: TrashCommands,
}

#[derive(Subcommand)]
pub enum TrashCommands {
    /// List trashed notes
    List,
    /// Restore a trashed note
    Restore {
        /// Note id (or unique prefix)
        id: String,
    },
    /// Purge trashed notes past the retention window
    Purge {
        /// Override the configured retention window
        #[arg(long)]
        days: Option<u32>,
    },
    /// Permanently delete everything in the trash
    Empty,
}

// ---------------------------------------------------------------------------
// Backup
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct ExportArgs {
    /// Output path (default: stdout)
    pub path: Option<String>,
}

#[derive(Args)]
pub struct ImportArgs {
    /// Backup file to merge
    pub path: String,
}

// ---------------------------------------------------------------------------
// Sync / config
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct SyncCmd {
    #[command(subcommand)]
    pub command: SyncCommands,
}

#[derive(Subcommand)]
pub enum SyncCommands {
    /// Run one sync pass
    Now,
    /// Show sync state
    Status,
    /// Run the sync daemon (interval + change-triggered pushes)
    Watch,
}

#[derive(Args)]
pub struct ConfigCmd {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print a config value (e.g. trash.retention_days)
    Get { key: String },
    /// Set a config value, preserving file formatting
    Set { key: String, value: String },
    /// Print the store directory path
    Path,
}
