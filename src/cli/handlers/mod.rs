mod init;
pub use init::cmd_init;

use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Duration, Local, Utc};
use regex::Regex;

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::config_io;
use crate::io::lock::StoreLock;
use crate::io::store::{self, Store};
use crate::model::config::Config;
use crate::model::filter::{Filter, SortKey};
use crate::model::note::NoteKind;
use crate::model::task::{Priority, Repeat};
use crate::ops::task_ops::DoneResult;
use crate::ops::{import, note_ops, query, search, task_ops, trash};
use crate::sync::remote::HttpRemote;
use crate::sync::{daemon, engine};
use crate::util::when::parse_when;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn Error>> {
    let json = cli.json;
    let dir = store::store_dir(cli.store_dir.as_deref().map(Path::new));

    match cli.command {
        Commands::Init(args) => cmd_init(&dir, args),

        // Read commands
        Commands::List(args) => cmd_list(&dir, args, json),
        Commands::Show(args) => cmd_show(&dir, args, json),
        Commands::Search(args) => cmd_search(&dir, args, json),
        Commands::Agenda(args) => cmd_agenda(&dir, args, json),
        Commands::Stats => cmd_stats(&dir, json),

        // Write commands
        Commands::Add(args) => cmd_add(&dir, args, json),
        Commands::Edit(args) => cmd_edit(&dir, args),
        Commands::Color(args) => cmd_color(&dir, args),
        Commands::Fav(args) => cmd_fav(&dir, args),
        Commands::Hide(args) => cmd_hide(&dir, args),
        Commands::Item(args) => cmd_item(&dir, args),
        Commands::Due(args) => cmd_due(&dir, args),
        Commands::Priority(args) => cmd_priority(&dir, args),
        Commands::Remind(args) => cmd_remind(&dir, args),
        Commands::Repeat(args) => cmd_repeat(&dir, args),
        Commands::Location(args) => cmd_location(&dir, args),
        Commands::Done(args) => cmd_done(&dir, args),
        Commands::Delete(args) => cmd_delete(&dir, args),
        Commands::Trash(args) => cmd_trash(&dir, args, json),

        // Backup
        Commands::Export(args) => cmd_export(&dir, args),
        Commands::Import(args) => cmd_import(&dir, args, json),

        // Sync / config
        Commands::Sync(args) => cmd_sync(&dir, args, json),
        Commands::Config(args) => cmd_config(&dir, args),
    }
}

// ---------------------------------------------------------------------------
// Store access helpers
// ---------------------------------------------------------------------------

/// Load the store, applying trash retention if configured.
///
/// Read-only callers drop the in-memory purge on exit; it reapplies (and
/// persists) on the next write or daemon pass.
fn open_store(dir: &Path, config: &Config) -> Result<Store, Box<dyn Error>> {
    let mut store = Store::load(dir)?;
    if config.trash.auto_purge {
        trash::purge_expired(&mut store, config.trash.retention_days);
    }
    Ok(store)
}

/// Lock, load, and purge in one step for mutating handlers.
fn open_locked(dir: &Path) -> Result<(StoreLock, Store), Box<dyn Error>> {
    if !dir.is_dir() {
        return Err(store::StoreError::NotAStore(dir.to_path_buf()).into());
    }
    let config = config_io::read_config(dir)?;
    let lock = StoreLock::acquire_default(dir)?;
    let store = open_store(dir, &config)?;
    Ok((lock, store))
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

fn cmd_list(dir: &Path, args: ListArgs, json: bool) -> Result<(), Box<dyn Error>> {
    let config = config_io::read_config(dir)?;
    let store = open_store(dir, &config)?;

    if args.trash {
        let trashed = query::list_trash(&store.notes);
        if json {
            let out = NoteListJson {
                notes: trashed.iter().map(|n| NoteJson::from_note(n)).collect(),
            };
            println!("{}", serde_json::to_string_pretty(&out)?);
        } else if trashed.is_empty() {
            println!("trash is empty");
        } else {
            for note in trashed {
                println!("{}", note_line(note));
            }
        }
        return Ok(());
    }

    let kind = match args.kind.as_deref() {
        Some(s) => Some(
            NoteKind::parse(s).ok_or_else(|| format!("unknown kind \"{}\"", s))?,
        ),
        None => None,
    };
    let sort = SortKey::parse(&args.sort)
        .ok_or_else(|| format!("unknown sort \"{}\"", args.sort))?;
    let updated_after = parse_date_flag(args.since.as_deref(), "--since")?;
    let updated_before = parse_date_flag(args.until.as_deref(), "--until")?;

    let filter = Filter {
        query: args.query,
        kind,
        color: args.color,
        favorite: if args.favorites { Some(true) } else { None },
        include_hidden: args.hidden,
        updated_after,
        updated_before,
        sort,
    };

    let listed = query::list_notes(&store.notes, &filter);
    if json {
        let out = NoteListJson {
            notes: listed.iter().map(|n| NoteJson::from_note(n)).collect(),
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else if listed.is_empty() {
        println!("no notes");
    } else {
        for note in listed {
            println!("{}", note_line(note));
        }
    }
    Ok(())
}

fn parse_date_flag(
    value: Option<&str>,
    flag: &str,
) -> Result<Option<chrono::DateTime<Utc>>, Box<dyn Error>> {
    match value {
        None => Ok(None),
        Some(s) => parse_when(s)
            .map(Some)
            .ok_or_else(|| format!("invalid date for {}: \"{}\"", flag, s).into()),
    }
}

/// Resolve a when/--clear argument pair into the value to store.
/// Clap guarantees `value` is present whenever `clear` is false.
fn parse_when_flag(
    value: Option<&str>,
    clear: bool,
) -> Result<Option<chrono::DateTime<Utc>>, Box<dyn Error>> {
    if clear {
        return Ok(None);
    }
    match value {
        Some(s) => parse_when(s)
            .map(Some)
            .ok_or_else(|| format!("invalid date: \"{}\"", s).into()),
        None => Ok(None),
    }
}

fn cmd_show(dir: &Path, args: ShowArgs, json: bool) -> Result<(), Box<dyn Error>> {
    let config = config_io::read_config(dir)?;
    let store = open_store(dir, &config)?;
    let id = note_ops::resolve_id(&store.notes, &args.id)?;
    let note = &store.notes[&id];

    if json {
        println!("{}", serde_json::to_string_pretty(&NoteJson::from_note(note))?);
        return Ok(());
    }

    println!("{}  [{}]", note.id, note.kind.label());
    println!("{}", note.title);
    if !note.content.is_empty() {
        println!();
        println!("{}", note.content);
    }
    if !note.items.is_empty() {
        println!();
        for (index, item) in note.items.iter().enumerate() {
            println!(
                "  {}. [{}] {}",
                index,
                if item.done { "x" } else { " " },
                item.text
            );
        }
    }
    if let Some(s) = &note.schedule {
        println!();
        if let Some(due) = s.due_at {
            println!("due:      {}", due.with_timezone(&Local).format("%Y-%m-%d %H:%M"));
        }
        println!("priority: {}", s.priority.label());
        if let Some(reminder) = s.reminder_at {
            println!(
                "remind:   {}",
                reminder.with_timezone(&Local).format("%Y-%m-%d %H:%M")
            );
        }
        if s.repeat != Repeat::None {
            println!("repeat:   {}", s.repeat.label());
        }
        if let Some(location) = &s.location {
            println!("location: {}", location);
        }
    }
    println!();
    let mut flags = Vec::new();
    if note.favorite {
        flags.push("favorite");
    }
    if note.hidden {
        flags.push("hidden");
    }
    if note.done {
        flags.push("done");
    }
    if note.deleted {
        flags.push("trashed");
    }
    if !flags.is_empty() {
        println!("flags:   {}", flags.join(", "));
    }
    if let Some(color) = &note.color {
        println!("color:   {}", color);
    }
    println!("created: {}", note.created_at.with_timezone(&Local).format("%Y-%m-%d %H:%M"));
    println!("updated: {}", note.updated_at.with_timezone(&Local).format("%Y-%m-%d %H:%M"));
    println!("synced:  {}", if note.synced { "yes" } else { "no" });
    Ok(())
}

fn cmd_search(dir: &Path, args: SearchArgs, json: bool) -> Result<(), Box<dyn Error>> {
    let config = config_io::read_config(dir)?;
    let store = open_store(dir, &config)?;
    let re = Regex::new(&args.pattern)?;

    let hits = search::search_notes(&store.notes, &re, args.trash, args.hidden);
    if json {
        let out: Vec<SearchHitJson> = hits
            .iter()
            .map(|hit| SearchHitJson::from_hit(hit, &store.notes[&hit.note_id].title))
            .collect();
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    if hits.is_empty() {
        println!("no matches");
        return Ok(());
    }
    for hit in &hits {
        println!(
            "{}  {}: {}",
            short_id(&hit.note_id),
            hit.field.label(),
            highlight(&hit.text, &hit.spans)
        );
    }
    Ok(())
}

/// Wrap match spans in brackets for terminal output.
fn highlight(text: &str, spans: &[std::ops::Range<usize>]) -> String {
    let mut out = String::new();
    let mut pos = 0;
    for span in spans {
        out.push_str(&text[pos..span.start]);
        out.push('[');
        out.push_str(&text[span.clone()]);
        out.push(']');
        pos = span.end;
    }
    out.push_str(&text[pos..]);
    out
}

fn cmd_agenda(dir: &Path, args: AgendaArgs, json: bool) -> Result<(), Box<dyn Error>> {
    let config = config_io::read_config(dir)?;
    let store = open_store(dir, &config)?;

    let from = match args.from.as_deref() {
        Some(s) => parse_when(s).ok_or_else(|| format!("invalid date for --from: \"{}\"", s))?,
        None => parse_when("today").unwrap_or_else(Utc::now),
    };
    let to = match args.to.as_deref() {
        Some(s) => parse_when(s).ok_or_else(|| format!("invalid date for --to: \"{}\"", s))?,
        None => from + Duration::days(args.days as i64),
    };

    let agenda = query::agenda(&store.notes, from, to, args.done);

    if json {
        let out = AgendaJson {
            overdue: agenda
                .overdue
                .iter()
                .map(|n| NoteJson::from_note(n))
                .collect(),
            days: agenda
                .days
                .iter()
                .map(|day| AgendaDayJson {
                    date: day.date.to_string(),
                    notes: day.notes.iter().map(|n| NoteJson::from_note(n)).collect(),
                })
                .collect(),
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    if agenda.overdue.is_empty() && agenda.days.is_empty() {
        println!("nothing scheduled");
        return Ok(());
    }
    if !agenda.overdue.is_empty() {
        println!("overdue:");
        for note in &agenda.overdue {
            println!("  {}", note_line(note));
        }
    }
    for day in &agenda.days {
        println!("{}:", day.date.format("%a %Y-%m-%d"));
        for note in &day.notes {
            let time = note
                .schedule
                .as_ref()
                .and_then(|s| s.due_at)
                .map(|d| d.with_timezone(&Local).format("%H:%M").to_string())
                .unwrap_or_default();
            println!("  {}  {} {}", time, short_id(&note.id), note.title);
        }
    }
    Ok(())
}

fn cmd_stats(dir: &Path, json: bool) -> Result<(), Box<dyn Error>> {
    let config = config_io::read_config(dir)?;
    let store = open_store(dir, &config)?;
    let stats = query::stats(&store.notes);

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&StatsJson::from_stats(&stats))?
        );
        return Ok(());
    }

    println!("notes:      {}", stats.total_active());
    println!("  text:      {}", stats.text);
    println!("  checklist: {}", stats.checklist);
    println!("  task:      {} ({} open, {} done)", stats.task, stats.tasks_open, stats.tasks_done);
    println!("favorites:  {}", stats.favorites);
    println!("hidden:     {}", stats.hidden);
    println!("trash:      {}", stats.trashed);
    println!("unsynced:   {}", stats.unsynced);
    Ok(())
}

// ---------------------------------------------------------------------------
// Write commands
// ---------------------------------------------------------------------------

fn cmd_add(dir: &Path, args: AddArgs, json: bool) -> Result<(), Box<dyn Error>> {
    let kind = if args.checklist {
        NoteKind::Checklist
    } else if args.task {
        NoteKind::Task
    } else {
        NoteKind::Text
    };

    let (_lock, mut store) = open_locked(dir)?;
    let id = note_ops::create_note(
        &mut store.notes,
        kind,
        args.title,
        args.content,
        args.color,
        args.fav,
    );
    store.save()?;

    if json {
        println!("{}", serde_json::json!({ "id": id }));
    } else {
        println!("added {} ({})", short_id(&id), kind.label());
    }
    Ok(())
}

fn cmd_edit(dir: &Path, args: EditArgs) -> Result<(), Box<dyn Error>> {
    if args.title.is_none() && args.content.is_none() {
        return Err("nothing to change: pass --title and/or --content".into());
    }
    let (_lock, mut store) = open_locked(dir)?;
    note_ops::edit_note(&mut store.notes, &args.id, args.title, args.content)?;
    store.save()?;
    println!("updated {}", args.id);
    Ok(())
}

fn cmd_color(dir: &Path, args: ColorArgs) -> Result<(), Box<dyn Error>> {
    let (_lock, mut store) = open_locked(dir)?;
    let color = if args.clear { None } else { args.color };
    let cleared = color.is_none();
    note_ops::set_color(&mut store.notes, &args.id, color)?;
    store.save()?;
    if cleared {
        println!("cleared color on {}", args.id);
    } else {
        println!("colored {}", args.id);
    }
    Ok(())
}

fn cmd_fav(dir: &Path, args: IdArg) -> Result<(), Box<dyn Error>> {
    let (_lock, mut store) = open_locked(dir)?;
    let on = note_ops::toggle_favorite(&mut store.notes, &args.id)?;
    store.save()?;
    println!("{} {}", if on { "favorited" } else { "unfavorited" }, args.id);
    Ok(())
}

fn cmd_hide(dir: &Path, args: IdArg) -> Result<(), Box<dyn Error>> {
    let (_lock, mut store) = open_locked(dir)?;
    let on = note_ops::toggle_hidden(&mut store.notes, &args.id)?;
    store.save()?;
    println!("{} {}", if on { "hid" } else { "unhid" }, args.id);
    Ok(())
}

fn cmd_item(dir: &Path, args: ItemCmd) -> Result<(), Box<dyn Error>> {
    let (_lock, mut store) = open_locked(dir)?;
    match args.command {
        ItemCommands::Add { id, text } => {
            let index = note_ops::add_item(&mut store.notes, &id, text)?;
            store.save()?;
            println!("added item {} to {}", index, id);
        }
        ItemCommands::Toggle { id, index } => {
            let done = note_ops::toggle_item(&mut store.notes, &id, index)?;
            store.save()?;
            println!(
                "item {} {}",
                index,
                if done { "checked" } else { "unchecked" }
            );
        }
        ItemCommands::Remove { id, index } => {
            let text = note_ops::remove_item(&mut store.notes, &id, index)?;
            store.save()?;
            println!("removed item {}: {}", index, text);
        }
    }
    Ok(())
}

fn cmd_due(dir: &Path, args: DueArgs) -> Result<(), Box<dyn Error>> {
    let due = parse_when_flag(args.when.as_deref(), args.clear)?;
    let (_lock, mut store) = open_locked(dir)?;
    task_ops::set_due(&mut store.notes, &args.id, due)?;
    store.save()?;
    match due {
        Some(at) => println!(
            "due {} for {}",
            at.with_timezone(&Local).format("%Y-%m-%d %H:%M"),
            args.id
        ),
        None => println!("cleared due date on {}", args.id),
    }
    Ok(())
}

fn cmd_priority(dir: &Path, args: PriorityArgs) -> Result<(), Box<dyn Error>> {
    let priority = Priority::parse(&args.level)
        .ok_or_else(|| format!("unknown priority \"{}\" (low, medium, high)", args.level))?;
    let (_lock, mut store) = open_locked(dir)?;
    task_ops::set_priority(&mut store.notes, &args.id, priority)?;
    store.save()?;
    println!("priority {} for {}", priority.label(), args.id);
    Ok(())
}

fn cmd_remind(dir: &Path, args: RemindArgs) -> Result<(), Box<dyn Error>> {
    let reminder = parse_when_flag(args.when.as_deref(), args.clear)?;
    let (_lock, mut store) = open_locked(dir)?;
    task_ops::set_reminder(&mut store.notes, &args.id, reminder)?;
    store.save()?;
    match reminder {
        Some(at) => println!(
            "reminder {} for {}",
            at.with_timezone(&Local).format("%Y-%m-%d %H:%M"),
            args.id
        ),
        None => println!("cleared reminder on {}", args.id),
    }
    Ok(())
}

fn cmd_repeat(dir: &Path, args: RepeatArgs) -> Result<(), Box<dyn Error>> {
    let repeat = Repeat::parse(&args.every).ok_or_else(|| {
        format!(
            "unknown repeat \"{}\" (none, daily, weekly, monthly, yearly)",
            args.every
        )
    })?;
    let (_lock, mut store) = open_locked(dir)?;
    task_ops::set_repeat(&mut store.notes, &args.id, repeat)?;
    store.save()?;
    println!("repeat {} for {}", repeat.label(), args.id);
    Ok(())
}

fn cmd_location(dir: &Path, args: LocationArgs) -> Result<(), Box<dyn Error>> {
    let (_lock, mut store) = open_locked(dir)?;
    let place = if args.clear { None } else { args.place };
    let cleared = place.is_none();
    task_ops::set_location(&mut store.notes, &args.id, place)?;
    store.save()?;
    if cleared {
        println!("cleared location on {}", args.id);
    } else {
        println!("location set for {}", args.id);
    }
    Ok(())
}

fn cmd_done(dir: &Path, args: IdArg) -> Result<(), Box<dyn Error>> {
    let (_lock, mut store) = open_locked(dir)?;
    let result = task_ops::toggle_done(&mut store.notes, &args.id)?;
    store.save()?;
    match result {
        DoneResult::Completed => println!("completed {}", args.id),
        DoneResult::Reopened => println!("reopened {}", args.id),
        DoneResult::Rolled { next_due } => println!(
            "completed {}, next due {}",
            args.id,
            next_due.with_timezone(&Local).format("%Y-%m-%d %H:%M")
        ),
    }
    Ok(())
}

fn cmd_delete(dir: &Path, args: IdArg) -> Result<(), Box<dyn Error>> {
    let (_lock, mut store) = open_locked(dir)?;
    let id = trash::delete_note(&mut store, &args.id)?;
    store.save()?;
    println!("moved {} to trash", short_id(&id));
    Ok(())
}

fn cmd_trash(dir: &Path, args: TrashCmd, json: bool) -> Result<(), Box<dyn Error>> {
    match args.command {
        TrashCommands::List => {
            let config = config_io::read_config(dir)?;
            let store = open_store(dir, &config)?;
            let trashed = query::list_trash(&store.notes);
            if json {
                let out = NoteListJson {
                    notes: trashed.iter().map(|n| NoteJson::from_note(n)).collect(),
                };
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else if trashed.is_empty() {
                println!("trash is empty");
            } else {
                for note in trashed {
                    println!("{}", note_line(note));
                }
            }
        }
        TrashCommands::Restore { id } => {
            let (_lock, mut store) = open_locked(dir)?;
            let id = trash::restore_note(&mut store, &id)?;
            store.save()?;
            println!("restored {}", short_id(&id));
        }
        TrashCommands::Purge { days } => {
            let config = config_io::read_config(dir)?;
            let retention = days.unwrap_or(config.trash.retention_days);
            let _lock = StoreLock::acquire_default(dir)?;
            let mut store = Store::load(dir)?;
            let result = trash::purge_expired(&mut store, retention);
            store.save()?;
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&PurgeJson::from_result(&result))?
                );
            } else {
                println!("purged {} notes", result.purged.len());
            }
        }
        TrashCommands::Empty => {
            let _lock = StoreLock::acquire_default(dir)?;
            let mut store = Store::load(dir)?;
            let result = trash::empty_trash(&mut store);
            store.save()?;
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&PurgeJson::from_result(&result))?
                );
            } else {
                println!("emptied trash ({} notes)", result.purged.len());
            }
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Backup
// ---------------------------------------------------------------------------

fn cmd_export(dir: &Path, args: ExportArgs) -> Result<(), Box<dyn Error>> {
    let config = config_io::read_config(dir)?;
    let store = open_store(dir, &config)?;
    let backup = import::make_backup(&store.notes);
    let content = serde_json::to_string_pretty(&backup)?;

    match args.path {
        Some(path) => {
            let path = PathBuf::from(path);
            fs::write(&path, &content)?;
            println!("exported {} notes to {}", backup.notes.len(), path.display());
        }
        None => println!("{}", content),
    }
    Ok(())
}

fn cmd_import(dir: &Path, args: ImportArgs, json: bool) -> Result<(), Box<dyn Error>> {
    let text = fs::read_to_string(&args.path)
        .map_err(|e| format!("could not read {}: {}", args.path, e))?;
    let backup = import::parse_backup(&text)?;

    let (_lock, mut store) = open_locked(dir)?;
    let result = import::merge_backup(&mut store.notes, backup);
    store.save()?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&ImportJson::from_result(&result))?
        );
    } else {
        println!(
            "imported {} notes ({} added, {} replaced)",
            result.total(),
            result.added.len(),
            result.replaced.len()
        );
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Sync / config
// ---------------------------------------------------------------------------

fn cmd_sync(dir: &Path, args: SyncCmd, json: bool) -> Result<(), Box<dyn Error>> {
    let config = config_io::read_config(dir)?;

    match args.command {
        SyncCommands::Status => {
            let store = open_store(dir, &config)?;
            let unsynced = store.notes.values().filter(|n| !n.synced).count();
            if json {
                let out = SyncStatusJson {
                    last_sync: store.sync_state.last_sync,
                    unsynced,
                    pending_deletes: store.sync_state.pending_deletes.len(),
                    enabled: config.sync.enabled,
                };
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                println!(
                    "sync:            {}",
                    if config.sync.enabled { "enabled" } else { "disabled" }
                );
                match store.sync_state.last_sync {
                    Some(at) => println!(
                        "last sync:       {}",
                        at.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S")
                    ),
                    None => println!("last sync:       never"),
                }
                println!("unsynced notes:  {}", unsynced);
                println!("pending deletes: {}", store.sync_state.pending_deletes.len());
            }
            Ok(())
        }
        SyncCommands::Now => {
            if !config.sync.enabled {
                return Err("sync is disabled (set sync.enabled = true)".into());
            }
            let remote = HttpRemote::from_config(&config.sync)?;
            let (_lock, mut store) = open_locked(dir)?;
            let report = engine::sync_once(&mut store, &remote);
            store.save()?;
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&SyncReportJson::from_report(&report))?
                );
            } else if report.is_noop() {
                println!("already in sync");
            } else {
                println!(
                    "pulled {} new, {} updated; removed {}; pushed {}; deleted {} remotely; {} errors",
                    report.pulled_new,
                    report.pulled_updated,
                    report.removed,
                    report.pushed,
                    report.deleted_remote,
                    report.errors
                );
            }
            Ok(())
        }
        SyncCommands::Watch => {
            if !config.sync.enabled {
                return Err("sync is disabled (set sync.enabled = true)".into());
            }
            let remote = HttpRemote::from_config(&config.sync)?;
            daemon::run(dir, &config, &remote)?;
            Ok(())
        }
    }
}

fn cmd_config(dir: &Path, args: ConfigCmd) -> Result<(), Box<dyn Error>> {
    match args.command {
        ConfigCommands::Get { key } => {
            let config = config_io::read_config(dir)?;
            match config_io::get_key(&config, &key) {
                Some(value) => println!("{}", value),
                None => return Err(format!("unknown config key: {}", key).into()),
            }
            Ok(())
        }
        ConfigCommands::Set { key, value } => {
            let (_config, mut doc) = config_io::read_config_doc(dir)?;
            config_io::set_key(&mut doc, &key, &value)?;
            config_io::write_config(dir, &doc)?;
            println!("{} = {}", key, value);
            Ok(())
        }
        ConfigCommands::Path => {
            println!("{}", dir.display());
            Ok(())
        }
    }
}
