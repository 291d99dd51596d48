use chrono::{DateTime, Local, NaiveDate, Utc};
use indexmap::IndexMap;

use crate::model::filter::{Filter, sort_notes};
use crate::model::note::{Note, NoteKind};

/// List active notes matching a filter, in the filter's sort order.
pub fn list_notes<'a>(notes: &'a IndexMap<String, Note>, filter: &Filter) -> Vec<&'a Note> {
    let mut matched: Vec<&Note> = notes.values().filter(|n| filter.matches(n)).collect();
    sort_notes(&mut matched, filter.sort);
    matched
}

/// List trashed notes, most recently deleted first.
pub fn list_trash(notes: &IndexMap<String, Note>) -> Vec<&Note> {
    let mut trashed: Vec<&Note> = notes.values().filter(|n| n.deleted).collect();
    trashed.sort_by(|a, b| b.deleted_at.cmp(&a.deleted_at));
    trashed
}

// ---------------------------------------------------------------------------
// Agenda
// ---------------------------------------------------------------------------

/// One day of the agenda, with its due tasks in time order.
#[derive(Debug)]
pub struct AgendaDay<'a> {
    pub date: NaiveDate,
    pub notes: Vec<&'a Note>,
}

/// The agenda view: overdue open tasks, then tasks grouped by due day.
#[derive(Debug)]
pub struct Agenda<'a> {
    pub overdue: Vec<&'a Note>,
    pub days: Vec<AgendaDay<'a>>,
}

/// Build the agenda for tasks due in `[from, to)`.
///
/// Days are local-time calendar dates. Completed tasks are excluded unless
/// `include_done`. Open tasks due before `from` appear in `overdue`.
pub fn agenda<'a>(
    notes: &'a IndexMap<String, Note>,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
    include_done: bool,
) -> Agenda<'a> {
    let mut overdue: Vec<&Note> = Vec::new();
    let mut dated: Vec<(DateTime<Utc>, &Note)> = Vec::new();

    for note in notes.values() {
        if note.deleted || note.hidden || note.kind != NoteKind::Task {
            continue;
        }
        if note.done && !include_done {
            continue;
        }
        let Some(due) = note.schedule.as_ref().and_then(|s| s.due_at) else {
            continue;
        };
        if due < from {
            if !note.done {
                overdue.push(note);
            }
        } else if due < to {
            dated.push((due, note));
        }
    }

    overdue.sort_by_key(|n| n.schedule.as_ref().and_then(|s| s.due_at));
    dated.sort_by_key(|(due, _)| *due);

    let mut days: Vec<AgendaDay> = Vec::new();
    for (due, note) in dated {
        let date = due.with_timezone(&Local).date_naive();
        match days.last_mut() {
            Some(day) if day.date == date => day.notes.push(note),
            _ => days.push(AgendaDay {
                date,
                notes: vec![note],
            }),
        }
    }

    Agenda { overdue, days }
}

// ---------------------------------------------------------------------------
// Stats
// ---------------------------------------------------------------------------

/// Counts over the whole collection
#[derive(Debug, Default, PartialEq, Eq)]
pub struct StoreStats {
    pub text: usize,
    pub checklist: usize,
    pub task: usize,
    pub favorites: usize,
    pub hidden: usize,
    pub tasks_done: usize,
    pub tasks_open: usize,
    pub trashed: usize,
    pub unsynced: usize,
}

impl StoreStats {
    pub fn total_active(&self) -> usize {
        self.text + self.checklist + self.task
    }
}

/// Tally collection statistics.
pub fn stats(notes: &IndexMap<String, Note>) -> StoreStats {
    let mut s = StoreStats::default();
    for note in notes.values() {
        if note.deleted {
            s.trashed += 1;
            continue;
        }
        match note.kind {
            NoteKind::Text => s.text += 1,
            NoteKind::Checklist => s.checklist += 1,
            NoteKind::Task => {
                s.task += 1;
                if note.done {
                    s.tasks_done += 1;
                } else {
                    s.tasks_open += 1;
                }
            }
        }
        if note.favorite {
            s.favorites += 1;
        }
        if note.hidden {
            s.hidden += 1;
        }
        if !note.synced {
            s.unsynced += 1;
        }
    }
    s
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::filter::SortKey;
    use crate::model::task::Schedule;
    use chrono::{Duration, TimeZone};

    fn task_due(title: &str, due: DateTime<Utc>) -> Note {
        let mut n = Note::new(NoteKind::Task, title.into(), String::new());
        n.schedule = Some(Schedule {
            due_at: Some(due),
            ..Default::default()
        });
        n
    }

    fn insert(notes: &mut IndexMap<String, Note>, n: Note) {
        notes.insert(n.id.clone(), n);
    }

    #[test]
    fn list_applies_filter_and_sort() {
        let mut notes = IndexMap::new();
        let mut a = Note::new(NoteKind::Text, "beta".into(), String::new());
        a.favorite = true;
        let b = Note::new(NoteKind::Text, "Alpha".into(), String::new());
        insert(&mut notes, a);
        insert(&mut notes, b);

        let filter = Filter {
            sort: SortKey::Title,
            ..Default::default()
        };
        let listed = list_notes(&notes, &filter);
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].title, "Alpha");

        let filter = Filter {
            favorite: Some(true),
            ..Default::default()
        };
        let listed = list_notes(&notes, &filter);
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].title, "beta");
    }

    #[test]
    fn trash_listing_is_most_recent_first() {
        let mut notes = IndexMap::new();
        let mut a = Note::new(NoteKind::Text, "older".into(), String::new());
        a.deleted = true;
        a.deleted_at = Some(Utc::now() - Duration::days(2));
        let mut b = Note::new(NoteKind::Text, "newer".into(), String::new());
        b.deleted = true;
        b.deleted_at = Some(Utc::now());
        insert(&mut notes, a);
        insert(&mut notes, b);

        let trashed = list_trash(&notes);
        assert_eq!(trashed[0].title, "newer");
        assert_eq!(trashed[1].title, "older");
    }

    /// Local wall-clock time as a UTC instant, so day grouping is
    /// deterministic regardless of the test machine's timezone.
    fn local_utc(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Local
            .with_ymd_and_hms(y, m, d, h, 0, 0)
            .single()
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn agenda_groups_by_day_and_sorts_by_time() {
        let mut notes = IndexMap::new();
        insert(&mut notes, task_due("late meeting", local_utc(2025, 6, 2, 15)));
        insert(&mut notes, task_due("early standup", local_utc(2025, 6, 2, 9)));
        insert(&mut notes, task_due("next day", local_utc(2025, 6, 3, 21)));

        let from = local_utc(2025, 6, 2, 1);
        let a = agenda(&notes, from, from + Duration::days(7), false);
        assert!(a.overdue.is_empty());
        assert_eq!(a.days.len(), 2);
        assert_eq!(a.days[0].notes.len(), 2);
        assert_eq!(a.days[0].notes[0].title, "early standup");
        assert_eq!(a.days[0].notes[1].title, "late meeting");
        assert_eq!(a.days[1].notes.len(), 1);
    }

    #[test]
    fn agenda_separates_overdue_and_skips_done() {
        let now = Utc::now();
        let mut notes = IndexMap::new();
        insert(&mut notes, task_due("overdue", now - Duration::days(3)));
        let mut done = task_due("finished", now - Duration::days(1));
        done.done = true;
        insert(&mut notes, done);
        insert(&mut notes, task_due("soon", now + Duration::hours(2)));

        let a = agenda(&notes, now, now + Duration::days(7), false);
        assert_eq!(a.overdue.len(), 1);
        assert_eq!(a.overdue[0].title, "overdue");
        let total: usize = a.days.iter().map(|d| d.notes.len()).sum();
        assert_eq!(total, 1);
    }

    #[test]
    fn agenda_ignores_undated_and_non_task_notes() {
        let now = Utc::now();
        let mut notes = IndexMap::new();
        insert(
            &mut notes,
            Note::new(NoteKind::Task, "no due date".into(), String::new()),
        );
        insert(
            &mut notes,
            Note::new(NoteKind::Text, "a note".into(), String::new()),
        );
        let a = agenda(&notes, now, now + Duration::days(7), false);
        assert!(a.overdue.is_empty());
        assert!(a.days.is_empty());
    }

    #[test]
    fn stats_counts() {
        let mut notes = IndexMap::new();
        let mut text = Note::new(NoteKind::Text, "t".into(), String::new());
        text.favorite = true;
        text.synced = true;
        insert(&mut notes, text);
        insert(
            &mut notes,
            Note::new(NoteKind::Checklist, "c".into(), String::new()),
        );
        let mut task = Note::new(NoteKind::Task, "k".into(), String::new());
        task.done = true;
        insert(&mut notes, task);
        let mut gone = Note::new(NoteKind::Text, "g".into(), String::new());
        gone.deleted = true;
        insert(&mut notes, gone);

        let s = stats(&notes);
        assert_eq!(s.total_active(), 3);
        assert_eq!(s.text, 1);
        assert_eq!(s.checklist, 1);
        assert_eq!(s.task, 1);
        assert_eq!(s.tasks_done, 1);
        assert_eq!(s.tasks_open, 0);
        assert_eq!(s.favorites, 1);
        assert_eq!(s.trashed, 1);
        assert_eq!(s.unsynced, 2);
    }
}
