use chrono::{DateTime, Utc};
use indexmap::IndexMap;

use crate::model::note::{Note, NoteKind};
use crate::model::task::{Priority, Repeat, Schedule};
use crate::ops::note_ops::{NoteError, resolve_id};

fn schedule_mut<'a>(
    notes: &'a mut IndexMap<String, Note>,
    id_or_prefix: &str,
) -> Result<&'a mut Note, NoteError> {
    let id = resolve_id(notes, id_or_prefix)?;
    let note = notes.get_mut(&id).expect("resolved id exists");
    if note.kind != NoteKind::Task {
        return Err(NoteError::WrongKind {
            id: note.id.clone(),
            expected: "task",
        });
    }
    if note.schedule.is_none() {
        note.schedule = Some(Schedule::default());
    }
    Ok(note)
}

// ---------------------------------------------------------------------------
// Scheduling
// ---------------------------------------------------------------------------

/// Set or clear the due date.
pub fn set_due(
    notes: &mut IndexMap<String, Note>,
    id: &str,
    due_at: Option<DateTime<Utc>>,
) -> Result<(), NoteError> {
    let note = schedule_mut(notes, id)?;
    note.schedule.as_mut().expect("schedule set").due_at = due_at;
    note.touch();
    Ok(())
}

pub fn set_priority(
    notes: &mut IndexMap<String, Note>,
    id: &str,
    priority: Priority,
) -> Result<(), NoteError> {
    let note = schedule_mut(notes, id)?;
    note.schedule.as_mut().expect("schedule set").priority = priority;
    note.touch();
    Ok(())
}

/// Set or clear the reminder time.
pub fn set_reminder(
    notes: &mut IndexMap<String, Note>,
    id: &str,
    reminder_at: Option<DateTime<Utc>>,
) -> Result<(), NoteError> {
    let note = schedule_mut(notes, id)?;
    note.schedule.as_mut().expect("schedule set").reminder_at = reminder_at;
    note.touch();
    Ok(())
}

pub fn set_repeat(
    notes: &mut IndexMap<String, Note>,
    id: &str,
    repeat: Repeat,
) -> Result<(), NoteError> {
    let note = schedule_mut(notes, id)?;
    note.schedule.as_mut().expect("schedule set").repeat = repeat;
    note.touch();
    Ok(())
}

/// Set or clear the location.
pub fn set_location(
    notes: &mut IndexMap<String, Note>,
    id: &str,
    location: Option<String>,
) -> Result<(), NoteError> {
    let note = schedule_mut(notes, id)?;
    note.schedule.as_mut().expect("schedule set").location = location;
    note.touch();
    Ok(())
}

// ---------------------------------------------------------------------------
// Completion
// ---------------------------------------------------------------------------

/// What toggling completion did to the task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DoneResult {
    Completed,
    Reopened,
    /// A repeating task was completed: its due date rolled forward instead
    /// of the task staying done.
    Rolled { next_due: DateTime<Utc> },
}

/// Toggle task completion.
///
/// Completing a repeating task with a due date advances the due date (and
/// reminder, if set) by one repeat interval and leaves the task open.
pub fn toggle_done(notes: &mut IndexMap<String, Note>, id: &str) -> Result<DoneResult, NoteError> {
    let note = schedule_mut(notes, id)?;

    if note.done {
        note.done = false;
        note.completed_at = None;
        note.touch();
        return Ok(DoneResult::Reopened);
    }

    let schedule = note.schedule.as_mut().expect("schedule set");
    if schedule.repeat != Repeat::None
        && let Some(due) = schedule.due_at
    {
        let next_due = schedule.repeat.advance(due);
        schedule.due_at = Some(next_due);
        if let Some(reminder) = schedule.reminder_at {
            schedule.reminder_at = Some(schedule.repeat.advance(reminder));
        }
        note.touch();
        return Ok(DoneResult::Rolled { next_due });
    }

    note.done = true;
    note.completed_at = Some(Utc::now());
    note.touch();
    Ok(DoneResult::Completed)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::note_ops::create_note;
    use chrono::TimeZone;

    fn task_note() -> (IndexMap<String, Note>, String) {
        let mut notes = IndexMap::new();
        let id = create_note(
            &mut notes,
            NoteKind::Task,
            "Water plants".into(),
            String::new(),
            None,
            false,
        );
        (notes, id)
    }

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 9, 0, 0).unwrap()
    }

    #[test]
    fn set_due_and_priority() {
        let (mut notes, id) = task_note();
        set_due(&mut notes, &id, Some(at(2025, 6, 1))).unwrap();
        set_priority(&mut notes, &id, Priority::High).unwrap();

        let s = notes[&id].schedule.as_ref().unwrap();
        assert_eq!(s.due_at, Some(at(2025, 6, 1)));
        assert_eq!(s.priority, Priority::High);

        set_due(&mut notes, &id, None).unwrap();
        assert!(notes[&id].schedule.as_ref().unwrap().due_at.is_none());
    }

    #[test]
    fn scheduling_rejects_non_task_notes() {
        let mut notes = IndexMap::new();
        let id = create_note(
            &mut notes,
            NoteKind::Text,
            "Just text".into(),
            String::new(),
            None,
            false,
        );
        assert!(matches!(
            set_due(&mut notes, &id, Some(at(2025, 1, 1))),
            Err(NoteError::WrongKind { .. })
        ));
    }

    #[test]
    fn toggle_done_completes_and_reopens() {
        let (mut notes, id) = task_note();

        assert_eq!(toggle_done(&mut notes, &id).unwrap(), DoneResult::Completed);
        assert!(notes[&id].done);
        assert!(notes[&id].completed_at.is_some());

        assert_eq!(toggle_done(&mut notes, &id).unwrap(), DoneResult::Reopened);
        assert!(!notes[&id].done);
        assert!(notes[&id].completed_at.is_none());
    }

    #[test]
    fn completing_repeating_task_rolls_due_date() {
        let (mut notes, id) = task_note();
        set_due(&mut notes, &id, Some(at(2025, 3, 10))).unwrap();
        set_repeat(&mut notes, &id, Repeat::Weekly).unwrap();
        set_reminder(&mut notes, &id, Some(at(2025, 3, 9))).unwrap();

        let result = toggle_done(&mut notes, &id).unwrap();
        assert_eq!(
            result,
            DoneResult::Rolled {
                next_due: at(2025, 3, 17)
            }
        );

        let note = &notes[&id];
        assert!(!note.done, "rolled task stays open");
        let s = note.schedule.as_ref().unwrap();
        assert_eq!(s.due_at, Some(at(2025, 3, 17)));
        assert_eq!(s.reminder_at, Some(at(2025, 3, 16)));
    }

    #[test]
    fn repeating_task_without_due_date_completes_normally() {
        let (mut notes, id) = task_note();
        set_repeat(&mut notes, &id, Repeat::Daily).unwrap();
        assert_eq!(toggle_done(&mut notes, &id).unwrap(), DoneResult::Completed);
    }

    #[test]
    fn mutations_clear_sync_flag() {
        let (mut notes, id) = task_note();
        notes.get_mut(&id).unwrap().synced = true;
        set_location(&mut notes, &id, Some("office".into())).unwrap();
        assert!(!notes[&id].synced);
    }
}
