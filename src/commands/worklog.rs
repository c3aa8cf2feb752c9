//! `devdesk worklog` command.

use crate::cli::{AddArgs, UpdateArgs, WorklogCommand};
use crate::config::Config;
use crate::context::ServiceContext;
use crate::worklog::{
    summarize_by_day, LocalStorageWorkLogService, NewWorkLog, WorkLog, WorkLogService,
    WorkLogUpdate,
};

/// Execute a `worklog` action against the store under `config.store_root`.
///
/// # Errors
///
/// Returns an error string if the action fails.
pub fn run(ctx: &ServiceContext, config: &Config, action: &WorklogCommand) -> Result<(), String> {
    let service = LocalStorageWorkLogService::from_context(ctx, &config.store_root);
    execute(ctx, &service, action).map_err(|e| e.to_string())
}

fn execute(
    ctx: &ServiceContext,
    service: &dyn WorkLogService,
    action: &WorklogCommand,
) -> crate::Result<()> {
    match action {
        WorklogCommand::Add(AddArgs { task, date, minutes, notes }) => {
            let date = date
                .unwrap_or_else(|| ctx.clock.now().with_timezone(&chrono::Local).date_naive());
            let log = service.create(NewWorkLog {
                date,
                task: task.clone(),
                minutes: *minutes,
                notes: notes.clone(),
            })?;
            println!("Added {}", format_log(&log));
        }
        WorklogCommand::List { date, summary, json } => {
            let logs = match date {
                Some(date) => service.get_by_date(*date)?,
                None => service.get_all()?,
            };
            if *json {
                let text = if *summary {
                    serde_json::to_string_pretty(&summarize_by_day(&logs))
                } else {
                    serde_json::to_string_pretty(&logs)
                }
                .map_err(|e| crate::Error::json("work logs", e))?;
                println!("{text}");
            } else if logs.is_empty() {
                println!("No work logs.");
            } else if *summary {
                for day in summarize_by_day(&logs) {
                    println!("{}  {} entries  {} min", day.date, day.entries, day.minutes);
                }
            } else {
                for log in &logs {
                    println!("{}", format_log(log));
                }
            }
        }
        WorklogCommand::Update(UpdateArgs { id, task, date, minutes, notes }) => {
            let log = service.update(
                id,
                WorkLogUpdate {
                    date: *date,
                    task: task.clone(),
                    minutes: *minutes,
                    notes: notes.clone(),
                },
            )?;
            println!("Updated {}", format_log(&log));
        }
        WorklogCommand::Delete { id } => {
            let log = service.delete(id)?;
            println!("Deleted {}", format_log(&log));
        }
    }
    Ok(())
}

/// `<short id>  <date>  <task> (<n> min)`, notes on a second line.
fn format_log(log: &WorkLog) -> String {
    let short_id: String = log.id.chars().take(8).collect();
    let mut line = format!("{short_id}  {}  {}", log.date, log.task);
    if let Some(minutes) = log.minutes {
        line.push_str(&format!(" ({minutes} min)"));
    }
    if let Some(notes) = &log.notes {
        line.push_str(&format!("\n          {notes}"));
    }
    line
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, TimeZone, Utc};

    use super::*;

    fn log(notes: Option<&str>, minutes: Option<u32>) -> WorkLog {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap();
        WorkLog {
            id: "0f8c2a9e-7d41-4a51-9d55-3c1e2b7a9f10".into(),
            date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            task: "review PR".into(),
            minutes,
            notes: notes.map(String::from),
            created_at: at,
            updated_at: at,
        }
    }

    #[test]
    fn formats_short_id_and_minutes() {
        assert_eq!(format_log(&log(None, Some(30))), "0f8c2a9e  2024-05-01  review PR (30 min)");
    }

    #[test]
    fn formats_notes_on_second_line() {
        assert_eq!(
            format_log(&log(Some("needs follow-up"), None)),
            "0f8c2a9e  2024-05-01  review PR\n          needs follow-up"
        );
    }
}
