use clap::Subcommand;
use serde_json::json;
use sobertrack_core::streak::{parse_date, today};
use sobertrack_core::{Database, Milestone, StreakTracker};

#[derive(Subcommand)]
pub enum StreakAction {
    /// Set the sobriety start date
    Set {
        /// Start date (YYYY-MM-DD), today or earlier
        date: String,
    },
    /// Show days sober and year progress
    Show {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// List reached and upcoming milestones
    Milestones {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

const NOT_SET: &str = "no sobriety start date set (use `sobertrack streak set YYYY-MM-DD`)";

pub fn run(action: StreakAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let mut tracker = StreakTracker::new(&db);

    match action {
        StreakAction::Set { date } => {
            let date = parse_date(&date)?;
            tracker.set_start_date(date)?;
            let days = tracker.days_sober().unwrap_or(0);
            println!("start date set to {date} ({days} days sober)");
        }
        StreakAction::Show { json } => {
            let snapshot = tracker.snapshot_on(today());
            if json {
                println!("{}", serde_json::to_string_pretty(&snapshot)?);
                return Ok(());
            }
            let Some(snap) = snapshot else {
                println!("{NOT_SET}");
                return Ok(());
            };
            println!("Start date:    {}", snap.start_date);
            println!("Days sober:    {}", snap.days_sober);
            println!("Year progress: {:.1}%", snap.year_progress * 100.0);
            match (snap.next_milestone, snap.days_to_next_milestone) {
                (Some(m), Some(left)) => println!("Next:          {} (in {left} days)", m.label()),
                _ => println!("Next:          every milestone reached"),
            }
        }
        StreakAction::Milestones { json } => {
            let days = tracker.days_sober();
            if json {
                let days_sober = days.unwrap_or(0);
                let list: Vec<_> = Milestone::ALL
                    .iter()
                    .map(|m| {
                        json!({
                            "milestone": m,
                            "label": m.label(),
                            "days": m.days(),
                            "reached": days.is_some_and(|d| m.days() <= d),
                            "days_left": m.days().saturating_sub(days_sober),
                        })
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&list)?);
                return Ok(());
            }
            let Some(days) = days else {
                println!("{NOT_SET}");
                return Ok(());
            };
            for m in Milestone::ALL {
                let mark = if m.days() <= days { "x" } else { " " };
                println!("[{mark}] {:<9} ({} days)", m.label(), m.days());
            }
        }
    }
    Ok(())
}
