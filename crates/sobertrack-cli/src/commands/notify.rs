use clap::Subcommand;
use serde_json::json;
use sobertrack_core::{
    init_notification_service, Config, Database, HttpQuoteSource, OutboxScheduler, QuoteFetcher,
    RetryPolicy, ScheduleRequest,
};

#[derive(Subcommand)]
pub enum NotifyAction {
    /// Turn on the daily motivational notification
    Enable,
    /// Turn off the daily motivational notification
    Disable,
    /// Show the preference and the scheduled notification
    Status {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Re-fetch today's quote for the scheduled notification
    Refresh,
    /// Fetch a quote and print the notification it would produce
    Preview {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

fn print_request(request: &ScheduleRequest) {
    println!(
        "daily at {:02}:{:02}: {}",
        request.trigger.hour, request.trigger.minute, request.payload.title
    );
    println!("  {}", request.payload.body);
}

pub async fn run(action: NotifyAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let db = Database::open()?;
    let outbox = OutboxScheduler::new(&db);
    let source = HttpQuoteSource::new(&config.quotes)?;
    let fetcher = QuoteFetcher::with_policy(source, &db, RetryPolicy::from(&config.quotes));
    let service = init_notification_service(&config.notifications, &outbox, fetcher, &db);

    match action {
        NotifyAction::Enable => {
            if let Some(request) = service.set_enabled(true).await? {
                print_request(&request);
            }
            println!("notifications enabled");
        }
        NotifyAction::Disable => {
            service.set_enabled(false).await?;
            println!("notifications disabled");
        }
        NotifyAction::Status { json } => {
            let enabled = service.is_enabled();
            let pending = outbox.pending()?;
            if json {
                let status = json!({ "enabled": enabled, "scheduled": pending });
                println!("{}", serde_json::to_string_pretty(&status)?);
                return Ok(());
            }
            println!("notifications {}", if enabled { "enabled" } else { "disabled" });
            if let Some(request) = pending {
                print_request(&request);
            }
        }
        NotifyAction::Refresh => match service.refresh().await? {
            Some(request) => print_request(&request),
            None => println!("notifications disabled, nothing to refresh"),
        },
        NotifyAction::Preview { json } => {
            let payload = service.daily_payload().await;
            if json {
                println!("{}", serde_json::to_string_pretty(&payload)?);
            } else {
                println!("{}", payload.title);
                println!("  {}", payload.body);
            }
        }
    }
    Ok(())
}
