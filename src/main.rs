use anyhow::{anyhow, bail, Context, Result};
use chrono::{Datelike, Local, NaiveDate, Utc};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use therapy_client::auth::{AuthContext, FileStorage};
use therapy_client::booking::{BookingFlow, CardDetails, MockPaymentGateway};
use therapy_client::calendar::{mark_available, month_grid};
use therapy_client::models::availability::upcoming;
use therapy_client::models::{Id, Role, Session, TimeSlot};
use therapy_client::{ApiClient, ClientConfig};

const USAGE: &str = "usage: therapy-client <command> [args]

commands:
  login <email> <password>
  logout
  whoami
  doctors [search]
  slots <doctor_id>
  book <doctor_id> <YYYY-MM-DD> <HH:MM> <card> <MM/YY> <cvc> <holder>
  sessions
  cancel <session_id>
  calendar <YYYY-MM> [doctor_id]";

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if let Err(e) = run(&args).await {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

async fn run(args: &[String]) -> Result<()> {
    let config = ClientConfig::from_env();
    let auth = Arc::new(AuthContext::hydrate(Arc::new(FileStorage::new(
        &config.storage_path,
    ))));
    let api = ApiClient::new(&config, auth.clone());

    let command = args.first().map(String::as_str).unwrap_or("help");
    let rest = &args[args.len().min(1)..];

    match command {
        "login" => {
            let [email, password] = take::<2>(rest)?;
            let user = api.auth_service().login(email, password).await?;
            println!("Logged in as {} ({})", user.display_name(), user.role);
        }
        "logout" => {
            api.auth_service().logout()?;
            println!("Logged out");
        }
        "whoami" => match auth.user() {
            Some(user) => println!("{} <{}> [{}]", user.display_name(), user.email, user.role),
            None => println!("Not logged in"),
        },
        "doctors" => {
            let search = rest.first().map(String::as_str);
            let doctors = api.directory().psychologists(search, None).await?;
            if doctors.is_empty() {
                println!("No psychologists found");
            }
            for doctor in doctors {
                println!(
                    "[{}] {} - {} yrs - {:.2} - {}",
                    doctor.id,
                    doctor.full_name(),
                    doctor.experience_years,
                    doctor.price,
                    doctor.specializations.join(", ")
                );
            }
        }
        "slots" => {
            let [doctor_id] = take::<1>(rest)?;
            let doctor = api.directory().psychologist(&Id::from(doctor_id.as_str())).await?;
            let schedule = upcoming(&doctor.availability, Local::now().naive_local());
            if schedule.is_empty() {
                println!("{} has no open slots", doctor.full_name());
            }
            for day in schedule {
                let slots: Vec<String> = day.time_slots.iter().map(TimeSlot::to_string).collect();
                println!("{}  {}", day.date, slots.join(" "));
            }
        }
        "book" => {
            let [doctor_id, date, time, number, expiry, cvc, holder] = take::<7>(rest)?;
            require_role(&auth, &[Role::Client])?;

            let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
                .with_context(|| format!("invalid date {}", date))?;
            let time: TimeSlot = time.parse()?;
            let card = CardDetails {
                number: number.clone(),
                expiry: expiry.clone(),
                cvc: cvc.clone(),
                holder: holder.clone(),
            };

            let doctor = api.directory().psychologist(&Id::from(doctor_id.as_str())).await?;
            let mut flow = BookingFlow::new();
            flow.select_doctor(doctor)?;
            flow.pick_slot(date, time, Local::now().naive_local())?;
            flow.confirm()?;
            let receipt = flow.pay(&MockPaymentGateway, &card, Utc::now())?;
            println!("Paid {:.2} with card ending {}", receipt.amount, receipt.card_last4);

            let clients = api.clients();
            let session = flow.submit(&clients).await?;
            println!(
                "Booked session {} on {} at {}",
                session.id, session.scheduled_date, session.scheduled_time
            );
            if let Some(path) = flow.redirect_path() {
                println!("-> {}", path);
            }
        }
        "sessions" => {
            let sessions = if auth.has_role(Role::Psychologist) {
                api.psychologists().sessions().await?
            } else if auth.has_role(Role::Client) {
                api.clients().sessions().await?
            } else {
                bail!("log in as a client or psychologist to list sessions");
            };
            print_sessions(&sessions);
        }
        "cancel" => {
            let [session_id] = take::<1>(rest)?;
            let id = Id::from(session_id.as_str());
            let session = if auth.has_role(Role::Psychologist) {
                api.psychologists().cancel_session(&id).await?
            } else {
                require_role(&auth, &[Role::Client])?;
                api.clients().cancel(&id).await?
            };
            println!("Session {} is now {}", session.id, session.status);
        }
        "calendar" => {
            let month = rest.first().ok_or_else(|| anyhow!("missing <YYYY-MM>"))?;
            let first = NaiveDate::parse_from_str(&format!("{}-01", month), "%Y-%m-%d")
                .with_context(|| format!("invalid month {}", month))?;
            let grid = month_grid(first.year(), first.month())
                .ok_or_else(|| anyhow!("invalid month {}", month))?;

            let schedule = match rest.get(1) {
                Some(doctor_id) => {
                    api.directory()
                        .psychologist(&Id::from(doctor_id.as_str()))
                        .await?
                        .normalized_availability()
                }
                None => Vec::new(),
            };

            println!(" Mo  Tu  We  Th  Fr  Sa  Su");
            for week in mark_available(&grid, &schedule) {
                let row: Vec<String> = week
                    .iter()
                    .map(|cell| match cell {
                        Some((day, true)) => format!("{:>3}*", day.day()),
                        Some((day, false)) => format!("{:>3} ", day.day()),
                        None => "    ".to_string(),
                    })
                    .collect();
                println!("{}", row.join(""));
            }
        }
        _ => println!("{}", USAGE),
    }

    Ok(())
}

fn take<const N: usize>(args: &[String]) -> Result<[&String; N]> {
    if args.len() < N {
        bail!("expected {} argument(s)\n\n{}", N, USAGE);
    }
    let mut out = [&args[0]; N];
    for (slot, arg) in out.iter_mut().zip(args) {
        *slot = arg;
    }
    Ok(out)
}

fn require_role(auth: &AuthContext, roles: &[Role]) -> Result<()> {
    if !auth.is_authenticated() {
        bail!("not logged in");
    }
    if !auth.has_any_role(roles) {
        bail!("this command is not available for your role");
    }
    Ok(())
}

fn print_sessions(sessions: &[Session]) {
    if sessions.is_empty() {
        println!("No sessions");
        return;
    }
    let mut sorted: Vec<&Session> = sessions.iter().collect();
    sorted.sort_by_key(|s| s.starts_at());
    for session in sorted {
        let with = session
            .psychologist_name
            .as_deref()
            .or(session.client_name.as_deref())
            .unwrap_or("-");
        let next: Vec<&str> = session
            .status
            .allowed_transitions()
            .iter()
            .map(|s| s.as_str())
            .collect();
        println!(
            "[{}] {} {} {} with {} (next: {})",
            session.id,
            session.scheduled_date,
            session.scheduled_time,
            session.status,
            with,
            if next.is_empty() { "-".to_string() } else { next.join(", ") }
        );
    }
}
