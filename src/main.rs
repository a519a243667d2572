use std::sync::Arc;

use anyhow::{anyhow, bail, Context, Result};
use serde_json::{json, Value};
use tokio::time::{sleep, Duration};

use fleetx::api::{FleetApi, HttpApi};
use fleetx::config::Config;
use fleetx::filter::FilterQuery;
use fleetx::fleet::kinds::RecordKind;
use fleetx::fleet::tracking::TrackingLookup;
use fleetx::fleet::trucks::{self, TruckRequest};
use fleetx::fleet::Fleet;
use fleetx::logging::{log, obj, v_str, Domain, Level};
use fleetx::session::{self, LogNavigator, Session};
use fleetx::storage::LocalStore;

const USAGE: &str = "usage: fleetx <command>
  list <kind> [search] [status]   loads | trucks | drivers | customers | invoices
  stats <kind>
  dashboard
  board
  positions [--watch]
  track <code>
  reports
  login <email> <password>
  logout
  truck-save <json> [id]
  truck-delete <id>";

fn print(value: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn arg<'a>(args: &'a [String], i: usize, name: &str) -> Result<&'a str> {
    args.get(i)
        .map(String::as_str)
        .ok_or_else(|| anyhow!("missing <{}>\n{}", name, USAGE))
}

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(command) = args.first().map(String::as_str) else {
        eprintln!("{}", USAGE);
        return Ok(());
    };

    let cfg = Config::from_env();
    let store = LocalStore::open(&cfg.session_db)
        .with_context(|| format!("opening session store {}", cfg.session_db))?;
    let session = session::install(Arc::new(Session::open(store, Box::new(LogNavigator))?))
        .unwrap_or_else(|session| session);
    let api: Arc<dyn FleetApi> = Arc::new(HttpApi::new(&cfg, Some(Arc::clone(&session)))?);
    let fleet = Fleet::new(Arc::clone(&api), cfg.empty_policy);

    log(
        Level::Debug,
        Domain::System,
        "start",
        obj(&[("command", v_str(command)), ("endpoint", v_str(&cfg.api_url))]),
    );

    match command {
        "list" | "stats" => {
            let kind: RecordKind = arg(&args, 1, "kind")?.parse().map_err(|e: String| anyhow!(e))?;
            let Some(view) = fleet.refresh(kind).await else {
                return Ok(());
            };
            if command == "stats" {
                return print(&json!({ "kind": kind, "source": view.source, "stats": view.stats }));
            }
            let query = FilterQuery::new(
                args.get(2).map(String::as_str).unwrap_or(""),
                args.get(3).map(String::as_str).unwrap_or(fleetx::filter::ALL),
            );
            print(&json!({
                "kind": kind,
                "source": view.source,
                "stats": view.stats,
                "records": view.visible(&query),
            }))
        }
        "dashboard" => print(&serde_json::to_value(fleet.dashboard().await)?),
        "board" => match fleet.board().await {
            Some(board) => print(&serde_json::to_value(board)?),
            None => Ok(()),
        },
        "positions" => {
            let watch = args.get(1).map(String::as_str) == Some("--watch");
            loop {
                print(&serde_json::to_value(fleet.positions().await)?)?;
                if !watch {
                    return Ok(());
                }
                sleep(Duration::from_secs(cfg.tracking_refresh_secs.max(1))).await;
            }
        }
        "track" => {
            let mut lookup = TrackingLookup::new();
            lookup.set_code(arg(&args, 1, "code")?);
            lookup.submit(api.as_ref()).await;
            print(&serde_json::to_value(&lookup)?)
        }
        "reports" => print(&serde_json::to_value(fleet.reports().await)?),
        "login" => {
            let email = arg(&args, 1, "email")?;
            let password = arg(&args, 2, "password")?;
            let outcome = session.login(api.as_ref(), email, password).await?;
            print(&json!({ "outcome": outcome, "user": session.state().user }))
        }
        "logout" => {
            session.logout()?;
            print(&json!({ "success": true }))
        }
        "truck-save" => {
            let req: TruckRequest =
                serde_json::from_str(arg(&args, 1, "json")?).context("parsing truck json")?;
            match trucks::save(api.as_ref(), args.get(2).map(String::as_str), &req).await {
                Ok(truck) => print(&json!({ "success": true, "truck": truck })),
                Err(message) => print(&json!({ "success": false, "message": message })),
            }
        }
        "truck-delete" => match trucks::remove(api.as_ref(), arg(&args, 1, "id")?).await {
            Ok(()) => print(&json!({ "success": true })),
            Err(message) => print(&json!({ "success": false, "message": message })),
        },
        other => bail!("unknown command '{}'\n{}", other, USAGE),
    }
}
