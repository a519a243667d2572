//! Live fleet positions and the public shipment lookup.

use serde::Serialize;
use serde_json::Value;

use crate::api::{ApiError, FleetApi};
use crate::fleet::kinds::RecordKind;
use crate::logging::{log, obj, v_str, Domain, Level};
use crate::record::{Record, Selector};
use crate::resolve::EmptyPolicy;

/// Map centre, used for trucks that have not reported a position.
pub const DEPOT: (f64, f64) = (34.0522, -118.2437);

pub const NOT_FOUND: &str = "Tracking code not found";
pub const LOOKUP_FAILED: &str = "Failed to track shipment. Please check the tracking code and try again.";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TruckPosition {
    pub id: Value,
    pub name: String,
    pub driver: String,
    pub lat: f64,
    pub lng: f64,
    pub speed: f64,
    pub heading: String,
    pub destination: String,
    pub eta: String,
    pub status: String,
    pub load: Option<String>,
}

fn display_status(status: &str) -> &'static str {
    match status {
        "IN_TRANSIT" => "In Transit",
        "AVAILABLE" => "Available",
        _ => "Stopped",
    }
}

fn non_empty(s: String, default: &str) -> String {
    if s.is_empty() {
        default.to_string()
    } else {
        s
    }
}

fn coordinate(truck: &Record, field: &str, default: f64) -> f64 {
    match truck.number(field) {
        n if n == 0.0 => default,
        n => n,
    }
}

/// Join trucks to their drivers by `driverId` and shape them for the map.
pub fn fleet_positions(trucks: &[Record], drivers: &[Record]) -> Vec<TruckPosition> {
    let name = Selector::first_of(&["truckNumber", "number"]);
    let full_name = Selector::joined(&["firstName", "lastName"]);

    trucks
        .iter()
        .map(|truck| {
            let driver = truck
                .get("driverId")
                .filter(|id| !id.is_null())
                .and_then(|id| drivers.iter().find(|d| d.get("id") == Some(id)))
                .map(|d| full_name.text(d))
                .unwrap_or_else(|| "Unassigned".to_string());
            let load = Some(truck.text("currentLoadId")).filter(|s| !s.is_empty());

            TruckPosition {
                id: truck.get("id").cloned().unwrap_or(Value::Null),
                name: name.text(truck),
                driver,
                lat: coordinate(truck, "currentLatitude", DEPOT.0),
                lng: coordinate(truck, "currentLongitude", DEPOT.1),
                speed: truck.number("currentSpeed"),
                heading: non_empty(truck.text("heading"), "NE"),
                destination: non_empty(truck.text("currentLocation"), "Unknown"),
                eta: non_empty(truck.text("eta"), "Calculating..."),
                status: display_status(&truck.status()).to_string(),
                load,
            }
        })
        .collect()
}

#[allow(clippy::too_many_arguments)]
fn position(
    id: i64,
    name: &str,
    driver: &str,
    (lat, lng): (f64, f64),
    speed: f64,
    heading: &str,
    destination: &str,
    eta: &str,
    status: &str,
    load: Option<&str>,
) -> TruckPosition {
    TruckPosition {
        id: Value::from(id),
        name: name.to_string(),
        driver: driver.to_string(),
        lat,
        lng,
        speed,
        heading: heading.to_string(),
        destination: destination.to_string(),
        eta: eta.to_string(),
        status: status.to_string(),
        load: load.map(str::to_string),
    }
}

pub fn fallback_positions() -> Vec<TruckPosition> {
    vec![
        position(1, "Truck-001", "John Smith", (34.0522, -118.2437), 65.0, "NE", "Phoenix, AZ", "2h 30m", "In Transit", Some("LD-001")),
        position(2, "Truck-002", "Sarah Johnson", (33.4484, -112.0740), 0.0, "N", "Los Angeles, CA", "At Stop", "Stopped", Some("LD-005")),
        position(3, "Truck-003", "Mike Davis", (32.7157, -117.1611), 72.0, "E", "Phoenix, AZ", "5h 15m", "In Transit", Some("LD-006")),
        position(4, "Truck-004", "Emily Wilson", (41.8781, -87.6298), 58.0, "W", "Detroit, MI", "3h 45m", "In Transit", Some("LD-003")),
        position(5, "Truck-005", "Robert Brown", (29.7604, -95.3698), 0.0, "S", "Houston, TX", "At Pickup", "At Pickup", None),
    ]
}

/// Fetch trucks and drivers once. Any failure shows the demo positions; an
/// empty fleet does too unless `policy` accepts empty results.
pub async fn load_positions(api: &dyn FleetApi, policy: EmptyPolicy) -> Vec<TruckPosition> {
    let fetched = async {
        let trucks = api.list(RecordKind::Trucks).await?;
        let drivers = api.list(RecordKind::Drivers).await?;
        Ok::<_, ApiError>(fleet_positions(&trucks, &drivers))
    }
    .await;

    match fetched {
        Ok(positions) if !positions.is_empty() || policy == EmptyPolicy::EmptyIsValid => positions,
        other => {
            let msg = match other {
                Err(e) => e.to_string(),
                Ok(_) => "no trucks reported".to_string(),
            };
            log(
                Level::Warn,
                Domain::Tracking,
                "fallback_used",
                obj(&[("kind", v_str("positions")), ("msg", v_str(&msg))]),
            );
            fallback_positions()
        }
    }
}

/// State of the public "track your shipment" form.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TrackingLookup {
    pub code: String,
    pub data: Option<Value>,
    pub error: Option<String>,
    pub loading: bool,
}

impl TrackingLookup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_code(&mut self, code: &str) {
        self.code = code.to_string();
    }

    /// Look up the current code. A blank code sends nothing. On failure only
    /// `error` changes, so whatever was shown before stays on screen.
    pub async fn submit(&mut self, api: &dyn FleetApi) {
        let code = self.code.trim().to_string();
        if code.is_empty() {
            return;
        }

        self.loading = true;
        self.error = None;
        let outcome = api.track(&code).await;
        self.loading = false;

        match outcome {
            Ok(env) if env.success => {
                self.data = env.data;
            }
            Ok(env) => {
                self.error = Some(env.message.unwrap_or_else(|| NOT_FOUND.to_string()));
            }
            Err(err) => {
                log(
                    Level::Warn,
                    Domain::Tracking,
                    "lookup_failed",
                    obj(&[("code", v_str(&code)), ("msg", v_str(&err.to_string()))]),
                );
                self.error = Some(LOOKUP_FAILED.to_string());
            }
        }
    }
}
