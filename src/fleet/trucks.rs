//! Truck create/update payload and its client-side validation.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::api::{ApiError, FleetApi};
use crate::record::Record;

pub const TRUCK_TYPES: [&str; 3] = ["DRY_VAN", "REEFER", "FLATBED"];
pub const TRUCK_STATUSES: [&str; 4] = ["AVAILABLE", "ASSIGNED", "IN_TRANSIT", "MAINTENANCE"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TruckRequest {
    pub truck_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vin: Option<String>,
    pub make: String,
    pub model: String,
    pub year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plate_number: Option<String>,
    pub truck_type: String,
    pub status: String,
    pub capacity_weight: Option<f64>,
    pub capacity_volume: Option<f64>,
    pub fuel_type: Option<String>,
    pub fuel_efficiency: Option<f64>,
    pub current_mileage: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Default for TruckRequest {
    fn default() -> Self {
        Self {
            truck_number: String::new(),
            vin: None,
            make: String::new(),
            model: String::new(),
            year: Some(chrono::Datelike::year(&chrono::Utc::now())),
            plate_number: None,
            truck_type: "DRY_VAN".to_string(),
            status: "AVAILABLE".to_string(),
            capacity_weight: None,
            capacity_volume: None,
            fuel_type: Some("Diesel".to_string()),
            fuel_efficiency: None,
            current_mileage: None,
            notes: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

fn blank_to_none(v: &Option<String>) -> Option<&str> {
    v.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

impl TruckRequest {
    /// Every failing field, in form order. Empty optional strings count as absent.
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();
        let mut fail = |field, message| errors.push(FieldError { field, message });

        let number = self.truck_number.trim();
        if number.is_empty() {
            fail("truckNumber", "Truck number is required");
        } else if !(2..=20).contains(&number.chars().count()) {
            fail("truckNumber", "Truck number must be between 2 and 20 characters");
        }
        if let Some(vin) = blank_to_none(&self.vin) {
            if vin.chars().count() != 17 {
                fail("vin", "VIN must be exactly 17 characters");
            }
        }
        if self.make.trim().is_empty() {
            fail("make", "Make is required");
        } else if self.make.chars().count() > 50 {
            fail("make", "Make must not exceed 50 characters");
        }
        if self.model.trim().is_empty() {
            fail("model", "Model is required");
        } else if self.model.chars().count() > 50 {
            fail("model", "Model must not exceed 50 characters");
        }
        if let Some(year) = self.year {
            if year < 1990 {
                fail("year", "Year must be 1990 or later");
            } else if year > 2030 {
                fail("year", "Year cannot be in the future");
            }
        }
        if blank_to_none(&self.plate_number).map_or(false, |p| p.chars().count() > 20) {
            fail("plateNumber", "Plate number must not exceed 20 characters");
        }
        if !TRUCK_TYPES.contains(&self.truck_type.as_str()) {
            fail("truckType", "Truck type is required");
        }
        for (field, value, message) in [
            ("capacityWeight", self.capacity_weight, "Capacity weight must be positive"),
            ("capacityVolume", self.capacity_volume, "Capacity volume must be positive"),
            ("fuelEfficiency", self.fuel_efficiency, "Fuel efficiency must be positive"),
            ("currentMileage", self.current_mileage, "Current mileage must be positive"),
        ] {
            if value.map_or(false, |v| v <= 0.0) {
                fail(field, message);
            }
        }
        if blank_to_none(&self.fuel_type).map_or(false, |f| f.chars().count() > 30) {
            fail("fuelType", "Fuel type must not exceed 30 characters");
        }
        if self.notes.as_deref().map_or(false, |n| n.chars().count() > 500) {
            fail("notes", "Notes must not exceed 500 characters");
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Prefill an edit form from a listed truck.
    pub fn from_record(r: &Record) -> Self {
        let opt_text = |f: &str| Some(r.text(f)).filter(|s| !s.is_empty());
        let opt_num = |f: &str| Some(r.number(f)).filter(|n| *n != 0.0);
        let defaults = Self::default();
        Self {
            truck_number: r.text("truckNumber"),
            vin: opt_text("vin"),
            make: r.text("make"),
            model: r.text("model"),
            year: opt_num("year").map(|y| y as i32).or(defaults.year),
            plate_number: opt_text("plateNumber"),
            truck_type: opt_text("truckType").unwrap_or(defaults.truck_type),
            status: opt_text("status").unwrap_or(defaults.status),
            capacity_weight: opt_num("capacityWeight"),
            capacity_volume: opt_num("capacityVolume"),
            fuel_type: opt_text("fuelType").or(defaults.fuel_type),
            fuel_efficiency: opt_num("fuelEfficiency"),
            current_mileage: opt_num("currentMileage").or_else(|| opt_num("mileage")),
            notes: opt_text("notes"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    Create,
    Update,
    Delete,
}

impl Mutation {
    fn default_message(&self) -> &'static str {
        match self {
            Mutation::Create => "Failed to create truck",
            Mutation::Update => "Failed to update truck",
            Mutation::Delete => "Failed to delete truck",
        }
    }
}

/// Message to show the user after a failed truck mutation.
pub fn failure_message(op: Mutation, err: &ApiError) -> String {
    match err {
        ApiError::Validation(fields) => fields
            .iter()
            .map(|f| f.message)
            .collect::<Vec<_>>()
            .join("; "),
        other => other
            .server_message()
            .unwrap_or_else(|| op.default_message().to_string()),
    }
}

/// Save a truck form: create when `id` is `None`, update otherwise.
pub async fn save(api: &dyn FleetApi, id: Option<&str>, req: &TruckRequest) -> Result<Record, String> {
    let (op, result) = match id {
        None => (Mutation::Create, api.create_truck(req).await),
        Some(id) => (Mutation::Update, api.update_truck(id, req).await),
    };
    result.map_err(|e| failure_message(op, &e))
}

pub async fn remove(api: &dyn FleetApi, id: &str) -> Result<(), String> {
    api.delete_truck(id)
        .await
        .map_err(|e| failure_message(Mutation::Delete, &e))
}
