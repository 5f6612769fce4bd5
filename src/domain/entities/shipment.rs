//! Domain entity representing a tracked shipment.

use chrono::NaiveDateTime;
use serde::Deserialize;
use validator::Validate;

use crate::utils::{json, timestamp};

/// A shipment as stored in the `shipments` table.
///
/// `shipment_ref` is the business key; every other column is overwritten
/// wholesale when the same reference is ingested again.
#[derive(Debug, Clone, PartialEq)]
pub struct Shipment {
    pub id: i64,
    pub shipment_ref: String,
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub carrier: Option<String>,
    pub planned_departure: Option<NaiveDateTime>,
    pub planned_arrival: Option<NaiveDateTime>,
    pub actual_arrival: Option<NaiveDateTime>,
    pub status: Option<String>,
    pub source_file: Option<String>,
}

/// Input data for inserting or overwriting a shipment.
///
/// Deserialized directly from one element of an ingest batch. Absent optional
/// fields are `None`; absent required fields fail deserialization. Text
/// columns accept any JSON scalar and store its text form.
#[derive(Debug, Clone, PartialEq, Deserialize, Validate)]
pub struct NewShipment {
    #[validate(length(min = 1, message = "shipment_ref must not be empty"))]
    #[serde(deserialize_with = "json::deserialize_text")]
    pub shipment_ref: String,

    #[validate(length(min = 1, message = "origin must not be empty"))]
    #[serde(deserialize_with = "json::deserialize_text")]
    pub origin: String,

    #[validate(length(min = 1, message = "destination must not be empty"))]
    #[serde(deserialize_with = "json::deserialize_text")]
    pub destination: String,

    #[serde(default, deserialize_with = "json::deserialize_optional_text")]
    pub carrier: Option<String>,

    #[serde(default, deserialize_with = "timestamp::deserialize_optional")]
    pub planned_departure: Option<NaiveDateTime>,

    #[serde(default, deserialize_with = "timestamp::deserialize_optional")]
    pub planned_arrival: Option<NaiveDateTime>,

    #[serde(default, deserialize_with = "timestamp::deserialize_optional")]
    pub actual_arrival: Option<NaiveDateTime>,

    #[serde(default, deserialize_with = "json::deserialize_optional_text")]
    pub status: Option<String>,

    #[serde(default, deserialize_with = "json::deserialize_optional_text")]
    pub source_file: Option<String>,
}

impl NewShipment {
    /// Creates a shipment with only the required fields set.
    pub fn new(
        shipment_ref: impl Into<String>,
        origin: impl Into<String>,
        destination: impl Into<String>,
    ) -> Self {
        Self {
            shipment_ref: shipment_ref.into(),
            origin: origin.into(),
            destination: destination.into(),
            carrier: None,
            planned_departure: None,
            planned_arrival: None,
            actual_arrival: None,
            status: None,
            source_file: None,
        }
    }
}

/// Result of writing one shipment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// No row with this `shipment_ref` existed; a new one was created.
    Inserted,
    /// An existing row was overwritten.
    Updated,
}

impl UpsertOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Inserted => "inserted",
            Self::Updated => "updated",
        }
    }
}
