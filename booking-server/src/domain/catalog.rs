//! Catalog types: trains, routes, and compartments.
//!
//! The catalog is owned by the administration subsystem and is read-only
//! from the allocation engine's perspective. The engine only enumerates a
//! train's compartments and seats.

use std::fmt;

use chrono::NaiveTime;

use super::{CompartmentId, RouteId, TrainId};

/// A train in the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Train {
    pub id: TrainId,
    pub name: String,
    pub number: String,
}

impl fmt::Display for Train {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.number)
    }
}

/// A route served by a train.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    pub id: RouteId,
    pub train_id: TrainId,
    pub source_station: String,
    pub destination_station: String,
    pub departure_time: NaiveTime,
    pub arrival_time: NaiveTime,
    /// Fare in the smallest currency unit (paise).
    pub price: u64,
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.source_station, self.destination_station)
    }
}

/// A compartment grouping seats that share a travel class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compartment {
    pub id: CompartmentId,
    pub train_id: TrainId,
    pub name: String,
    pub class_type: String,
}

impl fmt::Display for Compartment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.class_type, self.name)
    }
}
