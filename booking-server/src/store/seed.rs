//! Sample catalog seeding.
//!
//! Builds the demo catalog used by the binary and by integration-style
//! tests: three trains, one route each, compartments grouped by travel
//! class, and 24 seats per compartment with berth types cycling through the
//! standard layout.

use chrono::NaiveTime;

use crate::domain::{BerthType, Compartment, CompartmentId, Route, RouteId, Seat, SeatId, Train, TrainId};

use super::Tables;

/// Number of seats generated per compartment.
const SEATS_PER_COMPARTMENT: u32 = 24;

/// Build the sample catalog.
pub fn sample_catalog() -> Tables {
    let mut tables = Tables::new();

    let rajdhani = add_train(&mut tables, "Rajdhani Express", "12301");
    let shatabdi = add_train(&mut tables, "Shatabdi Express", "12002");
    let duronto = add_train(&mut tables, "Duronto Express", "12259");

    add_route(
        &mut tables,
        rajdhani,
        "New Delhi",
        "Mumbai Central",
        (16, 55),
        (8, 35),
        150_000,
    );
    add_route(
        &mut tables,
        shatabdi,
        "New Delhi",
        "Chandigarh",
        (17, 20),
        (21, 0),
        80_000,
    );
    add_route(
        &mut tables,
        duronto,
        "Mumbai Central",
        "Pune",
        (6, 0),
        (9, 30),
        60_000,
    );

    add_compartment(&mut tables, rajdhani, "A1", "AC 2 Tier");
    add_compartment(&mut tables, rajdhani, "A2", "AC 2 Tier");
    add_compartment(&mut tables, rajdhani, "B1", "AC 3 Tier");
    add_compartment(&mut tables, shatabdi, "CC1", "AC Chair Car");
    add_compartment(&mut tables, duronto, "S1", "Sleeper");

    tables
}

/// Build a minimal catalog for tests: one train, one route, one
/// compartment with the given number of seats.
pub fn tiny_catalog(seat_count: u32) -> (Tables, TrainId, RouteId) {
    let mut tables = Tables::new();
    let train = add_train(&mut tables, "Test Express", "00001");
    let route = add_route(&mut tables, train, "Origin", "Terminus", (10, 0), (12, 0), 50_000);

    let compartment = CompartmentId(tables.next_catalog_id());
    tables.compartments.insert(
        compartment,
        Compartment {
            id: compartment,
            train_id: train,
            name: "T1".to_string(),
            class_type: "Sleeper".to_string(),
        },
    );
    for i in 1..=seat_count {
        add_seat(&mut tables, compartment, "T1", i);
    }

    (tables, train, route)
}

fn add_train(tables: &mut Tables, name: &str, number: &str) -> TrainId {
    let id = TrainId(tables.next_catalog_id());
    tables.trains.insert(
        id,
        Train {
            id,
            name: name.to_string(),
            number: number.to_string(),
        },
    );
    id
}

fn add_route(
    tables: &mut Tables,
    train_id: TrainId,
    source: &str,
    destination: &str,
    departure: (u32, u32),
    arrival: (u32, u32),
    price: u64,
) -> RouteId {
    let id = RouteId(tables.next_catalog_id());
    tables.routes.insert(
        id,
        Route {
            id,
            train_id,
            source_station: source.to_string(),
            destination_station: destination.to_string(),
            departure_time: NaiveTime::from_hms_opt(departure.0, departure.1, 0)
                .unwrap_or_default(),
            arrival_time: NaiveTime::from_hms_opt(arrival.0, arrival.1, 0).unwrap_or_default(),
            price,
        },
    );
    id
}

fn add_compartment(tables: &mut Tables, train_id: TrainId, name: &str, class_type: &str) {
    let id = CompartmentId(tables.next_catalog_id());
    tables.compartments.insert(
        id,
        Compartment {
            id,
            train_id,
            name: name.to_string(),
            class_type: class_type.to_string(),
        },
    );
    for i in 1..=SEATS_PER_COMPARTMENT {
        add_seat(tables, id, name, i);
    }
}

fn add_seat(tables: &mut Tables, compartment_id: CompartmentId, compartment_name: &str, index: u32) {
    let id = SeatId(tables.next_catalog_id());
    let berth_type = BerthType::ALL[(index as usize - 1) % BerthType::ALL.len()];
    tables.seats.insert(
        id,
        Seat {
            id,
            compartment_id,
            berth_type,
            seat_number: format!("{compartment_name}-{index}"),
            is_available: true,
        },
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_catalog_shape() {
        let tables = sample_catalog();
        assert_eq!(tables.trains.len(), 3);
        assert_eq!(tables.routes.len(), 3);
        assert_eq!(tables.compartments.len(), 5);
        assert_eq!(tables.seats.len(), 5 * SEATS_PER_COMPARTMENT as usize);
        assert!(tables.seats.values().all(|s| s.is_available));
    }

    #[test]
    fn berth_types_cycle() {
        let (tables, _, _) = tiny_catalog(6);
        let berths: Vec<_> = tables.seats.values().map(|s| s.berth_type).collect();
        assert_eq!(
            berths,
            vec![
                BerthType::Lower,
                BerthType::Middle,
                BerthType::Upper,
                BerthType::SideLower,
                BerthType::SideUpper,
                BerthType::Lower,
            ]
        );
    }

    #[test]
    fn tiny_catalog_links_route_to_train() {
        let (tables, train, route) = tiny_catalog(1);
        assert_eq!(tables.routes[&route].train_id, train);
        assert_eq!(tables.seats.len(), 1);
    }

    #[test]
    fn seat_numbers_carry_compartment_name() {
        let (tables, _, _) = tiny_catalog(2);
        let numbers: Vec<_> = tables
            .seats
            .values()
            .map(|s| s.seat_number.clone())
            .collect();
        assert_eq!(numbers, vec!["T1-1".to_string(), "T1-2".to_string()]);
    }
}
