use crate::offer::{Confidence, Endpoint, FlightOffer, Recommendation};
use crate::query::{FilterCriteria, HourWindow, MaxStops};
use crate::time::Time;
use proptest::prelude::*;
use std::sync::Arc;

pub const AIRLINES: [&str; 4] = ["Alaska Airlines", "Delta", "United", "American"];

pub fn id(s: &str) -> Arc<str> {
    Arc::from(s)
}

pub fn ids(offers: &[FlightOffer]) -> Vec<Arc<str>> {
    offers.iter().map(|o| o.id.clone()).collect()
}

pub fn build_offer(
    offer_id: &str,
    airline: &str,
    departure: Time,
    duration_minutes: u32,
    stop_count: u32,
    price: f64,
    recommendation: Recommendation,
) -> FlightOffer {
    FlightOffer {
        id: id(offer_id),
        airline: id(airline),
        departure: Endpoint {
            time: departure,
            airport: id("SEA"),
        },
        arrival: Endpoint {
            time: Time((departure.0 + duration_minutes as u64) % 1440),
            airport: id("JFK"),
        },
        duration_minutes,
        stop_count,
        price,
        recommendation,
        confidence: Confidence::Medium,
        price_change_since_last_check: 0.0,
        target_price: None,
        price_history: vec![],
    }
}

pub fn add_offer(
    offers: &mut Vec<FlightOffer>,
    offer_id: &str,
    airline: &str,
    departure: &str,
    duration_minutes: u32,
    stop_count: u32,
    price: f64,
) {
    offers.push(build_offer(
        offer_id,
        airline,
        departure.parse().unwrap(),
        duration_minutes,
        stop_count,
        price,
        Recommendation::Watch,
    ));
}

/// Delta, 08:00 departure, five hours.
pub fn offer(offer_id: &str, price: f64, stop_count: u32) -> FlightOffer {
    build_offer(
        offer_id,
        "Delta",
        Time::hm(8, 0),
        300,
        stop_count,
        price,
        Recommendation::Watch,
    )
}

pub fn watched(
    offer_id: &str,
    price: f64,
    target_price: Option<f64>,
    recommendation: Recommendation,
) -> FlightOffer {
    FlightOffer {
        target_price,
        recommendation,
        ..offer(offer_id, price, 0)
    }
}

pub fn arb_price() -> impl Strategy<Value = f64> {
    // Coarse steps so equal prices show up often.
    (0u32..40).prop_map(|p| p as f64 * 25.0)
}

pub fn arb_offers() -> impl Strategy<Value = Vec<FlightOffer>> {
    prop::collection::vec(
        (
            prop::sample::select(AIRLINES.to_vec()),
            0..1440u64,
            30..900u32,
            0..3u32,
            arb_price(),
            any::<bool>(),
        ),
        0..25,
    )
    .prop_map(|parts| {
        parts
            .into_iter()
            .enumerate()
            .map(|(i, (airline, dep, dur, stops, price, buy))| {
                let recommendation = if buy {
                    Recommendation::Buy
                } else {
                    Recommendation::Watch
                };
                build_offer(&i.to_string(), airline, Time(dep), dur, stops, price, recommendation)
            })
            .collect()
    })
}

pub fn arb_window() -> impl Strategy<Value = HourWindow> {
    prop_oneof![
        Just(HourWindow::Any),
        (0u8..=24, 0u8..=24).prop_map(|(start, end)| HourWindow::Hours { start, end }),
    ]
}

pub fn arb_criteria() -> impl Strategy<Value = FilterCriteria> {
    (
        prop::option::of(arb_price()),
        prop::option::of(arb_price()),
        prop::option::of(30..900u32),
        prop_oneof![
            Just(MaxStops::Any),
            Just(MaxStops::Nonstop),
            Just(MaxStops::OneStopOrFewer)
        ],
        prop::sample::subsequence(AIRLINES.to_vec(), 0..=AIRLINES.len()),
        arb_window(),
        arb_window(),
    )
        .prop_map(
            |(max_price, min_price, max_duration_minutes, max_stops, airlines, time_window, arrival_window)| {
                FilterCriteria {
                    max_price,
                    min_price,
                    max_duration_minutes,
                    max_stops,
                    allowed_airlines: airlines.into_iter().map(id).collect(),
                    time_window,
                    arrival_window,
                }
            },
        )
}
