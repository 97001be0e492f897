use crate::offer::FlightOffer;
use crate::query::tests::utils::{arb_criteria, arb_offers, arb_price, id, ids, AIRLINES};
use crate::query::{filter, sort, toggle_compare, CompareSet, FilterCriteria, HourWindow, SortKey};
use proptest::prelude::*;
use std::sync::Arc;

fn narrow(window: HourWindow) -> HourWindow {
    match window {
        HourWindow::Any => HourWindow::Hours { start: 6, end: 18 },
        HourWindow::Hours { start, end } if start < end => HourWindow::Hours { start, end: end - 1 },
        HourWindow::Hours { start, end } if start > end => HourWindow::Hours {
            start,
            end: end.saturating_sub(1),
        },
        other => other,
    }
}

fn sorted_ids(set: &CompareSet) -> Vec<Arc<str>> {
    let mut ids = set.ids().to_vec();
    ids.sort();
    ids
}

fn input_position(offer: &FlightOffer) -> usize {
    offer.id.parse().unwrap()
}

proptest! {
    #[test]
    fn test_filter_is_idempotent(offers in arb_offers(), criteria in arb_criteria()) {
        let once = filter(&offers, &criteria).unwrap();
        let twice = filter(&once, &criteria).unwrap();
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn test_filter_keeps_input_order(offers in arb_offers(), criteria in arb_criteria()) {
        let positions: Vec<usize> = filter(&offers, &criteria).unwrap().iter().map(input_position).collect();
        prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_tightening_never_grows_the_result(
        offers in arb_offers(),
        criteria in arb_criteria(),
        cap in arb_price(),
        airline in prop::sample::select(AIRLINES.to_vec()),
    ) {
        let base = filter(&offers, &criteria).unwrap().len();

        let tighter_price = FilterCriteria {
            max_price: Some(criteria.max_price.map_or(cap, |max| max.min(cap))),
            ..criteria.clone()
        };
        prop_assert!(filter(&offers, &tighter_price).unwrap().len() <= base);

        let tighter_window = FilterCriteria {
            time_window: narrow(criteria.time_window),
            ..criteria.clone()
        };
        prop_assert!(filter(&offers, &tighter_window).unwrap().len() <= base);

        let mut allowed = criteria.allowed_airlines.clone();
        if allowed.is_empty() {
            allowed.insert(id(airline));
        } else if allowed.len() > 1 {
            allowed.remove(airline);
        }
        let tighter_airlines = FilterCriteria {
            allowed_airlines: allowed,
            ..criteria.clone()
        };
        prop_assert!(filter(&offers, &tighter_airlines).unwrap().len() <= base);
    }

    #[test]
    fn test_sort_orders_by_key(offers in arb_offers()) {
        let by_price = sort(&offers, SortKey::PriceAsc).unwrap();
        prop_assert!(by_price.windows(2).all(|w| w[0].price <= w[1].price));
        for pair in by_price.windows(2) {
            if pair[0].price == pair[1].price {
                prop_assert!(
                    input_position(&pair[0]) < input_position(&pair[1]),
                    "\nUnstable tie at ${}: {} before {}",
                    pair[0].price, pair[0].id, pair[1].id
                );
            }
        }

        let by_duration = sort(&offers, SortKey::DurationAsc).unwrap();
        prop_assert!(by_duration.windows(2).all(|w| w[0].duration_minutes <= w[1].duration_minutes));

        let by_departure = sort(&offers, SortKey::DepartureTimeAsc).unwrap();
        prop_assert!(by_departure.windows(2).all(|w| w[0].departure.time <= w[1].departure.time));
    }

    #[test]
    fn test_sort_is_a_permutation(offers in arb_offers()) {
        let mut expected = ids(&offers);
        expected.sort();
        for key in [SortKey::Best, SortKey::PriceAsc, SortKey::DurationAsc, SortKey::DepartureTimeAsc] {
            let mut got = ids(&sort(&offers, key).unwrap());
            got.sort();
            prop_assert_eq!(&expected, &got);
        }
    }

    #[test]
    fn test_compare_set_stays_bounded(
        toggles in prop::collection::vec(0..6u8, 0..40),
        extra in 0..6u8,
        repeats in 1..4usize,
    ) {
        let mut current = CompareSet::new();
        for t in toggles {
            current = toggle_compare(&current, id(&t.to_string()));
            prop_assert!(current.len() <= CompareSet::CAPACITY);
            let mut unique = sorted_ids(&current);
            unique.dedup();
            prop_assert_eq!(unique.len(), current.len());
        }

        let mut again = current.clone();
        for _ in 0..repeats * 2 {
            again = toggle_compare(&again, id(&extra.to_string()));
        }
        prop_assert_eq!(sorted_ids(&current), sorted_ids(&again));
    }
}
