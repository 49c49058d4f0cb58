//! Closest-aircraft selection.

use crate::coord::{distance_miles, Coordinate};
use crate::feed::StateVector;

/// Pick the identifier of the aircraft nearest to `home`.
///
/// Single pass over `states` keeping a running minimum. The minimum starts
/// unset, so any candidate wins the first comparison regardless of distance.
/// States without a position or with a blank callsign are skipped. On an
/// exact tie the earlier state in feed order is kept.
///
/// Returns `None` when no state is a candidate.
pub fn select_closest(states: &[StateVector], home: Coordinate) -> Option<String> {
    let mut best: Option<(f64, &str)> = None;

    for state in states {
        let (Some(position), Some(ident)) = (state.position(), state.identifier()) else {
            continue;
        };

        let distance = distance_miles(home, position);
        match best {
            Some((min, _)) if distance >= min => {}
            _ => best = Some((distance, ident)),
        }
    }

    best.map(|(_, ident)| ident.to_string())
}

/// States strictly within `radius_miles` of `home`, in feed order.
///
/// The bounding box over-approximates the radius; this is the exact circle.
pub fn states_within_radius<'a>(
    states: &'a [StateVector],
    home: Coordinate,
    radius_miles: f64,
) -> Vec<&'a StateVector> {
    states
        .iter()
        .filter(|state| {
            state
                .position()
                .is_some_and(|position| distance_miles(home, position) < radius_miles)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORIGIN: Coordinate = Coordinate::new(0.0, 0.0);

    #[test]
    fn test_empty_input_selects_nothing() {
        assert_eq!(select_closest(&[], ORIGIN), None);
    }

    #[test]
    fn test_nearest_wins() {
        let states = vec![
            StateVector::new("A", 1.0, 0.0),
            StateVector::new("B", 0.0, 0.5),
        ];
        assert_eq!(select_closest(&states, ORIGIN), Some("B".to_string()));
    }

    #[test]
    fn test_identifier_is_trimmed() {
        let mut state = StateVector::new("X", 0.1, 0.1);
        state.callsign = "  SWA77 ".to_string();
        assert_eq!(select_closest(&[state], ORIGIN), Some("SWA77".to_string()));
    }

    #[test]
    fn test_no_distance_threshold() {
        // far outside any reasonable radius but still the only candidate
        let states = vec![StateVector::new("FAR1", 45.0, 90.0)];
        assert_eq!(select_closest(&states, ORIGIN), Some("FAR1".to_string()));
    }

    #[test]
    fn test_tie_keeps_first() {
        let states = vec![
            StateVector::new("FIRST", 0.0, 1.0),
            StateVector::new("SECOND", 0.0, 1.0),
        ];
        assert_eq!(select_closest(&states, ORIGIN), Some("FIRST".to_string()));
    }

    #[test]
    fn test_skips_states_without_position() {
        let mut no_position = StateVector::new("GHOST", 0.0, 0.0);
        no_position.latitude = None;

        let states = vec![no_position, StateVector::new("REAL", 2.0, 2.0)];
        assert_eq!(select_closest(&states, ORIGIN), Some("REAL".to_string()));
    }

    #[test]
    fn test_skips_blank_callsigns() {
        let states = vec![
            StateVector::new("   ", 0.0, 0.01),
            StateVector::new("DAL9", 3.0, 3.0),
        ];
        assert_eq!(select_closest(&states, ORIGIN), Some("DAL9".to_string()));
    }

    #[test]
    fn test_only_blank_callsigns_selects_nothing() {
        let states = vec![StateVector::new("", 0.0, 0.01)];
        assert_eq!(select_closest(&states, ORIGIN), None);
    }

    #[test]
    fn test_states_within_radius() {
        let states = vec![
            StateVector::new("NEAR", 0.1, 0.0),  // ~6.9 mi
            StateVector::new("FAR", 1.0, 0.0),   // ~68.7 mi
            StateVector::new("EDGE", 0.0, 0.2),  // ~13.8 mi
        ];

        let within: Vec<&str> = states_within_radius(&states, ORIGIN, 20.0)
            .iter()
            .map(|s| s.callsign.as_str())
            .collect();
        assert_eq!(within, vec!["NEAR", "EDGE"]);
    }

    #[test]
    fn test_states_within_radius_counts_blank_callsigns() {
        let mut unnamed = StateVector::new("", 0.05, 0.05);
        unnamed.icao24 = "abc123".to_string();
        assert_eq!(states_within_radius(&[unnamed], ORIGIN, 10.0).len(), 1);
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_selected_is_never_farther_than_any_candidate(
                positions in prop::collection::vec((-60.0..60.0_f64, -170.0..170.0_f64), 1..20),
            ) {
                let states: Vec<StateVector> = positions
                    .iter()
                    .enumerate()
                    .map(|(i, (lat, lon))| StateVector::new(&format!("F{}", i), *lat, *lon))
                    .collect();

                let selected = select_closest(&states, ORIGIN).unwrap();
                let chosen = states.iter().find(|s| s.callsign == selected).unwrap();
                let best = distance_miles(ORIGIN, chosen.position().unwrap());

                for state in &states {
                    prop_assert!(best <= distance_miles(ORIGIN, state.position().unwrap()));
                }
            }
        }
    }
}
