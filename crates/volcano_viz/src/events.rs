use crate::volcano::Volcano;

use itertools::Itertools;
use log::debug;

/// (longitude, latitude)
pub type Point = (f64, f64);

/// One step of the staged animation. Indices refer to the record slice the
/// events were built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Reveal { volcano: usize },
    Connect { from: usize, to: usize, vei: u8 },
}

impl Event {
    /// Endpoints of a `Connect`, None for `Reveal` or out-of-range indices
    pub fn segment(&self, volcanoes: &[Volcano]) -> Option<(Point, Point)> {
        match *self {
            Event::Connect { from, to, .. } => {
                Some((volcanoes.get(from)?.position(), volcanoes.get(to)?.position()))
            }
            Event::Reveal { .. } => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventSummary {
    pub reveals: usize,
    pub connects: usize,
}

impl EventSummary {
    pub fn of(events: &[Event]) -> Self {
        events.iter().fold(Self::default(), |mut acc, e| {
            match e {
                Event::Reveal { .. } => acc.reveals += 1,
                Event::Connect { .. } => acc.connects += 1,
            }
            acc
        })
    }

    pub fn total(&self) -> usize {
        self.reveals + self.connects
    }
}

/// Builds the staged event sequence.
///
/// Records are grouped by `visual` (ascending), ordered by longitude inside a
/// group, and revealed one by one. Each group of two or more is then chained
/// with one `Connect` per consecutive pair. Sorting is stable, so ties keep
/// load order and the output is identical for identical input.
pub fn build_events(volcanoes: &[Volcano]) -> Vec<Event> {
    let ordered = volcanoes
        .iter()
        .enumerate()
        .sorted_by(|(_, a), (_, b)| {
            a.visual
                .cmp(&b.visual)
                .then_with(|| a.longitude.total_cmp(&b.longitude))
        })
        .collect_vec();

    let mut events = Vec::with_capacity(volcanoes.len() * 2);

    for (visual, group) in &ordered.iter().chunk_by(|(_, v)| v.visual) {
        let members = group.collect_vec();
        debug!("group visual={visual}: {} volcanoes", members.len());

        events.extend(members.iter().map(|&&(i, _)| Event::Reveal { volcano: i }));

        // vei is constant within a group since visual depends on vei only
        let vei = members[0].1.vei;
        events.extend(
            members
                .iter()
                .tuple_windows()
                .map(|(&&(from, _), &&(to, _))| Event::Connect { from, to, vei }),
        );
    }

    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn volcano(index: usize, name: &str, lat: f64, lon: f64, vei: u8) -> Volcano {
        Volcano::new(index, name, lat, lon, vei)
    }

    fn sample() -> Vec<Volcano> {
        vec![
            volcano(0, "A", 10.0, 20.0, 2),
            volcano(1, "B", 10.0, 21.0, 2),
            volcano(2, "C", 30.0, 40.0, 0),
        ]
    }

    #[test]
    fn test_groups_ascending_then_chained() {
        let events = build_events(&sample());
        assert_eq!(
            events,
            vec![
                Event::Reveal { volcano: 2 },
                Event::Reveal { volcano: 0 },
                Event::Reveal { volcano: 1 },
                Event::Connect {
                    from: 0,
                    to: 1,
                    vei: 2
                },
            ]
        );
    }

    #[test]
    fn test_singleton_group_has_no_connect() {
        let events = build_events(&[volcano(0, "Solo", 0.0, 0.0, 4)]);
        assert_eq!(events, vec![Event::Reveal { volcano: 0 }]);
    }

    #[test]
    fn test_empty_input() {
        assert!(build_events(&[]).is_empty());
    }

    #[test]
    fn test_within_group_sorted_by_longitude() {
        let volcanoes = vec![
            volcano(0, "East", 0.0, 100.0, 1),
            volcano(1, "West", 0.0, -100.0, 1),
            volcano(2, "Mid", 0.0, 0.0, 1),
        ];
        let events = build_events(&volcanoes);
        assert_eq!(
            events,
            vec![
                Event::Reveal { volcano: 1 },
                Event::Reveal { volcano: 2 },
                Event::Reveal { volcano: 0 },
                Event::Connect {
                    from: 1,
                    to: 2,
                    vei: 1
                },
                Event::Connect {
                    from: 2,
                    to: 0,
                    vei: 1
                },
            ]
        );
    }

    #[test]
    fn test_equal_longitude_keeps_load_order() {
        let volcanoes = vec![
            volcano(0, "First", 1.0, 5.0, 3),
            volcano(1, "Second", 2.0, 5.0, 3),
            volcano(2, "Third", 3.0, 5.0, 3),
        ];
        let reveals: Vec<usize> = build_events(&volcanoes)
            .into_iter()
            .filter_map(|e| match e {
                Event::Reveal { volcano } => Some(volcano),
                _ => None,
            })
            .collect();
        assert_eq!(reveals, vec![0, 1, 2]);
    }

    #[test]
    fn test_event_counts() {
        // group sizes: vei0 -> 1, vei1 -> 3, vei3 -> 2
        let volcanoes = vec![
            volcano(0, "a", 0.0, 3.0, 1),
            volcano(1, "b", 0.0, 1.0, 3),
            volcano(2, "c", 0.0, 2.0, 1),
            volcano(3, "d", 0.0, 9.0, 0),
            volcano(4, "e", 0.0, 0.0, 1),
            volcano(5, "f", 0.0, 4.0, 3),
        ];
        let summary = EventSummary::of(&build_events(&volcanoes));
        assert_eq!(summary.reveals, volcanoes.len());
        assert_eq!(summary.connects, (3 - 1) + (2 - 1));
        assert_eq!(summary.total(), 9);
    }

    #[test]
    fn test_connect_only_after_both_reveals() {
        let volcanoes = vec![
            volcano(0, "a", 0.0, 30.0, 2),
            volcano(1, "b", 0.0, -30.0, 0),
            volcano(2, "c", 0.0, 10.0, 2),
            volcano(3, "d", 0.0, -10.0, 0),
            volcano(4, "e", 0.0, 50.0, 2),
        ];
        let mut revealed = HashSet::new();
        for event in build_events(&volcanoes) {
            match event {
                Event::Reveal { volcano } => {
                    assert!(revealed.insert(volcano));
                }
                Event::Connect { from, to, vei } => {
                    assert!(revealed.contains(&from) && revealed.contains(&to));
                    assert_eq!(volcanoes[from].vei, vei);
                    assert_eq!(volcanoes[to].vei, vei);
                }
            }
        }
        assert_eq!(revealed.len(), volcanoes.len());
    }

    #[test]
    fn test_deterministic() {
        let volcanoes = sample();
        assert_eq!(build_events(&volcanoes), build_events(&volcanoes));
    }

    #[test]
    fn test_segment_resolves_positions() {
        let volcanoes = sample();
        let connect = Event::Connect {
            from: 0,
            to: 1,
            vei: 2,
        };
        assert_eq!(
            connect.segment(&volcanoes),
            Some(((20.0, 10.0), (21.0, 10.0)))
        );
        assert_eq!(Event::Reveal { volcano: 0 }.segment(&volcanoes), None);

        let dangling = Event::Connect {
            from: 0,
            to: 9,
            vei: 2,
        };
        assert_eq!(dangling.segment(&volcanoes), None);
    }
}
