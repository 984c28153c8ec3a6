//! Track aggregation
//!
//! Groups trackpoints into ordered tracks. Grouping keys appear in
//! first-seen order; points without an explicit track id fall into the
//! implicit `"default"` track.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::app::models::{Point, Track};
use crate::constants::DEFAULT_TRACK_ID;

/// Build the derived track view from a point snapshot
///
/// Only trackpoints participate; waypoints are ignored. The result is
/// deterministic for a given input sequence: tracks appear in the order
/// their key was first seen, and points within a track are ordered by
/// ascending timestamp with a stable sort.
pub fn build_tracks(points: &[Point]) -> Vec<Track> {
    let mut order: Vec<String> = Vec::new();
    let mut grouped: HashMap<String, Vec<Point>> = HashMap::new();

    for point in points.iter().filter(|p| p.is_trackpoint()) {
        let track_id = point
            .track_id
            .clone()
            .unwrap_or_else(|| DEFAULT_TRACK_ID.to_string());

        let bucket = grouped.entry(track_id.clone()).or_insert_with(|| {
            order.push(track_id.clone());
            Vec::new()
        });
        bucket.push(point.clone());
    }

    order
        .into_iter()
        .map(|id| {
            let mut track_points = grouped.remove(&id).unwrap_or_default();
            sort_by_timestamp(&mut track_points);
            Track {
                id,
                points: track_points,
            }
        })
        .collect()
}

/// Stable in-place sort by ascending timestamp
///
/// A point with a missing timestamp compares equal to everything, so it is
/// never moved and neighbors keep their recording order around it. That
/// comparator is not a total order, which rules out the std sort; a plain
/// insertion sort applies it safely and keeps equal elements stable.
fn sort_by_timestamp(points: &mut [Point]) {
    for i in 1..points.len() {
        let mut j = i;
        while j > 0 && timestamp_cmp(&points[j - 1], &points[j]) == Ordering::Greater {
            points.swap(j - 1, j);
            j -= 1;
        }
    }
}

fn timestamp_cmp(a: &Point, b: &Point) -> Ordering {
    match (a.timestamp, b.timestamp) {
        (Some(left), Some(right)) => left.cmp(&right),
        _ => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::models::PointKind;
    use chrono::{TimeZone, Utc};

    fn trackpoint(name: &str, track_id: Option<&str>, minute: Option<u32>) -> Point {
        Point {
            id: format!("pt-{}", name),
            name: name.to_string(),
            description: None,
            latitude: 1.0,
            longitude: 2.0,
            kind: PointKind::Trackpoint,
            elevation: None,
            timestamp: minute
                .map(|m| Utc.with_ymd_and_hms(2024, 5, 1, 10, m, 0).unwrap()),
            track_id: track_id.map(str::to_string),
            group_id: None,
            created_at: Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap(),
        }
    }

    fn names(track: &Track) -> Vec<&str> {
        track.points.iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn test_groups_by_track_id_and_sorts_by_timestamp() {
        let points = vec![
            trackpoint("a2", Some("A"), Some(2)),
            trackpoint("a1", Some("A"), Some(1)),
            trackpoint("b5", Some("B"), Some(5)),
        ];

        let tracks = build_tracks(&points);
        assert_eq!(tracks.len(), 2);
        assert_eq!(tracks[0].id, "A");
        assert_eq!(names(&tracks[0]), vec!["a1", "a2"]);
        assert_eq!(tracks[1].id, "B");
        assert_eq!(names(&tracks[1]), vec!["b5"]);
    }

    #[test]
    fn test_waypoints_are_excluded() {
        let mut waypoint = trackpoint("w", Some("A"), Some(1));
        waypoint.kind = PointKind::Waypoint;

        let points = vec![waypoint, trackpoint("t", Some("A"), Some(2))];
        let tracks = build_tracks(&points);

        assert_eq!(tracks.len(), 1);
        assert_eq!(names(&tracks[0]), vec!["t"]);
    }

    #[test]
    fn test_missing_track_id_falls_into_default_track() {
        let points = vec![
            trackpoint("x", None, Some(1)),
            trackpoint("y", None, Some(2)),
        ];

        let tracks = build_tracks(&points);
        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].id, DEFAULT_TRACK_ID);
        assert_eq!(tracks[0].len(), 2);
    }

    #[test]
    fn test_track_order_is_first_seen() {
        let points = vec![
            trackpoint("z1", Some("zulu"), Some(1)),
            trackpoint("a1", Some("alpha"), Some(1)),
            trackpoint("z2", Some("zulu"), Some(2)),
        ];

        let tracks = build_tracks(&points);
        let ids: Vec<&str> = tracks.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["zulu", "alpha"]);
    }

    #[test]
    fn test_missing_timestamps_are_not_reordered() {
        let points = vec![
            trackpoint("n1", Some("A"), None),
            trackpoint("n2", Some("A"), None),
            trackpoint("n3", Some("A"), None),
        ];

        let tracks = build_tracks(&points);
        assert_eq!(names(&tracks[0]), vec!["n1", "n2", "n3"]);
    }

    #[test]
    fn test_untimestamped_point_keeps_its_position() {
        // The untimestamped point compares equal to both neighbors, so the
        // recording order around it survives the sort
        let points = vec![
            trackpoint("t2", Some("A"), Some(2)),
            trackpoint("gap", Some("A"), None),
            trackpoint("t1", Some("A"), Some(1)),
        ];

        let tracks = build_tracks(&points);
        assert_eq!(names(&tracks[0]), vec!["t2", "gap", "t1"]);
    }

    #[test]
    fn test_equal_timestamps_keep_input_order() {
        let points = vec![
            trackpoint("first", Some("A"), Some(5)),
            trackpoint("second", Some("A"), Some(5)),
        ];

        let tracks = build_tracks(&points);
        assert_eq!(names(&tracks[0]), vec!["first", "second"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(build_tracks(&[]).is_empty());
    }
}
