//! Curve-based batch assignment.
//!
//! Three clicks define a quadratic Bézier curve: start, end and a control
//! point the curve bows toward. The curve is sampled at evenly spaced
//! parameter values and each sample goes to the next consecutive channel.

use crate::model::{ImagePoint, Pixel};
use crate::store::Assignment;

/// The three points of an arc, in curve terms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcSpec {
    pub start: ImagePoint,
    pub end: ImagePoint,
    pub control: ImagePoint,
}

impl ArcSpec {
    pub fn new(start: ImagePoint, end: ImagePoint, control: ImagePoint) -> Self {
        Self {
            start,
            end,
            control,
        }
    }

    /// Evaluate `B(t) = (1-t)^2 P0 + 2(1-t)t Pc + t^2 P1`.
    pub fn point_at(&self, t: f64) -> ImagePoint {
        let u = 1.0 - t;
        let a = u * u;
        let b = 2.0 * u * t;
        let c = t * t;
        ImagePoint::new(
            a * self.start.x + b * self.control.x + c * self.end.x,
            a * self.start.y + b * self.control.y + c * self.end.y,
        )
    }

    /// `count` samples from start to end at `t = i / (count - 1)`.
    ///
    /// A single sample sits on the start point.
    pub fn sample(&self, count: u32) -> Vec<ImagePoint> {
        match count {
            0 => Vec::new(),
            1 => vec![self.start],
            _ => {
                let last = f64::from(count - 1);
                (0..count)
                    .map(|i| self.point_at(f64::from(i) / last))
                    .collect()
            }
        }
    }
}

/// Turn an arc into channel assignments.
///
/// Sample `i` goes to channel `first_channel + i`. Samples that would land
/// past `channel_count` are dropped, so the result may be shorter than
/// `samples`. Every assignment carries `slice` and a rounded pixel.
pub fn assign_arc(
    arc: &ArcSpec,
    samples: u32,
    first_channel: u32,
    channel_count: u32,
    slice: u32,
) -> Vec<Assignment> {
    let assignments: Vec<Assignment> = arc
        .sample(samples)
        .into_iter()
        .zip(first_channel..=channel_count)
        .map(|(point, channel)| Assignment::new(channel, slice, Pixel::from(point)))
        .collect();

    if assignments.len() < samples as usize {
        log::debug!(
            "Arc from channel {} truncated to {} of {} samples (last channel {})",
            first_channel,
            assignments.len(),
            samples,
            channel_count
        );
    }
    assignments
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bowed_arc() -> ArcSpec {
        ArcSpec::new(
            ImagePoint::new(0.0, 0.0),
            ImagePoint::new(10.0, 0.0),
            ImagePoint::new(5.0, 10.0),
        )
    }

    #[test]
    fn test_endpoints() {
        let arc = bowed_arc();
        assert_eq!(arc.point_at(0.0), arc.start);
        assert_eq!(arc.point_at(1.0), arc.end);
        let mid = arc.point_at(0.5);
        assert!((mid.x - 5.0).abs() < 1e-9);
        assert!((mid.y - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_eight_samples_follow_curve() {
        let assignments = assign_arc(&bowed_arc(), 8, 10, 64, 3);
        assert_eq!(assignments.len(), 8);

        let channels: Vec<u32> = assignments.iter().map(|a| a.channel).collect();
        assert_eq!(channels, (10..=17).collect::<Vec<_>>());

        let xs: Vec<i32> = assignments.iter().map(|a| a.point.x).collect();
        assert_eq!(xs.first(), Some(&0));
        assert_eq!(xs.last(), Some(&10));
        assert!(xs.windows(2).all(|w| w[0] < w[1]), "x increasing: {:?}", xs);

        let ys: Vec<i32> = assignments.iter().map(|a| a.point.y).collect();
        assert_eq!(ys, vec![0, 2, 4, 5, 5, 4, 2, 0]);
        assert!(assignments.iter().all(|a| a.slice == 3));
    }

    #[test]
    fn test_truncates_at_last_channel() {
        let assignments = assign_arc(&bowed_arc(), 8, 60, 64, 1);
        let channels: Vec<u32> = assignments.iter().map(|a| a.channel).collect();
        assert_eq!(channels, vec![60, 61, 62, 63, 64]);
        // Kept samples are the first ones along the curve
        assert_eq!(assignments[0].point, Pixel::new(0, 0));
    }

    #[test]
    fn test_start_past_end_assigns_nothing() {
        assert!(assign_arc(&bowed_arc(), 8, 65, 64, 1).is_empty());
    }

    #[test]
    fn test_single_sample() {
        let assignments = assign_arc(&bowed_arc(), 1, 1, 4, 2);
        assert_eq!(assignments, vec![Assignment::new(1, 2, Pixel::new(0, 0))]);
    }

    #[test]
    fn test_two_samples_hit_endpoints() {
        let arc = ArcSpec::new(
            ImagePoint::new(0.0, 0.0),
            ImagePoint::new(20.0, 0.0),
            ImagePoint::new(10.0, 10.0),
        );
        assert_eq!(
            arc.sample(2),
            vec![ImagePoint::new(0.0, 0.0), ImagePoint::new(20.0, 0.0)]
        );
    }
}
