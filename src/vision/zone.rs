/// Axis-aligned pixel rectangle in frame coordinates.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl Zone {
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }
    pub fn center(&self) -> (f64, f64) {
        ((self.x1 + self.x2) / 2.0, (self.y1 + self.y2) / 2.0)
    }
    pub fn area(&self) -> f64 {
        (self.x2 - self.x1) * (self.y2 - self.y1)
    }
    /// Center-to-center euclidean distance.
    pub fn distance(&self, other: &Zone) -> f64 {
        let (ax, ay) = self.center();
        let (bx, by) = other.center();
        ((ax - bx).powi(2) + (ay - by).powi(2)).sqrt()
    }
    /// Intersection over union.
    pub fn iou(&self, other: &Zone) -> f64 {
        let inter = self.intersection(other);
        let union = self.area() + other.area() - inter;
        if union > 0.0 { inter / union } else { 0.0 }
    }
    /// Fraction of `content`'s area that falls inside `self`.
    pub fn overlap(&self, content: &Zone) -> f64 {
        let inter = self.intersection(content);
        let area = content.area();
        if area > 0.0 { inter / area } else { 0.0 }
    }
    /// Whether `inner` sits inside `self` with at least `threshold` of
    /// its area covered.
    pub fn contains(&self, inner: &Zone, threshold: f64) -> bool {
        self.overlap(inner) >= threshold
    }
    fn intersection(&self, other: &Zone) -> f64 {
        let w = self.x2.min(other.x2) - self.x1.max(other.x1);
        let h = self.y2.min(other.y2) - self.y1.max(other.y1);
        if w <= 0.0 || h <= 0.0 { 0.0 } else { w * h }
    }
}

/// Order points clockwise around their centroid. Returns the permutation
/// of input indices; stable for ties.
pub fn clockwise(centers: &[(f64, f64)]) -> Vec<usize> {
    if centers.len() < 2 {
        return (0..centers.len()).collect();
    }
    let cx = centers.iter().map(|c| c.0).sum::<f64>() / centers.len() as f64;
    let cy = centers.iter().map(|c| c.1).sum::<f64>() / centers.len() as f64;
    let mut order = (0..centers.len()).collect::<Vec<_>>();
    order.sort_by(|&a, &b| {
        let ta = (centers[a].1 - cy).atan2(centers[a].0 - cx);
        let tb = (centers[b].1 - cy).atan2(centers[b].0 - cx);
        ta.partial_cmp(&tb).unwrap_or(std::cmp::Ordering::Equal)
    });
    order
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn containment_threshold() {
        let outer = Zone::new(0.0, 0.0, 100.0, 100.0);
        let inner = Zone::new(10.0, 10.0, 30.0, 30.0);
        let edge = Zone::new(90.0, 90.0, 110.0, 110.0);
        assert!(outer.contains(&inner, 0.9));
        assert!(!outer.contains(&edge, 0.9));
        assert!(outer.contains(&edge, 0.2));
    }

    #[test]
    fn iou_disjoint() {
        let a = Zone::new(0.0, 0.0, 10.0, 10.0);
        let b = Zone::new(20.0, 20.0, 30.0, 30.0);
        assert_eq!(a.iou(&b), 0.0);
        assert!(a.iou(&a) > 0.99);
    }

    #[test]
    fn clockwise_around_table() {
        // twelve, three, six, nine o'clock
        let centers = [(50.0, 0.0), (100.0, 50.0), (50.0, 100.0), (0.0, 50.0)];
        let order = clockwise(&centers);
        // screen y grows downward, so atan2 order walks clockwise visually
        let start = order.iter().position(|&i| i == 0).unwrap();
        let walked = (0..4).map(|k| order[(start + k) % 4]).collect::<Vec<_>>();
        assert_eq!(walked, vec![0, 1, 2, 3]);
    }
}

use serde::Deserialize;
use serde::Serialize;
