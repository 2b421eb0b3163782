#[derive(Clone, Copy, Debug)]
struct KdNode {
    min: [f64; 2],
    max: [f64; 2],
    left: u32, // u32::MAX if leaf
    right: u32,
    // Leaf data: indices[start..end]
    start: u32,
    end: u32,
    // Internal node data
    split_val: f64,
    axis: u8,
}

/// Kd-tree over a flat `[x, y, x, y, ...]` point array.
///
/// Used for the nearest-seed lookup when assigning box corners to regions.
pub struct KdTree {
    nodes: Vec<KdNode>,
    indices: Vec<usize>,
}

impl KdTree {
    pub fn new() -> Self {
        KdTree {
            nodes: Vec::new(),
            indices: Vec::new(),
        }
    }

    pub fn build(&mut self, points: &[f64]) {
        let count = points.len() / 2;
        self.indices = (0..count).collect();
        self.nodes.clear();

        if count == 0 {
            return;
        }

        // Reserve memory to avoid reallocations
        // A balanced tree has 2*N nodes roughly
        self.nodes.reserve(count * 2);

        self.build_recursive(0, count, points);
    }

    fn build_recursive(&mut self, start: usize, end: usize, points: &[f64]) -> u32 {
        let count = end - start;

        // Compute bounding box for this range
        let mut min = [f64::INFINITY; 2];
        let mut max = [f64::NEG_INFINITY; 2];

        for i in start..end {
            let idx = self.indices[i];
            let px = points[idx * 2];
            let py = points[idx * 2 + 1];

            if px < min[0] { min[0] = px; }
            if px > max[0] { max[0] = px; }
            if py < min[1] { min[1] = py; }
            if py > max[1] { max[1] = py; }
        }

        // Leaf condition: small number of points
        if count <= 16 {
            let node_idx = self.nodes.len() as u32;
            self.nodes.push(KdNode {
                min,
                max,
                left: u32::MAX,
                right: u32::MAX,
                start: start as u32,
                end: end as u32,
                split_val: 0.0,
                axis: 0,
            });
            return node_idx;
        }

        // Split along the wider axis
        let axis = if (max[0] - min[0]) >= (max[1] - min[1]) { 0 } else { 1 };

        // Median split
        let mid = start + count / 2;
        let (_, _, _) = self.indices[start..end].select_nth_unstable_by(count / 2, |&a, &b| {
            let va = points[a * 2 + axis];
            let vb = points[b * 2 + axis];
            va.partial_cmp(&vb).unwrap_or(std::cmp::Ordering::Equal)
        });

        let mid_idx = self.indices[mid];
        let split_val = points[mid_idx * 2 + axis];

        let left = self.build_recursive(start, mid, points);
        let right = self.build_recursive(mid, end, points);

        let node_idx = self.nodes.len() as u32;
        self.nodes.push(KdNode {
            min,
            max,
            left,
            right,
            start: 0,
            end: 0,
            split_val,
            axis: axis as u8,
        });
        node_idx
    }

    /// Index and squared distance of the point closest to `query`.
    /// Equidistant candidates resolve to the lowest index.
    pub fn nearest(&self, query: [f64; 2], points: &[f64]) -> Option<(usize, f64)> {
        if self.nodes.is_empty() {
            return None;
        }
        let mut best = (usize::MAX, f64::INFINITY);
        // Root is the last node pushed in our recursive build
        let root_idx = (self.nodes.len() - 1) as u32;
        self.nearest_recursive(root_idx, query, points, &mut best);
        (best.0 != usize::MAX).then_some(best)
    }

    fn nearest_recursive(
        &self,
        node_idx: u32,
        query: [f64; 2],
        points: &[f64],
        best: &mut (usize, f64),
    ) {
        let node = &self.nodes[node_idx as usize];

        // Pruning: check distance from query to node bounding box
        let mut d2 = 0.0;
        for i in 0..2 {
            let v = query[i];
            if v < node.min[i] { d2 += (node.min[i] - v).powi(2); }
            else if v > node.max[i] { d2 += (v - node.max[i]).powi(2); }
        }
        if d2 > best.1 {
            return;
        }

        // Leaf
        if node.left == u32::MAX {
            for i in node.start..node.end {
                let idx = self.indices[i as usize];
                let dx = points[idx * 2] - query[0];
                let dy = points[idx * 2 + 1] - query[1];
                let dist_sq = dx * dx + dy * dy;
                if dist_sq < best.1 || (dist_sq == best.1 && idx < best.0) {
                    *best = (idx, dist_sq);
                }
            }
            return;
        }

        // Visit nearest child first
        let diff = query[node.axis as usize] - node.split_val;
        let (first, second) = if diff <= 0.0 {
            (node.left, node.right)
        } else {
            (node.right, node.left)
        };

        self.nearest_recursive(first, query, points, best);
        self.nearest_recursive(second, query, points, best);
    }
}

impl Default for KdTree {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nearest_small() {
        let points = vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0, 1.0];
        let mut tree = KdTree::new();
        tree.build(&points);

        let (idx, d2) = tree.nearest([0.1, 0.2], &points).unwrap();
        assert_eq!(idx, 0);
        assert!((d2 - 0.05).abs() < 1e-12);

        let (idx, _) = tree.nearest([0.9, 0.1], &points).unwrap();
        assert_eq!(idx, 1);
    }

    #[test]
    fn test_nearest_many() {
        // Enough points to force internal nodes; brute force agrees.
        let mut points = Vec::new();
        for i in 0..100 {
            let a = i as f64 * 0.618;
            points.push((a.sin() * 50.0) + 50.0);
            points.push((a.cos() * 50.0) + 50.0);
        }
        let mut tree = KdTree::new();
        tree.build(&points);

        for q in [[10.0, 10.0], [50.0, 50.0], [99.0, 1.0]] {
            let (idx, d2) = tree.nearest(q, &points).unwrap();
            let mut brute = (usize::MAX, f64::INFINITY);
            for i in 0..100 {
                let dx = points[i * 2] - q[0];
                let dy = points[i * 2 + 1] - q[1];
                let dist_sq = dx * dx + dy * dy;
                if dist_sq < brute.1 {
                    brute = (i, dist_sq);
                }
            }
            assert_eq!(idx, brute.0);
            assert!((d2 - brute.1).abs() < 1e-12);
        }
    }

    #[test]
    fn test_empty() {
        let tree = KdTree::new();
        assert!(tree.nearest([0.0, 0.0], &[]).is_none());
    }
}
