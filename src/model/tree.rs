//! CART regression tree.
//!
//! Exact-greedy construction with a squared-error criterion: every distinct value of
//! every feature is a split candidate, thresholds sit halfway between neighbouring
//! values, and samples with `x <= threshold` go left.

use crate::model::training_set::TrainingSet;
use std::cmp::Ordering;

/// Growth limits for a single tree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TreeParams {
    pub max_depth: Option<usize>,
    pub min_samples_split: usize,
    pub min_samples_leaf: usize,
}

impl Default for TreeParams {
    fn default() -> Self {
        Self {
            max_depth: None,
            min_samples_split: 2,
            min_samples_leaf: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Node {
    Leaf {
        value: f64,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
}

#[derive(Debug, Clone, Copy)]
struct SplitCandidate {
    feature: usize,
    threshold: f64,
    score: f64,
}

/// A fitted regression tree stored as a flat node arena; node 0 is the root.
#[derive(Debug, Clone, PartialEq)]
pub struct RegressionTree {
    nodes: Vec<Node>,
}

impl RegressionTree {
    /// Fits a tree on the rows of `data` listed in `sample`.
    ///
    /// `sample` may repeat rows (bootstrap draws); repeats count as extra weight.
    /// The caller guarantees `sample` is non-empty and every index is in range.
    pub(crate) fn fit(data: &TrainingSet, sample: &[usize], params: &TreeParams) -> Self {
        let mut builder = TreeBuilder {
            data,
            params,
            nodes: Vec::new(),
        };
        builder.build_node(sample.to_vec(), 0);
        RegressionTree {
            nodes: builder.nodes,
        }
    }

    /// Predicts one sample. `features` must have the width the tree was fitted on.
    pub(crate) fn predict(&self, features: &[f64]) -> f64 {
        let mut idx = 0;
        loop {
            match &self.nodes[idx] {
                Node::Leaf { value } => return *value,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    idx = if features[*feature] <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
            }
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn leaf_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|n| matches!(n, Node::Leaf { .. }))
            .count()
    }
}

struct TreeBuilder<'a> {
    data: &'a TrainingSet,
    params: &'a TreeParams,
    nodes: Vec<Node>,
}

impl TreeBuilder<'_> {
    fn build_node(&mut self, indices: Vec<usize>, depth: usize) -> usize {
        let current = self.nodes.len();
        let targets = self.data.targets();
        let sum: f64 = indices.iter().map(|&i| targets[i]).sum();
        let count = indices.len() as f64;
        let leaf_value = sum / count;

        let depth_reached = self.params.max_depth.is_some_and(|max| depth >= max);
        let too_small = indices.len() < self.params.min_samples_split;
        let first = targets[indices[0]];
        let pure = indices.iter().all(|&i| targets[i] == first);

        let split = if depth_reached || too_small || pure {
            None
        } else {
            self.find_best_split(&indices, sum)
        };

        let Some(split) = split else {
            self.nodes.push(Node::Leaf { value: leaf_value });
            return current;
        };

        let (left_indices, right_indices): (Vec<usize>, Vec<usize>) = indices
            .into_iter()
            .partition(|&i| self.data.row(i)[split.feature] <= split.threshold);

        // Reserve the slot, children are appended after it.
        self.nodes.push(Node::Leaf { value: leaf_value });
        let left = self.build_node(left_indices, depth + 1);
        let right = self.build_node(right_indices, depth + 1);
        self.nodes[current] = Node::Split {
            feature: split.feature,
            threshold: split.threshold,
            left,
            right,
        };
        current
    }

    /// Best split by squared-error reduction.
    ///
    /// Minimising the children's summed squared error is the same as maximising
    /// `sum_l^2 / n_l + sum_r^2 / n_r`, which a single sorted sweep per feature gives.
    /// Ties keep the earliest candidate (lowest feature, then lowest threshold).
    fn find_best_split(&self, indices: &[usize], total_sum: f64) -> Option<SplitCandidate> {
        let targets = self.data.targets();
        let n = indices.len();
        let min_leaf = self.params.min_samples_leaf.max(1);
        let parent_score = total_sum * total_sum / n as f64;
        let mut best: Option<SplitCandidate> = None;
        let mut sorted = indices.to_vec();

        for feature in 0..self.data.width() {
            sorted.sort_by(|&a, &b| {
                self.data.row(a)[feature]
                    .partial_cmp(&self.data.row(b)[feature])
                    .unwrap_or(Ordering::Equal)
            });

            let mut left_sum = 0.0;
            for split_at in 1..n {
                left_sum += targets[sorted[split_at - 1]];
                let lower = self.data.row(sorted[split_at - 1])[feature];
                let upper = self.data.row(sorted[split_at])[feature];
                if lower == upper || split_at < min_leaf || n - split_at < min_leaf {
                    continue;
                }

                let right_sum = total_sum - left_sum;
                let n_left = split_at as f64;
                let n_right = (n - split_at) as f64;
                let score = left_sum * left_sum / n_left + right_sum * right_sum / n_right;
                if score <= parent_score {
                    continue;
                }
                if best.map_or(true, |b| score > b.score) {
                    best = Some(SplitCandidate {
                        feature,
                        threshold: midpoint(lower, upper),
                        score,
                    });
                }
            }
        }

        best
    }
}

/// Threshold between two adjacent distinct values that keeps `lower` on the left
/// and `upper` on the right even when the float midpoint rounds onto `upper`.
fn midpoint(lower: f64, upper: f64) -> f64 {
    let mid = lower + (upper - lower) / 2.0;
    if mid < upper {
        mid
    } else {
        lower
    }
}
