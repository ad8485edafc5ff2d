//! Quadtree over particle positions, used to find the neighbours of a particle
//! within a cull radius without checking every pair.
//!
//! The tree is rebuilt from scratch every step. Node boxes are not stored: they
//! are derived on the way down from the root box, which keeps every node as
//! small as its payload.
//!
//! # Example
//!
//! ```
//! use rs_quadsim::models::{Particle, Vector2D};
//! use rs_quadsim::spatial::QuadTree;
//!
//! let particles: Vec<Particle> = (0..20)
//!     .map(|i| {
//!         let pos = Vector2D::new(i as f32 * 0.5, (i % 4) as f32);
//!         Particle::new(i, 1.0, pos, Vector2D::ZERO).unwrap()
//!     })
//!     .collect();
//!
//! let tree = QuadTree::build(&particles);
//! assert!(tree.check_tree().is_ok());
//!
//! let nearby = tree.query(Vector2D::new(0.0, 0.0), 1.0);
//! assert!(nearby.iter().all(|p| p.position.length() < 1.0));
//! ```
use log::{debug, warn};

use crate::models::{Particle, Vector2D};
use crate::spatial::BoundingBox;
use crate::utils::{SimulationError, LEAF_CAPACITY, MAX_TREE_DEPTH, TREE_CHECK_TOLERANCE};

/// A node of the quadtree.
///
/// Leaves own copies of their particles; internal nodes own exactly four
/// children, stored in quadrant index order (see [`BoundingBox`]).
#[derive(Debug, Clone)]
pub enum QuadTreeNode {
    Leaf(Vec<Particle>),
    Internal(Box<[QuadTreeNode; 4]>),
}

impl QuadTreeNode {
    pub fn is_leaf(&self) -> bool {
        matches!(self, QuadTreeNode::Leaf(_))
    }
}

/// What [`QuadTree::visit_nodes`] reports for every node.
#[derive(Debug, Clone, Copy)]
pub struct NodeVisit<'a> {
    pub bounds: BoundingBox,
    pub depth: usize,
    /// The leaf's particles, or `None` for an internal node.
    pub particles: Option<&'a [Particle]>,
}

impl NodeVisit<'_> {
    pub fn is_leaf(&self) -> bool {
        self.particles.is_some()
    }
}

/// Shape summary of a built tree, logged once per build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TreeStats {
    pub nodes: usize,
    pub leaves: usize,
    pub max_depth: usize,
    pub max_leaf_size: usize,
}

/// Quadtree built over a snapshot of particles.
#[derive(Debug, Clone)]
pub struct QuadTree {
    root: QuadTreeNode,
    bounds: BoundingBox,
}

impl QuadTree {
    /// Builds a tree over `particles`, rooted at their tight bounding box.
    ///
    /// Nodes holding more than [`LEAF_CAPACITY`] particles are split into four
    /// quadrants around their pivot, including quadrants that end up empty.
    /// Particles the box can no longer tell apart at `f32` resolution stay
    /// together in one leaf.
    ///
    /// # Examples
    ///
    /// ```
    /// use rs_quadsim::spatial::{QuadTree, QuadTreeNode};
    ///
    /// let tree = QuadTree::build(&[]);
    /// match tree.root() {
    ///     QuadTreeNode::Leaf(particles) => assert!(particles.is_empty()),
    ///     _ => panic!("Expected an empty leaf"),
    /// }
    /// ```
    pub fn build(particles: &[Particle]) -> Self {
        let bounds = BoundingBox::from_particles(particles);
        let root = build_node(particles.to_vec(), bounds, 0);
        let tree = QuadTree { root, bounds };
        if log::log_enabled!(log::Level::Debug) {
            debug!("built quadtree over {} particles: {:?}", particles.len(), tree.stats());
        }
        tree
    }

    /// Assembles a tree from an existing node hierarchy without validating it.
    pub fn from_root(root: QuadTreeNode, bounds: BoundingBox) -> Self {
        QuadTree { root, bounds }
    }

    pub fn root(&self) -> &QuadTreeNode {
        &self.root
    }

    /// Bounding box of the particles the tree was built from.
    pub fn bounds(&self) -> BoundingBox {
        self.bounds
    }

    pub fn bmin(&self) -> Vector2D {
        self.bounds.min
    }

    pub fn bmax(&self) -> Vector2D {
        self.bounds.max
    }

    /// Returns every particle strictly closer than `radius` to `position`.
    ///
    /// The result is in traversal order and includes a particle sitting exactly
    /// at `position`; callers exclude themselves by id.
    ///
    /// # Examples
    ///
    /// ```
    /// use rs_quadsim::models::{Particle, Vector2D};
    /// use rs_quadsim::spatial::QuadTree;
    ///
    /// let particles = vec![
    ///     Particle::new(0, 1.0, Vector2D::new(0.0, 0.0), Vector2D::ZERO).unwrap(),
    ///     Particle::new(1, 1.0, Vector2D::new(1.0, 0.0), Vector2D::ZERO).unwrap(),
    ///     Particle::new(2, 1.0, Vector2D::new(5.0, 0.0), Vector2D::ZERO).unwrap(),
    /// ];
    /// let tree = QuadTree::build(&particles);
    /// let ids: Vec<usize> = tree.query(Vector2D::ZERO, 2.0).iter().map(|p| p.id).collect();
    /// assert_eq!(ids, vec![0, 1]);
    /// ```
    pub fn query(&self, position: Vector2D, radius: f32) -> Vec<Particle> {
        let mut result = Vec::new();
        self.query_into(&mut result, position, radius);
        result
    }

    /// Like [`QuadTree::query`], but appends into a caller-provided buffer.
    pub fn query_into(&self, result: &mut Vec<Particle>, position: Vector2D, radius: f32) {
        query_node(&self.root, self.bounds, position, radius, result);
    }

    /// Checks that every leaf particle lies inside its node box.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::TreeInvariantViolation`] for the first particle
    /// found outside its box (with [`TREE_CHECK_TOLERANCE`] of slack).
    pub fn check_tree(&self) -> Result<(), SimulationError> {
        check_node(&self.root, self.bounds).inspect_err(|e| warn!("quadtree check failed: {}", e))
    }

    /// Walks the tree in pre-order, handing every node's box to `visitor`.
    ///
    /// Children are visited in quadrant index order.
    pub fn visit_nodes<F>(&self, mut visitor: F)
    where
        F: FnMut(&NodeVisit<'_>),
    {
        visit_node(&self.root, self.bounds, 0, &mut visitor);
    }

    pub fn stats(&self) -> TreeStats {
        let mut stats = TreeStats::default();
        self.visit_nodes(|node| {
            stats.nodes += 1;
            stats.max_depth = stats.max_depth.max(node.depth);
            if let Some(particles) = node.particles {
                stats.leaves += 1;
                stats.max_leaf_size = stats.max_leaf_size.max(particles.len());
            }
        });
        stats
    }
}

fn build_node(particles: Vec<Particle>, bounds: BoundingBox, depth: usize) -> QuadTreeNode {
    if particles.len() <= LEAF_CAPACITY {
        return QuadTreeNode::Leaf(particles);
    }
    if depth >= MAX_TREE_DEPTH {
        warn!(
            "quadtree depth limit {} reached with {} particles near ({}, {}); keeping an over-full leaf",
            MAX_TREE_DEPTH,
            particles.len(),
            bounds.min.x,
            bounds.min.y
        );
        return QuadTreeNode::Leaf(particles);
    }

    let total = particles.len();
    let mut buckets: [Vec<Particle>; 4] = Default::default();
    for p in particles {
        buckets[bounds.quadrant_of(p.position)].push(p);
    }

    // A split that hands every particle to a child box equal to this one
    // cannot make progress: the box is already at f32 resolution.
    if let Some(index) = buckets.iter().position(|bucket| bucket.len() == total) {
        if bounds.child(index) == bounds {
            warn!(
                "{} particles share an unsplittable box at ({}, {}); keeping an over-full leaf",
                total, bounds.min.x, bounds.min.y
            );
            return QuadTreeNode::Leaf(std::mem::take(&mut buckets[index]));
        }
    }

    let [nw, ne, sw, se] = buckets;
    QuadTreeNode::Internal(Box::new([
        build_node(nw, bounds.child(0), depth + 1),
        build_node(ne, bounds.child(1), depth + 1),
        build_node(sw, bounds.child(2), depth + 1),
        build_node(se, bounds.child(3), depth + 1),
    ]))
}

fn query_node(
    node: &QuadTreeNode,
    bounds: BoundingBox,
    position: Vector2D,
    radius: f32,
    result: &mut Vec<Particle>,
) {
    match node {
        QuadTreeNode::Leaf(particles) => {
            result.extend(
                particles
                    .iter()
                    .filter(|p| (position - p.position).length() < radius),
            );
        }
        QuadTreeNode::Internal(children) => {
            for (i, child) in children.iter().enumerate() {
                let child_bounds = bounds.child(i);
                if child_bounds.distance_to_point(position) <= radius {
                    query_node(child, child_bounds, position, radius, result);
                }
            }
        }
    }
}

fn check_node(node: &QuadTreeNode, bounds: BoundingBox) -> Result<(), SimulationError> {
    match node {
        QuadTreeNode::Leaf(particles) => {
            match particles
                .iter()
                .find(|p| !bounds.contains_with_tolerance(p.position, TREE_CHECK_TOLERANCE))
            {
                Some(p) => Err(SimulationError::TreeInvariantViolation {
                    particle_id: p.id,
                    position: p.position,
                    bmin: bounds.min,
                    bmax: bounds.max,
                }),
                None => Ok(()),
            }
        }
        QuadTreeNode::Internal(children) => children
            .iter()
            .enumerate()
            .try_for_each(|(i, child)| check_node(child, bounds.child(i))),
    }
}

fn visit_node<F>(node: &QuadTreeNode, bounds: BoundingBox, depth: usize, visitor: &mut F)
where
    F: FnMut(&NodeVisit<'_>),
{
    let particles = match node {
        QuadTreeNode::Leaf(particles) => Some(particles.as_slice()),
        QuadTreeNode::Internal(_) => None,
    };
    visitor(&NodeVisit { bounds, depth, particles });
    if let QuadTreeNode::Internal(children) = node {
        for (i, child) in children.iter().enumerate() {
            visit_node(child, bounds.child(i), depth + 1, visitor);
        }
    }
}
