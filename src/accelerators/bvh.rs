//! Bounding volume hierarchy over a list of primitives.
//!
//! The tree is built top down: every primitive ends up alone in a
//! leaf, every interior node has exactly two children and encloses
//! them. At each interior node the primitives are sorted along the
//! axis where their centroids spread the most and then split either
//! in the middle of the list (**SplitMethod::Naive**) or at the
//! position that minimizes the surface area heuristic
//! (**SplitMethod::SAH**).
//!
//! The build happens in an arena of **BVHBuildNode**s which is then
//! flattened depth first into a vector of **LinearBVHNode**s. The
//! left child of an interior node is the next node in the vector, the
//! right child is stored as an offset.

// std
use std::cmp::Ordering;
use std::sync::Arc;
use std::time::Instant;
// others
use strum_macros::{Display, EnumString};
use typed_arena::Arena;
// pbrt
use crate::core::error::{BvhError, Result};
use crate::core::geometry::{bnd3_union_bnd3f, bnd3_union_pnt3f};
use crate::core::geometry::{Bounds3f, Point3f, Ray, Vector3f, XYZEnum};
use crate::core::interaction::SurfaceInteraction;
use crate::core::paramset::ParamSet;
use crate::core::pbrt::{Float, INFINITY};
use crate::core::primitive::Primitive;

// see bvh.h

/// Largest accepted value for `max_prims_in_node`.
pub const MAX_PRIMS_IN_NODE_LIMIT: usize = 255;

#[derive(Debug, Copy, Clone, PartialEq, Eq, EnumString, Display)]
#[strum(ascii_case_insensitive)]
pub enum SplitMethod {
    /// split the sorted primitives in the middle
    #[strum(to_string = "naive", serialize = "middle", serialize = "equal")]
    Naive,
    /// split where the surface area heuristic is minimal
    #[strum(to_string = "sah")]
    SAH,
}

impl SplitMethod {
    /// Translate a "use SAH" flag into a split method.
    pub fn from_flag(use_sah: bool) -> Self {
        if use_sah {
            SplitMethod::SAH
        } else {
            SplitMethod::Naive
        }
    }
    pub fn parse(name: &str) -> Result<Self> {
        name.parse::<SplitMethod>()
            .map_err(|_| BvhError::UnknownSplitMethod(name.to_string()))
    }
}

#[derive(Debug, Default, Copy, Clone)]
pub struct BVHPrimitiveInfo {
    primitive_number: usize,
    bounds: Bounds3f,
    centroid: Point3f,
}

impl BVHPrimitiveInfo {
    pub fn new(primitive_number: usize, bounds: Bounds3f) -> Self {
        BVHPrimitiveInfo {
            primitive_number,
            bounds,
            centroid: bounds.centroid(),
        }
    }
}

/// Node of the tree while it is being built. Either a leaf with one
/// primitive or an interior node with two children, never a mix.
#[derive(Debug)]
pub struct BVHBuildNode<'a> {
    pub bounds: Bounds3f,
    pub child1: Option<&'a BVHBuildNode<'a>>,
    pub child2: Option<&'a BVHBuildNode<'a>>,
    pub primitive: Option<usize>,
}

impl<'a> BVHBuildNode<'a> {
    pub fn new_leaf(primitive: usize, b: &Bounds3f) -> Self {
        BVHBuildNode {
            bounds: *b,
            child1: None,
            child2: None,
            primitive: Some(primitive),
        }
    }
    pub fn new_interior(c0: &'a BVHBuildNode<'a>, c1: &'a BVHBuildNode<'a>) -> Self {
        BVHBuildNode {
            bounds: bnd3_union_bnd3f(&c0.bounds, &c1.bounds),
            child1: Some(c0),
            child2: Some(c1),
            primitive: None,
        }
    }
}

#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct LinearBVHNode {
    bounds: Bounds3f,
    // in C++ a union { int primitivesOffset;     // leaf
    //                  int secondChildOffset; }; // interior
    offset: usize,
    n_primitives: usize,
}

impl LinearBVHNode {
    pub fn bounds(&self) -> Bounds3f {
        self.bounds
    }
    pub fn is_leaf(&self) -> bool {
        self.n_primitives > 0
    }
    /// Index into the hierarchy's primitive list (leaves only).
    pub fn primitive(&self) -> Option<usize> {
        if self.is_leaf() {
            Some(self.offset)
        } else {
            None
        }
    }
    /// Index of the right child (interior nodes only). The left child
    /// always directly follows its parent.
    pub fn second_child(&self) -> Option<usize> {
        if self.is_leaf() {
            None
        } else {
            Some(self.offset)
        }
    }
}

// BVHAccel -> Aggregate -> Primitive
pub struct BVHAccel {
    max_prims_in_node: usize,
    split_method: SplitMethod,
    primitives: Vec<Arc<dyn Primitive + Sync + Send>>,
    nodes: Vec<LinearBVHNode>,
}

impl BVHAccel {
    /// Build a hierarchy over *p*. An empty list gives a hierarchy
    /// without root which never reports a hit.
    ///
    /// `max_prims_in_node` is clamped to 255 and kept for reference;
    /// the builder always subdivides down to one primitive per leaf.
    pub fn new(
        p: Vec<Arc<dyn Primitive + Sync + Send>>,
        max_prims_in_node: usize,
        split_method: SplitMethod,
    ) -> Self {
        let mut bvh = BVHAccel {
            max_prims_in_node: std::cmp::min(max_prims_in_node, MAX_PRIMS_IN_NODE_LIMIT),
            split_method,
            primitives: p,
            nodes: Vec::new(),
        };
        let num_prims: usize = bvh.primitives.len();
        if num_prims == 0_usize {
            log::debug!("BVHAccel::new() called without primitives");
            return bvh;
        }
        let start = Instant::now();
        let mut primitive_info: Vec<BVHPrimitiveInfo> = bvh
            .primitives
            .iter()
            .enumerate()
            .map(|(i, prim)| BVHPrimitiveInfo::new(i, prim.world_bound()))
            .collect();
        // a full binary tree with one primitive per leaf
        let arena: Arena<BVHBuildNode> = Arena::with_capacity(2 * num_prims - 1);
        let mut total_nodes: usize = 0;
        let root = BVHAccel::build_tree(
            &arena,
            split_method,
            &mut primitive_info,
            &mut total_nodes,
        );
        let mut nodes: Vec<LinearBVHNode> = Vec::with_capacity(total_nodes);
        BVHAccel::flatten_bvh_tree(root, &mut nodes);
        assert_eq!(nodes.len(), total_nodes);
        bvh.nodes = nodes;
        let secs: u64 = start.elapsed().as_secs();
        let hrs: u64 = secs / 3600;
        let mins: u64 = (secs / 60) - (hrs * 60);
        let secs: u64 = secs - (hrs * 3600) - (mins * 60);
        log::info!(
            "BVH Generation complete: Time Taken: {} hrs, {} mins, {} secs",
            hrs,
            mins,
            secs
        );
        log::debug!(
            "BVH ({}) over {} primitives: {} nodes, depth {}",
            split_method,
            num_prims,
            bvh.total_nodes(),
            bvh.depth()
        );
        bvh
    }
    /// Read `"splitmethod"` and `"maxnodeprims"` from *ps* and build.
    pub fn create(prims: Vec<Arc<dyn Primitive + Send + Sync>>, ps: &ParamSet) -> Result<Self> {
        let split_method_name: String = ps.find_one_string("splitmethod", String::from("sah"));
        let split_method: SplitMethod = match SplitMethod::parse(&split_method_name) {
            Ok(split_method) => split_method,
            Err(err) => {
                log::warn!("{}. Using \"sah\".", err);
                SplitMethod::SAH
            }
        };
        let max_prims_in_node: i32 = ps.find_one_int_checked("maxnodeprims", 4)?;
        if max_prims_in_node < 0 {
            return Err(BvhError::InvalidParameter {
                name: String::from("maxnodeprims"),
                value: max_prims_in_node.to_string(),
                reason: "must not be negative",
            });
        }
        Ok(BVHAccel::new(prims, max_prims_in_node as usize, split_method))
    }
    /// Build the tree over *primitive_info*, children before parents. The slice is
    /// sorted in place, one range at a time. Degenerate input can make
    /// the tree as deep as there are primitives, so ranges wait on an
    /// explicit stack instead of the call stack.
    pub fn build_tree<'a>(
        arena: &'a Arena<BVHBuildNode<'a>>,
        split_method: SplitMethod,
        primitive_info: &mut [BVHPrimitiveInfo],
        total_nodes: &mut usize,
    ) -> &'a BVHBuildNode<'a> {
        assert_ne!(primitive_info.len(), 0_usize);
        let mut todo: Vec<BuildTask> = vec![BuildTask::Range(0, primitive_info.len())];
        // finished subtrees, the right child on top of the left one
        let mut built: Vec<&'a BVHBuildNode<'a>> = Vec::new();
        while let Some(task) = todo.pop() {
            let (start, end) = match task {
                BuildTask::Range(start, end) => (start, end),
                BuildTask::Join => {
                    let c1 = built.pop();
                    let c0 = built.pop();
                    match (c0, c1) {
                        (Some(c0), Some(c1)) => {
                            built.push(arena.alloc(BVHBuildNode::new_interior(c0, c1)))
                        }
                        _ => panic!("BVH build lost a child node"),
                    }
                    continue;
                }
            };
            let items: &mut [BVHPrimitiveInfo] = &mut primitive_info[start..end];
            let n_primitives: usize = items.len();
            assert_ne!(n_primitives, 0_usize);
            if n_primitives == 1 {
                // create leaf _BVHBuildNode_
                *total_nodes += 1_usize;
                let info: &BVHPrimitiveInfo = &items[0];
                built.push(arena.alloc(BVHBuildNode::new_leaf(info.primitive_number, &info.bounds)));
                continue;
            }
            if split_method == SplitMethod::SAH && n_primitives > 2 && is_uniform_sah_run(items) {
                built.push(BVHAccel::build_chain(arena, items, total_nodes));
                continue;
            }
            *total_nodes += 1_usize;
            let mid: usize = if n_primitives == 2 {
                1_usize
            } else {
                // compute bound of primitive centroids, choose split dimension _dim_
                let mut centroid_bounds: Bounds3f = Bounds3f::default();
                for info in items.iter() {
                    centroid_bounds = bnd3_union_pnt3f(&centroid_bounds, &info.centroid);
                }
                let dim: XYZEnum = centroid_bounds.maximum_extent();
                // stable sort, equal centroids keep their relative order
                items.sort_by(|a, b| {
                    a.centroid[dim]
                        .partial_cmp(&b.centroid[dim])
                        .unwrap_or(Ordering::Equal)
                });
                match split_method {
                    SplitMethod::Naive => n_primitives / 2,
                    SplitMethod::SAH => sah_split_index(items) + 1,
                }
            };
            let (left, right) = items.split_at(mid);
            assert_eq!(left.len() + right.len(), n_primitives);
            assert!(!left.is_empty() && !right.is_empty());
            // the left range is popped (and finished) first
            todo.push(BuildTask::Join);
            todo.push(BuildTask::Range(start + mid, end));
            todo.push(BuildTask::Range(start, start + mid));
        }
        assert_eq!(built.len(), 1_usize);
        match built.pop() {
            Some(root) => root,
            None => panic!("BVH build produced no root"),
        }
    }
    /// Subtree over a run of primitives with identical boxes where
    /// every SAH candidate costs the same. Such a run always splits
    /// off its first primitive, so the subtree is a chain.
    fn build_chain<'a>(
        arena: &'a Arena<BVHBuildNode<'a>>,
        items: &[BVHPrimitiveInfo],
        total_nodes: &mut usize,
    ) -> &'a BVHBuildNode<'a> {
        let n_primitives: usize = items.len();
        *total_nodes += 2 * n_primitives - 1;
        let last: &BVHPrimitiveInfo = &items[n_primitives - 1];
        let mut node: &'a BVHBuildNode<'a> =
            arena.alloc(BVHBuildNode::new_leaf(last.primitive_number, &last.bounds));
        for info in items[..n_primitives - 1].iter().rev() {
            let leaf: &'a BVHBuildNode<'a> =
                arena.alloc(BVHBuildNode::new_leaf(info.primitive_number, &info.bounds));
            node = arena.alloc(BVHBuildNode::new_interior(leaf, node));
        }
        node
    }
    /// Depth first, the left child right after its parent.
    fn flatten_bvh_tree<'a>(root: &BVHBuildNode<'a>, nodes: &mut Vec<LinearBVHNode>) {
        // (node, interior node waiting for it as second child)
        let mut todo: Vec<(&BVHBuildNode<'a>, Option<usize>)> = vec![(root, None)];
        while let Some((node, parent)) = todo.pop() {
            let my_offset: usize = nodes.len();
            if let Some(parent) = parent {
                nodes[parent].offset = my_offset;
            }
            match (node.primitive, node.child1, node.child2) {
                (Some(primitive), None, None) => {
                    // leaf
                    nodes.push(LinearBVHNode {
                        bounds: node.bounds,
                        offset: primitive,
                        n_primitives: 1_usize,
                    });
                }
                (None, Some(child1), Some(child2)) => {
                    // interior, patched once the second child is placed
                    nodes.push(LinearBVHNode {
                        bounds: node.bounds,
                        offset: 0_usize,
                        n_primitives: 0_usize,
                    });
                    todo.push((child2, Some(my_offset)));
                    todo.push((child1, None));
                }
                _ => panic!("malformed BVH build node {:?}", node.bounds),
            }
        }
    }
    pub fn primitives(&self) -> &[Arc<dyn Primitive + Sync + Send>] {
        &self.primitives
    }
    pub fn nodes(&self) -> &[LinearBVHNode] {
        &self.nodes
    }
    pub fn root(&self) -> Option<&LinearBVHNode> {
        self.nodes.first()
    }
    pub fn max_prims_in_node(&self) -> usize {
        self.max_prims_in_node
    }
    pub fn split_method(&self) -> SplitMethod {
        self.split_method
    }
    pub fn total_nodes(&self) -> usize {
        self.nodes.len()
    }
    pub fn leaf_count(&self) -> usize {
        self.nodes.iter().filter(|node| node.is_leaf()).count()
    }
    /// Number of nodes on the longest root to leaf path, 0 without root.
    pub fn depth(&self) -> usize {
        if self.nodes.is_empty() {
            return 0;
        }
        let mut max_depth: usize = 0;
        let mut nodes_to_visit: Vec<(usize, usize)> = vec![(0, 1)];
        while let Some((index, depth)) = nodes_to_visit.pop() {
            let node: &LinearBVHNode = &self.nodes[index];
            if node.is_leaf() {
                max_depth = max_depth.max(depth);
            } else {
                nodes_to_visit.push((index + 1, depth + 1));
                nodes_to_visit.push((node.offset, depth + 1));
            }
        }
        max_depth
    }
}

/// Index *i* of the last primitive in the left half which minimizes
/// `(i + 1) * area(left) + (n - i - 1) * area(right)` over the
/// sorted primitives. The first minimum wins.
///
/// Box unions are exact (min/max), so sweeping prefix and suffix
/// unions yields the same boxes and costs as re-merging every
/// candidate from scratch.
pub fn sah_split_index(primitive_info: &[BVHPrimitiveInfo]) -> usize {
    let n_primitives: usize = primitive_info.len();
    assert!(n_primitives >= 2);
    // suffix[i] bounds primitives i..n
    let mut suffix: Vec<Bounds3f> = vec![Bounds3f::default(); n_primitives + 1];
    for i in (0..n_primitives).rev() {
        suffix[i] = bnd3_union_bnd3f(&suffix[i + 1], &primitive_info[i].bounds);
    }
    let mut min_cost: Float = INFINITY;
    let mut min_cost_split: usize = 0;
    let mut b0: Bounds3f = Bounds3f::default();
    for i in 0..(n_primitives - 1) {
        b0 = bnd3_union_bnd3f(&b0, &primitive_info[i].bounds);
        let b1: &Bounds3f = &suffix[i + 1];
        let cost: Float = (i + 1) as Float * b0.surface_area()
            + (n_primitives - i - 1) as Float * b1.surface_area();
        if cost < min_cost {
            min_cost = cost;
            min_cost_split = i;
        }
    }
    min_cost_split
}

enum BuildTask {
    /// build a subtree over `primitive_info[start..end]`
    Range(usize, usize),
    /// combine the two subtrees built last
    Join,
}

/// Do all primitives share one box, and does every SAH candidate over
/// them cost exactly the same? Then **sah_split_index()** returns 0 at
/// every level below.
fn is_uniform_sah_run(items: &[BVHPrimitiveInfo]) -> bool {
    let bounds: Bounds3f = items[0].bounds;
    items.iter().all(|info| info.bounds == bounds)
        && sah_costs_are_exact(bounds.surface_area(), items.len())
}

/// True if `k * area` is exact in `Float` for every `k <= n_primitives`,
/// so all candidate costs sum to the same `n_primitives * area`.
fn sah_costs_are_exact(area: Float, n_primitives: usize) -> bool {
    if area == 0.0 as Float || area.is_infinite() {
        // all costs are 0 or all are infinite, candidate 0 is kept
        return true;
    }
    if !area.is_normal() || !(n_primitives as Float * area).is_finite() {
        return false;
    }
    let significand: u32 = (area.to_bits() & 0x007f_ffff) | 0x0080_0000;
    let area_bits: u32 = Float::MANTISSA_DIGITS - significand.trailing_zeros();
    let count_bits: u32 = usize::BITS - n_primitives.leading_zeros();
    area_bits + count_bits <= Float::MANTISSA_DIGITS
}

impl Primitive for BVHAccel {
    fn world_bound(&self) -> Bounds3f {
        match self.nodes.first() {
            Some(root) => root.bounds,
            None => Bounds3f::default(),
        }
    }
    fn intersect(&self, ray: &Ray) -> SurfaceInteraction<'_> {
        if self.nodes.is_empty() {
            return SurfaceInteraction::default();
        }
        let inv_dir: Vector3f = ray.inv_dir();
        let dir_is_neg: [u8; 3] = ray.dir_is_neg();
        let mut closest: SurfaceInteraction = SurfaceInteraction::default();
        // left subtrees are visited before right ones, so among equally
        // close hits the last one found sits in the rightmost subtree
        // and replaces the others: the right child wins ties
        let mut nodes_to_visit: Vec<usize> = vec![0_usize];
        while let Some(current_node_index) = nodes_to_visit.pop() {
            let node: &LinearBVHNode = &self.nodes[current_node_index];
            // check ray against BVH node
            if !node.bounds.intersect_p(ray, &inv_dir, &dir_is_neg) {
                continue;
            }
            if node.is_leaf() {
                let si: SurfaceInteraction = self.primitives[node.offset].intersect(ray);
                if si.is_hit() && si.distance <= closest.distance {
                    closest = si;
                }
            } else {
                nodes_to_visit.push(node.offset);
                nodes_to_visit.push(current_node_index + 1);
            }
        }
        closest
    }
    fn intersect_p(&self, ray: &Ray) -> bool {
        if self.nodes.is_empty() {
            return false;
        }
        let inv_dir: Vector3f = ray.inv_dir();
        let dir_is_neg: [u8; 3] = ray.dir_is_neg();
        let mut nodes_to_visit: Vec<usize> = vec![0_usize];
        while let Some(current_node_index) = nodes_to_visit.pop() {
            let node: &LinearBVHNode = &self.nodes[current_node_index];
            if !node.bounds.intersect_p(ray, &inv_dir, &dir_is_neg) {
                continue;
            }
            if node.is_leaf() {
                if self.primitives[node.offset].intersect_p(ray) {
                    return true;
                }
            } else {
                nodes_to_visit.push(node.offset);
                nodes_to_visit.push(current_node_index + 1);
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BoxPrim(Bounds3f);

    impl Primitive for BoxPrim {
        fn world_bound(&self) -> Bounds3f {
            self.0
        }
        fn intersect(&self, _ray: &Ray) -> SurfaceInteraction<'_> {
            SurfaceInteraction::default()
        }
    }

    fn cube_at(x: Float, size: Float) -> Arc<dyn Primitive + Send + Sync> {
        Arc::new(BoxPrim(Bounds3f::new(
            Point3f::new(x, 0.0, 0.0),
            Point3f::new(x + size, size, size),
        )))
    }

    fn infos(prims: &[Arc<dyn Primitive + Send + Sync>]) -> Vec<BVHPrimitiveInfo> {
        prims
            .iter()
            .enumerate()
            .map(|(i, p)| BVHPrimitiveInfo::new(i, p.world_bound()))
            .collect()
    }

    #[test]
    fn split_method_parsing() {
        assert_eq!(SplitMethod::parse("sah"), Ok(SplitMethod::SAH));
        assert_eq!(SplitMethod::parse("SAH"), Ok(SplitMethod::SAH));
        assert_eq!(SplitMethod::parse("naive"), Ok(SplitMethod::Naive));
        assert_eq!(SplitMethod::parse("middle"), Ok(SplitMethod::Naive));
        assert_eq!(SplitMethod::parse("equal"), Ok(SplitMethod::Naive));
        assert_eq!(
            SplitMethod::parse("hlbvh"),
            Err(BvhError::UnknownSplitMethod(String::from("hlbvh")))
        );
        assert_eq!(SplitMethod::from_flag(true), SplitMethod::SAH);
        assert_eq!(SplitMethod::from_flag(false), SplitMethod::Naive);
        assert_eq!(SplitMethod::SAH.to_string(), "sah");
        assert_eq!(SplitMethod::Naive.to_string(), "naive");
    }

    #[test]
    fn sah_sweep_matches_brute_force() {
        let prims: Vec<Arc<dyn Primitive + Send + Sync>> = vec![
            cube_at(0.0, 1.0),
            cube_at(0.5, 0.25),
            cube_at(1.0, 1.0),
            cube_at(10.0, 2.0),
            cube_at(11.0, 0.5),
            cube_at(30.0, 3.0),
        ];
        let info = infos(&prims);
        let n = info.len();
        let mut best = (INFINITY, 0_usize);
        for i in 0..(n - 1) {
            let mut a = Bounds3f::default();
            for pi in &info[..=i] {
                a = bnd3_union_bnd3f(&a, &pi.bounds);
            }
            let mut b = Bounds3f::default();
            for pi in &info[i + 1..] {
                b = bnd3_union_bnd3f(&b, &pi.bounds);
            }
            let cost = (i + 1) as Float * a.surface_area() + (n - i - 1) as Float * b.surface_area();
            if cost < best.0 {
                best = (cost, i);
            }
        }
        assert_eq!(sah_split_index(&info), best.1);
    }

    #[test]
    fn sah_ties_keep_the_first_candidate() {
        // identical boxes: every candidate has the same structure, costs
        // (i + 1) * a + (n - i - 1) * a are all equal
        let prims: Vec<Arc<dyn Primitive + Send + Sync>> =
            (0..5).map(|_| cube_at(0.0, 1.0)).collect();
        assert_eq!(sah_split_index(&infos(&prims)), 0);
    }

    #[test]
    fn identical_boxes_form_a_chain_with_sah() {
        let prims: Vec<Arc<dyn Primitive + Send + Sync>> =
            (0..6).map(|_| cube_at(0.0, 1.0)).collect();
        let bvh = BVHAccel::new(prims.clone(), 4, SplitMethod::SAH);
        let nodes = bvh.nodes();
        assert_eq!(nodes.len(), 11);
        assert_eq!(bvh.depth(), 6);
        for i in 0..5 {
            assert_eq!(nodes[2 * i].second_child(), Some(2 * i + 2));
            assert_eq!(nodes[2 * i + 1].primitive(), Some(i));
        }
        assert_eq!(nodes[10].primitive(), Some(5));
        // the median split stays balanced
        let bvh = BVHAccel::new(prims, 4, SplitMethod::Naive);
        assert_eq!(bvh.depth(), 4);
        assert_eq!(bvh.leaf_count(), 6);
    }

    #[test]
    fn exact_sah_costs() {
        // 24 = 0b11000 needs 2 significant bits, 100_000 needs 17
        assert!(sah_costs_are_exact(24.0, 100_000));
        assert!(!sah_costs_are_exact(6.0, 1 << 23));
        assert!(sah_costs_are_exact(0.0, 1 << 30));
        assert!(sah_costs_are_exact(INFINITY, 10));
        // 0.1 is not exact in binary, all 24 bits are in use
        assert!(!sah_costs_are_exact(0.1, 3));
        assert!(!sah_costs_are_exact(std::f32::MAX, 4));
    }

    #[test]
    fn flattened_layout() {
        let prims: Vec<Arc<dyn Primitive + Send + Sync>> =
            (0..3).map(|i| cube_at(i as Float * 2.0, 1.0)).collect();
        let bvh = BVHAccel::new(prims, 4, SplitMethod::Naive);
        // 3 primitives: mid = 1, so root -> (leaf 0, interior -> (leaf 1, leaf 2))
        let nodes = bvh.nodes();
        assert_eq!(nodes.len(), 5);
        assert!(!nodes[0].is_leaf());
        assert_eq!(nodes[1].primitive(), Some(0));
        assert_eq!(nodes[0].second_child(), Some(2));
        assert_eq!(nodes[2].second_child(), Some(4));
        assert_eq!(nodes[3].primitive(), Some(1));
        assert_eq!(nodes[4].primitive(), Some(2));
        assert_eq!(bvh.depth(), 3);
        assert_eq!(bvh.leaf_count(), 3);
    }

    #[test]
    fn max_prims_in_node_is_clamped_and_inert() {
        let prims: Vec<Arc<dyn Primitive + Send + Sync>> =
            (0..8).map(|i| cube_at(i as Float, 0.5)).collect();
        let bvh = BVHAccel::new(prims, 1000, SplitMethod::SAH);
        assert_eq!(bvh.max_prims_in_node(), 255);
        assert_eq!(bvh.leaf_count(), 8);
    }

    #[test]
    fn create_reads_parameters() {
        let prims: Vec<Arc<dyn Primitive + Send + Sync>> =
            (0..4).map(|i| cube_at(i as Float, 0.5)).collect();
        let mut ps = ParamSet::default();
        ps.add_string(String::from("splitmethod"), String::from("middle"));
        ps.add_int(String::from("maxnodeprims"), 2);
        let bvh = BVHAccel::create(prims.clone(), &ps).unwrap();
        assert_eq!(bvh.split_method(), SplitMethod::Naive);
        assert_eq!(bvh.max_prims_in_node(), 2);
        // unknown names fall back to SAH
        ps.add_string(String::from("splitmethod"), String::from("hlbvh"));
        let bvh = BVHAccel::create(prims.clone(), &ps).unwrap();
        assert_eq!(bvh.split_method(), SplitMethod::SAH);
        // defaults
        let bvh = BVHAccel::create(prims.clone(), &ParamSet::default()).unwrap();
        assert_eq!(bvh.split_method(), SplitMethod::SAH);
        assert_eq!(bvh.max_prims_in_node(), 4);
        ps.add_int(String::from("maxnodeprims"), -1);
        assert!(matches!(
            BVHAccel::create(prims, &ps),
            Err(BvhError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn empty_hierarchy_has_empty_world_bound() {
        let bvh = BVHAccel::new(Vec::new(), 4, SplitMethod::SAH);
        assert!(bvh.root().is_none());
        assert!(bvh.world_bound().is_empty());
        assert_eq!(bvh.depth(), 0);
        let ray = Ray::new(Point3f::default(), Vector3f::new(0.0, 0.0, 1.0));
        assert!(!bvh.intersect_p(&ray));
    }
}
