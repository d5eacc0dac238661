//! Quadtree over rectangles, answering "does anything stored overlap this?" queries.
//!
//! Nodes never hold references: a leaf names a slot in the value arena and an internal node names
//! a block of four children in the child arena. Both arenas only grow, so handles stay valid for
//! the tree's lifetime. Insertion and queries walk the tree with an explicit stack, keeping the
//! first 128 frames inline.

use crate::geom::{Point, Rect};
use smallvec::{SmallVec, smallvec};

/// Rectangles a leaf holds before it splits.
pub const CAPACITY: usize = 8;
/// Leaves at this depth keep accepting entries instead of splitting.
pub const MAX_DEPTH: u32 = 12;
const STACK_INLINE: usize = 128;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Node {
    Leaf { values: u32 },
    Internal { children: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(usize)]
enum Quadrant {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Quadrant {
    const ALL: [Quadrant; 4] = [
        Quadrant::TopLeft,
        Quadrant::TopRight,
        Quadrant::BottomLeft,
        Quadrant::BottomRight,
    ];

    fn of(self, bound: &Rect) -> Rect {
        let mid_x = bound.left + bound.width() / 2.0;
        let mid_y = bound.top + bound.height() / 2.0;
        match self {
            Quadrant::TopLeft => Rect::new(bound.left, bound.top, mid_x, mid_y),
            Quadrant::TopRight => Rect::new(mid_x, bound.top, bound.right, mid_y),
            Quadrant::BottomLeft => Rect::new(bound.left, mid_y, mid_x, bound.bottom),
            Quadrant::BottomRight => Rect::new(mid_x, mid_y, bound.right, bound.bottom),
        }
    }
}

/// Where a node lives: the root slot or one quadrant of a child block.
#[derive(Debug, Clone, Copy)]
enum Handle {
    Root,
    Child { block: u32, quadrant: Quadrant },
}

#[derive(Debug, Clone, Copy)]
struct Frame {
    handle: Handle,
    bound: Rect,
    depth: u32,
}

#[derive(Debug, Clone)]
pub struct QuadTree {
    root_bound: Rect,
    root: Node,
    children: Vec<[Node; 4]>,
    values: Vec<SmallVec<[Rect; CAPACITY]>>,
}

fn bound_contains(bound: &Rect, p: Point) -> bool {
    bound.left <= p.x && p.x <= bound.right && bound.top <= p.y && p.y <= bound.bottom
}

fn covers(r: &Rect, bound: &Rect) -> bool {
    r.left <= bound.left
        && bound.right <= r.right
        && r.top <= bound.top
        && bound.bottom <= r.bottom
}

impl QuadTree {
    pub fn new(root_bound: Rect) -> Self {
        Self {
            root_bound,
            root: Node::Leaf { values: 0 },
            children: Vec::new(),
            values: vec![SmallVec::new()],
        }
    }

    pub fn root_bound(&self) -> Rect {
        self.root_bound
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty() && self.values[0].is_empty()
    }

    fn node(&self, handle: Handle) -> Node {
        match handle {
            Handle::Root => self.root,
            Handle::Child { block, quadrant } => self.children[block as usize][quadrant as usize],
        }
    }

    fn set_node(&mut self, handle: Handle, node: Node) {
        match handle {
            Handle::Root => self.root = node,
            Handle::Child { block, quadrant } => {
                self.children[block as usize][quadrant as usize] = node;
            }
        }
    }

    /// Stores `rect` in every leaf whose bound it overlaps. Rectangles missing the root bound
    /// are dropped.
    pub fn insert(&mut self, rect: Rect) {
        if !self.root_bound.overlaps(&rect) {
            return;
        }

        let mut stack: SmallVec<[Frame; STACK_INLINE]> = smallvec![Frame {
            handle: Handle::Root,
            bound: self.root_bound,
            depth: 0,
        }];
        while let Some(frame) = stack.pop() {
            match self.node(frame.handle) {
                Node::Leaf { values } => {
                    let leaf = &mut self.values[values as usize];
                    // Splitting a leaf that one entry fully covers cannot separate anything.
                    let saturated = frame.depth >= MAX_DEPTH
                        || covers(&rect, &frame.bound)
                        || leaf.iter().any(|r| covers(r, &frame.bound));
                    if leaf.len() < CAPACITY || saturated {
                        leaf.push(rect);
                    } else {
                        self.split(frame);
                        // Revisit as an internal node so the new rectangle reaches the children.
                        stack.push(frame);
                    }
                }
                Node::Internal { children } => {
                    for quadrant in Quadrant::ALL {
                        let bound = quadrant.of(&frame.bound);
                        if bound.overlaps(&rect) {
                            stack.push(Frame {
                                handle: Handle::Child {
                                    block: children,
                                    quadrant,
                                },
                                bound,
                                depth: frame.depth + 1,
                            });
                        }
                    }
                }
            }
        }
    }

    /// Turns a full leaf into an internal node with four leaf children, copying every entry into
    /// each child it overlaps. The top-left child reuses the old leaf's value slot.
    fn split(&mut self, frame: Frame) {
        let Node::Leaf { values } = self.node(frame.handle) else {
            return;
        };
        let old = std::mem::take(&mut self.values[values as usize]);

        let mut block = [Node::Leaf { values }; 4];
        for quadrant in Quadrant::ALL {
            let bound = quadrant.of(&frame.bound);
            let entries: SmallVec<[Rect; CAPACITY]> =
                old.iter().filter(|r| bound.overlaps(r)).copied().collect();
            if quadrant == Quadrant::TopLeft {
                self.values[values as usize] = entries;
            } else {
                block[quadrant as usize] = Node::Leaf {
                    values: self.values.len() as u32,
                };
                self.values.push(entries);
            }
        }

        let children = self.children.len() as u32;
        self.children.push(block);
        self.set_node(frame.handle, Node::Internal { children });
        tracing::trace!(
            depth = frame.depth,
            blocks = self.children.len(),
            leaves = self.values.len(),
            "quadtree leaf split"
        );
    }

    /// Whether any stored rectangle strictly overlaps `query`.
    pub fn rect_intersects(&self, query: &Rect) -> bool {
        if !self.root_bound.overlaps(query) {
            return false;
        }
        self.any_leaf(
            |bound| bound.overlaps(query),
            |stored| stored.overlaps(query),
        )
    }

    /// Whether `p` lies strictly inside any stored rectangle.
    pub fn point_intersects(&self, p: Point) -> bool {
        if !bound_contains(&self.root_bound, p) {
            return false;
        }
        self.any_leaf(
            |bound| bound_contains(bound, p),
            |stored| stored.contains_point(p),
        )
    }

    fn any_leaf(&self, visit: impl Fn(&Rect) -> bool, hit: impl Fn(&Rect) -> bool) -> bool {
        let mut stack: SmallVec<[(Node, Rect); STACK_INLINE]> =
            smallvec![(self.root, self.root_bound)];
        while let Some((node, bound)) = stack.pop() {
            match node {
                Node::Leaf { values } => {
                    if self.values[values as usize].iter().any(&hit) {
                        return true;
                    }
                }
                Node::Internal { children } => {
                    let block = &self.children[children as usize];
                    for quadrant in Quadrant::ALL {
                        let child_bound = quadrant.of(&bound);
                        if visit(&child_bound) {
                            stack.push((block[quadrant as usize], child_bound));
                        }
                    }
                }
            }
        }
        false
    }

    /// Extent of every leaf, in depth-first order.
    pub fn leaf_bounds(&self) -> Vec<Rect> {
        let mut bounds = Vec::new();
        let mut stack: SmallVec<[(Node, Rect); STACK_INLINE]> =
            smallvec![(self.root, self.root_bound)];
        while let Some((node, bound)) = stack.pop() {
            match node {
                Node::Leaf { .. } => bounds.push(bound),
                Node::Internal { children } => {
                    let block = &self.children[children as usize];
                    for quadrant in Quadrant::ALL.into_iter().rev() {
                        stack.push((block[quadrant as usize], quadrant.of(&bound)));
                    }
                }
            }
        }
        bounds
    }
}
