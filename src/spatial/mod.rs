mod bounds;
mod quadtree;

pub use bounds::*;
pub use quadtree::*;
