pub mod edge;
pub mod node;
pub mod snapshot;
pub mod viewport;

pub use edge::*;
pub use node::*;
pub use snapshot::*;
pub use viewport::*;
