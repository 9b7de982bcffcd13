pub mod changes;
pub mod ids;
pub mod model;
pub mod state;

pub use changes::*;
pub use ids::*;
pub use model::*;
pub use state::*;
