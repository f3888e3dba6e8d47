pub mod task;
pub mod mood;
pub mod focus;
pub mod note;

pub use task::*;
pub use mood::*;
pub use focus::*;
pub use note::*;
