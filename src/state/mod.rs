pub mod gesture;
pub mod region;
pub mod viewport;

pub use gesture::{Gesture, ScreenPoint};
pub use region::ViewRegion;
pub use viewport::{Surface, Viewport};
