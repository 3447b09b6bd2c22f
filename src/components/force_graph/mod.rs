mod component;
mod render;
mod state;
mod types;

pub use component::{EngineHandle, ForceGraphCanvas, FrameHook, TickHook};
pub use types::{LayoutEngine, TickSnapshot};
