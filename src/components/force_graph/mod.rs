//! Force-directed friend graph on an HTML canvas.
//!
//! Renders an interactive friend graph with:
//! - Physics-based node positioning from a [`GraphSession`](crate::session::GraphSession)
//! - Node dragging
//! - Group-colored glowing bulbs, flowing links and zap particles
//! - Two themes, `bulbs` and `friends`
//!
//! # Example
//!
//! ```ignore
//! use friend_graph::{ForceGraphCanvas, Graph};
//!
//! let graph: Graph = "3 2\n1 2\n2 3".parse()?;
//! let (data, _) = signal(graph);
//!
//! view! { <ForceGraphCanvas data=data /> }
//! ```

mod component;
mod frame_loop;
mod render;
mod state;
pub mod theme;

pub use component::ForceGraphCanvas;
pub use frame_loop::AnimationFrames;
pub use render::CanvasBinding;
pub use state::{CanvasState, DragState};
pub use theme::Theme;
