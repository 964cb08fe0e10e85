mod component;
mod layout;
mod render;
mod state;
mod viewport;

pub use component::NetworkCanvas;
pub use layout::LayoutOptions;
pub use state::{NetworkState, TapTarget};
