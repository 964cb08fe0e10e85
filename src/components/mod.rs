mod charts;
mod detail_sidebar;
mod disease_list;
mod filter_controls;
mod literature_panel;
pub mod network_graph;
mod node_list;
mod workspace;

pub use disease_list::DiseaseList;
pub use filter_controls::FilterControls;
pub use node_list::NodeList;
pub use workspace::NetworkWorkspace;
