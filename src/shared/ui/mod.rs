pub mod document;
pub mod navigation;
pub mod render;
pub mod routes;
pub mod view_models;

pub use document::{Document, UiAction};
pub use navigation::{NavigationService, Navigator};
pub use render::{HtmlRenderer, RenderingService};
pub use routes::{test_ids, Route};
pub use view_models::{BillRow, BillsPage, NewBillFormView};
