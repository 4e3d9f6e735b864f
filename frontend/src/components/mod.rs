pub mod handlers;
pub mod header;
pub mod prediction_form;
pub mod results;
pub mod selection_panel;
pub mod utils;
pub mod visualization;
