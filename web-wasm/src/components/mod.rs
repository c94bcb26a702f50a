pub mod action_buttons;
pub mod banners;
pub mod header;
pub mod loading_indicator;
pub mod results_table;
pub mod upload_area;
