pub mod chart;
pub mod dashboard;
pub mod menu;
pub mod stats_dashboard;
pub mod stats_sidebar;
pub mod typing_area;
