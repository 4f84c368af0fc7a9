pub mod dashboard_state;
pub mod panel;
pub mod theme;
