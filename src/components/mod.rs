pub mod diff_view;
pub mod status_bar;
