pub mod app;
pub mod bias_modal;
pub mod codex_view;
pub mod info_panel;
pub mod language_selector;
pub mod loading_indicator;
pub mod orientation_help;
pub mod zoom_controls;
