pub mod diagram_canvas;
pub mod header;
pub mod settings_panel;
pub mod summary_panel;
