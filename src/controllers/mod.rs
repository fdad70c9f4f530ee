mod panel;

pub use panel::PanelHttpController;
