//! UI Components
//!
//! Each component encapsulates its own state, event handling, and rendering logic.
//! Components communicate through Actions rather than direct state mutation.

pub mod confirm_dialog;
pub mod help_dialog;
pub mod hit_map;
pub mod home;
pub mod layout;
pub mod record_form;
pub mod table;

pub use confirm_dialog::ConfirmDialog;
pub use help_dialog::HelpDialog;
pub use hit_map::HitMap;
pub use home::{draw_home_screen, HomeComponent, HomeRenderContext};
pub use layout::{calculate_main_layout, centered_popup};
pub use record_form::RecordForm;
pub use table::TableComponent;
