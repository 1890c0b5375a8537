//! Form views: checklist filling and timesheet entry

mod field_renderer;
mod form_fill;
mod timesheet;

pub use form_fill::draw_form_fill;
pub use timesheet::draw_timesheet;
