pub mod records_view;

pub use records_view::{render_records, render_support};
