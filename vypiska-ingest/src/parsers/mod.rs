//! One grammar per known statement layout.

pub mod moscow_2005;
pub mod stavropol_2107;

pub use moscow_2005::Moscow2005;
pub use stavropol_2107::Stavropol2107;
