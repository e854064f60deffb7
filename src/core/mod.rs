//! Core billing types, GST computation, order import, and numbering.
//!
//! All money is [`rust_decimal::Decimal`]; rounding is half-up to 2
//! decimal places at the point of display.

mod billing;
mod builder;
mod error;
mod numbering;
mod order;
mod types;
mod words;

pub use billing::*;
pub use builder::*;
pub use error::*;
pub use numbering::*;
pub use order::*;
pub use types::*;
pub use words::amount_in_words;
