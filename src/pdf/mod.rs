//! Invoice document assembly: a fixed-section, paginated tax-invoice PDF.
//!
//! Stateless per invocation — all input arrives in the
//! [`InvoiceDocument`](crate::core::InvoiceDocument), nothing is cached,
//! and concurrent `assemble` calls share no state.

mod assemble;
mod layout;

pub use assemble::assemble;
pub use layout::fmt_inr;
