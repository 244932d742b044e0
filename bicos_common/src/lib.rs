mod amount;
mod secret;

pub mod helpers;
pub mod op;

pub use amount::{Amount, AmountConversionError, MAX_AMOUNT_UNITS};
pub use secret::Secret;
