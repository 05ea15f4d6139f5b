// Kit assembly: preference tags, budget-capped selection, try-on text.
// Everything except the handlers is pure and free of I/O.

pub mod assembler;
pub mod handlers;
pub mod preferences;
pub mod try_on;
