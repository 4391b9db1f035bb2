#[macro_use]
mod util;

mod evaluation;
