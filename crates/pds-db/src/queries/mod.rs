pub mod aims;
pub mod behaviours;
pub mod journals;
pub mod plans;
pub mod statements;
