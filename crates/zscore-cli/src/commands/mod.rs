pub mod benchmark;
pub mod lookup;
pub mod reference;
pub mod score;
