pub mod petrol_parser;

pub use petrol_parser::{Parser, PetrolPriceParser};
