pub mod audit;
pub mod getnet;
