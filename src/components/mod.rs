pub mod canvas;
pub mod showcase;
pub mod tech_network;
