mod ket;

pub use ket::Ket;
