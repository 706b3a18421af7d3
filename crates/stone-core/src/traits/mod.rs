pub mod serializable;

pub use serializable::Serializable;
