//! The uart module contains the components responsible for the BL0942 wire
//! protocol: packet decoding and packing, and the serial transport.

pub mod frame;
pub mod mock;
pub mod transport;

pub use frame::*;
pub use transport::*;
