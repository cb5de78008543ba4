//! Peripheral configuration framing for MCU dashboards: typed configs packed
//! into fixed-layout frames, shipped to an ingest backend over HTTP.

pub mod frame;
pub mod peripheral;
pub mod transport;
