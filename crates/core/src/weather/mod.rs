//! Observed wind at a point, from the NASA POWER service.
//!
//! Only the request/response handling lives here; the HTTP call itself is
//! supplied by the caller through [`PowerTransport`].

pub mod power;

pub use power::{
    fetch_wind, parse_power_response, power_request_url, power_timestamp, PowerTransport,
    WindObservation, WindSourceError, POWER_WINDROSE_URL,
};
