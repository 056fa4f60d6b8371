//! Pure computations over fetched data: distance, offsets and local time.

mod distance;
mod local_time;
mod utc_offset;

pub use distance::{distance_km, haversine_m, Coordinates, EARTH_RADIUS_M};
pub use local_time::{format_timestamp, localized_timestamps};
pub use utc_offset::parse_utc_offset;
