mod clock;
mod dates;
mod errors;
mod filter;

pub use clock::{Clock, FixedClock, SystemClock};
pub use dates::{deserialize_date_time, parse_date, parse_date_time, parse_time};
pub use errors::CalendarError;
pub use filter::{start_of_week, DateFilter};
