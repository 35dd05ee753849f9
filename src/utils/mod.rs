pub(crate) mod date;

pub(crate) use date::{Timezone, parse_date, parse_timestamp};
