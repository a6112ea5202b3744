pub mod size;
pub mod time;

const B: &str = "B";

const KIB: &str = "KiB";
const MIB: &str = "MiB";
const GIB: &str = "GiB";
const TIB: &str = "TiB";
const PIB: &str = "PiB";
const EIB: &str = "EiB";

pub use size::{format_size, SizeText};
pub use time::{format_time, time_format_len, write_time};
