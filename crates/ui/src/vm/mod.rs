mod chrome_vm;
mod time_fmt;

pub use chrome_vm::{ChromeVm, PROGRESS_WIDTH};
pub use time_fmt::format_elapsed;
