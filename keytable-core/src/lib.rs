pub mod builder;
pub mod codegen;
pub mod config;
pub mod logging;
pub mod source;
pub mod table;
pub mod windows_rawname;

pub use builder::{NameMap, OffsetWidth, pack_strings};
pub use config::*;
pub use logging::*;
pub use table::{SparseStringTable, StrOffset};
pub use windows_rawname::{KEYCODE_WINDOWS_RAWNAME, keycode_windows_rawname};
