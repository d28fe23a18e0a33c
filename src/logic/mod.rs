mod host_digest;
mod select_handle;

pub use host_digest::host_digest;
pub use select_handle::select_handle;
