// Adapters layer: concrete implementations of the domain ports (files, http, result storage).

pub mod local_source;
pub mod remote_source;
pub mod result_store;
pub mod source;

pub use local_source::LocalTextSource;
pub use remote_source::RemoteTextSource;
pub use result_store::LocalResultStore;
pub use source::SourceMode;
