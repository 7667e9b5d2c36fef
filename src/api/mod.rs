//! EoX API operations

mod batch;
mod eox;
mod pages;

pub(crate) use batch::filter_identifiers;
pub(crate) use batch::into_batches;
pub use pages::EoxPage;
pub use pages::EoxPages;
