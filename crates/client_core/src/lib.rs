//! Asynchronous operation controller for the store form and repository search
//! screens, plus the remote-call boundary they run against.

pub mod classifier;
pub mod config;
pub mod controller;
pub mod error;
pub mod pager;
pub mod product_form;
pub mod repository_search;
pub mod transport;
pub mod validation;

pub use classifier::{ErrorClassifier, Failure, StatusCodes, StatusRule};
pub use config::{load_settings, ClientSettings, SettingsError};
pub use controller::{OperationController, OperationState, Settlement, Trigger};
pub use error::{DecodeError, ErrorKind, RemoteFailure, RunRejected, TransportError};
pub use pager::{page, PageRequest, PageSize, PageSizeError, PageView, SearchResult};
pub use product_form::{FormView, ProductForm, NAME_FIELD, SIZE_FIELD};
pub use repository_search::{RepositorySearch, SearchView};
pub use transport::{HttpProductApi, HttpReply, HttpRepositoryApi, RemoteCall};
pub use validation::{FieldSource, FieldValue, ValidationGate, ValidationResult};

#[cfg(test)]
#[path = "tests/support.rs"]
mod test_support;
