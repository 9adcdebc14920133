//! View state derived from the URL query string.
//!
//! Pure, framework-independent: decoding and navigation are functions of
//! the query string alone.

pub mod codec;
pub mod types;

pub use codec::{decode, decode_with, encode, remove_keys, QueryString};
pub use types::{
    DataState, ItemsPerPage, PageNumber, ParamKey, SortDirection, SortField, SortSpec,
    ViewDefaults, ViewState,
};
