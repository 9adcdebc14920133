//! Core view-state types.
//!
//! Every type here is a plain value decoded from the query string. None of
//! them hold references to records or to the location they came from.

use std::fmt;
use std::num::NonZeroUsize;

// ===== ParamKey =====

/// Query-string parameters that carry view state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamKey {
    /// `data-state`: simulated response mode
    DataState,
    /// `user`: equality filter on the record's user
    User,
    /// `action`: equality filter on the record's action
    Action,
    /// `sort`: `field:direction`
    Sort,
    /// `page`: 1-based page number
    Page,
    /// `items`: page size
    Items,
}

impl ParamKey {
    /// All view parameters, in canonical order.
    pub const ALL: [ParamKey; 6] = [
        ParamKey::DataState,
        ParamKey::User,
        ParamKey::Action,
        ParamKey::Sort,
        ParamKey::Page,
        ParamKey::Items,
    ];

    /// Parameter name as it appears in the query string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DataState => "data-state",
            Self::User => "user",
            Self::Action => "action",
            Self::Sort => "sort",
            Self::Page => "page",
            Self::Items => "items",
        }
    }

    /// Look up a parameter by its query-string name.
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.as_str() == name)
    }
}

impl fmt::Display for ParamKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ===== DataState =====

/// Simulated response mode.
///
/// Selects how a load settles. Only `Success` runs the query pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DataState {
    /// Run the pipeline and show its page.
    #[default]
    Success,
    /// Pretend the fetch returned nothing.
    Empty,
    /// Pretend the fetch never settles.
    Loading,
    /// Pretend the fetch failed.
    Error,
}

impl DataState {
    /// Every mode, in display order.
    pub const ALL: [DataState; 4] = [
        DataState::Success,
        DataState::Empty,
        DataState::Loading,
        DataState::Error,
    ];

    /// Parse a mode name. Returns `None` for anything unrecognized.
    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|state| state.as_str() == raw)
    }

    /// Query-string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Empty => "empty",
            Self::Loading => "loading",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for DataState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ===== Sorting =====

/// Record field a view can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortField {
    /// Compare as instants.
    Timestamp,
    /// Compare user IDs lexicographically.
    User,
    /// Compare action names lexicographically.
    Action,
    /// Compare resources lexicographically.
    Resource,
}

impl SortField {
    /// Every sortable field, in column order.
    pub const ALL: [SortField; 4] = [
        SortField::Timestamp,
        SortField::User,
        SortField::Action,
        SortField::Resource,
    ];

    /// Parse a field name.
    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.as_str() == raw)
    }

    /// Query-string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Timestamp => "timestamp",
            Self::User => "user",
            Self::Action => "action",
            Self::Resource => "resource",
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortDirection {
    /// Smallest first.
    #[default]
    Asc,
    /// Largest first.
    Desc,
}

impl SortDirection {
    /// Parse a direction name.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "asc" => Some(Self::Asc),
            "desc" => Some(Self::Desc),
            _ => None,
        }
    }

    /// Query-string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    /// The other direction.
    pub fn reversed(&self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

/// Sort specification encoded as `field:direction`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SortSpec {
    /// Field to compare.
    pub field: SortField,
    /// Comparison direction.
    pub direction: SortDirection,
}

impl SortSpec {
    /// Create a sort specification.
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    /// Parse `field:direction`, splitting on the first `:`.
    ///
    /// Returns `None` when the separator is missing or either half is unknown.
    pub fn parse(raw: &str) -> Option<Self> {
        let (field, direction) = raw.split_once(':')?;
        Some(Self {
            field: SortField::parse(field)?,
            direction: SortDirection::parse(direction)?,
        })
    }

    /// Query-string representation.
    pub fn to_param(&self) -> String {
        format!("{}:{}", self.field.as_str(), self.direction.as_str())
    }
}

impl fmt::Display for SortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.field.as_str(), self.direction.as_str())
    }
}

// ===== Pagination =====

/// 1-based page number. Never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PageNumber(NonZeroUsize);

impl PageNumber {
    /// The first page.
    pub const FIRST: Self = Self(NonZeroUsize::MIN);

    /// Smart constructor. Returns `None` for zero.
    pub fn new(page: usize) -> Option<Self> {
        NonZeroUsize::new(page).map(Self)
    }

    /// Get the raw 1-based value.
    pub fn get(&self) -> usize {
        self.0.get()
    }
}

impl Default for PageNumber {
    fn default() -> Self {
        Self::FIRST
    }
}

impl fmt::Display for PageNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Page size. Never zero, so page arithmetic never divides by zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ItemsPerPage(NonZeroUsize);

impl ItemsPerPage {
    /// Page size used when neither the query string nor config say otherwise.
    pub const DEFAULT: Self = match NonZeroUsize::new(10) {
        Some(n) => Self(n),
        None => Self(NonZeroUsize::MIN),
    };

    /// Smart constructor. Returns `None` for zero.
    pub fn new(items: usize) -> Option<Self> {
        NonZeroUsize::new(items).map(Self)
    }

    /// Get the raw value.
    pub fn get(&self) -> usize {
        self.0.get()
    }
}

impl Default for ItemsPerPage {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for ItemsPerPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ===== ViewDefaults =====

/// Values substituted for absent or invalid numeric parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewDefaults {
    /// Page size when `items` is absent or invalid.
    pub items_per_page: ItemsPerPage,
}

// ===== ViewState =====

/// Complete view state, decoded from a query string.
///
/// Immutable: navigation produces a new query string, and a new `ViewState`
/// is decoded from it. Two equal query strings always decode to equal states.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    /// Simulated response mode.
    pub data_state: DataState,
    /// Keep only records by this user.
    pub user_filter: Option<String>,
    /// Keep only records with this action.
    pub action_filter: Option<String>,
    /// Optional ordering. `None` keeps the collection order.
    pub sort: Option<SortSpec>,
    /// Current page.
    pub page: PageNumber,
    /// Page size.
    pub items_per_page: ItemsPerPage,
}

impl ViewState {
    /// The state an empty query string decodes to.
    pub fn with_defaults(defaults: &ViewDefaults) -> Self {
        Self {
            data_state: DataState::default(),
            user_filter: None,
            action_filter: None,
            sort: None,
            page: PageNumber::FIRST,
            items_per_page: defaults.items_per_page,
        }
    }

    /// Whether any user or action filter is active.
    pub fn has_filters(&self) -> bool {
        self.user_filter.is_some() || self.action_filter.is_some()
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::with_defaults(&ViewDefaults::default())
    }
}
