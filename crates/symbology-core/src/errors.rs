use chrono::NaiveDate;
use symbology_core_types::RequestId;
use thiserror::Error;

/// Result type alias using SymbologyError
pub type Result<T> = std::result::Result<T, SymbologyError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that transport layers hand to
/// clients unchanged. Conflict and NotFound must stay distinct kinds: a
/// caller reacts to them differently (terminate first vs. nothing to do).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Boundary validation
    InvalidInput,
    InvalidSymbol,
    InvalidIdentifier,
    InvalidDate,
    InvalidInterval,

    // Domain outcomes
    NotFound,
    Conflict,
    InvariantViolation,

    // Integration/IO
    Io,
    Serialization,
    Persistence,
    Concurrency,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::InvalidSymbol => "ERR_INVALID_SYMBOL",
            ExErrorKind::InvalidIdentifier => "ERR_INVALID_IDENTIFIER",
            ExErrorKind::InvalidDate => "ERR_INVALID_DATE",
            ExErrorKind::InvalidInterval => "ERR_INVALID_INTERVAL",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::Conflict => "ERR_CONFLICT",
            ExErrorKind::InvariantViolation => "ERR_INVARIANT_VIOLATION",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Persistence => "ERR_PERSISTENCE",
            ExErrorKind::Concurrency => "ERR_CONCURRENCY",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }

    /// True for kinds caused by the shape of the caller's input
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ExErrorKind::InvalidInput
                | ExErrorKind::InvalidSymbol
                | ExErrorKind::InvalidIdentifier
                | ExErrorKind::InvalidDate
                | ExErrorKind::InvalidInterval
        )
    }
}

/// Canonical structured error type
///
/// Classification fields support programmatic handling; the context fields
/// (`op`, `symbol`, `identifier`, `date`) carry what a log line or an API
/// response needs to explain the failure.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    symbol: Option<String>,
    identifier: Option<u64>,
    date: Option<NaiveDate>,
    request_id: Option<RequestId>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            symbol: None,
            identifier: None,
            date: None,
            request_id: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add symbol context
    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = Some(symbol.into());
        self
    }

    /// Add identifier context
    pub fn with_identifier(mut self, identifier: u64) -> Self {
        self.identifier = Some(identifier);
        self
    }

    /// Add the requested date
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Add request ID context
    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = Some(request_id);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the symbol context, if any
    pub fn symbol(&self) -> Option<&str> {
        self.symbol.as_deref()
    }

    /// Get the identifier context, if any
    pub fn identifier(&self) -> Option<u64> {
        self.identifier
    }

    /// Get the requested date, if any
    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    /// Get the request ID context, if any
    pub fn request_id(&self) -> Option<&RequestId> {
        self.request_id.as_ref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(symbol) = &self.symbol {
            write!(f, " (symbol: {})", symbol)?;
        }
        if let Some(identifier) = self.identifier {
            write!(f, " (identifier: {})", identifier)?;
        }
        if let Some(date) = self.date {
            write!(f, " (date: {})", date)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Domain error taxonomy for mapping operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SymbologyError {
    // ===== Uniqueness conflicts =====
    /// Another record for this symbol is active on, or starts after, the date
    #[error("Symbol '{symbol}' already has a mapping overlapping {date}; terminate it before reassignment")]
    SymbolConflict { symbol: String, date: NaiveDate },

    /// Another record for this identifier is active on, or starts after, the date
    #[error("Identifier {identifier} is already assigned on or after {date}; terminate it before reassignment")]
    IdentifierConflict { identifier: u64, date: NaiveDate },

    // ===== Lookups =====
    /// No record for the symbol is active on the date
    #[error("No active mapping for symbol '{symbol}' on {date}")]
    SymbolNotActive { symbol: String, date: NaiveDate },

    /// No record for the identifier is active on the date
    #[error("No active mapping for identifier {identifier} on {date}")]
    IdentifierNotActive { identifier: u64, date: NaiveDate },

    /// The record active on the date already has an end date
    #[error("Mapping for symbol '{symbol}' active on {date} is already closed at {end_date}")]
    AlreadyClosed {
        symbol: String,
        date: NaiveDate,
        end_date: NaiveDate,
    },

    // ===== Interval shape =====
    /// Closing would produce an empty (or inverted) interval
    #[error("Terminating '{symbol}' on {end_date} would leave an empty interval starting {start_date}")]
    InvalidInterval {
        symbol: String,
        start_date: NaiveDate,
        end_date: NaiveDate,
    },

    // ===== Boundary validation =====
    #[error("Invalid symbol '{symbol}': {reason}")]
    InvalidSymbol { symbol: String, reason: String },

    #[error("Invalid identifier {identifier}: identifiers must be positive")]
    InvalidIdentifier { identifier: i64 },

    #[error("Invalid date '{value}': expected YYYY-MM-DD")]
    InvalidDate { value: String },

    // ===== Collection audit =====
    #[error("Records {first} and {second} for symbol '{symbol}' overlap")]
    OverlappingSymbol {
        symbol: String,
        first: usize,
        second: usize,
    },

    #[error("Records {first} and {second} for identifier {identifier} overlap")]
    OverlappingIdentifier {
        identifier: u64,
        first: usize,
        second: usize,
    },

    #[error("Record {position} for symbol '{symbol}' has end date not after its start date")]
    MalformedInterval { position: usize, symbol: String },
}

impl SymbologyError {
    /// Shorthand for the structured kind this error maps to
    pub fn kind(&self) -> ExErrorKind {
        ExError::from(self.clone()).kind()
    }
}

impl From<SymbologyError> for ExError {
    fn from(err: SymbologyError) -> Self {
        let message = err.to_string();
        match err {
            // Uniqueness -> Conflict
            SymbologyError::SymbolConflict { symbol, date } => {
                ExError::new(ExErrorKind::Conflict)
                    .with_symbol(symbol)
                    .with_date(date)
                    .with_message(message)
            }
            SymbologyError::IdentifierConflict { identifier, date } => {
                ExError::new(ExErrorKind::Conflict)
                    .with_identifier(identifier)
                    .with_date(date)
                    .with_message(message)
            }

            // Lookups -> NotFound
            SymbologyError::SymbolNotActive { symbol, date }
            | SymbologyError::AlreadyClosed { symbol, date, .. } => {
                ExError::new(ExErrorKind::NotFound)
                    .with_symbol(symbol)
                    .with_date(date)
                    .with_message(message)
            }
            SymbologyError::IdentifierNotActive { identifier, date } => {
                ExError::new(ExErrorKind::NotFound)
                    .with_identifier(identifier)
                    .with_date(date)
                    .with_message(message)
            }

            SymbologyError::InvalidInterval {
                symbol, end_date, ..
            } => ExError::new(ExErrorKind::InvalidInterval)
                .with_symbol(symbol)
                .with_date(end_date)
                .with_message(message),

            SymbologyError::InvalidSymbol { symbol, .. } => {
                ExError::new(ExErrorKind::InvalidSymbol)
                    .with_symbol(symbol)
                    .with_message(message)
            }
            SymbologyError::InvalidIdentifier { .. } => {
                ExError::new(ExErrorKind::InvalidIdentifier).with_message(message)
            }
            SymbologyError::InvalidDate { .. } => {
                ExError::new(ExErrorKind::InvalidDate).with_message(message)
            }

            SymbologyError::OverlappingSymbol { symbol, .. }
            | SymbologyError::MalformedInterval { symbol, .. } => {
                ExError::new(ExErrorKind::InvariantViolation)
                    .with_symbol(symbol)
                    .with_message(message)
            }
            SymbologyError::OverlappingIdentifier { identifier, .. } => {
                ExError::new(ExErrorKind::InvariantViolation)
                    .with_identifier(identifier)
                    .with_message(message)
            }
        }
    }
}
