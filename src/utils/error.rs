use thiserror::Error;

/// 表單欄位
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Postcode,
    HouseNumber,
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Field::Postcode => write!(f, "postcode"),
            Field::HouseNumber => write!(f, "huisnummer"),
        }
    }
}

/// 本地輸入驗證錯誤，永遠不會到達 transport
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    #[error("{0} is required")]
    EmptyField(Field),

    #[error("postcode is shorter than 6 characters")]
    TooShort,

    #[error("postcode is longer than 6 characters")]
    TooLong,

    #[error("postcode must start with 4 digits")]
    MustStartWithDigits,

    #[error("postcode must end with 2 letters")]
    MustEndWithLetters,

    #[error("postcode has an invalid format")]
    InvalidFormat,

    #[error("house number must be an integer")]
    NotInteger,

    #[error("house number must be at least 1")]
    TooSmall,

    #[error("house number must be at most 99999")]
    TooLarge,
}

impl FieldError {
    pub fn field(&self) -> Field {
        match self {
            FieldError::EmptyField(field) => *field,
            FieldError::TooShort
            | FieldError::TooLong
            | FieldError::MustStartWithDigits
            | FieldError::MustEndWithLetters
            | FieldError::InvalidFormat => Field::Postcode,
            FieldError::NotInteger | FieldError::TooSmall | FieldError::TooLarge => {
                Field::HouseNumber
            }
        }
    }

    pub fn user_message(&self) -> &'static str {
        match self {
            FieldError::EmptyField(Field::Postcode) => "Postcode is verplicht.",
            FieldError::EmptyField(Field::HouseNumber) => "Huisnummer is verplicht.",
            FieldError::TooShort => "Postcode is te kort. Voer 4 cijfers en 2 letters in.",
            FieldError::TooLong => "Postcode is te lang. Voer 4 cijfers en 2 letters in.",
            FieldError::MustStartWithDigits => "Postcode moet beginnen met 4 cijfers.",
            FieldError::MustEndWithLetters => "Postcode moet eindigen met 2 letters.",
            FieldError::InvalidFormat => "Voer een geldige postcode in (bijv. 1234 AB)",
            FieldError::NotInteger => "Huisnummer moet een geheel getal zijn.",
            FieldError::TooSmall => "Huisnummer moet groter zijn dan 0.",
            FieldError::TooLarge => "Huisnummer is te groot (maximaal 99999).",
        }
    }
}

/// Transport 層失敗（網路、逾時）
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct TransportFailure {
    pub message: String,
    pub timed_out: bool,
}

impl TransportFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            timed_out: false,
        }
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            timed_out: true,
        }
    }
}

/// Registry 查詢錯誤
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("no API key configured")]
    MissingApiKey,

    #[error("transport failure: {0}")]
    TransportError(#[source] TransportFailure),

    #[error("registry returned 404 Not Found")]
    NotFound,

    #[error("registry rejected the API key (401)")]
    Unauthorized,

    #[error("registry rate limit reached (429)")]
    RateLimited,

    #[error("registry unavailable (status {status})")]
    ServiceUnavailable { status: u16 },

    #[error("unexpected registry status {status}")]
    UnknownApiError { status: u16 },

    #[error("malformed registry response: {reason}")]
    MalformedResponse { reason: String },

    #[error("registry returned no usable record for this address")]
    NoDataForAddress,
}

impl LookupError {
    /// 穩定的錯誤種類名稱，用於日誌
    pub fn kind(&self) -> &'static str {
        match self {
            LookupError::MissingApiKey => "MissingApiKey",
            LookupError::TransportError(_) => "TransportError",
            LookupError::NotFound => "NotFound",
            LookupError::Unauthorized => "Unauthorized",
            LookupError::RateLimited => "RateLimited",
            LookupError::ServiceUnavailable { .. } => "ServiceUnavailable",
            LookupError::UnknownApiError { .. } => "UnknownApiError",
            LookupError::MalformedResponse { .. } => "MalformedResponse",
            LookupError::NoDataForAddress => "NoDataForAddress",
        }
    }

    pub fn user_message(&self) -> &'static str {
        match self {
            LookupError::MissingApiKey => "API sleutel is niet geconfigureerd.",
            LookupError::TransportError(_) => "Er is een fout opgetreden. Probeer het opnieuw.",
            LookupError::NotFound | LookupError::NoDataForAddress => {
                "Geen energielabel gevonden voor dit adres. Controleer of het postcode en huisnummer correct zijn ingevoerd."
            }
            LookupError::Unauthorized => {
                "API sleutel is ongeldig of ontbreekt. Controleer de instellingen."
            }
            LookupError::RateLimited => {
                "Te veel verzoeken. Probeer het over enkele minuten opnieuw."
            }
            LookupError::ServiceUnavailable { .. } => {
                "De API service is momenteel niet beschikbaar. Probeer het later opnieuw."
            }
            LookupError::UnknownApiError { .. } => {
                "Er is een fout opgetreden bij het ophalen van het energielabel. Probeer het opnieuw."
            }
            LookupError::MalformedResponse { .. } => {
                "Er is een fout opgetreden bij het verwerken van de API response. Probeer het opnieuw."
            }
        }
    }
}

#[derive(Error, Debug)]
pub enum LabelError {
    #[error("Invalid input: {0}")]
    Field(#[from] FieldError),

    #[error("Lookup failed: {0}")]
    Lookup(#[from] LookupError),

    #[error("Request rejected by request guard")]
    Forbidden,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Upstream,
    Security,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl LabelError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            LabelError::Field(_) => ErrorCategory::Input,
            LabelError::Lookup(LookupError::MissingApiKey) => ErrorCategory::Configuration,
            LabelError::Lookup(_) => ErrorCategory::Upstream,
            LabelError::Forbidden => ErrorCategory::Security,
            LabelError::InvalidConfigValueError { .. }
            | LabelError::ConfigValidationError { .. } => ErrorCategory::Configuration,
            LabelError::IoError(_) | LabelError::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 沒有標籤不算系統錯誤
            LabelError::Lookup(LookupError::NotFound)
            | LabelError::Lookup(LookupError::NoDataForAddress) => ErrorSeverity::Low,
            LabelError::Lookup(LookupError::TransportError(_))
            | LabelError::Lookup(LookupError::RateLimited)
            | LabelError::Lookup(LookupError::ServiceUnavailable { .. }) => ErrorSeverity::Medium,
            LabelError::Field(_)
            | LabelError::Forbidden
            | LabelError::Lookup(_) => ErrorSeverity::High,
            _ => ErrorSeverity::Critical,
        }
    }

    /// 給使用者看的訊息，不含內部細節
    pub fn user_friendly_message(&self) -> String {
        match self {
            LabelError::Field(e) => e.user_message().to_string(),
            LabelError::Lookup(e) => e.user_message().to_string(),
            LabelError::Forbidden => "Ververs de pagina en probeer opnieuw.".to_string(),
            LabelError::InvalidConfigValueError { .. }
            | LabelError::ConfigValidationError { .. } => {
                format!("Configuratiefout: {}", self)
            }
            LabelError::IoError(_) | LabelError::SerializationError(_) => {
                "Er is een fout opgetreden. Probeer het opnieuw.".to_string()
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            LabelError::Field(_) => "Check the postcode (1234 AB) and house number and try again",
            LabelError::Lookup(LookupError::MissingApiKey)
            | LabelError::Lookup(LookupError::Unauthorized) => {
                "Set a valid EP-Online API key via --api-key, EP_ONLINE_API_KEY or the config file"
            }
            LabelError::Lookup(LookupError::RateLimited) => "Wait a few minutes before retrying",
            LabelError::Lookup(LookupError::TransportError(_))
            | LabelError::Lookup(LookupError::ServiceUnavailable { .. }) => {
                "Check network connectivity and retry later"
            }
            LabelError::Lookup(LookupError::NotFound)
            | LabelError::Lookup(LookupError::NoDataForAddress) => {
                "Verify the address; not every building has a registered energy label"
            }
            LabelError::Lookup(_) => "Retry later; if the problem persists the registry API may have changed",
            LabelError::Forbidden => "Reload the form to obtain a fresh token",
            LabelError::InvalidConfigValueError { .. }
            | LabelError::ConfigValidationError { .. } => "Fix the configuration value and run again",
            LabelError::IoError(_) | LabelError::SerializationError(_) => {
                "Check file permissions and paths"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, LabelError>;
