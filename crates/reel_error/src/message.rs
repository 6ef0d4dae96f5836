//! Errors that carry only a message and the place they were raised.

macro_rules! message_error {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
        #[display("{}: {} at line {} in {}", $label, message, line, file)]
        pub struct $name {
            /// What went wrong
            pub message: String,
            /// Line the error was raised on
            pub line: u32,
            /// Source file the error was raised in
            pub file: &'static str,
        }

        impl $name {
            #[doc = concat!("Create a `", stringify!($name), "` at the caller's location.")]
            #[track_caller]
            pub fn new(message: impl Into<String>) -> Self {
                let location = std::panic::Location::caller();
                Self {
                    message: message.into(),
                    line: location.line(),
                    file: location.file(),
                }
            }
        }
    };
}

message_error!(
    /// Transport failure talking to a remote endpoint.
    ///
    /// ```
    /// use reel_error::HttpError;
    ///
    /// let err = HttpError::new("Connection refused");
    /// assert!(err.to_string().starts_with("HTTP Error: Connection refused"));
    /// ```
    HttpError,
    "HTTP Error"
);

message_error!(
    /// A document could not be encoded or decoded.
    JsonError,
    "JSON Error"
);

message_error!(
    /// Studio configuration could not be loaded.
    ///
    /// ```
    /// use reel_error::ConfigError;
    ///
    /// let err = ConfigError::new("unknown provider `palm`");
    /// assert!(err.message.contains("palm"));
    /// assert!(err.file.ends_with(".rs"));
    /// ```
    ConfigError,
    "Configuration Error"
);

message_error!(
    /// A text backend failed without a more specific kind.
    BackendError,
    "Backend Error"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_is_caller() {
        let err = BackendError::new("timeout");
        assert_eq!(err.line, line!() - 1);
        assert!(err.file.ends_with("message.rs"));
    }

    #[test]
    fn test_display_names_the_kind() {
        let err = JsonError::new("expected object");
        assert!(err.to_string().starts_with("JSON Error: expected object at line"));
    }
}
