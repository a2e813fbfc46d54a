//! Ready-made prefix/suffix decorators.
//!
//! Each returns a closure suitable for `LoggerConfig::with_prefix` /
//! `with_suffix` or the matching [`ConfigOverrides`](crate::ConfigOverrides)
//! methods.

use serde_json::Value;
use time::OffsetDateTime;
use time::macros::format_description;

/// Current UTC time as `HH:MM:SS`.
#[must_use]
pub fn timestamp() -> impl Fn() -> Value + Send + Sync + 'static {
    || {
        let now = OffsetDateTime::now_utc();
        let text = now
            .format(format_description!("[hour]:[minute]:[second]"))
            .unwrap_or_default();
        Value::String(text)
    }
}

/// `[name]`, for tagging output with the logger name.
#[must_use]
pub fn tag(name: &str) -> impl Fn() -> Value + Send + Sync + 'static {
    let tag = Value::String(format!("[{name}]"));
    move || tag.clone()
}

/// The same value on every call.
#[must_use]
pub fn constant(value: impl Into<Value>) -> impl Fn() -> Value + Send + Sync + 'static {
    let value = value.into();
    move || value.clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_has_clock_shape() {
        let value = timestamp()();
        let text = value.as_str().unwrap();
        assert_eq!(text.len(), 8);
        assert_eq!(text.matches(':').count(), 2);
    }

    #[test]
    fn tag_wraps_name() {
        assert_eq!(tag("app.db")(), Value::from("[app.db]"));
    }

    #[test]
    fn constant_repeats() {
        let d = constant(7);
        assert_eq!(d(), Value::from(7));
        assert_eq!(d(), Value::from(7));
    }
}
