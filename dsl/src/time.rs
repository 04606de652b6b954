use time::{Date, Duration, PrimitiveDateTime, Time};

use crate::{common::FixedPoint, core::SourceSpan};

// See section 2.2.2
#[derive(Debug, PartialEq, Clone)]
pub struct DurationLiteral {
    pub span: SourceSpan,
    pub interval: Duration,
}

impl DurationLiteral {
    pub fn new(interval: Duration) -> Self {
        Self {
            span: SourceSpan::default(),
            interval,
        }
    }

    /// Create a new `DurationLiteral` with the given number of seconds.
    pub fn seconds(seconds: FixedPoint) -> Self {
        let whole_seconds = Duration::seconds(seconds.whole as i64);
        let fraction_seconds = Duration::nanoseconds((seconds.femptos / 1_000_000) as i64);
        Self {
            span: seconds.span,
            interval: whole_seconds + fraction_seconds,
        }
    }

    /// Create a new `DurationLiteral` with the given number of milliseconds.
    pub fn milliseconds(millis: FixedPoint) -> Self {
        let whole_seconds = Duration::seconds((millis.whole / 1_000) as i64);
        let whole_milliseconds = Duration::milliseconds((millis.whole % 1_000) as i64);
        let fraction_nanoseconds = Duration::nanoseconds((millis.femptos / 1_000_000_000) as i64);
        Self {
            span: millis.span,
            interval: whole_seconds + whole_milliseconds + fraction_nanoseconds,
        }
    }

    pub fn plus(&self, other: DurationLiteral) -> Self {
        DurationLiteral {
            span: SourceSpan::join(&self.span, &other.span),
            interval: self.interval + other.interval,
        }
    }
}

// See section 2.2.3
#[derive(Debug, PartialEq, Clone)]
pub struct TimeOfDayLiteral {
    value: Time,
}

impl TimeOfDayLiteral {
    pub fn new(value: Time) -> Self {
        Self { value }
    }
}

// See section 2.2.3
#[derive(Debug, PartialEq, Clone)]
pub struct DateLiteral {
    value: Date,
}

impl DateLiteral {
    pub fn new(value: Date) -> Self {
        Self { value }
    }
}

// See section 2.2.3
#[derive(Debug, PartialEq, Clone)]
pub struct DateAndTimeLiteral {
    value: PrimitiveDateTime,
}

impl DateAndTimeLiteral {
    pub fn new(value: PrimitiveDateTime) -> Self {
        Self { value }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_literal_when_seconds_then_converts_fraction() {
        assert_eq!(
            DurationLiteral::seconds(FixedPoint::parse("1").unwrap()).interval,
            Duration::seconds(1)
        );
        assert_eq!(
            DurationLiteral::seconds(FixedPoint::parse("1.001").unwrap()).interval,
            Duration::seconds(1) + Duration::milliseconds(1)
        );
    }

    #[test]
    fn duration_literal_when_milliseconds_then_converts_whole_seconds() {
        assert_eq!(
            DurationLiteral::milliseconds(FixedPoint::parse("1001").unwrap()).interval,
            Duration::seconds(1) + Duration::milliseconds(1)
        );
    }
}
