//! Problem codes for resolution and analysis errors.
//!
//! The `Problem` enumeration is generated by the build script from
//! `resources/problem-codes.csv` so that codes, names and messages
//! stay in one place.

include!(concat!(env!("OUT_DIR"), "/problems.rs"));

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_when_en_param_redeclared_then_stable_value() {
        assert_eq!(Problem::EnParamRedeclared.code(), "P0001");
        assert_eq!(Problem::EnoParamRedeclared.code(), "P0002");
    }

    #[test]
    fn message_when_en_param_redeclared_then_not_empty() {
        assert!(!Problem::EnParamRedeclared.message().is_empty());
    }
}
