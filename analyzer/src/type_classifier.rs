//! Classification predicates over type descriptors.
//!
//! The IEC 61131-3 generic type hierarchy (ANY_ELEMENTARY, ANY_NUM and
//! so on) is encoded as composable predicates rather than a flat table.
//! Each family predicate is a closed-set membership test against the
//! elementary type tags belonging to that family; compound families are
//! the logical OR of their sub-families. The `*_compatible` predicates
//! accept both a base family and its SAFE counterpart.
//!
//! Derived types belong to no elementary family, so every predicate
//! here returns `false` for them.

use ferroplc_dsl::common::{ElementaryTypeName, TypeDescriptor};
use ferroplc_dsl::core::Id;

use ElementaryTypeName::*;

/// Maps the lower case spelling of each elementary type keyword to its
/// type tag. Includes the short and long spellings of the time of day
/// and date and time keywords.
static ELEMENTARY_TYPE_NAMES: phf::Map<&'static str, ElementaryTypeName> = phf::phf_map! {
    "bool" => BOOL,
    "sint" => SINT,
    "int" => INT,
    "dint" => DINT,
    "lint" => LINT,
    "usint" => USINT,
    "uint" => UINT,
    "udint" => UDINT,
    "ulint" => ULINT,
    "real" => REAL,
    "lreal" => LREAL,
    "time" => TIME,
    "date" => DATE,
    "tod" => TimeOfDay,
    "time_of_day" => TimeOfDay,
    "dt" => DateAndTime,
    "date_and_time" => DateAndTime,
    "string" => STRING,
    "wstring" => WSTRING,
    "byte" => BYTE,
    "word" => WORD,
    "dword" => DWORD,
    "lword" => LWORD,
    "safebool" => SAFEBOOL,
    "safesint" => SAFESINT,
    "safeint" => SAFEINT,
    "safedint" => SAFEDINT,
    "safelint" => SAFELINT,
    "safeusint" => SAFEUSINT,
    "safeuint" => SAFEUINT,
    "safeudint" => SAFEUDINT,
    "safeulint" => SAFEULINT,
    "safereal" => SAFEREAL,
    "safelreal" => SAFELREAL,
    "safetime" => SAFETIME,
    "safedate" => SAFEDATE,
    "safetod" => SafeTimeOfDay,
    "safetime_of_day" => SafeTimeOfDay,
    "safedt" => SafeDateAndTime,
    "safedate_and_time" => SafeDateAndTime,
    "safestring" => SAFESTRING,
    "safewstring" => SAFEWSTRING,
    "safebyte" => SAFEBYTE,
    "safeword" => SAFEWORD,
    "safedword" => SAFEDWORD,
    "safelword" => SAFELWORD,
};

/// Returns the elementary type tag named by the identifier, if the
/// identifier spells an elementary type keyword. Identifier comparison
/// is case insensitive.
pub fn elementary_type_for_name(name: &Id) -> Option<ElementaryTypeName> {
    ELEMENTARY_TYPE_NAMES.get(name.lower_case().as_str()).copied()
}

fn tag(descriptor: &TypeDescriptor) -> Option<ElementaryTypeName> {
    match descriptor {
        TypeDescriptor::Elementary(name) => Some(*name),
        TypeDescriptor::Derived(_) => None,
    }
}

pub fn is_any_elementary(descriptor: &TypeDescriptor) -> bool {
    is_any_magnitude(descriptor)
        || is_any_bit(descriptor)
        || is_any_string(descriptor)
        || is_any_date(descriptor)
}

pub fn is_any_safe_elementary(descriptor: &TypeDescriptor) -> bool {
    is_any_safe_magnitude(descriptor)
        || is_any_safe_bit(descriptor)
        || is_any_safe_string(descriptor)
        || is_any_safe_date(descriptor)
}

pub fn is_any_elementary_compatible(descriptor: &TypeDescriptor) -> bool {
    is_any_magnitude_compatible(descriptor)
        || is_any_bit_compatible(descriptor)
        || is_any_string_compatible(descriptor)
        || is_any_date_compatible(descriptor)
}

// ANY_MAGNITUDE is TIME plus every numeric type.

pub fn is_any_magnitude(descriptor: &TypeDescriptor) -> bool {
    matches!(tag(descriptor), Some(TIME)) || is_any_num(descriptor)
}

pub fn is_any_signed_magnitude(descriptor: &TypeDescriptor) -> bool {
    matches!(tag(descriptor), Some(TIME)) || is_any_signed_num(descriptor)
}

pub fn is_any_safe_magnitude(descriptor: &TypeDescriptor) -> bool {
    matches!(tag(descriptor), Some(SAFETIME)) || is_any_safe_num(descriptor)
}

pub fn is_any_signed_safe_magnitude(descriptor: &TypeDescriptor) -> bool {
    matches!(tag(descriptor), Some(SAFETIME)) || is_any_signed_safe_num(descriptor)
}

pub fn is_any_magnitude_compatible(descriptor: &TypeDescriptor) -> bool {
    is_any_magnitude(descriptor) || is_any_safe_magnitude(descriptor)
}

pub fn is_any_signed_magnitude_compatible(descriptor: &TypeDescriptor) -> bool {
    is_any_signed_magnitude(descriptor) || is_any_signed_safe_magnitude(descriptor)
}

// ANY_NUM is every real and integer type.

pub fn is_any_num(descriptor: &TypeDescriptor) -> bool {
    is_any_real(descriptor) || is_any_int(descriptor)
}

pub fn is_any_signed_num(descriptor: &TypeDescriptor) -> bool {
    is_any_real(descriptor) || is_any_signed_int(descriptor)
}

pub fn is_any_safe_num(descriptor: &TypeDescriptor) -> bool {
    is_any_safe_real(descriptor) || is_any_safe_int(descriptor)
}

pub fn is_any_signed_safe_num(descriptor: &TypeDescriptor) -> bool {
    is_any_safe_real(descriptor) || is_any_signed_safe_int(descriptor)
}

pub fn is_any_num_compatible(descriptor: &TypeDescriptor) -> bool {
    is_any_num(descriptor) || is_any_safe_num(descriptor)
}

pub fn is_any_signed_num_compatible(descriptor: &TypeDescriptor) -> bool {
    is_any_signed_num(descriptor) || is_any_signed_safe_num(descriptor)
}

// ANY_INT and the signed subset that excludes the unsigned tags.

pub fn is_any_int(descriptor: &TypeDescriptor) -> bool {
    matches!(
        tag(descriptor),
        Some(SINT | INT | DINT | LINT | USINT | UINT | UDINT | ULINT)
    )
}

pub fn is_any_signed_int(descriptor: &TypeDescriptor) -> bool {
    matches!(tag(descriptor), Some(SINT | INT | DINT | LINT))
}

pub fn is_any_safe_int(descriptor: &TypeDescriptor) -> bool {
    matches!(
        tag(descriptor),
        Some(
            SAFESINT
                | SAFEINT
                | SAFEDINT
                | SAFELINT
                | SAFEUSINT
                | SAFEUINT
                | SAFEUDINT
                | SAFEULINT
        )
    )
}

pub fn is_any_signed_safe_int(descriptor: &TypeDescriptor) -> bool {
    matches!(tag(descriptor), Some(SAFESINT | SAFEINT | SAFEDINT | SAFELINT))
}

pub fn is_any_int_compatible(descriptor: &TypeDescriptor) -> bool {
    is_any_int(descriptor) || is_any_safe_int(descriptor)
}

pub fn is_any_signed_int_compatible(descriptor: &TypeDescriptor) -> bool {
    is_any_signed_int(descriptor) || is_any_signed_safe_int(descriptor)
}

// ANY_REAL

pub fn is_any_real(descriptor: &TypeDescriptor) -> bool {
    matches!(tag(descriptor), Some(REAL | LREAL))
}

pub fn is_any_safe_real(descriptor: &TypeDescriptor) -> bool {
    matches!(tag(descriptor), Some(SAFEREAL | SAFELREAL))
}

pub fn is_any_real_compatible(descriptor: &TypeDescriptor) -> bool {
    is_any_real(descriptor) || is_any_safe_real(descriptor)
}

// ANY_BIT

pub fn is_any_bit(descriptor: &TypeDescriptor) -> bool {
    matches!(tag(descriptor), Some(BOOL | BYTE | WORD | DWORD | LWORD))
}

pub fn is_any_safe_bit(descriptor: &TypeDescriptor) -> bool {
    matches!(
        tag(descriptor),
        Some(SAFEBOOL | SAFEBYTE | SAFEWORD | SAFEDWORD | SAFELWORD)
    )
}

pub fn is_any_bit_compatible(descriptor: &TypeDescriptor) -> bool {
    is_any_bit(descriptor) || is_any_safe_bit(descriptor)
}

pub fn is_bool(descriptor: &TypeDescriptor) -> bool {
    matches!(tag(descriptor), Some(BOOL))
}

pub fn is_safe_bool(descriptor: &TypeDescriptor) -> bool {
    matches!(tag(descriptor), Some(SAFEBOOL))
}

pub fn is_any_bool_compatible(descriptor: &TypeDescriptor) -> bool {
    is_bool(descriptor) || is_safe_bool(descriptor)
}

// ANY_STRING

pub fn is_any_string(descriptor: &TypeDescriptor) -> bool {
    matches!(tag(descriptor), Some(STRING | WSTRING))
}

pub fn is_any_safe_string(descriptor: &TypeDescriptor) -> bool {
    matches!(tag(descriptor), Some(SAFESTRING | SAFEWSTRING))
}

pub fn is_any_string_compatible(descriptor: &TypeDescriptor) -> bool {
    is_any_string(descriptor) || is_any_safe_string(descriptor)
}

// ANY_DATE

pub fn is_any_date(descriptor: &TypeDescriptor) -> bool {
    matches!(tag(descriptor), Some(DATE | TimeOfDay | DateAndTime))
}

pub fn is_any_safe_date(descriptor: &TypeDescriptor) -> bool {
    matches!(
        tag(descriptor),
        Some(SAFEDATE | SafeTimeOfDay | SafeDateAndTime)
    )
}

pub fn is_any_date_compatible(descriptor: &TypeDescriptor) -> bool {
    is_any_date(descriptor) || is_any_safe_date(descriptor)
}
