//! Result type determination for time arithmetic.
//!
//! IEC 61131-3 table 30 defines the result type of the ADD, SUB, MUL
//! and DIV operators over the duration and date types. Each operator
//! has an ordered table of rows; the first row whose operand types
//! match decides the result type. A pair of operand types with no
//! matching row is not a legal combination for the operator.
//!
//! SAFE-tagged operands follow the PLCopen safety profile rules: for
//! ADD and SUB the result is SAFE only when both operands are SAFE,
//! otherwise the base type. For MUL and DIV the numeric scale factor
//! does not demote a SAFE duration.
//!
//! MUL and DIV are defined with the duration operand first. The
//! standard's table is not symmetric for these operators, so the
//! commuted order is intentionally not in the tables.

use ferroplc_dsl::common::{ElementaryTypeName, TypeDescriptor};

use ElementaryTypeName::*;

/// One row of a widening table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WidenEntry {
    pub left: ElementaryTypeName,
    pub right: ElementaryTypeName,
    pub result: ElementaryTypeName,
}

const fn entry(
    left: ElementaryTypeName,
    right: ElementaryTypeName,
    result: ElementaryTypeName,
) -> WidenEntry {
    WidenEntry {
        left,
        right,
        result,
    }
}

/// Result types for the ADD operator.
pub const WIDEN_ADD_TABLE: &[WidenEntry] = &[
    entry(TIME, TIME, TIME),
    entry(TimeOfDay, TimeOfDay, TimeOfDay),
    entry(DateAndTime, DateAndTime, DateAndTime),
    entry(SAFETIME, SAFETIME, SAFETIME),
    entry(SafeTimeOfDay, SafeTimeOfDay, SafeTimeOfDay),
    entry(SafeDateAndTime, SafeDateAndTime, SafeDateAndTime),
    entry(TimeOfDay, TIME, TimeOfDay),
    entry(SafeTimeOfDay, TIME, TimeOfDay),
    entry(TimeOfDay, SAFETIME, TimeOfDay),
    entry(SafeTimeOfDay, SAFETIME, SafeTimeOfDay),
    entry(DateAndTime, TIME, DateAndTime),
    entry(SafeDateAndTime, TIME, DateAndTime),
    entry(DateAndTime, SAFETIME, DateAndTime),
    entry(SafeDateAndTime, SAFETIME, SafeDateAndTime),
];

/// Result types for the SUB operator. Subtracting two values of the
/// same date type yields the duration between them.
pub const WIDEN_SUB_TABLE: &[WidenEntry] = &[
    entry(TIME, TIME, TIME),
    entry(SAFETIME, SAFETIME, SAFETIME),
    entry(TimeOfDay, TIME, TimeOfDay),
    entry(SafeTimeOfDay, TIME, TimeOfDay),
    entry(TimeOfDay, SAFETIME, TimeOfDay),
    entry(SafeTimeOfDay, SAFETIME, SafeTimeOfDay),
    entry(DateAndTime, TIME, DateAndTime),
    entry(SafeDateAndTime, TIME, DateAndTime),
    entry(DateAndTime, SAFETIME, DateAndTime),
    entry(SafeDateAndTime, SAFETIME, SafeDateAndTime),
    entry(TimeOfDay, TimeOfDay, TIME),
    entry(SafeTimeOfDay, TimeOfDay, TIME),
    entry(TimeOfDay, SafeTimeOfDay, TIME),
    entry(SafeTimeOfDay, SafeTimeOfDay, SAFETIME),
    entry(DATE, DATE, TIME),
    entry(SAFEDATE, DATE, TIME),
    entry(DATE, SAFEDATE, TIME),
    entry(SAFEDATE, SAFEDATE, SAFETIME),
    entry(DateAndTime, DateAndTime, TIME),
    entry(SafeDateAndTime, DateAndTime, TIME),
    entry(DateAndTime, SafeDateAndTime, TIME),
    entry(SafeDateAndTime, SafeDateAndTime, SAFETIME),
];

/// Result types for the MUL operator. A duration multiplied by any
/// numeric type scales the duration.
pub const WIDEN_MUL_TABLE: &[WidenEntry] = &[
    entry(TIME, LREAL, TIME),
    entry(TIME, REAL, TIME),
    entry(TIME, LINT, TIME),
    entry(TIME, DINT, TIME),
    entry(TIME, INT, TIME),
    entry(TIME, SINT, TIME),
    entry(TIME, ULINT, TIME),
    entry(TIME, UDINT, TIME),
    entry(TIME, UINT, TIME),
    entry(TIME, USINT, TIME),
    entry(SAFETIME, LREAL, SAFETIME),
    entry(SAFETIME, REAL, SAFETIME),
    entry(SAFETIME, LINT, SAFETIME),
    entry(SAFETIME, DINT, SAFETIME),
    entry(SAFETIME, INT, SAFETIME),
    entry(SAFETIME, SINT, SAFETIME),
    entry(SAFETIME, ULINT, SAFETIME),
    entry(SAFETIME, UDINT, SAFETIME),
    entry(SAFETIME, UINT, SAFETIME),
    entry(SAFETIME, USINT, SAFETIME),
    entry(SAFETIME, SAFELREAL, SAFETIME),
    entry(SAFETIME, SAFEREAL, SAFETIME),
    entry(SAFETIME, SAFELINT, SAFETIME),
    entry(SAFETIME, SAFEDINT, SAFETIME),
    entry(SAFETIME, SAFEINT, SAFETIME),
    entry(SAFETIME, SAFESINT, SAFETIME),
    entry(SAFETIME, SAFEULINT, SAFETIME),
    entry(SAFETIME, SAFEUDINT, SAFETIME),
    entry(SAFETIME, SAFEUINT, SAFETIME),
    entry(SAFETIME, SAFEUSINT, SAFETIME),
];

/// Result types for the DIV operator. The rules are the same as for
/// multiplication.
pub const WIDEN_DIV_TABLE: &[WidenEntry] = WIDEN_MUL_TABLE;

/// Returns the result type for the operator described by the table when
/// applied to the operand types, or `None` when the combination is not
/// legal for the operator. Derived types never participate in time
/// arithmetic.
pub fn widen(
    table: &[WidenEntry],
    left: &TypeDescriptor,
    right: &TypeDescriptor,
) -> Option<TypeDescriptor> {
    let (TypeDescriptor::Elementary(left), TypeDescriptor::Elementary(right)) = (left, right)
    else {
        return None;
    };
    table
        .iter()
        .find(|row| row.left == *left && row.right == *right)
        .map(|row| TypeDescriptor::Elementary(row.result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ferroplc_dsl::common::{DerivedTypeDecl, DerivedTypeKind};
    use rstest::rstest;

    fn widen_tags(
        table: &[WidenEntry],
        left: ElementaryTypeName,
        right: ElementaryTypeName,
    ) -> Option<TypeDescriptor> {
        widen(
            table,
            &TypeDescriptor::Elementary(left),
            &TypeDescriptor::Elementary(right),
        )
    }

    #[rstest]
    #[case(TIME, TIME, Some(TIME))]
    #[case(TimeOfDay, TIME, Some(TimeOfDay))]
    #[case(TIME, TimeOfDay, None)]
    #[case(SafeTimeOfDay, SAFETIME, Some(SafeTimeOfDay))]
    #[case(SafeTimeOfDay, TIME, Some(TimeOfDay))]
    #[case(DateAndTime, TIME, Some(DateAndTime))]
    #[case(INT, INT, None)]
    #[case(DATE, DATE, None)]
    fn widen_add_when_operands_then_result(
        #[case] left: ElementaryTypeName,
        #[case] right: ElementaryTypeName,
        #[case] expected: Option<ElementaryTypeName>,
    ) {
        assert_eq!(
            widen_tags(WIDEN_ADD_TABLE, left, right),
            expected.map(TypeDescriptor::Elementary)
        );
    }

    #[rstest]
    #[case(TimeOfDay, TimeOfDay, Some(TIME))]
    #[case(DATE, DATE, Some(TIME))]
    #[case(DateAndTime, DateAndTime, Some(TIME))]
    #[case(SAFEDATE, SAFEDATE, Some(SAFETIME))]
    #[case(SAFEDATE, DATE, Some(TIME))]
    #[case(TimeOfDay, TIME, Some(TimeOfDay))]
    #[case(TIME, DATE, None)]
    fn widen_sub_when_operands_then_result(
        #[case] left: ElementaryTypeName,
        #[case] right: ElementaryTypeName,
        #[case] expected: Option<ElementaryTypeName>,
    ) {
        assert_eq!(
            widen_tags(WIDEN_SUB_TABLE, left, right),
            expected.map(TypeDescriptor::Elementary)
        );
    }

    #[rstest]
    #[case(TIME, INT, Some(TIME))]
    #[case(TIME, LREAL, Some(TIME))]
    #[case(TIME, ULINT, Some(TIME))]
    #[case(SAFETIME, SAFEREAL, Some(SAFETIME))]
    #[case(SAFETIME, INT, Some(SAFETIME))]
    #[case(INT, TIME, None)]
    #[case(TIME, TIME, None)]
    fn widen_mul_when_operands_then_duration_first_only(
        #[case] left: ElementaryTypeName,
        #[case] right: ElementaryTypeName,
        #[case] expected: Option<ElementaryTypeName>,
    ) {
        assert_eq!(
            widen_tags(WIDEN_MUL_TABLE, left, right),
            expected.map(TypeDescriptor::Elementary)
        );
    }

    #[test]
    fn widen_div_when_operands_then_same_rules_as_mul() {
        assert_eq!(
            widen_tags(WIDEN_DIV_TABLE, TIME, SINT),
            Some(TypeDescriptor::Elementary(TIME))
        );
        assert_eq!(widen_tags(WIDEN_DIV_TABLE, SINT, TIME), None);
    }

    #[test]
    fn widen_when_derived_operand_then_none() {
        let decl = DerivedTypeDecl::new("SPAN", DerivedTypeKind::Alias);
        assert_eq!(
            widen(
                WIDEN_ADD_TABLE,
                &TypeDescriptor::derived(&decl),
                &TypeDescriptor::Elementary(TIME)
            ),
            None
        );
        assert_eq!(
            widen(
                WIDEN_ADD_TABLE,
                &TypeDescriptor::Elementary(TIME),
                &TypeDescriptor::derived(&decl)
            ),
            None
        );
    }
}
