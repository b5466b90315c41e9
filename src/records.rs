//! Derived fields and summaries computed from campus tables.

use serde::Serialize;
use std::cmp::Ordering;

use crate::error::StoreError;
use crate::store::{CellValue, Table};

/// Minimum total for a passing mark.
pub const PASS_MARK: i64 = 40;

/// Marks after an update: `total = internal + external`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarksOutcome {
    pub internal: i64,
    pub external: i64,
    pub total: i64,
    pub result: &'static str,
}

impl MarksOutcome {
    pub fn compute(internal: i64, external: i64) -> Self {
        let total = internal + external;
        MarksOutcome {
            internal,
            external,
            total,
            result: if total >= PASS_MARK { "Pass" } else { "Fail" },
        }
    }

    /// Column assignments for the `marks` sheet.
    pub fn assignments(&self) -> [(&'static str, CellValue); 4] {
        [
            ("internal", CellValue::Int(self.internal)),
            ("external", CellValue::Int(self.external)),
            ("total", CellValue::Int(self.total)),
            ("result", CellValue::text(self.result)),
        ]
    }
}

/// Fee position after a payment: `balance = total_fee - paid_fee`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeeOutcome {
    pub paid_fee: i64,
    pub balance: i64,
    pub status: &'static str,
}

impl FeeOutcome {
    pub fn compute(total_fee: i64, paid_fee: i64) -> Self {
        let balance = total_fee - paid_fee;
        FeeOutcome {
            paid_fee,
            balance,
            status: if balance == 0 { "Paid" } else { "Pending" },
        }
    }

    /// Column assignments for the `fees` sheet.
    pub fn assignments(&self) -> [(&'static str, CellValue); 3] {
        [
            ("paid_fee", CellValue::Int(self.paid_fee)),
            ("balance", CellValue::Int(self.balance)),
            ("payment_status", CellValue::text(self.status)),
        ]
    }
}

/// Parse a numeric form field.
///
/// # Errors
/// * [`StoreError::Validation`] if `raw` is not an integer
pub fn parse_int_field(name: &str, raw: &str) -> Result<i64, StoreError> {
    raw.trim()
        .parse()
        .map_err(|_| StoreError::Validation(format!("{} must be a whole number, got {:?}", name, raw)))
}

/// Attendance totals for one student.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudentAttendance {
    pub student_id: String,
    pub student_name: String,
    pub total_classes: usize,
    pub present: usize,
    pub absent: usize,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttendanceSummary {
    pub students: Vec<StudentAttendance>,
    pub overall_percentage: f64,
}

/// Columns treated as class periods: any name containing "period".
pub fn period_columns(table: &Table) -> Vec<&str> {
    table
        .columns
        .iter()
        .filter(|c| c.to_lowercase().contains("period"))
        .map(String::as_str)
        .collect()
}

/// Summarize attendance per student.
///
/// Students are ordered by `student_id` (numerically, then as text) and rows
/// without a `student_id` are skipped. A period cell counts as a class when
/// non-empty and as present when it equals `P`. Returns `None` when the sheet
/// has no period columns.
pub fn summarize_attendance(table: &Table) -> Option<AttendanceSummary> {
    let periods = period_columns(table);
    if periods.is_empty() {
        return None;
    }

    let mut students: Vec<(CellValue, StudentAttendance)> = Vec::new();
    for row in &table.rows {
        let sid = Table::cell(row, "student_id");
        if sid.is_empty() {
            continue;
        }
        let idx = match students.iter().position(|(key, _)| key.matches(sid)) {
            Some(idx) => idx,
            None => {
                students.push((
                    sid.clone(),
                    StudentAttendance {
                        student_id: sid.to_string(),
                        student_name: Table::cell(row, "student_name").to_string(),
                        total_classes: 0,
                        present: 0,
                        absent: 0,
                        percentage: 0.0,
                    },
                ));
                students.len() - 1
            }
        };

        let entry = &mut students[idx].1;
        for period in &periods {
            let mark = Table::cell(row, period);
            if !mark.is_empty() {
                entry.total_classes += 1;
                if mark.matches(&CellValue::text("P")) {
                    entry.present += 1;
                }
            }
        }
    }

    students.sort_by(|(a, _), (b, _)| match (a.as_i64(), b.as_i64()) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.to_string().cmp(&b.to_string()),
    });

    let mut total_present = 0;
    let mut total_absent = 0;
    let students: Vec<StudentAttendance> = students
        .into_iter()
        .map(|(_, mut entry)| {
            entry.absent = entry.total_classes - entry.present;
            entry.percentage = percentage(entry.present, entry.total_classes);
            total_present += entry.present;
            total_absent += entry.absent;
            entry
        })
        .collect();

    Some(AttendanceSummary {
        students,
        overall_percentage: percentage(total_present, total_present + total_absent),
    })
}

fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    let raw = part as f64 / whole as f64 * 100.0;
    (raw * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Row;

    #[test]
    fn marks_pass_and_fail() {
        let pass = MarksOutcome::compute(30, 15);
        assert_eq!(pass.total, 45);
        assert_eq!(pass.result, "Pass");

        let fail = MarksOutcome::compute(10, 20);
        assert_eq!(fail.total, 30);
        assert_eq!(fail.result, "Fail");

        assert_eq!(MarksOutcome::compute(20, 20).result, "Pass");
    }

    #[test]
    fn fees_paid_and_pending() {
        let paid = FeeOutcome::compute(5000, 5000);
        assert_eq!(paid.balance, 0);
        assert_eq!(paid.status, "Paid");

        let pending = FeeOutcome::compute(5000, 3000);
        assert_eq!(pending.balance, 2000);
        assert_eq!(pending.status, "Pending");
    }

    #[test]
    fn non_numeric_field_is_a_validation_error() {
        assert_eq!(parse_int_field("internal", " 25 ").unwrap(), 25);
        let err = parse_int_field("internal", "twenty").unwrap_err();
        assert!(matches!(err, StoreError::Validation(msg) if msg.contains("internal")));
    }

    fn attendance_row(sid: i64, name: &str, periods: [&str; 4]) -> Row {
        let mut row = Row::new();
        row.insert("student_id".into(), CellValue::Int(sid));
        row.insert("student_name".into(), CellValue::text(name));
        for (idx, mark) in periods.iter().enumerate() {
            row.insert(format!("period{}", idx + 1), CellValue::text(mark));
        }
        row
    }

    #[test]
    fn summary_orders_students_by_id() {
        let mut table = Table::new(
            "attendance",
            vec![
                "student_id".into(),
                "student_name".into(),
                "date".into(),
                "period1".into(),
                "period2".into(),
                "period3".into(),
                "period4".into(),
            ],
        );
        table.rows.push(attendance_row(10, "Kiran", ["P", "P", "", ""]));
        table.rows.push(attendance_row(2, "Ravi", ["P", "A", "P", ""]));
        table.rows.push(attendance_row(1, "Asha", ["P", "P", "P", "P"]));
        table.rows.push(attendance_row(2, "Ravi", ["A", "A", "P", ""]));

        let mut orphan = attendance_row(0, "Nobody", ["P", "P", "P", "P"]);
        orphan.remove("student_id");
        table.rows.push(orphan);

        let summary = summarize_attendance(&table).unwrap();
        let ids: Vec<&str> = summary.students.iter().map(|s| s.student_id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "10"]);

        let ravi = &summary.students[1];
        assert_eq!(ravi.student_name, "Ravi");
        // Blank period cells are not classes.
        assert_eq!(ravi.total_classes, 6);
        assert_eq!(ravi.present, 3);
        assert_eq!(ravi.absent, 3);
        assert_eq!(ravi.percentage, 50.0);

        let asha = &summary.students[0];
        assert_eq!(asha.total_classes, 4);
        assert_eq!(asha.percentage, 100.0);

        // 9 of 12 classes; the row without a student_id is not counted.
        assert_eq!(summary.overall_percentage, 75.0);
    }

    #[test]
    fn summary_requires_period_columns() {
        let table = Table::new("attendance", vec!["student_id".into(), "date".into()]);
        assert!(summarize_attendance(&table).is_none());
    }
}
