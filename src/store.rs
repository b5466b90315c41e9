//! Workbook-backed record store.
//!
//! Every sheet of the backing xlsx file is one table. Loading reads the whole
//! workbook; writing replaces one sheet by re-serializing the entire file in
//! place. Nothing here locks the file: two concurrent writers race and the
//! last full-file write wins.

use calamine::{Data, DataType, Range, Reader, Xlsx};
use chrono::{NaiveDate, NaiveDateTime, Timelike};
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use serde::{Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;
use std::io::Cursor;
use std::path::PathBuf;

use crate::error::StoreError;

/// One row of a table, keyed by (whitespace-stripped) column name.
pub type Row = HashMap<String, CellValue>;

/// The logical tables of the campus workbook.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TableKind {
    Login,
    Students,
    Attendance,
    Marks,
    Fees,
    Assignments,
    Notifications,
    Exams,
    Library,
    Placement,
    Materials,
    Timetable,
}

impl TableKind {
    pub const ALL: [TableKind; 12] = [
        TableKind::Login,
        TableKind::Students,
        TableKind::Attendance,
        TableKind::Marks,
        TableKind::Fees,
        TableKind::Assignments,
        TableKind::Notifications,
        TableKind::Exams,
        TableKind::Library,
        TableKind::Placement,
        TableKind::Materials,
        TableKind::Timetable,
    ];

    /// Name of the sheet backing this table. Consumed verbatim.
    pub fn sheet_name(self) -> &'static str {
        match self {
            TableKind::Login => "login_users",
            TableKind::Students => "students",
            TableKind::Attendance => "attendance",
            TableKind::Marks => "marks",
            TableKind::Fees => "fees",
            TableKind::Assignments => "assignments",
            TableKind::Notifications => "notifications",
            TableKind::Exams => "exam_schedule",
            TableKind::Library => "library",
            TableKind::Placement => "placements",
            TableKind::Materials => "course_material",
            TableKind::Timetable => "timetable",
        }
    }
}

/// A single cell value.
///
/// Whole floats are normalized to `Int` on load, since xlsx stores every
/// number as a double and keys must compare equal to integers.
///
/// Date cells stay dates so that writing a sheet back keeps them typed. They
/// display (and compare against text) as `YYYY-MM-DD`, or
/// `YYYY-MM-DD HH:MM:SS` when they carry a time of day.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    #[default]
    Empty,
    Int(i64),
    Float(f64),
    Text(String),
    Bool(bool),
    #[serde(serialize_with = "serialize_date")]
    Date(NaiveDateTime),
}

fn serialize_date<S: Serializer>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&CellValue::Date(*value))
}

fn is_midnight(value: &NaiveDateTime) -> bool {
    value.hour() == 0 && value.minute() == 0 && value.second() == 0
}

impl CellValue {
    /// Convert a calamine cell into a `CellValue`.
    ///
    /// Date cells become `Date`; ISO date strings (ods only) stay text.
    /// Error cells and empty strings become `Empty`.
    pub fn from_data(data: &Data) -> Self {
        match data {
            Data::Empty | Data::Error(_) => CellValue::Empty,
            Data::Int(i) => CellValue::Int(*i),
            Data::Float(f) => CellValue::from_float(*f),
            Data::Bool(b) => CellValue::Bool(*b),
            Data::String(s) => CellValue::text(s),
            Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::text(s),
            Data::DateTime(dt) => match data.as_datetime() {
                Some(parsed) => CellValue::Date(parsed),
                None => CellValue::from_float(dt.as_f64()),
            },
        }
    }

    /// Text value, or `Empty` for a blank string.
    pub fn text(s: &str) -> Self {
        if s.is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(s.to_string())
        }
    }

    fn from_float(f: f64) -> Self {
        if f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
            CellValue::Int(f as i64)
        } else {
            CellValue::Float(f)
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Integer view of the cell, accepting whole floats and numeric text.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            CellValue::Int(i) => Some(*i),
            CellValue::Float(f) if f.fract() == 0.0 => Some(*f as i64),
            CellValue::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Int(i) => Some(*i as f64),
            CellValue::Float(f) => Some(*f),
            CellValue::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Equality used when filtering rows by key.
    ///
    /// Numbers compare numerically; numeric text compares equal to the
    /// number it spells, so a path segment `"3"` finds the row with id 3.
    pub fn matches(&self, other: &CellValue) -> bool {
        match (self, other) {
            (CellValue::Empty, CellValue::Empty) => true,
            (CellValue::Text(a), CellValue::Text(b)) => a == b,
            (CellValue::Bool(a), CellValue::Bool(b)) => a == b,
            (CellValue::Date(a), CellValue::Date(b)) => a == b,
            (CellValue::Date(_), CellValue::Text(_)) | (CellValue::Text(_), CellValue::Date(_)) => {
                self.to_string() == other.to_string()
            }
            (CellValue::Empty, _) | (_, CellValue::Empty) => false,
            (CellValue::Bool(_), _) | (_, CellValue::Bool(_)) => false,
            (CellValue::Date(_), _) | (_, CellValue::Date(_)) => false,
            (a, b) => match (a.as_f64(), b.as_f64()) {
                (Some(x), Some(y)) => x == y,
                _ => false,
            },
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Int(i) => write!(f, "{}", i),
            CellValue::Float(x) => write!(f, "{}", x),
            CellValue::Text(s) => f.write_str(s),
            CellValue::Bool(b) => write!(f, "{}", b),
            CellValue::Date(d) if is_midnight(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            CellValue::Date(d) => write!(f, "{}", d.format("%Y-%m-%d %H:%M:%S")),
        }
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Int(value)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::text(value)
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        if value.is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(value)
        }
    }
}

/// A named sheet loaded into memory.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Table {
    /// Sheet name in the workbook
    pub name: String,

    /// Column names in sheet order, stripped of surrounding whitespace
    pub columns: Vec<String>,

    /// Data rows in sheet order (the header row is not included)
    pub rows: Vec<Row>,
}

impl Table {
    pub fn new(name: impl Into<String>, columns: Vec<String>) -> Self {
        Table {
            name: name.into(),
            columns,
            rows: Vec::new(),
        }
    }

    /// Build a table from a sheet range whose first row is the header.
    ///
    /// Blank header cells are named `Unnamed: <index>`. Rows that hold no
    /// values at all are dropped.
    pub fn from_range(name: &str, range: &Range<Data>) -> Self {
        let mut rows = range.rows();
        let columns: Vec<String> = match rows.next() {
            Some(header) => header
                .iter()
                .enumerate()
                .map(|(idx, cell)| {
                    let label = CellValue::from_data(cell).to_string();
                    let label = label.trim();
                    if label.is_empty() {
                        format!("Unnamed: {}", idx)
                    } else {
                        label.to_string()
                    }
                })
                .collect(),
            None => Vec::new(),
        };

        let mut table = Table::new(name, columns);
        for cells in rows {
            let row: Row = table
                .columns
                .iter()
                .zip(cells.iter())
                .map(|(column, cell)| (column.clone(), CellValue::from_data(cell)))
                .filter(|(_, value)| !value.is_empty())
                .collect();
            if !row.is_empty() {
                table.rows.push(row);
            }
        }
        table
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    /// Value of `column` in `row`, `Empty` when the cell is blank or absent.
    pub fn cell<'a>(row: &'a Row, column: &str) -> &'a CellValue {
        static EMPTY: CellValue = CellValue::Empty;
        row.get(column).unwrap_or(&EMPTY)
    }

    /// Rows where `row[column]` equals `value`, in sheet order.
    ///
    /// No match (including an unknown column) yields an empty vector.
    pub fn filter_by_equals(&self, column: &str, value: &CellValue) -> Vec<&Row> {
        self.rows
            .iter()
            .filter(|row| Table::cell(row, column).matches(value))
            .collect()
    }

    /// First row where `row[column]` equals `value`.
    pub fn first_by_equals(&self, column: &str, value: &CellValue) -> Option<&Row> {
        self.rows
            .iter()
            .find(|row| Table::cell(row, column).matches(value))
    }

    /// Append `row` under a freshly computed key.
    ///
    /// The key is `max(existing keys in key_column) + 1`. When the table has
    /// no numeric keys, `default_key` is used instead; without one the call
    /// fails with [`StoreError::EmptyTable`]. Columns the row introduces are
    /// appended to the column list in name order.
    ///
    /// # Arguments
    /// * `key_column` - Column holding the integer key (e.g. `student_id`)
    /// * `row` - The new row; any value already under `key_column` is replaced
    /// * `default_key` - Key to use when there are no existing keys
    ///
    /// # Returns
    /// * `Result<&Row, StoreError>` - The appended row, including its key
    pub fn append_row(
        &mut self,
        key_column: &str,
        mut row: Row,
        default_key: Option<i64>,
    ) -> Result<&Row, StoreError> {
        let max_key = self
            .rows
            .iter()
            .filter_map(|r| Table::cell(r, key_column).as_i64())
            .max();
        let key = match (max_key, default_key) {
            (Some(max), _) => max + 1,
            (None, Some(default)) => default,
            (None, None) => return Err(StoreError::EmptyTable(self.name.clone())),
        };

        row.insert(key_column.to_string(), CellValue::Int(key));
        self.add_missing_columns(row.keys());
        self.rows.push(row);

        // Just pushed, so the vector is non-empty.
        let last = self.rows.len() - 1;
        Ok(&self.rows[last])
    }

    /// Assign `values` to every row matching `predicate`.
    ///
    /// Returns the number of rows updated. Unknown columns are added to the
    /// column list.
    pub fn update_where<F>(&mut self, predicate: F, values: &[(&str, CellValue)]) -> usize
    where
        F: Fn(&Row) -> bool,
    {
        let mut updated = 0;
        for row in self.rows.iter_mut().filter(|row| predicate(row)) {
            for (column, value) in values {
                row.insert((*column).to_string(), value.clone());
            }
            updated += 1;
        }
        if updated > 0 {
            self.add_missing_columns(values.iter().map(|(column, _)| *column));
        }
        updated
    }

    /// Distinct non-empty values of `column` across `rows`, in first-seen order.
    pub fn distinct<'a>(rows: impl IntoIterator<Item = &'a Row>, column: &str) -> Vec<CellValue> {
        let mut seen: Vec<CellValue> = Vec::new();
        for row in rows {
            let value = Table::cell(row, column);
            if !value.is_empty() && !seen.iter().any(|v| v.matches(value)) {
                seen.push(value.clone());
            }
        }
        seen
    }

    /// Render `rows` as display strings in column order.
    pub fn grid<'a>(&self, rows: impl IntoIterator<Item = &'a Row>) -> Vec<Vec<String>> {
        rows.into_iter()
            .map(|row| {
                self.columns
                    .iter()
                    .map(|column| Table::cell(row, column).to_string())
                    .collect()
            })
            .collect()
    }

    fn add_missing_columns<S: AsRef<str>>(&mut self, names: impl IntoIterator<Item = S>) {
        let mut fresh: Vec<String> = names
            .into_iter()
            .map(|name| name.as_ref().to_string())
            .filter(|name| !self.has_column(name))
            .collect();
        fresh.sort();
        fresh.dedup();
        self.columns.extend(fresh);
    }

    fn write_to(&self, worksheet: &mut Worksheet, formats: &DateFormats) -> Result<(), StoreError> {
        for (col, name) in self.columns.iter().enumerate() {
            worksheet.write_string(0, col as u16, name.as_str())?;
        }
        for (idx, row) in self.rows.iter().enumerate() {
            let r = (idx + 1) as u32;
            for (col, name) in self.columns.iter().enumerate() {
                write_cell(worksheet, r, col as u16, Table::cell(row, name), formats)?;
            }
        }
        Ok(())
    }
}

/// All tables of one workbook load.
#[derive(Debug, Default)]
pub struct Tables {
    tables: HashMap<TableKind, Table>,
}

impl Tables {
    pub fn get(&self, kind: TableKind) -> &Table {
        // load_all fails with a schema error unless every kind is present.
        &self.tables[&kind]
    }

    /// Take ownership of one table, e.g. to modify and write it back.
    pub fn into_table(mut self, kind: TableKind) -> Table {
        self.tables
            .remove(&kind)
            .unwrap_or_else(|| Table::new(kind.sheet_name(), Vec::new()))
    }
}

/// Handle to the workbook file on disk.
///
/// Holds only the path; every operation goes back to the file.
#[derive(Clone, Debug)]
pub struct RecordStore {
    path: PathBuf,
}

impl RecordStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        RecordStore { path: path.into() }
    }

    /// Load every table of the campus workbook.
    ///
    /// # Errors
    /// * [`StoreError::Io`] if the file cannot be read
    /// * [`StoreError::Workbook`] if the file is not a valid xlsx workbook
    /// * [`StoreError::Schema`] if one of the expected sheets is absent
    pub fn load_all(&self) -> Result<Tables, StoreError> {
        let mut workbook = self.open()?;
        let sheet_names = workbook.sheet_names();

        let mut tables = HashMap::with_capacity(TableKind::ALL.len());
        for kind in TableKind::ALL {
            let name = kind.sheet_name();
            if !sheet_names.iter().any(|s| s == name) {
                return Err(StoreError::Schema(name.to_string()));
            }
            let range = workbook.worksheet_range(name)?;
            tables.insert(kind, Table::from_range(name, &range));
        }

        log::debug!("loaded {} tables from {}", tables.len(), self.path.display());
        Ok(Tables { tables })
    }

    /// Load a single sheet by name.
    pub fn load_sheet(&self, name: &str) -> Result<Table, StoreError> {
        let mut workbook = self.open()?;
        if !workbook.sheet_names().iter().any(|s| s == name) {
            return Err(StoreError::Schema(name.to_string()));
        }
        let range = workbook.worksheet_range(name)?;
        Ok(Table::from_range(name, &range))
    }

    /// Replace the sheet named `table.name` with the table's contents.
    ///
    /// The whole workbook is read, rebuilt and written back over the same
    /// file. Other sheets keep their order and cell values; a sheet that does
    /// not exist yet is appended at the end. The write is not atomic.
    pub fn overwrite_sheet(&self, table: &Table) -> Result<(), StoreError> {
        let mut source = self.open()?;
        let mut sheets: Vec<(String, Range<Data>)> = Vec::new();
        for name in source.sheet_names() {
            let range = source.worksheet_range(&name)?;
            sheets.push((name, range));
        }
        drop(source);

        let formats = DateFormats::new();
        let mut workbook = Workbook::new();
        let mut replaced = false;
        for (name, range) in &sheets {
            let mut worksheet = Worksheet::new();
            worksheet.set_name(name.as_str())?;
            if *name == table.name {
                table.write_to(&mut worksheet, &formats)?;
                replaced = true;
            } else {
                copy_range(&mut worksheet, range, &formats)?;
            }
            workbook.push_worksheet(worksheet);
        }
        if !replaced {
            let mut worksheet = Worksheet::new();
            worksheet.set_name(table.name.as_str())?;
            table.write_to(&mut worksheet, &formats)?;
            workbook.push_worksheet(worksheet);
        }

        let buffer = workbook.save_to_buffer()?;
        std::fs::write(&self.path, buffer).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;

        log::info!(
            "rewrote sheet `{}` ({} rows) in {}",
            table.name,
            table.rows.len(),
            self.path.display()
        );
        Ok(())
    }

    fn open(&self) -> Result<Xlsx<Cursor<Vec<u8>>>, StoreError> {
        let bytes = std::fs::read(&self.path).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;
        Ok(Xlsx::new(Cursor::new(bytes))?)
    }
}

/// Number formats that make written serials read back as dates.
struct DateFormats {
    date: Format,
    datetime: Format,
}

impl DateFormats {
    fn new() -> Self {
        DateFormats {
            date: Format::new().set_num_format("yyyy-mm-dd"),
            datetime: Format::new().set_num_format("yyyy-mm-dd hh:mm:ss"),
        }
    }
}

/// Excel serial day number (1900 date system) of `value`.
fn excel_serial(value: &NaiveDateTime) -> Option<f64> {
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?.and_hms_opt(0, 0, 0)?;
    let millis = value.signed_duration_since(epoch).num_milliseconds();
    Some(millis as f64 / 86_400_000.0)
}

/// Copy a sheet cell by cell. Error cells have no writable form and are
/// left blank.
fn copy_range(
    worksheet: &mut Worksheet,
    range: &Range<Data>,
    formats: &DateFormats,
) -> Result<(), StoreError> {
    let Some((start_row, start_col)) = range.start() else {
        return Ok(());
    };
    for (r, cells) in range.rows().enumerate() {
        for (c, cell) in cells.iter().enumerate() {
            let row = start_row + r as u32;
            let col = (start_col as usize + c) as u16;
            write_cell(worksheet, row, col, &CellValue::from_data(cell), formats)?;
        }
    }
    Ok(())
}

fn write_cell(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    value: &CellValue,
    formats: &DateFormats,
) -> Result<(), StoreError> {
    match value {
        CellValue::Empty => {}
        CellValue::Int(i) => {
            worksheet.write_number(row, col, *i as f64)?;
        }
        CellValue::Float(f) => {
            worksheet.write_number(row, col, *f)?;
        }
        CellValue::Text(s) => {
            worksheet.write_string(row, col, s.as_str())?;
        }
        CellValue::Bool(b) => {
            worksheet.write_boolean(row, col, *b)?;
        }
        CellValue::Date(d) => {
            let format = if is_midnight(d) {
                &formats.date
            } else {
                &formats.datetime
            };
            match excel_serial(d) {
                Some(serial) => {
                    worksheet.write_number_with_format(row, col, serial, format)?;
                }
                None => {
                    worksheet.write_string(row, col, value.to_string())?;
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn students() -> Table {
        let mut table = Table::new(
            "students",
            vec!["student_id".into(), "student_name".into(), "department".into()],
        );
        for (id, name, dept) in [(1, "Asha", "CSE"), (2, "Ravi", "ECE"), (4, "Meena", "CSE")] {
            let mut row = Row::new();
            row.insert("student_id".into(), CellValue::Int(id));
            row.insert("student_name".into(), CellValue::text(name));
            row.insert("department".into(), CellValue::text(dept));
            table.rows.push(row);
        }
        table
    }

    #[test]
    fn whole_floats_normalize_to_int() {
        assert_eq!(CellValue::from_data(&Data::Float(7.0)), CellValue::Int(7));
        assert_eq!(CellValue::from_data(&Data::Float(7.5)), CellValue::Float(7.5));
        assert_eq!(CellValue::from_data(&Data::String(String::new())), CellValue::Empty);
    }

    #[test]
    fn date_cells_display_as_date_text() {
        use calamine::{ExcelDateTime, ExcelDateTimeType};

        let midnight = Data::DateTime(ExcelDateTime::new(45299.0, ExcelDateTimeType::DateTime, false));
        let morning = Data::DateTime(ExcelDateTime::new(45299.4375, ExcelDateTimeType::DateTime, false));

        let day = CellValue::from_data(&midnight);
        assert!(matches!(day, CellValue::Date(_)));
        assert_eq!(day.to_string(), "2024-01-08");
        assert!(day.matches(&CellValue::text("2024-01-08")));
        assert!(!day.matches(&CellValue::Int(45299)));

        assert_eq!(CellValue::from_data(&morning).to_string(), "2024-01-08 10:30:00");
        assert_eq!(
            CellValue::from_data(&Data::DateTimeIso("2024-01-08T10:30:00".into())),
            CellValue::text("2024-01-08T10:30:00")
        );
    }

    #[test]
    fn dates_serialize_as_text() {
        let day = NaiveDate::from_ymd_opt(2024, 3, 4)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .unwrap();
        assert_eq!(
            serde_json::to_value(CellValue::Date(day)).unwrap(),
            serde_json::json!("2024-03-04")
        );
        assert_eq!(excel_serial(&day), Some(45355.0));
    }

    #[test]
    fn numeric_text_matches_number() {
        assert!(CellValue::Int(3).matches(&CellValue::text("3")));
        assert!(CellValue::Float(3.0).matches(&CellValue::Int(3)));
        assert!(!CellValue::text("CSE").matches(&CellValue::text("cse")));
        assert!(!CellValue::Empty.matches(&CellValue::Int(0)));
    }

    #[test]
    fn filter_keeps_sheet_order() {
        let table = students();
        let rows = table.filter_by_equals("department", &CellValue::text("CSE"));
        let names: Vec<String> = rows
            .iter()
            .map(|r| Table::cell(r, "student_name").to_string())
            .collect();
        assert_eq!(names, vec!["Asha", "Meena"]);
    }

    #[test]
    fn filter_without_match_is_empty() {
        let table = students();
        assert!(table.filter_by_equals("student_id", &CellValue::Int(99)).is_empty());
        assert!(table.filter_by_equals("no_such_column", &CellValue::Int(1)).is_empty());
    }

    #[test]
    fn append_row_keys_strictly_increase() {
        let mut table = students();
        let mut previous = 4;
        for _ in 0..3 {
            let row = table.append_row("student_id", Row::new(), None).unwrap();
            let key = Table::cell(row, "student_id").as_i64().unwrap();
            assert!(key > previous);
            previous = key;
        }
        assert_eq!(previous, 7);
    }

    #[test]
    fn append_row_on_empty_table() {
        let mut table = Table::new("students", vec!["student_id".into()]);
        let err = table.append_row("student_id", Row::new(), None).unwrap_err();
        assert!(matches!(err, StoreError::EmptyTable(name) if name == "students"));

        let row = table.append_row("student_id", Row::new(), Some(1)).unwrap();
        assert_eq!(Table::cell(row, "student_id"), &CellValue::Int(1));
    }

    #[test]
    fn append_row_extends_columns() {
        let mut table = students();
        let mut row = Row::new();
        row.insert("phone".into(), CellValue::text("555"));
        row.insert("email".into(), CellValue::text("x@campus.edu"));
        table.append_row("student_id", row, None).unwrap();
        assert_eq!(
            table.columns,
            vec!["student_id", "student_name", "department", "email", "phone"]
        );
    }

    #[test]
    fn update_where_counts_rows() {
        let mut table = students();
        let updated = table.update_where(
            |row| Table::cell(row, "department").matches(&CellValue::text("CSE")),
            &[("year", CellValue::Int(2))],
        );
        assert_eq!(updated, 2);
        assert!(table.has_column("year"));

        let none = table.update_where(|_| false, &[("other", CellValue::Int(1))]);
        assert_eq!(none, 0);
        assert!(!table.has_column("other"));
    }

    #[test]
    fn distinct_in_first_seen_order() {
        let table = students();
        assert_eq!(
            Table::distinct(&table.rows, "department"),
            vec![CellValue::text("CSE"), CellValue::text("ECE")]
        );
    }

    #[test]
    fn header_whitespace_is_stripped() {
        let mut range: Range<Data> = Range::new((0, 0), (1, 1));
        range.set_value((0, 0), Data::String(" student_id ".into()));
        range.set_value((0, 1), Data::String("name\t".into()));
        range.set_value((1, 0), Data::Float(1.0));
        range.set_value((1, 1), Data::String("Asha".into()));

        let table = Table::from_range("students", &range);
        assert_eq!(table.columns, vec!["student_id", "name"]);
        assert_eq!(table.rows.len(), 1);
        assert_eq!(Table::cell(&table.rows[0], "student_id"), &CellValue::Int(1));
    }
}
