#![allow(dead_code)]

use rust_xlsxwriter::{Format, Workbook};
use std::path::{Path, PathBuf};

/// Fixture cell: a number, a string, a date serial, or nothing.
#[derive(Clone, Copy)]
pub enum V {
    N(f64),
    S(&'static str),
    D(f64),
    Blank,
}

pub type Sheet = (&'static str, Vec<&'static str>, Vec<Vec<V>>);

/// A complete campus workbook with two students.
pub fn campus_sheets() -> Vec<Sheet> {
    use V::{Blank, D, N, S};
    vec![
        (
            "login_users",
            vec!["username", "password", "role", "student_id"],
            vec![
                vec![S("admin"), S("admin123"), S("admin"), Blank],
                vec![S("asha"), S("asha123"), S("student"), N(1.0)],
                vec![S("ravi"), N(4321.0), S("student"), N(2.0)],
            ],
        ),
        (
            "students",
            vec!["student_id", "student_name", "department", "year", "email", "phone"],
            vec![
                vec![N(1.0), S("Asha"), S("CSE"), N(2.0), S("asha@campus.edu"), S("98450 11111")],
                vec![N(2.0), S("Ravi"), S("ECE"), N(3.0), S("ravi@campus.edu"), S("98450 22222")],
            ],
        ),
        (
            "attendance",
            vec!["student_id", "student_name", "date", "period1", "period2", "period3", "period4"],
            vec![
                vec![N(1.0), S("Asha"), S("2024-01-08"), S("P"), S("P"), S("A"), S("P")],
                vec![N(2.0), S("Ravi"), S("2024-01-08"), S("A"), S("P"), S("P"), S("P")],
                vec![N(1.0), S("Asha"), S("2024-01-09"), S("P"), S("P"), S("P"), S("P")],
            ],
        ),
        (
            "marks",
            vec!["student_id", "subject", "internal", "external", "total", "result"],
            vec![
                vec![N(1.0), S("Maths"), N(25.0), N(30.0), N(55.0), S("Pass")],
                vec![N(2.0), S("Maths"), N(10.0), N(20.0), N(30.0), S("Fail")],
            ],
        ),
        (
            "fees",
            vec!["student_id", "total_fee", "paid_fee", "balance", "payment_status"],
            vec![
                vec![N(1.0), N(5000.0), N(2000.0), N(3000.0), S("Pending")],
                vec![N(2.0), N(5000.0), N(5000.0), N(0.0), S("Paid")],
            ],
        ),
        (
            "assignments",
            vec![" title ", "subject ", "due_date"],
            vec![vec![S("Matrix drills"), S("Maths"), S("2024-02-01")]],
        ),
        (
            "notifications",
            vec!["title", "message"],
            vec![vec![S("Holiday"), S("Campus closed <b>Friday</b>")]],
        ),
        (
            "exam_schedule",
            vec!["subject", "date", "hall"],
            vec![vec![S("Maths"), D(45355.0), S("H1")]],
        ),
        (
            "library",
            vec!["student_id", "book", "due_date"],
            vec![
                vec![N(1.0), S("Linear Algebra Done Right"), S("2024-02-10")],
                vec![N(2.0), S("Microelectronic Circuits"), S("2024-02-12")],
            ],
        ),
        (
            "placements",
            vec!["student_id", "company", "status"],
            vec![vec![N(2.0), S("Acme Semiconductors"), S("Shortlisted")]],
        ),
        (
            "course_material",
            vec!["subject", "title", "link"],
            vec![vec![S("Maths"), S("Week 1 notes"), S("https://campus.example/maths/1")]],
        ),
        (
            "timetable",
            vec!["Dept", "Day", "Period", "Subject"],
            vec![
                vec![S("CSE"), S("Monday"), N(1.0), S("Maths")],
                vec![S("CSE"), S("Tuesday"), N(1.0), S("Physics")],
                vec![S("ECE"), S("Monday"), N(1.0), S("Circuits")],
            ],
        ),
    ]
}

pub fn write_workbook(path: &Path, sheets: &[Sheet]) {
    let date = Format::new().set_num_format("yyyy-mm-dd");
    let mut workbook = Workbook::new();
    for (name, header, rows) in sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(*name).expect("sheet name");
        for (col, label) in header.iter().enumerate() {
            worksheet.write_string(0, col as u16, *label).expect("header");
        }
        for (r, row) in rows.iter().enumerate() {
            for (col, cell) in row.iter().enumerate() {
                let (r, col) = ((r + 1) as u32, col as u16);
                match cell {
                    V::N(n) => {
                        worksheet.write_number(r, col, *n).expect("number");
                    }
                    V::S(s) => {
                        worksheet.write_string(r, col, *s).expect("string");
                    }
                    V::D(serial) => {
                        worksheet
                            .write_number_with_format(r, col, *serial, &date)
                            .expect("date");
                    }
                    V::Blank => {}
                }
            }
        }
    }
    workbook.save(path).expect("save fixture workbook");
}

/// Write the campus fixture into `dir` and return its path.
pub fn campus_workbook(dir: &Path) -> PathBuf {
    let path = dir.join("campus.xlsx");
    write_workbook(&path, &campus_sheets());
    path
}
