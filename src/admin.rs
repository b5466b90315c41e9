//! Admin-only views and the handlers that write back to the workbook.
//!
//! Every handler checks the admin role before touching the store; callers
//! without it are redirected and nothing is written.

use axum::{
    Form,
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

use crate::app::{AppState, load_tables, save_table};
use crate::error::AppError;
use crate::login::Auth;
use crate::pages::record_fields;
use crate::records::{self, FeeOutcome, MarksOutcome};
use crate::store::{CellValue, Row, Table, TableKind};

/// Attendance period columns an admin can edit
const PERIODS: [&str; 4] = ["period1", "period2", "period3", "period4"];

pub async fn list_students(State(state): State<Arc<AppState>>, auth: Auth) -> Result<Response, AppError> {
    if !auth.is_admin() {
        return Ok(Redirect::to("/").into_response());
    }

    let tables = load_tables(&state).await?;
    let students = tables.get(TableKind::Students);
    let rows: Vec<_> = students
        .rows
        .iter()
        .map(|row| {
            json!({
                "cells": students.grid([row]).concat(),
                "select": format!("/admin/select/{}", Table::cell(row, "student_id")),
            })
        })
        .collect();

    let page = state.views.render(
        "admin_students",
        &json!({ "title": "Students", "columns": students.columns, "rows": rows }),
    )?;
    Ok(page.into_response())
}

/// Impersonate a student for the rest of the admin's session.
pub async fn select_student(
    State(state): State<Arc<AppState>>,
    auth: Auth,
    Path(sid): Path<i64>,
) -> Response {
    match (&auth.session_id, auth.is_admin()) {
        (Some(id), true) if state.sessions.select_student(id, sid) => {
            log::debug!("admin session now viewing student {}", sid);
            Redirect::to("/dashboard").into_response()
        }
        (Some(_), true) => {
            log::warn!("admin session ended before selecting student {}", sid);
            Redirect::to("/").into_response()
        }
        _ => Redirect::to("/").into_response(),
    }
}

pub async fn add_student_form(State(state): State<Arc<AppState>>, auth: Auth) -> Result<Response, AppError> {
    if !auth.is_admin() {
        return Ok(Redirect::to("/").into_response());
    }
    Ok(state
        .views
        .render("add_student", &json!({ "title": "Add Student" }))?
        .into_response())
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct NewStudentForm {
    pub student_name: String,
    pub department: String,
    pub year: String,
    pub email: String,
    pub phone: String,
}

/// Append a student under the next free `student_id`.
pub async fn save_student(
    State(state): State<Arc<AppState>>,
    auth: Auth,
    Form(form): Form<NewStudentForm>,
) -> Result<Response, AppError> {
    if !auth.is_admin() {
        return Ok(Redirect::to("/").into_response());
    }

    let mut students = load_tables(&state).await?.into_table(TableKind::Students);
    let mut row = Row::new();
    row.insert("student_name".into(), CellValue::from(form.student_name));
    row.insert("department".into(), CellValue::from(form.department));
    row.insert("year".into(), CellValue::from(form.year));
    row.insert("email".into(), CellValue::from(form.email));
    row.insert("phone".into(), CellValue::from(form.phone));

    // The first student of an empty sheet gets id 1.
    let new_id = Table::cell(students.append_row("student_id", row, Some(1))?, "student_id").clone();
    save_table(&state, students).await?;
    log::info!("added student {}", new_id);

    Ok(Redirect::to("/admin").into_response())
}

pub async fn edit_attendance(
    State(state): State<Arc<AppState>>,
    auth: Auth,
    Path((sid, date)): Path<(i64, String)>,
) -> Result<Response, AppError> {
    if !auth.is_admin() {
        return Ok(Redirect::to("/attendance").into_response());
    }

    let tables = load_tables(&state).await?;
    let table = tables.get(TableKind::Attendance);
    let wanted = CellValue::text(&date);
    let record = table
        .rows
        .iter()
        .find(|row| {
            Table::cell(row, "student_id").matches(&CellValue::Int(sid))
                && Table::cell(row, "date").matches(&wanted)
        })
        .ok_or_else(|| AppError::NotFound("Attendance record not found".to_string()))?;

    let periods: Vec<_> = PERIODS
        .iter()
        .map(|period| json!({ "name": period, "value": Table::cell(record, period).to_string() }))
        .collect();

    let page = state.views.render(
        "attendance_edit",
        &json!({
            "title": "Edit Attendance",
            "student_id": sid,
            "date": date,
            "fields": record_fields(table, record),
            "periods": periods,
        }),
    )?;
    Ok(page.into_response())
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AttendanceForm {
    pub student_id: String,
    pub date: String,
    pub period1: String,
    pub period2: String,
    pub period3: String,
    pub period4: String,
}

pub async fn update_attendance(
    State(state): State<Arc<AppState>>,
    auth: Auth,
    Form(form): Form<AttendanceForm>,
) -> Result<Response, AppError> {
    if !auth.is_admin() {
        return Ok(Redirect::to("/attendance").into_response());
    }

    let sid = CellValue::Int(records::parse_int_field("student_id", &form.student_id)?);
    let date = CellValue::text(&form.date);
    let marks = [form.period1, form.period2, form.period3, form.period4];
    let values: Vec<(&str, CellValue)> = PERIODS
        .iter()
        .copied()
        .zip(marks.into_iter().map(CellValue::from))
        .collect();

    let mut table = load_tables(&state).await?.into_table(TableKind::Attendance);
    let updated = table.update_where(
        |row| {
            Table::cell(row, "student_id").matches(&sid) && Table::cell(row, "date").matches(&date)
        },
        &values,
    );
    if updated == 0 {
        log::warn!("attendance update for student {} on {} matched no rows", sid, date);
    }
    save_table(&state, table).await?;
    log::info!("updated attendance for student {} on {}", sid, date);

    Ok(Redirect::to("/attendance").into_response())
}

pub async fn edit_marks(
    State(state): State<Arc<AppState>>,
    auth: Auth,
    Path(sid): Path<i64>,
) -> Result<Response, AppError> {
    if !auth.is_admin() {
        return Ok(Redirect::to("/marks").into_response());
    }

    let tables = load_tables(&state).await?;
    let table = tables.get(TableKind::Marks);
    let record = table
        .first_by_equals("student_id", &CellValue::Int(sid))
        .ok_or_else(|| AppError::NotFound("Marks record not found".to_string()))?;

    let page = state.views.render(
        "marks_edit",
        &json!({
            "title": "Edit Marks",
            "student_id": sid,
            "fields": record_fields(table, record),
            "internal": Table::cell(record, "internal").to_string(),
            "external": Table::cell(record, "external").to_string(),
        }),
    )?;
    Ok(page.into_response())
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct MarksForm {
    pub student_id: String,
    pub internal: String,
    pub external: String,
}

/// Recompute total and result from the submitted marks.
pub async fn update_marks(
    State(state): State<Arc<AppState>>,
    auth: Auth,
    Form(form): Form<MarksForm>,
) -> Result<Response, AppError> {
    if !auth.is_admin() {
        return Ok(Redirect::to("/marks").into_response());
    }

    let sid = records::parse_int_field("student_id", &form.student_id)?;
    let outcome = MarksOutcome::compute(
        records::parse_int_field("internal", &form.internal)?,
        records::parse_int_field("external", &form.external)?,
    );

    let mut table = load_tables(&state).await?.into_table(TableKind::Marks);
    let key = CellValue::Int(sid);
    let updated = table.update_where(
        |row| Table::cell(row, "student_id").matches(&key),
        &outcome.assignments(),
    );
    if updated == 0 {
        log::warn!("marks update for student {} matched no rows", sid);
    }
    save_table(&state, table).await?;
    log::info!("student {} marks: total {} ({})", sid, outcome.total, outcome.result);

    Ok(Redirect::to("/marks").into_response())
}

pub async fn edit_fees(
    State(state): State<Arc<AppState>>,
    auth: Auth,
    Path(sid): Path<i64>,
) -> Result<Response, AppError> {
    if !auth.is_admin() {
        return Ok(Redirect::to("/fees").into_response());
    }

    let tables = load_tables(&state).await?;
    let table = tables.get(TableKind::Fees);
    let record = table
        .first_by_equals("student_id", &CellValue::Int(sid))
        .ok_or_else(|| AppError::NotFound("Fee record not found".to_string()))?;

    let page = state.views.render(
        "fees_edit",
        &json!({
            "title": "Edit Fees",
            "student_id": sid,
            "fields": record_fields(table, record),
            "paid_fee": Table::cell(record, "paid_fee").to_string(),
        }),
    )?;
    Ok(page.into_response())
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct FeesForm {
    pub student_id: String,
    pub paid_fee: String,
}

/// Record a payment against the student's `total_fee`.
pub async fn update_fees(
    State(state): State<Arc<AppState>>,
    auth: Auth,
    Form(form): Form<FeesForm>,
) -> Result<Response, AppError> {
    if !auth.is_admin() {
        return Ok(Redirect::to("/fees").into_response());
    }

    let sid = records::parse_int_field("student_id", &form.student_id)?;
    let paid = records::parse_int_field("paid_fee", &form.paid_fee)?;

    let mut table = load_tables(&state).await?.into_table(TableKind::Fees);
    let key = CellValue::Int(sid);
    let total_cell = table
        .first_by_equals("student_id", &key)
        .map(|row| Table::cell(row, "total_fee").clone())
        .ok_or_else(|| AppError::NotFound("Fee record not found".to_string()))?;
    let total = records::parse_int_field("total_fee", &total_cell.to_string())?;

    let outcome = FeeOutcome::compute(total, paid);
    table.update_where(
        |row| Table::cell(row, "student_id").matches(&key),
        &outcome.assignments(),
    );
    save_table(&state, table).await?;
    log::info!(
        "student {} fees: paid {} balance {} ({})",
        sid,
        outcome.paid_fee,
        outcome.balance,
        outcome.status
    );

    Ok(Redirect::to("/fees").into_response())
}

pub async fn attendance_summary(
    State(state): State<Arc<AppState>>,
    auth: Auth,
) -> Result<Response, AppError> {
    if !auth.is_admin() {
        return Ok(Redirect::to("/").into_response());
    }

    let tables = load_tables(&state).await?;
    let Some(summary) = records::summarize_attendance(tables.get(TableKind::Attendance)) else {
        return Ok("No period columns found in attendance sheet.".into_response());
    };

    let page = state.views.render(
        "attendance_summary",
        &json!({
            "title": "Attendance Summary",
            "summary": summary.students,
            "overall_percentage": summary.overall_percentage,
        }),
    )?;
    Ok(page.into_response())
}
