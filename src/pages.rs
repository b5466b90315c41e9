//! Read-only pages for the current student and the shared listings.

use axum::{
    extract::{Query, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;

use crate::app::{AppState, load_tables};
use crate::error::AppError;
use crate::login::Auth;
use crate::store::{CellValue, Row, Table, TableKind};

/// Column pairs of a single record, in sheet order.
pub(crate) fn record_fields(table: &Table, row: &Row) -> Vec<Value> {
    table
        .columns
        .iter()
        .map(|column| json!({ "name": column, "value": Table::cell(row, column).to_string() }))
        .collect()
}

/// Rows with an optional per-row edit link, for the editable listings.
fn rows_with_links<F>(table: &Table, rows: &[&Row], link: Option<F>) -> Vec<Value>
where
    F: Fn(&Row) -> String,
{
    rows.iter()
        .map(|row| {
            let cells: Vec<String> = table
                .columns
                .iter()
                .map(|column| Table::cell(row, column).to_string())
                .collect();
            json!({ "cells": cells, "edit": link.as_ref().map(|f| f(*row)) })
        })
        .collect()
}

fn render_listing(
    state: &AppState,
    title: &str,
    table: &Table,
    rows: Vec<&Row>,
) -> Result<Html<String>, AppError> {
    state.views.render(
        "listing",
        &json!({
            "title": title,
            "columns": table.columns,
            "rows": table.grid(rows),
        }),
    )
}

async fn student_record(
    state: Arc<AppState>,
    auth: Auth,
    title: &str,
) -> Result<Response, AppError> {
    let sid = match auth.current_student() {
        Ok(sid) => sid,
        Err(redirect) => return Ok(redirect.into_response()),
    };

    let tables = load_tables(&state).await?;
    let students = tables.get(TableKind::Students);
    let student = students
        .first_by_equals("student_id", &CellValue::Int(sid))
        .ok_or_else(|| AppError::NotFound("Student not found".to_string()))?;

    let page = state.views.render(
        "student",
        &json!({
            "title": title,
            "student_name": Table::cell(student, "student_name").to_string(),
            "fields": record_fields(students, student),
            "is_admin": auth.is_admin(),
        }),
    )?;
    Ok(page.into_response())
}

pub async fn dashboard(State(state): State<Arc<AppState>>, auth: Auth) -> Result<Response, AppError> {
    student_record(state, auth, "Dashboard").await
}

pub async fn profile(State(state): State<Arc<AppState>>, auth: Auth) -> Result<Response, AppError> {
    student_record(state, auth, "Profile").await
}

#[derive(Debug, Deserialize)]
pub struct TimetableQuery {
    day: Option<String>,
}

/// Timetable for the student's department, optionally narrowed to one day.
pub async fn timetable(
    State(state): State<Arc<AppState>>,
    auth: Auth,
    Query(query): Query<TimetableQuery>,
) -> Result<Response, AppError> {
    let sid = match auth.current_student() {
        Ok(sid) => sid,
        Err(redirect) => return Ok(redirect.into_response()),
    };

    let tables = load_tables(&state).await?;
    let student = tables
        .get(TableKind::Students)
        .first_by_equals("student_id", &CellValue::Int(sid))
        .ok_or_else(|| AppError::NotFound("Student not found".to_string()))?;
    let department = Table::cell(student, "department");

    let timetable = tables.get(TableKind::Timetable);
    let dept_column = if timetable.has_column("Dept") {
        "Dept"
    } else {
        "Department"
    };
    let mut rows = timetable.filter_by_equals(dept_column, department);

    // Days are listed before the day filter so every option stays selectable.
    let days: Vec<String> = Table::distinct(rows.iter().copied(), "Day")
        .iter()
        .map(CellValue::to_string)
        .collect();

    let selected_day = query.day.filter(|day| !day.is_empty());
    if let Some(day) = &selected_day {
        let wanted = CellValue::text(day);
        rows.retain(|row| Table::cell(row, "Day").matches(&wanted));
    }

    let page = state.views.render(
        "timetable",
        &json!({
            "title": "Timetable",
            "columns": timetable.columns,
            "rows": timetable.grid(rows),
            "days": days,
            "selected_day": selected_day,
        }),
    )?;
    Ok(page.into_response())
}

pub async fn attendance(State(state): State<Arc<AppState>>, auth: Auth) -> Result<Response, AppError> {
    let sid = match auth.current_student() {
        Ok(sid) => sid,
        Err(redirect) => return Ok(redirect.into_response()),
    };

    let tables = load_tables(&state).await?;
    let table = tables.get(TableKind::Attendance);
    let rows = table.filter_by_equals("student_id", &CellValue::Int(sid));
    let link = auth.is_admin().then_some(|row: &Row| {
        format!(
            "/attendance/edit/{}/{}",
            Table::cell(row, "student_id"),
            urlencoding::encode(&Table::cell(row, "date").to_string())
        )
    });

    let page = state.views.render(
        "attendance",
        &json!({
            "title": "Attendance",
            "columns": table.columns,
            "rows": rows_with_links(table, &rows, link),
            "role": auth.role().map(|role| role.as_str()),
        }),
    )?;
    Ok(page.into_response())
}

pub async fn marks(State(state): State<Arc<AppState>>, auth: Auth) -> Result<Response, AppError> {
    let sid = match auth.current_student() {
        Ok(sid) => sid,
        Err(redirect) => return Ok(redirect.into_response()),
    };

    let tables = load_tables(&state).await?;
    let table = tables.get(TableKind::Marks);
    let rows = table.filter_by_equals("student_id", &CellValue::Int(sid));
    let link = auth
        .is_admin()
        .then_some(|row: &Row| format!("/marks/edit/{}", Table::cell(row, "student_id")));

    let page = state.views.render(
        "marks",
        &json!({
            "title": "Marks",
            "columns": table.columns,
            "rows": rows_with_links(table, &rows, link),
            "role": auth.role().map(|role| role.as_str()),
        }),
    )?;
    Ok(page.into_response())
}

pub async fn fees(State(state): State<Arc<AppState>>, auth: Auth) -> Result<Response, AppError> {
    let sid = match auth.current_student() {
        Ok(sid) => sid,
        Err(redirect) => return Ok(redirect.into_response()),
    };

    let tables = load_tables(&state).await?;
    let table = tables.get(TableKind::Fees);
    let rows = table.filter_by_equals("student_id", &CellValue::Int(sid));
    let link = auth
        .is_admin()
        .then_some(|row: &Row| format!("/fees/edit/{}", Table::cell(row, "student_id")));

    let page = state.views.render(
        "fees",
        &json!({
            "title": "Fees",
            "columns": table.columns,
            "rows": rows_with_links(table, &rows, link),
            "role": auth.role().map(|role| role.as_str()),
        }),
    )?;
    Ok(page.into_response())
}

async fn own_rows(
    state: Arc<AppState>,
    auth: Auth,
    kind: TableKind,
    title: &str,
) -> Result<Response, AppError> {
    let sid = match auth.current_student() {
        Ok(sid) => sid,
        Err(redirect) => return Ok(redirect.into_response()),
    };

    let tables = load_tables(&state).await?;
    let table = tables.get(kind);
    let rows = table.filter_by_equals("student_id", &CellValue::Int(sid));
    Ok(render_listing(&state, title, table, rows)?.into_response())
}

pub async fn library(State(state): State<Arc<AppState>>, auth: Auth) -> Result<Response, AppError> {
    own_rows(state, auth, TableKind::Library, "Library").await
}

pub async fn placement(State(state): State<Arc<AppState>>, auth: Auth) -> Result<Response, AppError> {
    own_rows(state, auth, TableKind::Placement, "Placement").await
}

async fn whole_table(
    state: Arc<AppState>,
    auth: Auth,
    kind: TableKind,
    title: &str,
) -> Result<Response, AppError> {
    if !auth.is_logged_in() {
        return Ok(Redirect::to("/").into_response());
    }

    let tables = load_tables(&state).await?;
    let table = tables.get(kind);
    Ok(render_listing(&state, title, table, table.rows.iter().collect())?.into_response())
}

pub async fn assignments(State(state): State<Arc<AppState>>, auth: Auth) -> Result<Response, AppError> {
    whole_table(state, auth, TableKind::Assignments, "Assignments").await
}

pub async fn notifications(
    State(state): State<Arc<AppState>>,
    auth: Auth,
) -> Result<Response, AppError> {
    whole_table(state, auth, TableKind::Notifications, "Notifications").await
}

pub async fn exams(State(state): State<Arc<AppState>>, auth: Auth) -> Result<Response, AppError> {
    whole_table(state, auth, TableKind::Exams, "Exam Schedule").await
}

pub async fn materials(State(state): State<Arc<AppState>>, auth: Auth) -> Result<Response, AppError> {
    whole_table(state, auth, TableKind::Materials, "Course Material").await
}
