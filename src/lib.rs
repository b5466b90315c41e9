/*!
# Campus Portal

A small campus-management web application whose record store is a single
xlsx workbook.

## Overview

Each logical table lives in its own sheet of one workbook: login credentials,
students, attendance, marks, fees, assignments, notifications, exam schedule,
library, placements, course material and timetable. The server reloads the
whole workbook on every request, filters rows in memory and renders a page.
A handful of admin actions rewrite one sheet back to disk.

## Architecture

### Record Store
- Loads every sheet into in-memory tables, stripping whitespace from headers
- Filters rows by key equality
- Appends rows under `max(key) + 1`
- Replaces one sheet by rewriting the whole file (not atomic, not locked)

### Request Handlers
- Resolve the caller's session (admin, admin viewing a student, or student)
- Redirect callers who lack the required role
- Load, filter and render; write handlers derive fields and overwrite a sheet

## Modules

- **store**: workbook-backed tables and the record store adapter
- **records**: derived fields (marks, fees) and the attendance summary
- **error**: store, configuration and handler errors
- **login**: sessions, credential checks, login/logout handlers
- **pages**: student-facing read-only pages
- **admin**: admin views and write handlers
- **views**: handlebars templates
- **config**: command line and environment configuration
- **app**: application state and routing

## Routes

- `/`, `/login`, `/logout` - authentication
- `/admin`, `/admin/select/{sid}`, `/add_student`, `/save_student` - student administration
- `/dashboard`, `/profile`, `/timetable`, `/library`, `/placement` - the current student's pages
- `/attendance`, `/marks`, `/fees` with `/edit/...` and `/update` - records with admin editing
- `/assignments`, `/notifications`, `/exams`, `/materials` - shared listings
- `/attendance_summary` - per-student attendance percentages
*/

pub mod error;
pub mod records;
pub mod store;

#[cfg(feature = "web")]
pub mod admin;
#[cfg(feature = "web")]
pub mod app;
#[cfg(feature = "web")]
pub mod config;
#[cfg(feature = "web")]
pub mod login;
#[cfg(feature = "web")]
pub mod pages;
#[cfg(feature = "web")]
pub mod views;

pub use error::StoreError;
pub use store::{CellValue, RecordStore, Row, Table, TableKind, Tables};
