use axum::response::Html;
use handlebars::Handlebars;
use serde::Serialize;

use crate::error::AppError;

const PARTIALS: &[(&str, &str)] = &[
    ("header", include_str!("./templates/header.hbs")),
    ("footer", include_str!("./templates/footer.hbs")),
];

const TEMPLATES: &[(&str, &str)] = &[
    ("login", include_str!("./templates/login.hbs")),
    ("admin_students", include_str!("./templates/admin_students.hbs")),
    ("add_student", include_str!("./templates/add_student.hbs")),
    ("student", include_str!("./templates/student.hbs")),
    ("timetable", include_str!("./templates/timetable.hbs")),
    ("attendance", include_str!("./templates/attendance.hbs")),
    ("attendance_edit", include_str!("./templates/attendance_edit.hbs")),
    ("attendance_summary", include_str!("./templates/attendance_summary.hbs")),
    ("marks", include_str!("./templates/marks.hbs")),
    ("marks_edit", include_str!("./templates/marks_edit.hbs")),
    ("fees", include_str!("./templates/fees.hbs")),
    ("fees_edit", include_str!("./templates/fees_edit.hbs")),
    ("listing", include_str!("./templates/listing.hbs")),
];

/// Page templates, compiled once at startup.
pub struct Views {
    registry: Handlebars<'static>,
}

impl Views {
    pub fn new() -> Result<Self, handlebars::TemplateError> {
        let mut registry = Handlebars::new();
        for (name, source) in PARTIALS {
            registry.register_partial(name, *source)?;
        }
        for (name, source) in TEMPLATES {
            registry.register_template_string(name, *source)?;
        }
        Ok(Views { registry })
    }

    pub fn render<T: Serialize>(&self, name: &str, data: &T) -> Result<Html<String>, AppError> {
        Ok(Html(self.registry.render(name, data)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn every_template_compiles() {
        assert!(Views::new().is_ok());
    }

    #[test]
    fn listing_escapes_cell_text() {
        let views = Views::new().unwrap();
        let Html(page) = views
            .render(
                "listing",
                &json!({
                    "title": "Notifications",
                    "columns": ["title"],
                    "rows": [["<b>Exam</b>"]],
                }),
            )
            .unwrap();
        assert!(page.contains("&lt;b&gt;Exam&lt;/b&gt;"));
        assert!(!page.contains("<b>Exam</b>"));
    }
}
