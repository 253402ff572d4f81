/// HTML rendering for the site's pages
///
/// Plain string templates behind a shared layout. Every interpolated value
/// goes through [`escape`], and password fields never echo what was
/// submitted; the other inputs keep their values so a failed submission
/// comes back intact.

use chrono::{DateTime, Utc};
use studytrack_core::error::FieldError;
use studytrack_core::flows::forms::{LoginForm, RegisterForm, TaskForm};
use studytrack_core::identity::principal::Principal;
use studytrack_core::models::task::Task;

/// Escapes a value for interpolation into HTML
pub fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());

    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }

    escaped
}

/// Formats a deadline for a `datetime-local` input value
fn deadline_input_value(deadline: DateTime<Utc>) -> String {
    deadline.format("%Y-%m-%dT%H:%M").to_string()
}

/// Formats a deadline for display in the task list
fn deadline_display(deadline: DateTime<Utc>) -> String {
    deadline.format("%Y-%m-%d %H:%M").to_string()
}

/// Renders the field errors of a failed submission, if any
fn error_list(errors: &[FieldError]) -> String {
    if errors.is_empty() {
        return String::new();
    }

    let items: String = errors
        .iter()
        .map(|error| format!("<li>{}</li>", escape(&error.message)))
        .collect();

    format!("<ul class=\"errors\">{}</ul>\n", items)
}

/// Wraps page content in the shared layout
fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{title} - StudyTrack</title>\n\
         </head>\n\
         <body>\n\
         <nav>\n\
         <a href=\"/\">Home</a>\n\
         <a href=\"/tasks\">My tasks</a>\n\
         <a href=\"/tasks/create\">New task</a>\n\
         <a href=\"/account/register\">Register</a>\n\
         <a href=\"/account/login\">Login</a>\n\
         <form method=\"post\" action=\"/account/logout\"><button type=\"submit\">Logout</button></form>\n\
         </nav>\n\
         <main>\n\
         {body}\n\
         </main>\n\
         </body>\n\
         </html>\n",
        title = escape(title),
        body = body,
    )
}

/// The landing page
pub fn home_page(principal: Option<&Principal>) -> String {
    let greeting = match principal {
        Some(principal) => format!(
            "<p>Signed in as {}.</p>\n<p><a href=\"/tasks\">Go to your tasks</a></p>",
            escape(&principal.email)
        ),
        None => "<p><a href=\"/account/register\">Register</a> or \
                 <a href=\"/account/login\">log in</a> to get started.</p>"
            .to_string(),
    };

    let body = format!(
        "<h1>StudyTrack</h1>\n\
         <p>Keep your study tasks in one place and tick them off as you go.</p>\n\
         {}",
        greeting
    );

    layout("Home", &body)
}

/// The registration form
pub fn register_page(form: &RegisterForm, errors: &[FieldError]) -> String {
    let body = format!(
        "<h1>Register</h1>\n\
         {errors}\
         <form method=\"post\" action=\"/account/register\">\n\
         <label>Full name <input type=\"text\" name=\"full_name\" value=\"{full_name}\"></label>\n\
         <label>Email <input type=\"email\" name=\"email\" value=\"{email}\"></label>\n\
         <label>Password <input type=\"password\" name=\"password\"></label>\n\
         <label>Confirm password <input type=\"password\" name=\"confirm_password\"></label>\n\
         <button type=\"submit\">Register</button>\n\
         </form>",
        errors = error_list(errors),
        full_name = escape(&form.full_name),
        email = escape(&form.email),
    );

    layout("Register", &body)
}

/// The login form
pub fn login_page(form: &LoginForm, errors: &[FieldError]) -> String {
    let checked = if form.remember_me { " checked" } else { "" };

    let body = format!(
        "<h1>Login</h1>\n\
         {errors}\
         <form method=\"post\" action=\"/account/login\">\n\
         <label>Email <input type=\"email\" name=\"email\" value=\"{email}\"></label>\n\
         <label>Password <input type=\"password\" name=\"password\"></label>\n\
         <label><input type=\"checkbox\" name=\"remember_me\"{checked}> Remember me</label>\n\
         <button type=\"submit\">Login</button>\n\
         </form>",
        errors = error_list(errors),
        email = escape(&form.email),
        checked = checked,
    );

    layout("Login", &body)
}

/// The current user's task list
pub fn task_list_page(tasks: &[Task]) -> String {
    let body = if tasks.is_empty() {
        "<h1>Your tasks</h1>\n\
         <p>No tasks yet. <a href=\"/tasks/create\">Create your first one</a>.</p>"
            .to_string()
    } else {
        let rows: String = tasks.iter().map(task_row).collect();

        format!(
            "<h1>Your tasks</h1>\n\
             <p><a href=\"/tasks/create\">New task</a></p>\n\
             <table>\n\
             <thead>\n\
             <tr><th>Title</th><th>Description</th><th>Deadline</th><th>Status</th><th></th></tr>\n\
             </thead>\n\
             <tbody>\n\
             {}\
             </tbody>\n\
             </table>",
            rows
        )
    };

    layout("Your tasks", &body)
}

fn task_row(task: &Task) -> String {
    let (status, toggle_label) = if task.completed {
        ("Done", "Mark open")
    } else {
        ("Open", "Mark done")
    };

    format!(
        "<tr>\n\
         <td>{title}</td>\n\
         <td>{description}</td>\n\
         <td>{deadline}</td>\n\
         <td>{status}</td>\n\
         <td>\n\
         <form method=\"post\" action=\"/tasks/{id}/toggle\"><button type=\"submit\">{toggle_label}</button></form>\n\
         <form method=\"post\" action=\"/tasks/{id}/delete\"><button type=\"submit\">Delete</button></form>\n\
         </td>\n\
         </tr>\n",
        title = escape(&task.title),
        description = escape(&task.description),
        deadline = deadline_display(task.deadline),
        status = status,
        id = task.id,
        toggle_label = toggle_label,
    )
}

/// The task creation form
pub fn task_form_page(form: &TaskForm, errors: &[FieldError]) -> String {
    let body = format!(
        "<h1>New task</h1>\n\
         {errors}\
         <form method=\"post\" action=\"/tasks/create\">\n\
         <label>Title <input type=\"text\" name=\"title\" value=\"{title}\"></label>\n\
         <label>Description <textarea name=\"description\">{description}</textarea></label>\n\
         <label>Deadline <input type=\"datetime-local\" name=\"deadline\" value=\"{deadline}\"></label>\n\
         <button type=\"submit\">Create</button>\n\
         </form>",
        errors = error_list(errors),
        title = escape(&form.title),
        description = escape(&form.description),
        deadline = deadline_input_value(form.deadline),
    );

    layout("New task", &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use uuid::Uuid;

    fn sample_task(title: &str, completed: bool) -> Task {
        Task {
            id: 1,
            user_id: Uuid::new_v4(),
            title: title.to_string(),
            description: "New Test Description".to_string(),
            deadline: Utc.with_ymd_and_hms(2030, 1, 15, 10, 30, 0).unwrap(),
            completed,
            author: "alice@mail.com".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_escape_covers_html_metacharacters() {
        assert_eq!(
            escape(r#"<script>alert("x&y")</script>"#),
            "&lt;script&gt;alert(&quot;x&amp;y&quot;)&lt;/script&gt;"
        );
        assert_eq!(escape("it's"), "it&#39;s");
        assert_eq!(escape("plain"), "plain");
    }

    #[test]
    fn test_register_page_echoes_values_but_not_passwords() {
        let form = RegisterForm {
            full_name: "Alice A".to_string(),
            email: "alice@mail.com".to_string(),
            password: "Secret123!".to_string(),
            confirm_password: "Secret123!".to_string(),
        };

        let html = register_page(&form, &[]);

        assert!(html.contains(r#"value="Alice A""#));
        assert!(html.contains(r#"value="alice@mail.com""#));
        assert!(!html.contains("Secret123!"));
    }

    #[test]
    fn test_register_page_escapes_submitted_values() {
        let form = RegisterForm {
            full_name: "<b>Alice</b>".to_string(),
            ..RegisterForm::default()
        };

        let html = register_page(&form, &[]);

        assert!(!html.contains("<b>Alice</b>"));
        assert!(html.contains("&lt;b&gt;Alice&lt;/b&gt;"));
    }

    #[test]
    fn test_error_messages_render() {
        let errors = vec![
            FieldError::new("email", "Invalid email format"),
            FieldError::new("", "Invalid email or password"),
        ];

        let html = login_page(&LoginForm::default(), &errors);

        assert!(html.contains("<li>Invalid email format</li>"));
        assert!(html.contains("<li>Invalid email or password</li>"));
    }

    #[test]
    fn test_login_page_remember_me_state() {
        let mut form = LoginForm::default();
        assert!(!login_page(&form, &[]).contains("checked"));

        form.remember_me = true;
        assert!(login_page(&form, &[]).contains("checked"));
    }

    #[test]
    fn test_task_list_empty_state() {
        let html = task_list_page(&[]);

        assert!(html.contains("No tasks yet"));
        assert!(!html.contains("<table>"));
    }

    #[test]
    fn test_task_list_rows() {
        let tasks = vec![sample_task("Read chapter 4", false), sample_task("Essay", true)];

        let html = task_list_page(&tasks);

        assert!(html.contains("Read chapter 4"));
        assert!(html.contains("2030-01-15 10:30"));
        assert!(html.contains("Open"));
        assert!(html.contains("Done"));
        assert!(html.contains(r#"action="/tasks/1/toggle""#));
        assert!(html.contains(r#"action="/tasks/1/delete""#));
    }

    #[test]
    fn test_task_list_escapes_content() {
        let html = task_list_page(&[sample_task("<img src=x>", false)]);

        assert!(!html.contains("<img src=x>"));
        assert!(html.contains("&lt;img src=x&gt;"));
    }

    #[test]
    fn test_task_form_page_deadline_value() {
        let form = TaskForm {
            title: "New Test Task".to_string(),
            description: String::new(),
            deadline: Utc.with_ymd_and_hms(2030, 1, 15, 10, 30, 0).unwrap(),
        };

        let html = task_form_page(&form, &[]);

        assert!(html.contains(r#"value="2030-01-15T10:30""#));
        assert!(html.contains(r#"value="New Test Task""#));
    }

    #[test]
    fn test_home_page_greets_signed_in_user() {
        let principal = Principal::new(Uuid::new_v4(), "alice@mail.com".to_string());

        assert!(home_page(Some(&principal)).contains("Signed in as alice@mail.com"));
        assert!(home_page(None).contains("log in"));
    }
}
