//! Server-rendered HTML pages.
//!
//! Every value that originates from a user goes through [`escape`] before it
//! is interpolated.

use std::fmt::Write;

use axum::response::Html;

use crate::domain::user::models::User;
use crate::inbound::http::flash::Flash;

/// Escape text for use in HTML element content and quoted attribute values.
pub fn escape(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn layout(title: &str, flash: Option<&Flash>, body: &str) -> Html<String> {
    let mut page = String::new();
    let _ = write!(
        page,
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
</head>
<body>
<main>
"#,
        title = escape(title),
    );

    if let Some(flash) = flash {
        let _ = write!(
            page,
            "<div class=\"alert alert-{}\" role=\"alert\">{}</div>\n",
            flash.level.as_str(),
            escape(&flash.message),
        );
    }

    page.push_str(body);
    page.push_str("\n</main>\n</body>\n</html>\n");
    Html(page)
}

pub fn login_page(flash: Option<&Flash>) -> Html<String> {
    layout(
        "Log in",
        flash,
        r#"<h1>Log in</h1>
<form method="post" action="/login">
<label for="username">Username</label>
<input type="text" id="username" name="username" required>
<label for="password">Password</label>
<input type="password" id="password" name="password" required>
<button type="submit">Log in</button>
</form>
<p>No account yet? <a href="/registro">Register</a></p>"#,
    )
}

pub fn register_page(flash: Option<&Flash>) -> Html<String> {
    layout(
        "Register",
        flash,
        r#"<h1>Register</h1>
<form method="post" action="/registro">
<label for="username">Username</label>
<input type="text" id="username" name="username" required>
<label for="email">Email</label>
<input type="email" id="email" name="email" required>
<label for="password">Password</label>
<input type="password" id="password" name="password" required>
<label for="confirm_password">Confirm password</label>
<input type="password" id="confirm_password" name="confirm_password" required>
<button type="submit">Register</button>
</form>
<p>Already registered? <a href="/login">Log in</a></p>"#,
    )
}

pub fn dashboard_page(user: &User, flash: Option<&Flash>) -> Html<String> {
    let body = format!(
        r#"<h1>Dashboard</h1>
<p>Hello, <strong class="username">{username}</strong>.</p>
<dl>
<dt>User id</dt><dd>{id}</dd>
<dt>Username</dt><dd>{username}</dd>
<dt>Email</dt><dd class="email">{email}</dd>
<dt>Member since</dt><dd>{since}</dd>
</dl>
<p><a href="/logout">Log out</a></p>"#,
        id = user.id,
        username = escape(user.username.as_str()),
        email = escape(user.email.as_str()),
        since = user.created_at.format("%Y-%m-%d"),
    );

    layout("Dashboard", flash, &body)
}

pub fn error_page(message: &str) -> Html<String> {
    let body = format!(
        "<h1>Something went wrong</h1>\n<p>{}</p>\n<p><a href=\"/\">Back</a></p>",
        escape(message)
    );

    layout("Error", None, &body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(
            escape(r#"<a href="x">'&'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&#x27;&amp;&#x27;&lt;/a&gt;"
        );
        assert_eq!(escape("alice"), "alice");
    }

    #[test]
    fn test_flash_is_rendered_escaped() {
        let Html(page) = login_page(Some(&Flash::danger("<b>no</b>")));

        assert!(page.contains(r#"class="alert alert-danger""#));
        assert!(page.contains("&lt;b&gt;no&lt;/b&gt;"));
        assert!(!page.contains("<b>no</b>"));
    }

    #[test]
    fn test_pages_without_flash_have_no_alert() {
        let Html(page) = register_page(None);

        assert!(!page.contains("alert"));
        assert!(page.contains(r#"name="confirm_password""#));
    }
}
